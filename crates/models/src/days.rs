use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not},
    str::FromStr,
};

#[cfg(feature = "database")]
use sea_orm::Value;

/// Represents the weekdays a section meets. Sections only meet Monday
/// through Friday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(transparent)]
pub struct DaySet(u8);

impl DaySet {
    // Constants for individual days
    pub const MONDAY: Self = DaySet(1 << 0);
    pub const TUESDAY: Self = DaySet(1 << 1);
    pub const WEDNESDAY: Self = DaySet(1 << 2);
    pub const THURSDAY: Self = DaySet(1 << 3);
    pub const FRIDAY: Self = DaySet(1 << 4);

    pub const ALL: Self = DaySet(0b11111);
    pub const NONE: Self = DaySet(0);

    /// Day-to-char mapping for parsing and display
    const DAY_CHARS: [(Self, char); 5] = [
        (Self::MONDAY, 'M'),
        (Self::TUESDAY, 'T'),
        (Self::WEDNESDAY, 'W'),
        (Self::THURSDAY, 'R'),
        (Self::FRIDAY, 'F'),
    ];

    pub fn new() -> Self {
        Self::NONE
    }

    pub fn contains(self, day: Self) -> bool {
        (self & day) == day
    }

    /// True when the two sets share at least one meeting day
    pub fn intersects(self, other: Self) -> bool {
        (self & other) != Self::NONE
    }

    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }

    pub fn set(&mut self, day: Self, value: bool) {
        if value {
            *self |= day;
        } else {
            *self &= !day;
        }
    }

    pub fn add(&mut self, day: Self) {
        *self |= day;
    }

    pub fn remove(&mut self, day: Self) {
        *self &= !day;
    }
}

/// Error returned when a day pattern contains a character outside "MTWRF"
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid day character '{0}' in day pattern")]
pub struct ParseDayError(pub char);

impl FromStr for DaySet {
    type Err = ParseDayError;

    fn from_str(days: &str) -> Result<Self, Self::Err> {
        let mut result = Self::NONE;

        for c in days.chars() {
            let day = Self::DAY_CHARS
                .iter()
                .find(|&&(_, day_char)| c == day_char)
                .map(|&(day, _)| day)
                .ok_or(ParseDayError(c))?;
            result |= day;
        }

        Ok(result)
    }
}

impl Display for DaySet {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut result = String::new();

        for &(day, day_char) in &Self::DAY_CHARS {
            if self.contains(day) {
                result.push(day_char);
            }
        }

        write!(f, "{result}")
    }
}

impl Serialize for DaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DaySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pattern = String::deserialize(deserializer)?;
        pattern.parse().map_err(serde::de::Error::custom)
    }
}

// Bitwise operators
impl BitOr for DaySet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        DaySet(self.0 | rhs.0)
    }
}

impl BitAnd for DaySet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        DaySet(self.0 & rhs.0)
    }
}

impl Not for DaySet {
    type Output = Self;

    fn not(self) -> Self::Output {
        // Apply mask to keep only 5 bits
        DaySet((!self.0) & 0x1F)
    }
}

impl BitOrAssign for DaySet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAndAssign for DaySet {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::ValueType for DaySet {
    fn try_from(v: Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
        match v {
            Value::String(Some(s)) => s.parse().map_err(|_| sea_orm::sea_query::ValueTypeErr),
            _ => Err(sea_orm::sea_query::ValueTypeErr),
        }
    }

    fn type_name() -> String {
        "DaySet".to_string()
    }

    fn array_type() -> sea_orm::sea_query::ArrayType {
        sea_orm::sea_query::ArrayType::String
    }

    fn column_type() -> sea_orm::sea_query::ColumnType {
        sea_orm::sea_query::ColumnType::String(sea_orm::sea_query::StringLen::N(5))
    }
}

#[cfg(feature = "database")]
impl From<DaySet> for Value {
    fn from(days: DaySet) -> Self {
        // Stored as the day-pattern string, e.g. "MWF"
        Value::String(Some(Box::new(days.to_string())))
    }
}

#[cfg(feature = "database")]
impl sea_orm::TryGetable for DaySet {
    fn try_get_by<I: sea_orm::ColIdx>(
        res: &sea_orm::QueryResult,
        index: I,
    ) -> Result<Self, sea_orm::TryGetError> {
        let val: String = res.try_get_by(index)?;

        val.parse().map_err(|e| {
            sea_orm::TryGetError::DbErr(sea_orm::DbErr::Type(format!(
                "Failed to parse DaySet: {e}"
            )))
        })
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::Nullable for DaySet {
    fn null() -> Value {
        Value::String(None)
    }
}

#[cfg(test)]
mod test {
    use crate::days::DaySet;
    use std::str::FromStr;

    #[test]
    fn test_day_set_from_str() {
        let days = DaySet::from_str("MWF").unwrap();
        assert!(days.contains(DaySet::MONDAY));
        assert!(!days.contains(DaySet::TUESDAY));
        assert!(days.contains(DaySet::WEDNESDAY));
        assert!(!days.contains(DaySet::THURSDAY));
        assert!(days.contains(DaySet::FRIDAY));
    }

    #[test]
    fn test_day_set_rejects_invalid_chars() {
        assert!(DaySet::from_str("MWX").is_err());
        assert!(DaySet::from_str("Sat").is_err());
        assert!(DaySet::from_str("").unwrap().is_empty());
    }

    #[test]
    fn test_day_set_display() {
        let mut days = DaySet::new();
        days.add(DaySet::MONDAY);
        days.add(DaySet::WEDNESDAY);
        days.add(DaySet::FRIDAY);

        assert_eq!(days.to_string(), "MWF");
    }

    #[test]
    fn test_day_set_round_trip() {
        for pattern in ["M", "TR", "MWF", "MTWRF", ""] {
            let days = DaySet::from_str(pattern).unwrap();
            assert_eq!(days.to_string(), pattern);
        }
    }

    #[test]
    fn test_day_set_intersects() {
        let mwf = DaySet::MONDAY | DaySet::WEDNESDAY | DaySet::FRIDAY;
        let tr = DaySet::TUESDAY | DaySet::THURSDAY;
        let wr = DaySet::WEDNESDAY | DaySet::THURSDAY;

        assert!(!mwf.intersects(tr));
        assert!(mwf.intersects(wr));
        assert!(tr.intersects(wr));
        assert!(!DaySet::NONE.intersects(DaySet::ALL));
    }

    #[test]
    fn test_day_set_bitwise_operations() {
        let mwf = DaySet::MONDAY | DaySet::WEDNESDAY | DaySet::FRIDAY;
        assert!(mwf.contains(DaySet::MONDAY));
        assert!(!mwf.contains(DaySet::TUESDAY));
        assert!(mwf.contains(DaySet::WEDNESDAY));
        assert!(!mwf.contains(DaySet::THURSDAY));
        assert!(mwf.contains(DaySet::FRIDAY));

        assert_eq!(DaySet::ALL.to_string(), "MTWRF");
        assert_eq!((!mwf).to_string(), "TR");
    }
}

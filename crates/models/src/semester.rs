use chrono::{Datelike, NaiveDate};
use sea_orm::{DeriveActiveEnum, EnumIter, sea_query::StringLen};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Academic term within a year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
#[serde(rename_all = "lowercase")]
pub enum Semester {
    #[sea_orm(string_value = "fall")]
    Fall,
    #[sea_orm(string_value = "spring")]
    Spring,
    #[sea_orm(string_value = "summer")]
    Summer,
}

impl Semester {
    /// The semester in progress during the given month (1-12):
    /// August-December is fall, January-May is spring, the rest is summer
    pub fn for_month(month: u32) -> Self {
        match month {
            8..=12 => Self::Fall,
            1..=5 => Self::Spring,
            _ => Self::Summer,
        }
    }

    pub fn for_date(date: NaiveDate) -> Self {
        Self::for_month(date.month())
    }
}

/// Custom error type for parsing semesters
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown semester '{0}'")]
pub struct ParseSemesterError(pub String);

impl FromStr for Semester {
    type Err = ParseSemesterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fall" => Ok(Self::Fall),
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            other => Err(ParseSemesterError(other.to_string())),
        }
    }
}

impl Display for Semester {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Fall => write!(f, "fall"),
            Self::Spring => write!(f, "spring"),
            Self::Summer => write!(f, "summer"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semester_by_month() {
        assert_eq!(Semester::for_month(1), Semester::Spring);
        assert_eq!(Semester::for_month(5), Semester::Spring);
        assert_eq!(Semester::for_month(6), Semester::Summer);
        assert_eq!(Semester::for_month(7), Semester::Summer);
        assert_eq!(Semester::for_month(8), Semester::Fall);
        assert_eq!(Semester::for_month(12), Semester::Fall);
    }

    #[test]
    fn test_semester_for_date() {
        let date = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        assert_eq!(Semester::for_date(date), Semester::Fall);
    }

    #[test]
    fn test_semester_parse_round_trip() {
        for text in ["fall", "spring", "summer"] {
            let semester = Semester::from_str(text).unwrap();
            assert_eq!(semester.to_string(), text);
        }

        assert!(Semester::from_str("winter").is_err());
    }
}

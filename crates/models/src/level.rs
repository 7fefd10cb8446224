use sea_orm::{DeriveActiveEnum, EnumIter, sea_query::StringLen};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Academic tier of a student or course.
///
/// Ordering matters: a student may take courses at their own level or any
/// level below it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum AcademicLevel {
    #[sea_orm(string_value = "undergraduate")]
    Undergraduate,
    #[sea_orm(string_value = "graduate")]
    Graduate,
    #[sea_orm(string_value = "doctoral")]
    Doctoral,
}

/// Credit and GPA thresholds a student must reach before moving up a level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UpgradeRequirements {
    pub next_level: AcademicLevel,
    pub required_credits: i32,
    pub required_gpa: f64,
}

impl AcademicLevel {
    /// Whether a student at this level may register for a course at
    /// `course_level`
    pub fn allows(self, course_level: AcademicLevel) -> bool {
        course_level <= self
    }

    /// Maximum credits a student at this level may hold in one semester
    pub fn semester_credit_limit(self) -> i32 {
        match self {
            Self::Undergraduate => 18,
            Self::Graduate => 12,
            Self::Doctoral => 9,
        }
    }

    pub fn next(self) -> Option<AcademicLevel> {
        match self {
            Self::Undergraduate => Some(Self::Graduate),
            Self::Graduate => Some(Self::Doctoral),
            Self::Doctoral => None,
        }
    }

    /// Thresholds for promotion to the next level, if one exists.
    ///
    /// Graduate promotion counts only completed graduate-level credits.
    pub fn upgrade_requirements(self) -> Option<UpgradeRequirements> {
        match self {
            Self::Undergraduate => Some(UpgradeRequirements {
                next_level: Self::Graduate,
                required_credits: 120,
                required_gpa: 3.0,
            }),
            Self::Graduate => Some(UpgradeRequirements {
                next_level: Self::Doctoral,
                required_credits: 30,
                required_gpa: 3.5,
            }),
            Self::Doctoral => None,
        }
    }
}

/// Custom error type for parsing academic levels
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown academic level '{0}'")]
pub struct ParseLevelError(pub String);

impl FromStr for AcademicLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "undergraduate" => Ok(Self::Undergraduate),
            "graduate" => Ok(Self::Graduate),
            "doctoral" => Ok(Self::Doctoral),
            other => Err(ParseLevelError(other.to_string())),
        }
    }
}

impl Display for AcademicLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Undergraduate => write!(f, "undergraduate"),
            Self::Graduate => write!(f, "graduate"),
            Self::Doctoral => write!(f, "doctoral"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_access() {
        use AcademicLevel::*;

        assert!(Undergraduate.allows(Undergraduate));
        assert!(!Undergraduate.allows(Graduate));
        assert!(!Undergraduate.allows(Doctoral));

        assert!(Graduate.allows(Undergraduate));
        assert!(Graduate.allows(Graduate));
        assert!(!Graduate.allows(Doctoral));

        assert!(Doctoral.allows(Undergraduate));
        assert!(Doctoral.allows(Graduate));
        assert!(Doctoral.allows(Doctoral));
    }

    #[test]
    fn test_credit_limits() {
        assert_eq!(AcademicLevel::Undergraduate.semester_credit_limit(), 18);
        assert_eq!(AcademicLevel::Graduate.semester_credit_limit(), 12);
        assert_eq!(AcademicLevel::Doctoral.semester_credit_limit(), 9);
    }

    #[test]
    fn test_upgrade_requirements() {
        let ugrad = AcademicLevel::Undergraduate.upgrade_requirements().unwrap();
        assert_eq!(ugrad.next_level, AcademicLevel::Graduate);
        assert_eq!(ugrad.required_credits, 120);
        assert_eq!(ugrad.required_gpa, 3.0);

        let grad = AcademicLevel::Graduate.upgrade_requirements().unwrap();
        assert_eq!(grad.next_level, AcademicLevel::Doctoral);
        assert_eq!(grad.required_credits, 30);
        assert_eq!(grad.required_gpa, 3.5);

        assert!(AcademicLevel::Doctoral.upgrade_requirements().is_none());
        assert!(AcademicLevel::Doctoral.next().is_none());
    }

    #[test]
    fn test_level_parse_round_trip() {
        for text in ["undergraduate", "graduate", "doctoral"] {
            let level = AcademicLevel::from_str(text).unwrap();
            assert_eq!(level.to_string(), text);
        }

        assert!(AcademicLevel::from_str("postdoc").is_err());
    }
}

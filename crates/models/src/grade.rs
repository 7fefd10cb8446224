use sea_orm::{DeriveActiveEnum, EnumIter, sea_query::StringLen};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Letter grade recorded on a completed enrollment.
///
/// `W` (withdrawn) and `I` (incomplete) appear on the transcript but carry
/// no grade points and are excluded from GPA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(2))")]
pub enum Grade {
    #[sea_orm(string_value = "A+")]
    #[serde(rename = "A+")]
    APlus,
    #[sea_orm(string_value = "A")]
    #[serde(rename = "A")]
    A,
    #[sea_orm(string_value = "A-")]
    #[serde(rename = "A-")]
    AMinus,
    #[sea_orm(string_value = "B+")]
    #[serde(rename = "B+")]
    BPlus,
    #[sea_orm(string_value = "B")]
    #[serde(rename = "B")]
    B,
    #[sea_orm(string_value = "B-")]
    #[serde(rename = "B-")]
    BMinus,
    #[sea_orm(string_value = "C+")]
    #[serde(rename = "C+")]
    CPlus,
    #[sea_orm(string_value = "C")]
    #[serde(rename = "C")]
    C,
    #[sea_orm(string_value = "C-")]
    #[serde(rename = "C-")]
    CMinus,
    #[sea_orm(string_value = "D+")]
    #[serde(rename = "D+")]
    DPlus,
    #[sea_orm(string_value = "D")]
    #[serde(rename = "D")]
    D,
    #[sea_orm(string_value = "F")]
    #[serde(rename = "F")]
    F,
    #[sea_orm(string_value = "W")]
    #[serde(rename = "W")]
    W,
    #[sea_orm(string_value = "I")]
    #[serde(rename = "I")]
    I,
}

impl Grade {
    const GRADE_STRS: [(Self, &'static str); 14] = [
        (Self::APlus, "A+"),
        (Self::A, "A"),
        (Self::AMinus, "A-"),
        (Self::BPlus, "B+"),
        (Self::B, "B"),
        (Self::BMinus, "B-"),
        (Self::CPlus, "C+"),
        (Self::C, "C"),
        (Self::CMinus, "C-"),
        (Self::DPlus, "D+"),
        (Self::D, "D"),
        (Self::F, "F"),
        (Self::W, "W"),
        (Self::I, "I"),
    ];

    /// Grade-point value on the 4.0 scale, or `None` for W/I
    pub fn grade_points(self) -> Option<f64> {
        match self {
            Self::APlus | Self::A => Some(4.0),
            Self::AMinus => Some(3.7),
            Self::BPlus => Some(3.3),
            Self::B => Some(3.0),
            Self::BMinus => Some(2.7),
            Self::CPlus => Some(2.3),
            Self::C => Some(2.0),
            Self::CMinus => Some(1.7),
            Self::DPlus => Some(1.3),
            Self::D => Some(1.0),
            Self::F => Some(0.0),
            Self::W | Self::I => None,
        }
    }

    /// True when the grade counts as a pass for prerequisite purposes
    pub fn is_passing(self) -> bool {
        !matches!(self, Self::F | Self::W | Self::I)
    }
}

/// Custom error type for parsing grades
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown grade '{0}'")]
pub struct ParseGradeError(pub String);

impl FromStr for Grade {
    type Err = ParseGradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::GRADE_STRS
            .iter()
            .find(|&&(_, text)| text == s)
            .map(|&(grade, _)| grade)
            .ok_or_else(|| ParseGradeError(s.to_string()))
    }
}

impl Display for Grade {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let text = Self::GRADE_STRS
            .iter()
            .find(|&&(grade, _)| grade == *self)
            .map(|&(_, text)| text)
            .unwrap_or("?");

        write!(f, "{text}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_points() {
        assert_eq!(Grade::APlus.grade_points(), Some(4.0));
        assert_eq!(Grade::A.grade_points(), Some(4.0));
        assert_eq!(Grade::AMinus.grade_points(), Some(3.7));
        assert_eq!(Grade::B.grade_points(), Some(3.0));
        assert_eq!(Grade::CMinus.grade_points(), Some(1.7));
        assert_eq!(Grade::DPlus.grade_points(), Some(1.3));
        assert_eq!(Grade::F.grade_points(), Some(0.0));
        assert_eq!(Grade::W.grade_points(), None);
        assert_eq!(Grade::I.grade_points(), None);
    }

    #[test]
    fn test_grade_parse_round_trip() {
        for text in ["A+", "A", "A-", "B+", "B", "B-", "C+", "C", "C-", "D+", "D", "F", "W", "I"] {
            let grade = Grade::from_str(text).unwrap();
            assert_eq!(grade.to_string(), text);
        }
    }

    #[test]
    fn test_grade_parse_errors() {
        assert!(Grade::from_str("E").is_err());
        assert!(Grade::from_str("a").is_err());
        assert!(Grade::from_str("").is_err());
    }

    #[test]
    fn test_passing_grades() {
        assert!(Grade::A.is_passing());
        assert!(Grade::D.is_passing());
        assert!(!Grade::F.is_passing());
        assert!(!Grade::W.is_passing());
        assert!(!Grade::I.is_passing());
    }
}

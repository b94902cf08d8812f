use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The three strands of a memorization day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewKind {
    /// New material.
    Sabak,
    /// Recent review.
    Dour,
    /// Long-cycle review.
    Manzil,
}

impl ReviewKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewKind::Sabak => "sabak",
            ReviewKind::Dour => "dour",
            ReviewKind::Manzil => "manzil",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ReviewKind::Sabak => "Sabak",
            ReviewKind::Dour => "Dour",
            ReviewKind::Manzil => "Manzil",
        }
    }

    pub fn is_revision(&self) -> bool {
        !matches!(self, ReviewKind::Sabak)
    }
}

impl std::fmt::Display for ReviewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for ReviewKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sabak" | "sabaq" | "new" => Ok(ReviewKind::Sabak),
            "dour" | "dhor" | "daur" | "recent" => Ok(ReviewKind::Dour),
            "manzil" | "manzel" => Ok(ReviewKind::Manzil),
            _ => Err(anyhow::anyhow!("Unknown review kind: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewEntry {
    pub id: Option<i64>,
    pub date: NaiveDate,
    pub kind: ReviewKind,
    pub pages: f64,
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kinds_and_aliases() {
        assert_eq!("sabak".parse::<ReviewKind>().unwrap(), ReviewKind::Sabak);
        assert_eq!("Sabaq".parse::<ReviewKind>().unwrap(), ReviewKind::Sabak);
        assert_eq!(" DHOR ".parse::<ReviewKind>().unwrap(), ReviewKind::Dour);
        assert_eq!("manzil".parse::<ReviewKind>().unwrap(), ReviewKind::Manzil);
        assert!("tilawah".parse::<ReviewKind>().is_err());
    }

    #[test]
    fn only_sabak_is_new_material() {
        assert!(!ReviewKind::Sabak.is_revision());
        assert!(ReviewKind::Dour.is_revision());
        assert!(ReviewKind::Manzil.is_revision());
    }

    #[test]
    fn as_str_round_trips() {
        for kind in [ReviewKind::Sabak, ReviewKind::Dour, ReviewKind::Manzil] {
            assert_eq!(kind.as_str().parse::<ReviewKind>().unwrap(), kind);
        }
    }
}

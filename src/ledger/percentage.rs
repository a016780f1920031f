use std::fmt;

use serde::{Deserialize, Serialize};

/// Whole-number share of total income, or undefined while no income exists.
///
/// Serialized as an integer where `-1` stands for [`Percentage::Undefined`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(from = "i64", into = "i64")]
pub enum Percentage {
    #[default]
    Undefined,
    Percent(u32),
}

impl Percentage {
    pub const SENTINEL: i64 = -1;

    /// `part / whole` as a rounded percent; undefined unless `whole > 0`.
    ///
    /// Rounds half away from zero, so 12.5% becomes 13%.
    pub fn of(part: f64, whole: f64) -> Self {
        if whole > 0.0 {
            let percent = ((part / whole) * 100.0).round();
            Percentage::Percent(percent.max(0.0) as u32)
        } else {
            Percentage::Undefined
        }
    }

    pub fn value(self) -> Option<u32> {
        match self {
            Percentage::Undefined => None,
            Percentage::Percent(value) => Some(value),
        }
    }

    pub fn to_sentinel(self) -> i64 {
        match self {
            Percentage::Undefined => Self::SENTINEL,
            Percentage::Percent(value) => i64::from(value),
        }
    }
}

impl From<i64> for Percentage {
    fn from(raw: i64) -> Self {
        u32::try_from(raw)
            .map(Percentage::Percent)
            .unwrap_or(Percentage::Undefined)
    }
}

impl From<Percentage> for i64 {
    fn from(percentage: Percentage) -> Self {
        percentage.to_sentinel()
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Percentage::Undefined => f.write_str("undefined"),
            Percentage::Percent(value) => write!(f, "{value}%"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(Percentage::of(125.0, 1000.0), Percentage::Percent(13));
        assert_eq!(Percentage::of(124.9, 1000.0), Percentage::Percent(12));
        assert_eq!(Percentage::of(50.0, 200.0), Percentage::Percent(25));
    }

    #[test]
    fn undefined_without_positive_income() {
        assert_eq!(Percentage::of(10.0, 0.0), Percentage::Undefined);
        assert_eq!(Percentage::of(10.0, -5.0), Percentage::Undefined);
        assert_eq!(Percentage::Undefined.to_sentinel(), -1);
    }

    #[test]
    fn may_exceed_one_hundred() {
        assert_eq!(Percentage::of(300.0, 100.0), Percentage::Percent(300));
    }

    #[test]
    fn serializes_with_sentinel() {
        let json = serde_json::to_string(&Percentage::Undefined).unwrap();
        assert_eq!(json, "-1");
        let parsed: Percentage = serde_json::from_str("30").unwrap();
        assert_eq!(parsed, Percentage::Percent(30));
    }
}

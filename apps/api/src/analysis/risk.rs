use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analysis::proficiency::ParseLevelError;

/// Placement risk bucket derived from the match percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Critical,
}

/// Lower bounds, checked high to low. A value on a bound takes the better tier.
const TIER_THRESHOLDS: &[(u8, RiskTier)] = &[
    (80, RiskTier::Low),
    (60, RiskTier::Medium),
    (40, RiskTier::High),
];

impl RiskTier {
    pub fn from_percentage(match_percentage: u8) -> Self {
        TIER_THRESHOLDS
            .iter()
            .find(|(floor, _)| match_percentage >= *floor)
            .map(|(_, tier)| *tier)
            .unwrap_or(RiskTier::Critical)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "LOW",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
            RiskTier::Critical => "CRITICAL",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RiskTier::Low => "Excellent - very good placement chances.",
            RiskTier::Medium => "Fair - some upskilling needed for better chances.",
            RiskTier::High => "Poor - significant upskilling required.",
            RiskTier::Critical => "Critical - major skill gaps, start learning immediately.",
        }
    }
}

impl FromStr for RiskTier {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(RiskTier::Low),
            "MEDIUM" => Ok(RiskTier::Medium),
            "HIGH" => Ok(RiskTier::High),
            "CRITICAL" => Ok(RiskTier::Critical),
            other => Err(ParseLevelError {
                kind: "risk tier",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_resolve_to_better_tier() {
        assert_eq!(RiskTier::from_percentage(80), RiskTier::Low);
        assert_eq!(RiskTier::from_percentage(79), RiskTier::Medium);
        assert_eq!(RiskTier::from_percentage(60), RiskTier::Medium);
        assert_eq!(RiskTier::from_percentage(59), RiskTier::High);
        assert_eq!(RiskTier::from_percentage(40), RiskTier::High);
        assert_eq!(RiskTier::from_percentage(39), RiskTier::Critical);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(RiskTier::from_percentage(0), RiskTier::Critical);
        assert_eq!(RiskTier::from_percentage(100), RiskTier::Low);
    }

    #[test]
    fn test_serializes_as_upper_case_label() {
        assert_eq!(
            serde_json::to_string(&RiskTier::Critical).unwrap(),
            "\"CRITICAL\""
        );
        assert_eq!("MEDIUM".parse::<RiskTier>(), Ok(RiskTier::Medium));
    }
}

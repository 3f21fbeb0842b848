//! Three-tier verdict derived from the teacher probability

use serde::{Deserialize, Serialize};
use std::fmt;

/// Percentages strictly above this are `Likely`
pub const LIKELY_THRESHOLD: f64 = 70.0;
/// Percentages strictly above this (and not above `LIKELY_THRESHOLD`) are `Possible`
pub const POSSIBLE_THRESHOLD: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Likely,
    Possible,
    Unlikely,
}

impl Verdict {
    /// Map a percentage in [0, 100]; boundaries fall to the lower tier.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage > LIKELY_THRESHOLD {
            Verdict::Likely
        } else if percentage > POSSIBLE_THRESHOLD {
            Verdict::Possible
        } else {
            Verdict::Unlikely
        }
    }

    /// Map a probability in [0, 1]. The comparison is made on the scaled
    /// value, so `0.3` (30.000000000000004 after scaling) is `Possible`.
    pub fn from_probability(probability: f64) -> Self {
        Self::from_percentage(probability * 100.0)
    }

    /// Conclusion shown to the user
    pub fn conclusion(&self) -> &'static str {
        match self {
            Verdict::Likely => "Это резюме преподавателя!",
            Verdict::Possible => "Возможно, это резюме преподавателя",
            Verdict::Unlikely => "Это не похоже на резюме преподавателя",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Verdict::Likely => "Likely",
            Verdict::Possible => "Possible",
            Verdict::Unlikely => "Unlikely",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_boundary() {
        assert_eq!(Verdict::from_percentage(70.0), Verdict::Possible);
        assert_eq!(Verdict::from_percentage(70.01), Verdict::Likely);
    }

    #[test]
    fn test_lower_boundary() {
        assert_eq!(Verdict::from_percentage(30.0), Verdict::Unlikely);
        assert_eq!(Verdict::from_percentage(30.01), Verdict::Possible);
    }

    #[test]
    fn test_probability_is_compared_after_scaling() {
        assert_eq!(Verdict::from_probability(0.3), Verdict::Possible);
        assert_eq!(Verdict::from_probability(0.7), Verdict::Possible);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(Verdict::from_probability(1.0), Verdict::Likely);
        assert_eq!(Verdict::from_probability(0.0), Verdict::Unlikely);
        assert_eq!(Verdict::from_probability(0.85), Verdict::Likely);
        assert_eq!(Verdict::from_probability(0.5), Verdict::Possible);
    }

    #[test]
    fn test_conclusions_are_distinct() {
        assert_ne!(Verdict::Likely.conclusion(), Verdict::Possible.conclusion());
        assert_ne!(Verdict::Possible.conclusion(), Verdict::Unlikely.conclusion());
        assert_eq!(Verdict::Likely.to_string(), "Likely");
    }
}

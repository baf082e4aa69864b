//! Total body water estimation
//!
//! Watson equations for adult total body water, used as the distribution
//! volume for ethanol.

use serde::{Deserialize, Serialize};

/// Biological sex as used by the Watson equations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    /// Parse from string. Anything other than the two categories is `None`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Some(Sex::Male),
            "female" | "f" => Some(Sex::Female),
            _ => None,
        }
    }
}

/// Estimate total body water in liters.
///
/// - male: `2.447 - 0.09516*age + 0.1074*height + 0.3362*weight`
/// - female: `-2.097 + 0.1069*height + 0.2466*weight`
///
/// Inputs are not checked; implausibly small bodies yield negative volumes.
pub fn estimate_tbw(sex: Sex, weight_kg: f64, height_cm: f64, age_years: u32) -> f64 {
    match sex {
        Sex::Male => {
            2.447 - 0.09516 * f64::from(age_years) + 0.1074 * height_cm + 0.3362 * weight_kg
        }
        Sex::Female => -2.097 + 0.1069 * height_cm + 0.2466 * weight_kg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_male_tbw() {
        let tbw = estimate_tbw(Sex::Male, 80.0, 180.0, 30);
        assert!((tbw - 45.8202).abs() < 1e-9);
    }

    #[test]
    fn test_female_tbw_ignores_age() {
        let young = estimate_tbw(Sex::Female, 60.0, 165.0, 20);
        let old = estimate_tbw(Sex::Female, 60.0, 165.0, 80);
        assert_eq!(young, old);
        // -2.097 + 17.6385 + 14.796
        assert!((young - 30.3375).abs() < 1e-9);
    }

    #[test]
    fn test_tbw_is_deterministic() {
        let a = estimate_tbw(Sex::Male, 72.5, 175.5, 44);
        let b = estimate_tbw(Sex::Male, 72.5, 175.5, 44);
        assert_eq!(a, b);
    }

    #[test]
    fn test_tbw_can_go_negative() {
        assert!(estimate_tbw(Sex::Female, 1.0, 10.0, 30) < 0.0);
    }

    #[test]
    fn test_sex_from_str() {
        assert_eq!(Sex::from_str("male"), Some(Sex::Male));
        assert_eq!(Sex::from_str(" Female "), Some(Sex::Female));
        assert_eq!(Sex::from_str("M"), Some(Sex::Male));
        assert_eq!(Sex::from_str("other"), None);
        assert_eq!(Sex::from_str(""), None);
    }
}

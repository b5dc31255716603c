//! Blood typing primitives

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::errors::LifelinkError;

/// The eight ABO/Rh blood groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodType {
    APositive,
    ANegative,
    BPositive,
    BNegative,
    AbPositive,
    AbNegative,
    OPositive,
    ONegative,
}

impl BloodType {
    pub const ALL: [BloodType; 8] = [
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::OPositive,
        BloodType::ONegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::AbPositive => "AB+",
            BloodType::AbNegative => "AB-",
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodType {
    type Err = LifelinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A+" => Ok(BloodType::APositive),
            "A-" => Ok(BloodType::ANegative),
            "B+" => Ok(BloodType::BPositive),
            "B-" => Ok(BloodType::BNegative),
            "AB+" => Ok(BloodType::AbPositive),
            "AB-" => Ok(BloodType::AbNegative),
            "O+" => Ok(BloodType::OPositive),
            "O-" => Ok(BloodType::ONegative),
            other => Err(LifelinkError::InvalidInput(format!(
                "Unknown blood type: {}",
                other
            ))),
        }
    }
}

/// Urgency of a blood request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "CRITICAL",
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }

    /// Priorities surfaced on the public emergency board
    pub fn is_urgent(&self) -> bool {
        matches!(self, Priority::Critical | Priority::High)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = LifelinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CRITICAL" => Ok(Priority::Critical),
            "HIGH" => Ok(Priority::High),
            "MEDIUM" => Ok(Priority::Medium),
            "LOW" => Ok(Priority::Low),
            other => Err(LifelinkError::InvalidInput(format!(
                "Unknown priority: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blood_type_round_trip() {
        for bt in BloodType::ALL {
            let parsed: BloodType = bt.as_str().parse().unwrap();
            assert_eq!(parsed, bt);
        }
    }

    #[test]
    fn test_blood_type_parse_is_lenient_about_case_and_whitespace() {
        assert_eq!(" ab+ ".parse::<BloodType>().unwrap(), BloodType::AbPositive);
        assert_eq!("o-".parse::<BloodType>().unwrap(), BloodType::ONegative);
    }

    #[test]
    fn test_blood_type_rejects_unknown() {
        assert!("C+".parse::<BloodType>().is_err());
        assert!("".parse::<BloodType>().is_err());
    }

    #[test]
    fn test_priority_urgency() {
        assert!(Priority::Critical.is_urgent());
        assert!(Priority::High.is_urgent());
        assert!(!Priority::Medium.is_urgent());
        assert!(!Priority::Low.is_urgent());
    }

    #[test]
    fn test_priority_round_trip() {
        for p in [
            Priority::Critical,
            Priority::High,
            Priority::Medium,
            Priority::Low,
        ] {
            assert_eq!(p.as_str().parse::<Priority>().unwrap(), p);
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// How often a recurring purchase happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    /// Every 7 days
    #[default]
    Weekly,
    /// Every 14 days
    Biweekly,
    /// Same day-of-month every calendar month
    Monthly,
}

impl Cadence {
    /// Fixed day step for day-based cadences, `None` for calendar-month stepping.
    pub fn step_days(&self) -> Option<u64> {
        match self {
            Cadence::Weekly => Some(7),
            Cadence::Biweekly => Some(14),
            Cadence::Monthly => None,
        }
    }
}

impl std::fmt::Display for Cadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cadence::Weekly => write!(f, "weekly"),
            Cadence::Biweekly => write!(f, "biweekly"),
            Cadence::Monthly => write!(f, "monthly"),
        }
    }
}

impl std::str::FromStr for Cadence {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Ok(Cadence::Weekly),
            "biweekly" | "bi-weekly" => Ok(Cadence::Biweekly),
            "monthly" => Ok(Cadence::Monthly),
            _ => Err(CoreError::InvalidCadence(s.to_string())),
        }
    }
}

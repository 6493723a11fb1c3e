//! Identifiers for stored pricing outcomes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const CALCULATION_RESULT_PREFIX: &str = "CALC";

/// Identifies a stored calculation result (UUID v7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalculationResultId(Uuid);

impl CalculationResultId {
    pub fn new_v7() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CalculationResultId {
    fn default() -> Self {
        Self::new_v7()
    }
}

impl fmt::Display for CalculationResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", CALCULATION_RESULT_PREFIX, self.0)
    }
}

impl FromStr for CalculationResultId {
    type Err = uuid::Error;

    /// Accepts the displayed form or a bare UUID
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .strip_prefix(CALCULATION_RESULT_PREFIX)
            .and_then(|rest| rest.strip_prefix('-'))
            .unwrap_or(s);
        Ok(Self(Uuid::parse_str(raw)?))
    }
}

impl From<Uuid> for CalculationResultId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

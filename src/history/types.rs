use crate::{Error, analysis::Species};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Manually estimated vet urgency, 0 (low) to 100 (high). Never derived from
/// the model output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Urgency(u8);

impl Urgency {
    pub const MAX: u8 = 100;

    pub fn new(value: u32) -> Result<Self, Error> {
        if value > u32::from(Self::MAX) {
            return Err(Error::validation(format!(
                "Urgency must be between 0 and {}, got {}",
                Self::MAX,
                value
            )));
        }
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u32> for Urgency {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Urgency> for u32 {
    fn from(urgency: Urgency) -> Self {
        u32::from(urgency.0)
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub species: Species,
    pub symptom_text: String,
    pub urgency: Urgency,
    pub generated_text: String,
    pub saved_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(
        species: Species,
        symptom_text: String,
        urgency: Urgency,
        generated_text: String,
    ) -> Self {
        Self {
            species,
            symptom_text,
            urgency,
            generated_text,
            saved_at: Utc::now(),
        }
    }
}

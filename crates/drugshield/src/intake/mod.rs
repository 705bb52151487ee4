//! Turns case files and CSV exports into validated scoring input.

mod parser;

pub use parser::{
    read_interactions, read_interactions_from_path, read_medications, read_medications_from_path,
};

use crate::config::InputLimits;
use crate::scoring::{InteractionFact, MedicationRecord};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed CSV input: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed JSON case file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("age {age} is outside the accepted range {min}..={max}")]
    AgeOutOfRange { age: u16, min: u8, max: u8 },
    #[error("at least one medication is required")]
    NoMedications,
    #[error("{count} medications exceeds the limit of {max}")]
    TooManyMedications { count: usize, max: usize },
    #[error("medication at position {position} has a blank name")]
    BlankMedicationName { position: usize },
    #[error("no case file or medication list was provided")]
    MissingInput,
}

/// One scoring case: the patient's age, their medications and any known interaction facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub age: u16,
    pub medications: Vec<MedicationRecord>,
    #[serde(default)]
    pub interactions: Vec<InteractionFact>,
}

impl ScoreRequest {
    pub fn new(
        age: u16,
        medications: Vec<MedicationRecord>,
        interactions: Vec<InteractionFact>,
    ) -> Self {
        Self {
            age,
            medications,
            interactions,
        }
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, IntakeError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self, IntakeError> {
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }

    /// Checks caller preconditions and returns the age narrowed for the engine.
    pub fn validate(&self, limits: &InputLimits) -> Result<u8, IntakeError> {
        let age = u8::try_from(self.age)
            .ok()
            .filter(|age| (limits.min_age..=limits.max_age).contains(age))
            .ok_or(IntakeError::AgeOutOfRange {
                age: self.age,
                min: limits.min_age,
                max: limits.max_age,
            })?;

        if self.medications.is_empty() {
            return Err(IntakeError::NoMedications);
        }
        if self.medications.len() > limits.max_medications {
            return Err(IntakeError::TooManyMedications {
                count: self.medications.len(),
                max: limits.max_medications,
            });
        }
        if let Some(position) = self
            .medications
            .iter()
            .position(|medication| medication.raw_name.trim().is_empty())
        {
            return Err(IntakeError::BlankMedicationName { position });
        }

        Ok(age)
    }
}

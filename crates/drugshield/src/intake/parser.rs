use super::IntakeError;
use crate::scoring::{InteractionFact, MedicationRecord, Severity};
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Reads a medication list with a required `name` column.
pub fn read_medications<R: Read>(reader: R) -> Result<Vec<MedicationRecord>, IntakeError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut medications = Vec::new();

    for record in csv_reader.deserialize::<MedicationRow>() {
        medications.push(record?.into_record());
    }

    tracing::debug!(count = medications.len(), "medication rows parsed");
    Ok(medications)
}

pub fn read_medications_from_path(
    path: impl AsRef<Path>,
) -> Result<Vec<MedicationRecord>, IntakeError> {
    read_medications(File::open(path)?)
}

/// Reads interaction facts; severity text is normalized the same way as in case files.
pub fn read_interactions<R: Read>(reader: R) -> Result<Vec<InteractionFact>, IntakeError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut interactions = Vec::new();

    for record in csv_reader.deserialize::<InteractionRow>() {
        let row = record?;
        interactions.push(InteractionFact::new(
            row.drug_a,
            row.drug_b,
            Severity::from_label(row.severity.as_deref().unwrap_or_default()),
            row.evidence.unwrap_or_default(),
        ));
    }

    tracing::debug!(count = interactions.len(), "interaction rows parsed");
    Ok(interactions)
}

pub fn read_interactions_from_path(
    path: impl AsRef<Path>,
) -> Result<Vec<InteractionFact>, IntakeError> {
    read_interactions(File::open(path)?)
}

#[derive(Debug, Deserialize)]
struct MedicationRow {
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    normalized_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    identifier: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    dose: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    frequency: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    note: Option<String>,
}

impl MedicationRow {
    fn into_record(self) -> MedicationRecord {
        MedicationRecord {
            raw_name: self.name,
            normalized_name: self.normalized_name.unwrap_or_default(),
            identifier: self.identifier,
            dose: self.dose,
            frequency: self.frequency,
            note: self.note,
        }
    }
}

#[derive(Debug, Deserialize)]
struct InteractionRow {
    drug_a: String,
    drug_b: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    severity: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    evidence: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|text| !text.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_medications_with_optional_columns() {
        let data = "name,normalized_name,identifier,dose,frequency,note\n\
                    Coumadin , warfarin ,11289,5 mg,once daily,\n\
                    Herbal tea,,,,,Approximate RxNorm match\n";

        let medications = read_medications(data.as_bytes()).unwrap();

        assert_eq!(medications.len(), 2);
        assert_eq!(medications[0].raw_name, "Coumadin");
        assert_eq!(medications[0].normalized_name, "warfarin");
        assert_eq!(medications[0].identifier.as_deref(), Some("11289"));
        assert_eq!(medications[0].note, None);
        assert_eq!(medications[1].normalized_name, "");
        assert_eq!(medications[1].dose, None);
        assert!(medications[1].is_approximate_match());
    }

    #[test]
    fn name_only_file_is_enough() {
        let medications = read_medications("name\nMetformin\nLisinopril\n".as_bytes()).unwrap();

        assert_eq!(medications.len(), 2);
        assert!(!medications[0].is_matched());
        assert_eq!(medications[1].scoring_name(), "lisinopril");
    }

    #[test]
    fn missing_name_column_is_a_csv_error() {
        let err = read_medications("dose\n5 mg\n".as_bytes()).unwrap_err();
        assert!(matches!(err, IntakeError::Csv(_)));
    }

    #[test]
    fn parses_interactions_and_normalizes_severity() {
        let data = "drug_a,drug_b,severity,evidence\n\
                    warfarin,aspirin,Major,Bleeding risk.\n\
                    sertraline,tramadol,,\n";

        let interactions = read_interactions(data.as_bytes()).unwrap();

        assert_eq!(interactions[0].severity, Severity::High);
        assert_eq!(interactions[0].evidence_text, "Bleeding risk.");
        assert_eq!(interactions[1].severity, Severity::Unknown);
        assert_eq!(interactions[1].evidence_text, "");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_medications_from_path("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, IntakeError::Io(_)));
    }
}

use crate::scoring::{InteractionFact, MedicationRecord, Severity};

pub(super) const EPSILON: f64 = 1e-9;

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

/// Medication resolved upstream, with no dose information.
pub(super) fn resolved(name: &str) -> MedicationRecord {
    MedicationRecord::new(name).with_identifier(format!("rx-{}", name.to_lowercase()))
}

pub(super) fn resolved_with_dose(name: &str, dose: &str, frequency: &str) -> MedicationRecord {
    resolved(name).with_dose(dose).with_frequency(frequency)
}

pub(super) fn unresolved(name: &str) -> MedicationRecord {
    MedicationRecord::new(name)
}

pub(super) fn high(a: &str, b: &str) -> InteractionFact {
    InteractionFact::new(a, b, Severity::High, "Serious interaction reported.")
}

pub(super) fn moderate(a: &str, b: &str) -> InteractionFact {
    InteractionFact::new(a, b, Severity::Moderate, "Monitor closely.")
}

/// Twelve resolved generics that carry no risk class and all have dose references.
pub(super) fn twelve_plain_medications() -> Vec<MedicationRecord> {
    [
        "Lisinopril",
        "Amlodipine",
        "Metformin",
        "Atorvastatin",
        "Omeprazole",
        "Levothyroxine",
        "Sertraline",
        "Gabapentin",
        "Furosemide",
        "Montelukast",
        "Tamsulosin",
        "Allopurinol",
    ]
    .into_iter()
    .map(resolved)
    .collect()
}

/// `count` resolved placeholder compounds that match no table entry.
pub(super) fn placeholder_compounds(count: usize) -> Vec<MedicationRecord> {
    (1..=count)
        .map(|index| resolved(&format!("Compound {index:02}")))
        .collect()
}

pub(super) fn low(a: &str, b: &str) -> InteractionFact {
    InteractionFact::new(a, b, Severity::Low, "Minor interaction.")
}

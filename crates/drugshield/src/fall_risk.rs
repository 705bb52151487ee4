//! Medication-driven fall-risk screen, reported beside the score but never feeding into it.

use crate::scoring::MedicationRecord;
use serde::{Deserialize, Serialize};

const SEDATIVES: &[&str] = &[
    "alprazolam",
    "diazepam",
    "lorazepam",
    "zolpidem",
    "zopiclone",
    "temazepam",
    "clonazepam",
    "trazodone",
    "melatonin",
];

const BLOOD_PRESSURE_AGENTS: &[&str] = &[
    "lisinopril",
    "losartan",
    "amlodipine",
    "hydrochlorothiazide",
    "metoprolol",
    "propranolol",
    "atenolol",
    "diltiazem",
    "enalapril",
];

const DIURETICS: &[&str] = &[
    "furosemide",
    "hydrochlorothiazide",
    "spironolactone",
    "bumetanide",
];

pub const COMBINED_REASON: &str =
    "Sedative combined with blood pressure/diuretic medication increases dizziness and fall risk.";
pub const SEDATIVE_REASON: &str =
    "Sedative medication present which can increase drowsiness or balance problems.";
pub const BLOOD_PRESSURE_REASON: &str =
    "Medication that lowers blood pressure is present and can increase dizziness especially on standing.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallRiskAssessment {
    pub is_high_risk: bool,
    pub reasons: Vec<String>,
}

pub fn assess_fall_risk(medications: &[MedicationRecord]) -> FallRiskAssessment {
    let names: Vec<String> = medications
        .iter()
        .map(MedicationRecord::scoring_name)
        .collect();
    let any_of = |keywords: &[&str]| {
        names
            .iter()
            .any(|name| keywords.iter().any(|keyword| name.contains(keyword)))
    };

    let sedative = any_of(SEDATIVES);
    let lowers_pressure = any_of(BLOOD_PRESSURE_AGENTS) || any_of(DIURETICS);

    let mut assessment = FallRiskAssessment::default();
    if sedative && lowers_pressure {
        assessment.is_high_risk = true;
        assessment.reasons.push(COMBINED_REASON.to_string());
    }
    if sedative && !lowers_pressure {
        assessment.reasons.push(SEDATIVE_REASON.to_string());
    }
    if lowers_pressure {
        assessment.reasons.push(BLOOD_PRESSURE_REASON.to_string());
    }
    assessment
}

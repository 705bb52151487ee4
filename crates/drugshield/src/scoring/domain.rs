use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Marker the name-resolution service writes into `note` when it fell back to fuzzy matching.
pub const APPROXIMATE_MATCH_MARKER: &str = "approximate rxnorm match";

/// Medication as handed over by the upstream name resolver. Read-only for the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicationRecord {
    pub raw_name: String,
    #[serde(default)]
    pub normalized_name: String,
    #[serde(default, alias = "rxcui", deserialize_with = "lenient_text")]
    pub identifier: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub dose: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub frequency: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub note: Option<String>,
}

impl MedicationRecord {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            normalized_name: name.clone(),
            raw_name: name,
            ..Self::default()
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_dose(mut self, dose: impl Into<String>) -> Self {
        self.dose = Some(dose.into());
        self
    }

    pub fn with_frequency(mut self, frequency: impl Into<String>) -> Self {
        self.frequency = Some(frequency.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Lower-cased name used for keyword matching: the resolved name, else the raw entry.
    pub fn scoring_name(&self) -> String {
        let source = if self.normalized_name.is_empty() {
            &self.raw_name
        } else {
            &self.normalized_name
        };
        source.trim().to_lowercase()
    }

    /// Whether the caller supplied any name at all (raw entry preferred).
    pub fn has_name(&self) -> bool {
        let source = if self.raw_name.is_empty() {
            &self.normalized_name
        } else {
            &self.raw_name
        };
        !source.trim().is_empty()
    }

    pub fn is_matched(&self) -> bool {
        self.identifier
            .as_deref()
            .map(|identifier| !identifier.is_empty())
            .unwrap_or(false)
    }

    pub fn is_approximate_match(&self) -> bool {
        self.note
            .as_deref()
            .map(|note| note.to_lowercase().contains(APPROXIMATE_MATCH_MARKER))
            .unwrap_or(false)
    }
}

/// Interaction severity bucket. Ordering follows the merge rank used upstream:
/// `Unknown < Low < Moderate < High`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum Severity {
    #[default]
    Unknown,
    Low,
    Moderate,
    High,
}

impl Severity {
    #[cfg(test)]
    pub(crate) const fn ordered() -> [Self; 4] {
        [Self::Unknown, Self::Low, Self::Moderate, Self::High]
    }

    /// Buckets free-text severity ("Contraindicated", "minor", ...) into one of the four levels.
    pub fn from_label(value: &str) -> Self {
        let value = value.to_lowercase();
        if value.contains("high") || value.contains("major") || value.contains("contra") {
            Self::High
        } else if value.contains("moderate") || value.contains("significant") {
            Self::Moderate
        } else if value.contains("low") || value.contains("minor") {
            Self::Low
        } else {
            Self::Unknown
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

impl From<Option<String>> for Severity {
    fn from(value: Option<String>) -> Self {
        value
            .as_deref()
            .map(Self::from_label)
            .unwrap_or(Self::Unknown)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Deduplicated drug-drug interaction fact. `drug_a`/`drug_b` order carries no meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionFact {
    pub drug_a: String,
    pub drug_b: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default, alias = "source_text")]
    pub evidence_text: String,
}

impl InteractionFact {
    pub fn new(
        drug_a: impl Into<String>,
        drug_b: impl Into<String>,
        severity: Severity,
        evidence_text: impl Into<String>,
    ) -> Self {
        Self {
            drug_a: drug_a.into(),
            drug_b: drug_b.into(),
            severity,
            evidence_text: evidence_text.into(),
        }
    }

    pub(crate) fn attribution_names(&self) -> [String; 2] {
        [
            self.drug_a.trim().to_lowercase(),
            self.drug_b.trim().to_lowercase(),
        ]
    }
}

/// Audit entry; the items of one category sum to that category's raw total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub label: String,
    pub points: f64,
}

impl LineItem {
    pub fn new(label: impl Into<String>, points: f64) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Full audit trail of one scoring run. Built once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub interaction_items: Vec<LineItem>,
    pub interaction_points_total: f64,
    pub age_points: f64,
    pub medication_modifiers: Vec<LineItem>,
    pub per_med_impacts: Vec<LineItem>,
    pub medication_points_total: f64,
    #[serde(rename = "ddi_score_0_to_10")]
    pub ddi_score: f64,
    #[serde(rename = "dose_score_0_to_10")]
    pub dose_score: f64,
    #[serde(rename = "vulnerability_score_0_to_10")]
    pub vulnerability_score: f64,
    pub weighted_components: Vec<LineItem>,
    pub safety_floors: Vec<LineItem>,
    pub confidence: Confidence,
    pub raw_total: f64,
    pub max_raw: f64,
    #[serde(rename = "scaled_score_0_to_10")]
    pub final_score: f64,
}

/// Accepts a string, a number or null for optional free-text fields; anything else is absent.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let text = match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    };
    Ok(text.filter(|text| !text.trim().is_empty()))
}

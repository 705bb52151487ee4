//! Deterministic medication risk scoring.
//!
//! Three independent subscores (drug-drug interactions, dose safety, patient vulnerability)
//! are blended 50/30/20 and then raised by safety floors. Every call works on call-local
//! state only; the reference tables are immutable `'static` data, so an engine can be shared
//! freely across threads.

mod attribution;
mod blend;
mod confidence;
mod ddi;
pub mod domain;
mod dose;
mod normalize;
pub mod reference;
mod urgency;
mod vulnerability;

#[cfg(test)]
mod tests;

pub use confidence::{confidence_label, ConfidenceInputs};
pub use domain::{
    Confidence, InteractionFact, LineItem, MedicationRecord, ScoreBreakdown, Severity,
    APPROXIMATE_MATCH_MARKER,
};
pub use normalize::dose_to_mg;
pub use reference::{ReferenceTables, RiskClass};
pub use urgency::{urgency_from_score, Urgency};
pub use vulnerability::{age_points, polypharmacy_points};

use attribution::Attribution;
use blend::FloorSignals;
use tracing::debug;

pub const SCORE_ENGINE_VERSION: &str = "2026.02.16.2";

/// Nominal ceiling of the combined raw totals, reported for audit displays.
pub const MAX_RAW_TOTAL: f64 = 30.0;

/// Output of one subscore calculator.
pub(crate) struct Subscore {
    pub score: f64,
    pub raw: f64,
    pub items: Vec<LineItem>,
    pub attribution: Attribution,
}

/// Rounds the exact binary value to two decimals, halves away from zero.
///
/// Scaling by 100 first would round the product, pushing values stored just below a
/// midpoint (4.335 is 4.33499...) onto it.
pub(crate) fn round2(value: f64) -> f64 {
    let thousandths = value * 1000.0;
    let exact = value.mul_add(1000.0, -thousandths) == 0.0;
    if exact && thousandths.fract() == 0.0 && (thousandths % 10.0).abs() == 5.0 {
        // A true midpoint; `value * 100.0` is exact here.
        return (value * 100.0).round() / 100.0;
    }
    // Fixed-precision formatting rounds the exact decimal expansion of the value.
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Maps a raw total onto 0-10 where `scale` raw points equal a full 10.
pub(crate) fn scale_to_ten(raw: f64, scale: f64) -> f64 {
    round2(raw / scale * 10.0).min(10.0)
}

/// Stateless scorer over a fixed set of reference tables.
#[derive(Debug, Clone, Copy)]
pub struct RiskScoringEngine {
    tables: ReferenceTables,
}

impl Default for RiskScoringEngine {
    fn default() -> Self {
        Self::new(*ReferenceTables::standard())
    }
}

impl RiskScoringEngine {
    pub fn new(tables: ReferenceTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    pub fn score(
        &self,
        age: u8,
        interactions: &[InteractionFact],
        medications: &[MedicationRecord],
    ) -> ScoreBreakdown {
        let (ddi, ddi_signals) = ddi::score_interactions(interactions, &self.tables);
        let (dose, dose_signals) = dose::score_doses(medications, &self.tables);
        let (vulnerability, vulnerability_signals) =
            vulnerability::score_vulnerability(age, medications, &self.tables);

        let medication_count = medications
            .iter()
            .filter(|medication| medication.has_name())
            .count();

        let weighted_components =
            blend::weighted_components(ddi.score, dose.score, vulnerability.score);
        let (final_score, safety_floors) = blend::final_score(
            &weighted_components,
            &FloorSignals {
                age,
                vulnerability_score: vulnerability.score,
                high_risk_substance: vulnerability_signals.high_risk_substance,
                blood_thinner: vulnerability_signals.blood_thinner,
                high_severity_count: ddi_signals.high_severity_count,
                extreme_dose: dose_signals.extreme_dose,
                medication_count,
            },
        );

        let named = || medications.iter().filter(|medication| medication.has_name());
        let matched_count = named().filter(|medication| medication.is_matched()).count();
        let confidence = confidence_label(&ConfidenceInputs {
            medication_count,
            matched_count,
            referenced_count: dose_signals.referenced_count,
            parsed_dose_count: dose_signals.parsed_count,
            interaction_count: interactions.len(),
            approximate_match_count: named()
                .filter(|medication| medication.is_approximate_match())
                .count(),
            unmatched_count: medication_count - matched_count,
            unreferenced_dose_count: dose_signals.unreferenced_count,
        });

        let mut attribution =
            Attribution::seeded(medications.iter().map(MedicationRecord::scoring_name));
        attribution.merge(ddi.attribution);
        attribution.merge(dose.attribution);
        attribution.merge(vulnerability.attribution);

        let mut medication_modifiers = vulnerability.items;
        medication_modifiers.extend(dose.items);

        debug!(
            ddi = ddi.score,
            dose = dose.score,
            vulnerability = vulnerability.score,
            final_score,
            %confidence,
            floors = safety_floors.len(),
            "score breakdown computed"
        );

        ScoreBreakdown {
            interaction_items: ddi.items,
            interaction_points_total: round2(ddi.raw),
            age_points: round2(vulnerability_signals.age_points),
            medication_modifiers,
            per_med_impacts: attribution.into_impacts(),
            medication_points_total: round2(vulnerability.raw + dose.raw),
            ddi_score: ddi.score,
            dose_score: dose.score,
            vulnerability_score: vulnerability.score,
            weighted_components,
            safety_floors,
            confidence,
            raw_total: round2(ddi.raw + dose.raw + vulnerability.raw),
            max_raw: MAX_RAW_TOTAL,
            final_score,
        }
    }
}

/// Scores with the standard reference tables.
pub fn compute_score_breakdown(
    age: u8,
    interactions: &[InteractionFact],
    medications: &[MedicationRecord],
) -> ScoreBreakdown {
    RiskScoringEngine::default().score(age, interactions, medications)
}

pub fn compute_score(
    age: u8,
    interactions: &[InteractionFact],
    medications: &[MedicationRecord],
) -> f64 {
    compute_score_breakdown(age, interactions, medications).final_score
}

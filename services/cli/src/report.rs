use chrono::{DateTime, Utc};
use drugshield::error::AppError;
use drugshield::scoring::{dose_to_mg, LineItem, ReferenceTables};
use drugshield::{FallRiskAssessment, ScoreBreakdown, Urgency, SCORE_ENGINE_VERSION};
use serde::Serialize;
use std::io::Write;

/// Envelope printed by `score --format json`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ScoreReport {
    pub(crate) score_engine_version: &'static str,
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) risk_score: f64,
    pub(crate) urgency: Urgency,
    pub(crate) fall_risk: FallRiskAssessment,
    pub(crate) score_breakdown: ScoreBreakdown,
}

impl ScoreReport {
    pub(crate) fn new(breakdown: ScoreBreakdown, fall_risk: FallRiskAssessment) -> Self {
        Self::generated_at(Utc::now(), breakdown, fall_risk)
    }

    pub(crate) fn generated_at(
        generated_at: DateTime<Utc>,
        breakdown: ScoreBreakdown,
        fall_risk: FallRiskAssessment,
    ) -> Self {
        Self {
            score_engine_version: SCORE_ENGINE_VERSION,
            generated_at,
            risk_score: breakdown.final_score,
            urgency: drugshield::urgency_from_score(breakdown.final_score),
            fall_risk,
            score_breakdown: breakdown,
        }
    }
}

pub(crate) fn render_score_text(report: &ScoreReport, out: &mut impl Write) -> Result<(), AppError> {
    let breakdown = &report.score_breakdown;

    writeln!(
        out,
        "Risk score: {} / 10 ({}, {})",
        report.risk_score,
        report.urgency,
        report.urgency.colour()
    )?;
    writeln!(out, "Confidence: {}", breakdown.confidence)?;
    writeln!(
        out,
        "Engine {} (generated {})",
        report.score_engine_version,
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;

    writeln!(out, "\nSubscores")?;
    writeln!(out, "- Drug interactions: {}", breakdown.ddi_score)?;
    writeln!(out, "- Dose safety: {}", breakdown.dose_score)?;
    writeln!(out, "- Patient vulnerability: {}", breakdown.vulnerability_score)?;
    write_items(out, "Weighted components", &breakdown.weighted_components)?;
    write_items(out, "Safety floors", &breakdown.safety_floors)?;
    write_items(out, "Interactions", &breakdown.interaction_items)?;
    write_items(out, "Medication modifiers", &breakdown.medication_modifiers)?;
    write_items(out, "Per-medication impact", &breakdown.per_med_impacts)?;
    writeln!(
        out,
        "\nRaw total {} of nominal {}",
        breakdown.raw_total, breakdown.max_raw
    )?;

    if report.fall_risk.is_high_risk {
        writeln!(out, "\nFall risk: high")?;
    } else {
        writeln!(out, "\nFall risk: not elevated")?;
    }
    for reason in &report.fall_risk.reasons {
        writeln!(out, "- {reason}")?;
    }

    Ok(())
}

fn write_items(out: &mut impl Write, heading: &str, items: &[LineItem]) -> Result<(), AppError> {
    if items.is_empty() {
        writeln!(out, "\n{heading}: none")?;
        return Ok(());
    }

    writeln!(out, "\n{heading}")?;
    for item in items {
        writeln!(out, "- {}: {}", item.label, item.points)?;
    }
    Ok(())
}

pub(crate) fn render_urgency(urgency: Urgency, out: &mut impl Write) -> Result<(), AppError> {
    writeln!(
        out,
        "{} ({}, {})",
        urgency,
        urgency.colour(),
        urgency.legacy_code()
    )?;
    Ok(())
}

pub(crate) fn render_normalization(
    tables: &ReferenceTables,
    name: &str,
    dose: Option<&str>,
    frequency: Option<&str>,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let canonical = tables.canonical_name(name);
    writeln!(out, "Canonical name: {canonical}")?;

    let multiplier = tables.frequency_multiplier(frequency);
    writeln!(out, "Doses per day: {multiplier}")?;

    match dose.and_then(dose_to_mg) {
        Some(per_dose) => {
            writeln!(out, "Dose: {per_dose} mg")?;
            writeln!(out, "Daily total: {} mg", per_dose * multiplier)?;
        }
        None => writeln!(out, "Dose: not recognised")?,
    }

    match tables.dose_limit_mg(&canonical) {
        Some(limit) => writeln!(out, "Reference maximum: {limit} mg/day")?,
        None => writeln!(out, "Reference maximum: none on file")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use drugshield::{assess_fall_risk, compute_score_breakdown, MedicationRecord};

    fn rendered(render: impl FnOnce(&mut Vec<u8>) -> Result<(), AppError>) -> String {
        let mut buffer = Vec::new();
        render(&mut buffer).expect("render succeeds");
        String::from_utf8(buffer).expect("utf-8 output")
    }

    fn overdose_report() -> ScoreReport {
        let medications = [MedicationRecord::new("Lexapro")
            .with_identifier("352741")
            .with_dose("10000 mg")
            .with_frequency("Morning")];
        let generated_at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
        ScoreReport::generated_at(
            generated_at,
            compute_score_breakdown(35, &[], &medications),
            assess_fall_risk(&medications),
        )
    }

    #[test]
    fn json_envelope_fields() {
        let value = serde_json::to_value(overdose_report()).unwrap();

        assert_eq!(value["score_engine_version"], "2026.02.16.2");
        assert_eq!(value["generated_at"], "2026-03-01T09:30:00Z");
        assert_eq!(value["risk_score"], 8.8);
        assert_eq!(value["urgency"], "urgent");
        assert_eq!(value["fall_risk"]["is_high_risk"], false);
        assert_eq!(value["score_breakdown"]["scaled_score_0_to_10"], 8.8);
    }

    #[test]
    fn text_report_lists_floors_and_impacts() {
        let text = rendered(|out| render_score_text(&overdose_report(), out));

        assert!(text.starts_with("Risk score: 8.8 / 10 (urgent, red)\n"));
        assert!(text.contains("Confidence: high"));
        assert!(text.contains("\nSafety floors\n- Extreme dose: 8.8\n"));
        assert!(text.contains("\nInteractions: none\n"));
        assert!(text.contains("- escitalopram: 10\n"));
        assert!(text.contains("Fall risk: not elevated"));
    }

    #[test]
    fn urgency_line() {
        let text = rendered(|out| render_urgency(Urgency::CallSoon, out));
        assert_eq!(text, "call-soon (yellow, YELLOW_CALL_SOON)\n");
    }

    #[test]
    fn normalization_of_brand_name() {
        let text = rendered(|out| {
            render_normalization(
                ReferenceTables::standard(),
                "Lexapro",
                Some("10 mg"),
                Some("twice daily"),
                out,
            )
        });

        assert!(text.contains("Canonical name: escitalopram\n"));
        assert!(text.contains("Doses per day: 2\n"));
        assert!(text.contains("Dose: 10 mg\n"));
        assert!(text.contains("Daily total: 20 mg\n"));
        assert!(text.contains("Reference maximum: 20 mg/day\n"));
    }

    #[test]
    fn normalization_without_dose_or_reference() {
        let text = rendered(|out| {
            render_normalization(ReferenceTables::standard(), "Mystery Herb", None, None, out)
        });

        assert!(text.contains("Dose: not recognised\n"));
        assert!(text.contains("Reference maximum: none on file\n"));
    }
}

use super::attribution::Attribution;
use super::domain::{LineItem, MedicationRecord};
use super::normalize::dose_to_mg;
use super::reference::ReferenceTables;
use super::{round2, scale_to_ten, Subscore};

const RAW_SCALE: f64 = 10.0;
const UNREFERENCED_POINTS: f64 = 1.5;
const UNREFERENCED_LARGE_POINTS: f64 = 3.0;
const UNREFERENCED_LARGE_DAILY_MG: f64 = 2000.0;

/// Dose ratio tiers, checked highest first.
const EXTREME_RATIO: f64 = 3.0;
const HIGH_RATIO: f64 = 1.5;
const UPPER_RATIO: f64 = 1.0;

pub(crate) struct DoseSignals {
    pub extreme_dose: bool,
    /// Named medications with a dose-limit reference, dose parsed or not.
    pub referenced_count: usize,
    pub parsed_count: usize,
    /// Parsed doses for which no reference exists.
    pub unreferenced_count: usize,
}

pub(crate) fn score_doses(
    medications: &[MedicationRecord],
    tables: &ReferenceTables,
) -> (Subscore, DoseSignals) {
    let mut raw = 0.0;
    let mut items = Vec::new();
    let mut attribution = Attribution::default();
    let mut signals = DoseSignals {
        extreme_dose: false,
        referenced_count: 0,
        parsed_count: 0,
        unreferenced_count: 0,
    };

    for medication in medications {
        let name = tables.canonical_name(&medication.scoring_name());
        if name.is_empty() {
            continue;
        }

        let per_dose_mg = medication.dose.as_deref().and_then(dose_to_mg);
        if per_dose_mg.is_some() {
            signals.parsed_count += 1;
        }
        let daily_mg = per_dose_mg
            .map(|mg| mg * tables.frequency_multiplier(medication.frequency.as_deref()));

        let Some(limit) = tables.dose_limit_mg(&name) else {
            if let Some(daily_mg) = daily_mg {
                signals.unreferenced_count += 1;
                let points = if daily_mg >= UNREFERENCED_LARGE_DAILY_MG {
                    UNREFERENCED_LARGE_POINTS
                } else {
                    UNREFERENCED_POINTS
                };
                raw += points;
                items.push(LineItem::new(
                    format!(
                        "Dose entered but no reference found: {name} ({} mg/day)",
                        round2(daily_mg)
                    ),
                    points,
                ));
                attribution.credit(name, points);
            }
            continue;
        };
        signals.referenced_count += 1;

        let Some(daily_mg) = daily_mg else {
            continue;
        };
        let ratio = if limit > 0.0 { daily_mg / limit } else { 0.0 };

        let tier = if ratio >= EXTREME_RATIO {
            signals.extreme_dose = true;
            Some(("Extreme dose concern", 10.0))
        } else if ratio >= HIGH_RATIO {
            Some(("High dose concern", 6.0))
        } else if ratio >= UPPER_RATIO {
            Some(("Upper-range dose", 3.0))
        } else {
            None
        };

        if let Some((concern, points)) = tier {
            raw += points;
            items.push(LineItem::new(
                format!("{concern}: {name} ({} mg/day)", round2(daily_mg)),
                points,
            ));
            attribution.credit(name, points);
        }
    }

    let subscore = Subscore {
        score: scale_to_ten(raw, RAW_SCALE),
        raw,
        items,
        attribution,
    };
    (subscore, signals)
}

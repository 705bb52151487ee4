use super::attribution::Attribution;
use super::domain::{LineItem, MedicationRecord};
use super::reference::ReferenceTables;
use super::{round2, scale_to_ten, Subscore};

const RAW_SCALE: f64 = 10.0;
const UNMATCHED_POINTS_EACH: f64 = 0.8;
const UNMATCHED_CAP: f64 = 5.0;
const SEDATIVE_ELDERLY_AGE: u8 = 65;
const SEDATIVE_ELDERLY_POINTS: f64 = 1.5;

pub(crate) struct VulnerabilitySignals {
    pub age_points: f64,
    pub high_risk_substance: bool,
    pub blood_thinner: bool,
}

/// Flat age modifier; not attributed to any medication.
pub fn age_points(age: u8) -> f64 {
    match age {
        85..=u8::MAX => 3.0,
        75..=84 => 2.0,
        65..=74 => 1.0,
        _ => 0.0,
    }
}

/// Points for the number of distinct medications taken together.
pub fn polypharmacy_points(medication_count: usize) -> f64 {
    let count = medication_count as f64;
    match medication_count {
        0..=1 => 0.0,
        2..=4 => (count - 1.0) * 0.5,
        5..=10 => 1.5 + (count - 4.0) * 0.8,
        _ => 6.3 + (count - 10.0) * 0.5,
    }
}

pub(crate) fn score_vulnerability(
    age: u8,
    medications: &[MedicationRecord],
    tables: &ReferenceTables,
) -> (Subscore, VulnerabilitySignals) {
    let mut raw = 0.0;
    let mut items = Vec::new();
    let mut attribution = Attribution::default();
    let mut signals = VulnerabilitySignals {
        age_points: age_points(age),
        high_risk_substance: false,
        blood_thinner: false,
    };

    let names: Vec<String> = medications
        .iter()
        .map(MedicationRecord::scoring_name)
        .filter(|name| !name.is_empty())
        .collect();

    if signals.age_points > 0.0 {
        raw += signals.age_points;
        items.push(LineItem::new(
            format!("Age modifier ({age})"),
            signals.age_points,
        ));
    }

    let unmatched: Vec<String> = medications
        .iter()
        .filter(|medication| !medication.is_matched())
        .map(MedicationRecord::scoring_name)
        .filter(|name| !name.is_empty())
        .collect();
    let unmatched_points = (unmatched.len() as f64 * UNMATCHED_POINTS_EACH).min(UNMATCHED_CAP);
    if unmatched_points > 0.0 {
        raw += unmatched_points;
        items.push(LineItem::new(
            format!("Unmatched medication names ({})", unmatched.len()),
            round2(unmatched_points),
        ));
        attribution.spread(unmatched.iter().map(String::as_str), unmatched_points);
    }

    let mut distinct: Vec<&str> = Vec::with_capacity(names.len());
    for name in &names {
        if !distinct.contains(&name.as_str()) {
            distinct.push(name);
        }
    }
    let polypharmacy = polypharmacy_points(distinct.len());
    if polypharmacy > 0.0 {
        raw += polypharmacy;
        items.push(LineItem::new(
            format!("Polypharmacy ({} medicines)", distinct.len()),
            round2(polypharmacy),
        ));
        attribution.spread(distinct.iter().copied(), polypharmacy);
    }

    for name in &names {
        for (substance, points) in tables.high_risk_substances {
            if name.contains(substance) {
                raw += points;
                signals.high_risk_substance = true;
                items.push(LineItem::new(
                    format!("High-risk substance: {substance}"),
                    *points,
                ));
                attribution.credit(name.as_str(), *points);
            }
        }

        let class_rule = tables.risk_classes.iter().find(|rule| {
            rule.keywords
                .iter()
                .any(|keyword| name.contains(keyword))
        });
        if let Some(rule) = class_rule {
            raw += rule.points;
            items.push(LineItem::new(
                format!("Medicine class risk: {}", rule.class.label()),
                rule.points,
            ));
            attribution.credit(name.as_str(), rule.points);
            signals.blood_thinner |= rule.class.is_blood_thinner();
        }
    }

    let sedatives: Vec<&str> = names
        .iter()
        .map(String::as_str)
        .filter(|name| {
            tables
                .sedative_keywords
                .iter()
                .any(|keyword| name.contains(keyword))
        })
        .collect();
    if age >= SEDATIVE_ELDERLY_AGE && !sedatives.is_empty() {
        raw += SEDATIVE_ELDERLY_POINTS;
        items.push(LineItem::new(
            format!("Age {SEDATIVE_ELDERLY_AGE}+ with sedative present"),
            SEDATIVE_ELDERLY_POINTS,
        ));
        attribution.spread(sedatives.iter().copied(), SEDATIVE_ELDERLY_POINTS);
    }

    let subscore = Subscore {
        score: scale_to_ten(raw, RAW_SCALE),
        raw,
        items,
        attribution,
    };
    (subscore, signals)
}

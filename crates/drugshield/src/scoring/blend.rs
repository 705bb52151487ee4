use super::domain::LineItem;
use super::round2;

const DDI_WEIGHT: f64 = 0.50;
const DOSE_WEIGHT: f64 = 0.30;
const VULNERABILITY_WEIGHT: f64 = 0.20;

/// Facts the safety floors are evaluated against.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct FloorSignals {
    pub age: u8,
    pub vulnerability_score: f64,
    pub high_risk_substance: bool,
    pub blood_thinner: bool,
    pub high_severity_count: usize,
    pub extreme_dose: bool,
    pub medication_count: usize,
}

#[derive(Debug, Clone, Copy)]
enum FloorCondition {
    HighRiskSubstance,
    ElderlyOnBloodThinner,
    VulnerabilityAtLeast(f64),
    HighSeverityAtLeast(usize),
    ExtremeDose,
    MedicationsAtLeast(usize),
}

impl FloorCondition {
    fn holds(self, signals: &FloorSignals) -> bool {
        match self {
            Self::HighRiskSubstance => signals.high_risk_substance,
            Self::ElderlyOnBloodThinner => signals.age >= 75 && signals.blood_thinner,
            Self::VulnerabilityAtLeast(threshold) => signals.vulnerability_score >= threshold,
            Self::HighSeverityAtLeast(count) => signals.high_severity_count >= count,
            Self::ExtremeDose => signals.extreme_dose,
            Self::MedicationsAtLeast(count) => signals.medication_count >= count,
        }
    }
}

struct SafetyFloor {
    label: &'static str,
    floor: f64,
    condition: FloorCondition,
}

const SAFETY_FLOORS: &[SafetyFloor] = &[
    SafetyFloor {
        label: "High-risk substance present",
        floor: 7.5,
        condition: FloorCondition::HighRiskSubstance,
    },
    SafetyFloor {
        label: "Age 75+ with blood thinner",
        floor: 4.2,
        condition: FloorCondition::ElderlyOnBloodThinner,
    },
    SafetyFloor {
        label: "Vulnerability subscore 6.0+",
        floor: 4.0,
        condition: FloorCondition::VulnerabilityAtLeast(6.0),
    },
    SafetyFloor {
        label: "Vulnerability subscore 8.0+",
        floor: 6.0,
        condition: FloorCondition::VulnerabilityAtLeast(8.0),
    },
    SafetyFloor {
        label: "High-severity interaction",
        floor: 7.0,
        condition: FloorCondition::HighSeverityAtLeast(1),
    },
    SafetyFloor {
        label: "Two or more high-severity interactions",
        floor: 8.5,
        condition: FloorCondition::HighSeverityAtLeast(2),
    },
    SafetyFloor {
        label: "Extreme dose",
        floor: 8.8,
        condition: FloorCondition::ExtremeDose,
    },
    SafetyFloor {
        label: "10+ medications",
        floor: 6.5,
        condition: FloorCondition::MedicationsAtLeast(10),
    },
    SafetyFloor {
        label: "20+ medications",
        floor: 8.0,
        condition: FloorCondition::MedicationsAtLeast(20),
    },
    SafetyFloor {
        label: "50+ medications",
        floor: 9.0,
        condition: FloorCondition::MedicationsAtLeast(50),
    },
];

/// Weighted audit items for the three subscores; each item is rounded on its own.
pub(crate) fn weighted_components(ddi: f64, dose: f64, vulnerability: f64) -> Vec<LineItem> {
    vec![
        LineItem::new("DDI Risk x 0.50", round2(ddi * DDI_WEIGHT)),
        LineItem::new("Dose Safety x 0.30", round2(dose * DOSE_WEIGHT)),
        LineItem::new(
            "Patient Vulnerability x 0.20",
            round2(vulnerability * VULNERABILITY_WEIGHT),
        ),
    ]
}

/// Raises `blended` to every floor whose condition holds. Floors never lower a score.
pub(crate) fn apply_safety_floors(blended: f64, signals: &FloorSignals) -> (f64, Vec<LineItem>) {
    let mut applied = Vec::new();
    let mut score = blended;

    for floor in SAFETY_FLOORS {
        if floor.condition.holds(signals) {
            score = score.max(floor.floor);
            applied.push(LineItem::new(floor.label, floor.floor));
        }
    }

    (score, applied)
}

/// Final scaled score: blended sum of the weighted items, floored, capped at 10.
pub(crate) fn final_score(components: &[LineItem], signals: &FloorSignals) -> (f64, Vec<LineItem>) {
    let blended: f64 = components.iter().map(|item| item.points).sum();
    let (floored, applied) = apply_safety_floors(blended, signals);
    (round2(floored.min(10.0)), applied)
}

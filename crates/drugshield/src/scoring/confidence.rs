use super::domain::Confidence;

/// Data-completeness counts the confidence heuristic is derived from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfidenceInputs {
    pub medication_count: usize,
    pub matched_count: usize,
    pub referenced_count: usize,
    pub parsed_dose_count: usize,
    pub interaction_count: usize,
    pub approximate_match_count: usize,
    pub unmatched_count: usize,
    pub unreferenced_dose_count: usize,
}

/// Rules are evaluated in order; the first one that decides wins.
pub fn confidence_label(inputs: &ConfidenceInputs) -> Confidence {
    if inputs.medication_count == 0 {
        return Confidence::Low;
    }

    let total = inputs.medication_count as f64;
    let match_ratio = inputs.matched_count as f64 / total;
    let reference_ratio = inputs.referenced_count as f64 / total;
    let parse_ratio = inputs.parsed_dose_count as f64 / total;
    let approximate_ratio = inputs.approximate_match_count as f64 / total;

    if match_ratio < 0.6 || approximate_ratio > 0.4 {
        return Confidence::Low;
    }
    if inputs.unmatched_count > 0 && match_ratio < 0.8 {
        return Confidence::Low;
    }
    if inputs.unreferenced_dose_count > 0 && reference_ratio < 0.5 {
        return Confidence::Low;
    }

    if inputs.medication_count == 1 {
        if inputs.unreferenced_dose_count > 0 {
            return Confidence::Low;
        }
        if match_ratio >= 1.0
            && inputs.approximate_match_count == 0
            && reference_ratio >= 1.0
            && parse_ratio >= 1.0
        {
            return Confidence::High;
        }
        if match_ratio >= 0.8 && (reference_ratio >= 1.0 || inputs.interaction_count > 0) {
            return Confidence::Medium;
        }
        return Confidence::Low;
    }

    let mut evidence = 0;
    if inputs.interaction_count > 0 {
        evidence += 2;
    }
    if reference_ratio >= 0.6 {
        evidence += 1;
    }
    if parse_ratio >= 0.5 {
        evidence += 1;
    }
    if inputs.unmatched_count == 0 {
        evidence += 1;
    }
    if inputs.approximate_match_count == 0 {
        evidence += 1;
    }

    if match_ratio >= 0.95 && evidence >= 4 {
        Confidence::High
    } else if match_ratio >= 0.75 && evidence >= 2 {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

use super::common::*;
use crate::scoring::{compute_score_breakdown, urgency_from_score, Confidence, Urgency};

fn floor_labels(breakdown: &crate::scoring::ScoreBreakdown) -> Vec<&str> {
    breakdown
        .safety_floors
        .iter()
        .map(|floor| floor.label.as_str())
        .collect()
}

#[test]
fn recreational_substance_is_urgent() {
    let breakdown = compute_score_breakdown(30, &[], &[unresolved("Cocaine")]);

    assert_eq!(breakdown.vulnerability_score, 8.8);
    assert_eq!(breakdown.final_score, 7.5);
    assert_eq!(breakdown.confidence, Confidence::Low);
    assert_eq!(urgency_from_score(breakdown.final_score), Urgency::Urgent);
    assert_eq!(
        floor_labels(&breakdown),
        vec![
            "High-risk substance present",
            "Vulnerability subscore 6.0+",
            "Vulnerability subscore 8.0+",
        ]
    );
}

#[test]
fn two_high_severity_interactions_raise_to_eight_and_a_half() {
    let medications = [
        resolved("Warfarin"),
        resolved("Aspirin"),
        resolved("Ibuprofen"),
        resolved("Clopidogrel"),
    ];
    let interactions = [high("Warfarin", "Aspirin"), high("Clopidogrel", "Ibuprofen")];

    let breakdown = compute_score_breakdown(40, &interactions, &medications);

    assert_eq!(breakdown.ddi_score, 10.0);
    assert_close(breakdown.vulnerability_score, 7.2);
    assert_eq!(breakdown.final_score, 8.5);
    assert!(floor_labels(&breakdown).contains(&"Two or more high-severity interactions"));
    assert_eq!(urgency_from_score(breakdown.final_score), Urgency::Urgent);
}

#[test]
fn single_high_severity_interaction_is_at_least_seven() {
    let medications = [resolved("Metformin"), resolved("Lisinopril")];

    let breakdown = compute_score_breakdown(
        30,
        &[high("Metformin", "Lisinopril")],
        &medications,
    );

    assert_eq!(breakdown.final_score, 7.0);
    assert_eq!(floor_labels(&breakdown), vec!["High-severity interaction"]);
}

#[test]
fn elderly_patient_on_blood_thinner_alone() {
    let breakdown = compute_score_breakdown(80, &[], &[resolved("Warfarin")]);

    assert_eq!(breakdown.vulnerability_score, 4.5);
    assert_eq!(breakdown.final_score, 4.2);
    assert_eq!(breakdown.confidence, Confidence::Medium);
    assert_eq!(urgency_from_score(breakdown.final_score), Urgency::CallSoon);
    assert_eq!(floor_labels(&breakdown), vec!["Age 75+ with blood thinner"]);
}

#[test]
fn blood_thinner_floor_needs_age_seventy_five() {
    let breakdown = compute_score_breakdown(74, &[], &[resolved("Warfarin")]);

    assert!(breakdown.safety_floors.is_empty());
    assert!(breakdown.final_score < 4.0);
}

#[test]
fn heavily_sedated_elderly_patient_hits_vulnerability_floors() {
    let medications = [resolved("Lorazepam"), resolved("Zolpidem")];

    let breakdown = compute_score_breakdown(85, &[], &medications);

    // age 3 + polypharmacy 0.5 + two sedatives 4.0 + elderly sedative 1.5
    assert_close(breakdown.vulnerability_score, 9.0);
    assert_eq!(breakdown.final_score, 6.0);
    assert_eq!(
        floor_labels(&breakdown),
        vec!["Vulnerability subscore 6.0+", "Vulnerability subscore 8.0+"]
    );
}

#[test]
fn twenty_medications_floor() {
    let breakdown = compute_score_breakdown(40, &[], &placeholder_compounds(20));

    assert_eq!(breakdown.vulnerability_score, 10.0);
    assert_eq!(breakdown.final_score, 8.0);
    assert!(floor_labels(&breakdown).contains(&"20+ medications"));
    assert!(!floor_labels(&breakdown).contains(&"50+ medications"));
}

#[test]
fn fifty_medications_floor() {
    let breakdown = compute_score_breakdown(40, &[], &placeholder_compounds(50));

    assert_eq!(breakdown.final_score, 9.0);
    assert_eq!(urgency_from_score(breakdown.final_score), Urgency::Urgent);
    assert!(floor_labels(&breakdown).contains(&"50+ medications"));
}

#[test]
fn blank_entries_do_not_count_towards_medication_floors() {
    let mut medications = placeholder_compounds(9);
    medications.push(unresolved("   "));
    medications.push(unresolved(""));

    let breakdown = compute_score_breakdown(40, &[], &medications);

    assert!(!floor_labels(&breakdown).contains(&"10+ medications"));
}

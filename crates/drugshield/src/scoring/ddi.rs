use super::attribution::Attribution;
use super::domain::{InteractionFact, LineItem, Severity};
use super::reference::ReferenceTables;
use super::{round2, scale_to_ten, Subscore};

const RAW_SCALE: f64 = 12.0;
const BURDEN_PER_FACT: f64 = 0.6;
const BURDEN_PER_HIGH: f64 = 1.2;
const BURDEN_CAP: f64 = 8.0;

pub(crate) struct DdiSignals {
    pub high_severity_count: usize,
}

pub(crate) fn score_interactions(
    interactions: &[InteractionFact],
    tables: &ReferenceTables,
) -> (Subscore, DdiSignals) {
    let mut raw = 0.0;
    let mut items = Vec::with_capacity(interactions.len() + 1);
    let mut attribution = Attribution::default();
    let mut high_severity_count = 0;

    for fact in interactions {
        let points = tables.severity_points.for_severity(fact.severity);
        raw += points;
        if fact.severity == Severity::High {
            high_severity_count += 1;
        }

        let [drug_a, drug_b] = fact.attribution_names();
        attribution.credit(drug_a, points / 2.0);
        attribution.credit(drug_b, points / 2.0);

        items.push(LineItem::new(
            format!("{} + {} ({})", fact.drug_a, fact.drug_b, fact.severity),
            round2(points),
        ));
    }

    let burden = (interactions.len() as f64 * BURDEN_PER_FACT
        + high_severity_count as f64 * BURDEN_PER_HIGH)
        .min(BURDEN_CAP);
    if burden > 0.0 {
        raw += burden;
        items.push(LineItem::new(
            format!("Interaction burden ({} pairs)", interactions.len()),
            round2(burden),
        ));

        let mut involved: Vec<String> = Vec::new();
        for name in interactions
            .iter()
            .flat_map(InteractionFact::attribution_names)
        {
            if !name.is_empty() && !involved.contains(&name) {
                involved.push(name);
            }
        }
        attribution.spread(involved.iter().map(String::as_str), burden);
    }

    let subscore = Subscore {
        score: scale_to_ten(raw, RAW_SCALE),
        raw,
        items,
        attribution,
    };
    (subscore, DdiSignals { high_severity_count })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(a: &str, b: &str, severity: Severity) -> InteractionFact {
        InteractionFact::new(a, b, severity, "")
    }

    #[test]
    fn no_interactions_scores_zero() {
        let (subscore, signals) = score_interactions(&[], ReferenceTables::standard());
        assert_eq!(subscore.score, 0.0);
        assert_eq!(subscore.raw, 0.0);
        assert!(subscore.items.is_empty());
        assert_eq!(signals.high_severity_count, 0);
    }

    #[test]
    fn single_high_interaction_adds_burden() {
        let facts = [fact("Warfarin", "Aspirin", Severity::High)];
        let (subscore, signals) = score_interactions(&facts, ReferenceTables::standard());

        // 7 severity points plus 0.6 + 1.2 burden.
        assert!((subscore.raw - 8.8).abs() < 1e-9);
        assert_eq!(subscore.score, 7.33);
        assert_eq!(signals.high_severity_count, 1);
        assert_eq!(subscore.items[0].label, "Warfarin + Aspirin (high)");
        assert_eq!(subscore.items[1].label, "Interaction burden (1 pairs)");
        assert_eq!(subscore.items[1].points, 1.8);
        assert!((subscore.attribution.points_for("warfarin").unwrap() - 4.4).abs() < 1e-9);
        assert!((subscore.attribution.points_for("aspirin").unwrap() - 4.4).abs() < 1e-9);
    }

    #[test]
    fn burden_is_capped_and_subscore_clamped() {
        let facts: Vec<_> = (0..6)
            .map(|i| fact(&format!("drug{i}"), "hub", Severity::High))
            .collect();
        let (subscore, signals) = score_interactions(&facts, ReferenceTables::standard());

        assert_eq!(signals.high_severity_count, 6);
        let burden = subscore.items.last().expect("burden item");
        assert_eq!(burden.points, 8.0);
        assert_eq!(subscore.score, 10.0);
        assert!((subscore.attribution.total() - subscore.raw).abs() < 1e-9);
    }

    #[test]
    fn unknown_severity_counts_two_points() {
        let facts = [fact("a", "b", Severity::Unknown)];
        let (subscore, _) = score_interactions(&facts, ReferenceTables::standard());
        assert!((subscore.raw - 2.6).abs() < 1e-9);
        assert_eq!(subscore.score, 2.17);
    }
}

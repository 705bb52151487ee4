use super::reference::ReferenceTables;
use regex::Regex;
use std::sync::OnceLock;

fn dose_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(\d+(?:\.\d+)?)\s*(mcg|ug|mg|g)\b").expect("dose pattern compiles")
    })
}

/// Extracts the first `<number> <unit>` token and converts it to milligrams.
///
/// Returns `None` when no quantity with a known unit (mcg, ug, mg, g) is present.
pub fn dose_to_mg(text: &str) -> Option<f64> {
    let lowered = text.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }

    let captures = dose_pattern().captures(&lowered)?;
    let value: f64 = captures.get(1)?.as_str().parse().ok()?;
    match captures.get(2)?.as_str() {
        "mcg" | "ug" => Some(value / 1000.0),
        "g" => Some(value * 1000.0),
        _ => Some(value),
    }
}

impl ReferenceTables {
    /// Lower-cases the name and swaps a known brand/alias for its generic name.
    pub fn canonical_name(&self, name: &str) -> String {
        let lowered = name.trim().to_lowercase();
        self.name_aliases
            .iter()
            .find(|(alias, _)| lowered.contains(alias))
            .map(|(_, canonical)| (*canonical).to_string())
            .unwrap_or(lowered)
    }

    /// Doses per day implied by a free-text frequency; once daily when nothing matches.
    pub fn frequency_multiplier(&self, frequency: Option<&str>) -> f64 {
        let Some(frequency) = frequency.map(str::to_lowercase) else {
            return 1.0;
        };

        self.frequency_rules
            .iter()
            .find(|rule| {
                rule.keywords
                    .iter()
                    .any(|keyword| frequency.contains(keyword))
            })
            .map(|rule| rule.multiplier)
            .unwrap_or(1.0)
    }

    /// Maximum daily dose reference for a canonical name, if the table covers it.
    pub fn dose_limit_mg(&self, canonical_name: &str) -> Option<f64> {
        self.dose_limits_mg_per_day
            .iter()
            .find(|(drug, _)| canonical_name.contains(drug))
            .map(|(_, limit)| *limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> &'static ReferenceTables {
        ReferenceTables::standard()
    }

    #[test]
    fn converts_units_to_milligrams() {
        assert_eq!(dose_to_mg("10 mg"), Some(10.0));
        assert_eq!(dose_to_mg("10MG"), Some(10.0));
        assert_eq!(dose_to_mg("1.5mg"), Some(1.5));
        assert_eq!(dose_to_mg("500 mcg"), Some(0.5));
        assert_eq!(dose_to_mg("250ug"), Some(0.25));
        assert_eq!(dose_to_mg("2 g"), Some(2000.0));
    }

    #[test]
    fn takes_first_quantity_with_a_unit() {
        assert_eq!(dose_to_mg("take 2 tablets of 5 mg"), Some(5.0));
        assert_eq!(dose_to_mg("5 mg then 10 mg"), Some(5.0));
    }

    #[test]
    fn unparseable_doses_are_absent() {
        assert_eq!(dose_to_mg(""), None);
        assert_eq!(dose_to_mg("ten mg"), None);
        assert_eq!(dose_to_mg("2 tablets"), None);
        assert_eq!(dose_to_mg("5 grams"), None);
    }

    #[test]
    fn canonicalizes_brand_names() {
        assert_eq!(tables().canonical_name("  Lexapro "), "escitalopram");
        assert_eq!(tables().canonical_name("Tylenol Extra Strength"), "acetaminophen");
        assert_eq!(tables().canonical_name("Baby Aspirin"), "aspirin");
        assert_eq!(tables().canonical_name("Metformin ER"), "metformin er");
    }

    #[test]
    fn canonical_names_are_fixed_points() {
        for (_, canonical) in tables().name_aliases {
            assert_eq!(tables().canonical_name(canonical), *canonical);
        }
        for (drug, _) in tables().dose_limits_mg_per_day {
            let once = tables().canonical_name(drug);
            assert_eq!(tables().canonical_name(&once), once);
        }
    }

    #[test]
    fn frequency_keywords_map_to_daily_multiplier() {
        let tables = tables();
        assert_eq!(tables.frequency_multiplier(None), 1.0);
        assert_eq!(tables.frequency_multiplier(Some("Morning")), 1.0);
        assert_eq!(tables.frequency_multiplier(Some("Three times daily")), 3.0);
        assert_eq!(tables.frequency_multiplier(Some("TID")), 3.0);
        assert_eq!(tables.frequency_multiplier(Some("twice a day")), 2.0);
        assert_eq!(tables.frequency_multiplier(Some("bid")), 2.0);
        assert_eq!(tables.frequency_multiplier(Some("every 6 hours")), 4.0);
        assert_eq!(tables.frequency_multiplier(Some("every 8 hours")), 3.0);
        assert_eq!(tables.frequency_multiplier(Some("every 12 hours")), 2.0);
        assert!((tables.frequency_multiplier(Some("weekly")) - 1.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn dose_limit_uses_first_substring_hit() {
        assert_eq!(tables().dose_limit_mg("escitalopram"), Some(20.0));
        assert_eq!(tables().dose_limit_mg("citalopram"), Some(40.0));
        assert_eq!(tables().dose_limit_mg("metformin er"), Some(2550.0));
        assert_eq!(tables().dose_limit_mg("mystery herb"), None);
    }
}

//! Static reference data behind the scoring rules.
//!
//! Every lookup is "first entry whose key occurs inside the name wins", so the order of the
//! slices below is part of the scoring contract. Reordering an entry can change scores.

use super::domain::Severity;

/// Clinical class credited by the vulnerability subscore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskClass {
    Anticoagulant,
    Opioid,
    Sedative,
    Antipsychotic,
    Insulin,
    Hypoglycemic,
    Antiplatelet,
}

impl RiskClass {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Anticoagulant => "anticoagulant",
            Self::Opioid => "opioid",
            Self::Sedative => "sedative",
            Self::Antipsychotic => "antipsychotic",
            Self::Insulin => "insulin",
            Self::Hypoglycemic => "hypoglycemic",
            Self::Antiplatelet => "antiplatelet",
        }
    }

    pub const fn is_blood_thinner(self) -> bool {
        matches!(self, Self::Anticoagulant | Self::Antiplatelet)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RiskClassRule {
    pub class: RiskClass,
    pub points: f64,
    pub keywords: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct FrequencyRule {
    pub keywords: &'static [&'static str],
    pub multiplier: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeverityPoints {
    pub high: f64,
    pub moderate: f64,
    pub low: f64,
    pub unknown: f64,
}

impl SeverityPoints {
    pub const fn for_severity(&self, severity: Severity) -> f64 {
        match severity {
            Severity::High => self.high,
            Severity::Moderate => self.moderate,
            Severity::Low => self.low,
            Severity::Unknown => self.unknown,
        }
    }
}

/// Immutable table set consulted by the engine. `standard()` is the production configuration.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceTables {
    pub severity_points: SeverityPoints,
    pub name_aliases: &'static [(&'static str, &'static str)],
    pub dose_limits_mg_per_day: &'static [(&'static str, f64)],
    pub frequency_rules: &'static [FrequencyRule],
    pub high_risk_substances: &'static [(&'static str, f64)],
    pub sedative_keywords: &'static [&'static str],
    pub risk_classes: &'static [RiskClassRule],
}

impl ReferenceTables {
    pub fn standard() -> &'static Self {
        &STANDARD
    }
}

static STANDARD: ReferenceTables = ReferenceTables {
    severity_points: SeverityPoints {
        high: 7.0,
        moderate: 3.0,
        low: 1.0,
        unknown: 2.0,
    },
    name_aliases: NAME_ALIASES,
    dose_limits_mg_per_day: DOSE_LIMITS_MG_PER_DAY,
    frequency_rules: FREQUENCY_RULES,
    high_risk_substances: HIGH_RISK_SUBSTANCES,
    sedative_keywords: SEDATIVE_KEYWORDS,
    risk_classes: RISK_CLASSES,
};

const HIGH_RISK_SUBSTANCES: &[(&str, f64)] = &[
    ("cocaine", 8.0),
    ("heroin", 8.0),
    ("methamphetamine", 8.0),
    ("fentanyl", 6.0),
];

const SEDATIVE_KEYWORDS: &[&str] = &[
    "alprazolam",
    "diazepam",
    "lorazepam",
    "clonazepam",
    "zolpidem",
    "temazepam",
];

const RISK_CLASSES: &[RiskClassRule] = &[
    RiskClassRule {
        class: RiskClass::Anticoagulant,
        points: 2.5,
        keywords: &[
            "warfarin",
            "apixaban",
            "rivaroxaban",
            "dabigatran",
            "edoxaban",
            "heparin",
            "enoxaparin",
        ],
    },
    RiskClassRule {
        class: RiskClass::Opioid,
        points: 2.5,
        keywords: &[
            "morphine",
            "oxycodone",
            "hydrocodone",
            "codeine",
            "tramadol",
            "methadone",
            "buprenorphine",
            "fentanyl",
        ],
    },
    RiskClassRule {
        class: RiskClass::Sedative,
        points: 2.0,
        keywords: SEDATIVE_KEYWORDS,
    },
    RiskClassRule {
        class: RiskClass::Antipsychotic,
        points: 1.8,
        keywords: &[
            "quetiapine",
            "olanzapine",
            "risperidone",
            "haloperidol",
            "clozapine",
        ],
    },
    RiskClassRule {
        class: RiskClass::Insulin,
        points: 1.8,
        keywords: &["insulin"],
    },
    RiskClassRule {
        class: RiskClass::Hypoglycemic,
        points: 1.2,
        keywords: &["glipizide", "glyburide", "glimepiride"],
    },
    RiskClassRule {
        class: RiskClass::Antiplatelet,
        points: 1.6,
        keywords: &["clopidogrel", "prasugrel", "ticagrelor", "aspirin"],
    },
];

const FREQUENCY_RULES: &[FrequencyRule] = &[
    FrequencyRule {
        keywords: &["three times", "tid"],
        multiplier: 3.0,
    },
    FrequencyRule {
        keywords: &["twice", "bid"],
        multiplier: 2.0,
    },
    FrequencyRule {
        keywords: &["every 6"],
        multiplier: 4.0,
    },
    FrequencyRule {
        keywords: &["every 8"],
        multiplier: 3.0,
    },
    FrequencyRule {
        keywords: &["every 12"],
        multiplier: 2.0,
    },
    FrequencyRule {
        keywords: &["weekly"],
        multiplier: 1.0 / 7.0,
    },
];

// Conservative maximum daily dose references for common medicines.
const DOSE_LIMITS_MG_PER_DAY: &[(&str, f64)] = &[
    ("acetaminophen", 4000.0),
    ("ibuprofen", 3200.0),
    ("naproxen", 1000.0),
    ("aspirin", 4000.0),
    ("diclofenac", 150.0),
    ("meloxicam", 15.0),
    ("celecoxib", 400.0),
    ("prednisone", 80.0),
    ("methylprednisolone", 48.0),
    ("dexamethasone", 10.0),
    ("warfarin", 15.0),
    ("apixaban", 20.0),
    ("rivaroxaban", 20.0),
    ("dabigatran", 300.0),
    ("edoxaban", 60.0),
    ("enoxaparin", 200.0),
    ("clopidogrel", 75.0),
    ("prasugrel", 10.0),
    ("ticagrelor", 180.0),
    ("lisinopril", 80.0),
    ("losartan", 100.0),
    ("valsartan", 320.0),
    ("olmesartan", 40.0),
    ("amlodipine", 10.0),
    ("nifedipine", 120.0),
    ("diltiazem", 480.0),
    ("verapamil", 480.0),
    ("metoprolol", 400.0),
    ("atenolol", 100.0),
    ("carvedilol", 100.0),
    ("propranolol", 320.0),
    ("hydrochlorothiazide", 50.0),
    ("furosemide", 600.0),
    ("spironolactone", 200.0),
    ("chlorthalidone", 100.0),
    ("atorvastatin", 80.0),
    ("rosuvastatin", 40.0),
    ("simvastatin", 40.0),
    ("pravastatin", 80.0),
    ("ezetimibe", 10.0),
    ("metformin", 2550.0),
    ("glipizide", 40.0),
    ("glyburide", 20.0),
    ("glimepiride", 8.0),
    ("empagliflozin", 25.0),
    ("dapagliflozin", 10.0),
    ("canagliflozin", 300.0),
    ("sitagliptin", 100.0),
    ("linagliptin", 5.0),
    ("levothyroxine", 0.3),
    ("omeprazole", 40.0),
    ("esomeprazole", 40.0),
    ("pantoprazole", 80.0),
    ("famotidine", 40.0),
    ("ondansetron", 24.0),
    ("metoclopramide", 40.0),
    ("loperamide", 16.0),
    ("docusate", 400.0),
    ("senna", 34.4),
    ("sertraline", 200.0),
    ("fluoxetine", 80.0),
    ("escitalopram", 20.0),
    ("citalopram", 40.0),
    ("paroxetine", 60.0),
    ("venlafaxine", 375.0),
    ("duloxetine", 120.0),
    ("bupropion", 450.0),
    ("mirtazapine", 45.0),
    ("trazodone", 400.0),
    ("quetiapine", 800.0),
    ("olanzapine", 20.0),
    ("risperidone", 16.0),
    ("haloperidol", 20.0),
    ("clozapine", 900.0),
    ("aripiprazole", 30.0),
    ("alprazolam", 10.0),
    ("diazepam", 40.0),
    ("lorazepam", 10.0),
    ("clonazepam", 20.0),
    ("zolpidem", 10.0),
    ("temazepam", 30.0),
    ("eszopiclone", 3.0),
    ("ramelteon", 8.0),
    ("gabapentin", 3600.0),
    ("pregabalin", 600.0),
    ("carbamazepine", 1600.0),
    ("lamotrigine", 500.0),
    ("valproate", 3000.0),
    ("levetiracetam", 3000.0),
    ("topiramate", 400.0),
    ("phenytoin", 600.0),
    ("baclofen", 80.0),
    ("cyclobenzaprine", 30.0),
    ("tizanidine", 36.0),
    ("methocarbamol", 6000.0),
    ("hydroxyzine", 400.0),
    ("diphenhydramine", 300.0),
    ("cetirizine", 10.0),
    ("loratadine", 10.0),
    ("fexofenadine", 180.0),
    ("montelukast", 10.0),
    ("morphine", 200.0),
    ("oxycodone", 160.0),
    ("hydrocodone", 120.0),
    ("codeine", 360.0),
    ("tramadol", 400.0),
    ("methadone", 120.0),
    ("buprenorphine", 32.0),
    ("amoxicillin", 3000.0),
    ("azithromycin", 500.0),
    ("doxycycline", 200.0),
    ("ciprofloxacin", 1500.0),
    ("levofloxacin", 750.0),
    ("cephalexin", 4000.0),
    ("nitrofurantoin", 400.0),
    ("acyclovir", 4000.0),
    ("valacyclovir", 3000.0),
    ("oseltamivir", 150.0),
    ("allopurinol", 800.0),
    ("colchicine", 1.8),
    ("tamsulosin", 0.8),
    ("finasteride", 5.0),
    ("sildenafil", 100.0),
    ("tadalafil", 20.0),
    ("donepezil", 10.0),
    ("memantine", 20.0),
    ("sumatriptan", 200.0),
];

// Brand/colloquial name -> generic. Substring match; first hit wins.
const NAME_ALIASES: &[(&str, &str)] = &[
    ("valium", "diazepam"),
    ("xanax", "alprazolam"),
    ("ativan", "lorazepam"),
    ("klonopin", "clonazepam"),
    ("coumadin", "warfarin"),
    ("advil", "ibuprofen"),
    ("motrin", "ibuprofen"),
    ("tylenol", "acetaminophen"),
    ("norvasc", "amlodipine"),
    ("lipitor", "atorvastatin"),
    ("zocor", "simvastatin"),
    ("crestor", "rosuvastatin"),
    ("glucophage", "metformin"),
    ("zoloft", "sertraline"),
    ("prozac", "fluoxetine"),
    ("lexapro", "escitalopram"),
    ("celexa", "citalopram"),
    ("wellbutrin", "bupropion"),
    ("seroquel", "quetiapine"),
    ("abilify", "aripiprazole"),
    ("neurontin", "gabapentin"),
    ("lyrica", "pregabalin"),
    ("prilosec", "omeprazole"),
    ("nexium", "esomeprazole"),
    ("pepcid", "famotidine"),
    ("lasix", "furosemide"),
    ("zestril", "lisinopril"),
    ("cozaar", "losartan"),
    ("diovan", "valsartan"),
    ("eliquis", "apixaban"),
    ("xarelto", "rivaroxaban"),
    ("plavix", "clopidogrel"),
    ("brilinta", "ticagrelor"),
    ("baby aspirin", "aspirin"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escitalopram_precedes_citalopram() {
        let position = |key: &str| {
            DOSE_LIMITS_MG_PER_DAY
                .iter()
                .position(|(drug, _)| *drug == key)
                .expect("drug present")
        };
        assert!(position("escitalopram") < position("citalopram"));
    }

    #[test]
    fn blood_thinner_classes() {
        let thinners: Vec<_> = RISK_CLASSES
            .iter()
            .filter(|rule| rule.class.is_blood_thinner())
            .map(|rule| rule.class.label())
            .collect();
        assert_eq!(thinners, vec!["anticoagulant", "antiplatelet"]);
    }

    #[test]
    fn severity_points_follow_bucket() {
        let points = ReferenceTables::standard().severity_points;
        assert_eq!(points.for_severity(Severity::High), 7.0);
        assert_eq!(points.for_severity(Severity::Moderate), 3.0);
        assert_eq!(points.for_severity(Severity::Low), 1.0);
        assert_eq!(points.for_severity(Severity::Unknown), 2.0);
    }
}

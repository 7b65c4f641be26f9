//! Pattern tables for medicine-name, dosage, and frequency matching.
//!
//! Everything here is data-driven: name layers, frequency families, and the
//! vocabulary lists are tables that can grow without touching scoring logic.
//! Extra vocabulary registered through [`MedicineVocabulary::with_terms`] is
//! matched and scored exactly like the built-in known-medicine list.

use std::sync::LazyLock;

use regex::Regex;

/// Well-known generic and brand medicine names. Highest-trust layer.
/// Sorted for binary search; must stay lowercase.
const KNOWN_MEDICINES: &[&str] = &[
    "acetaminophen", "advil", "albuterol", "alendronate", "allopurinol",
    "alprazolam", "ambien", "amitriptyline", "amlodipine", "amoxicillin",
    "aspirin", "atenolol", "atorvastatin", "augmentin", "azithromycin",
    "bisoprolol", "budesonide", "bupropion", "carvedilol", "celecoxib",
    "cephalexin", "cetirizine", "ciprofloxacin", "citalopram", "clonazepam",
    "clopidogrel", "codeine", "crestor", "cymbalta", "diazepam",
    "diclofenac", "digoxin", "doxycycline", "duloxetine", "eliquis",
    "enalapril", "escitalopram", "esomeprazole", "famotidine", "finasteride",
    "fluconazole", "fluoxetine", "fluticasone", "furosemide", "gabapentin",
    "glipizide", "glucophage", "hydrochlorothiazide", "hydrocodone",
    "ibuprofen", "insulin", "lansoprazole", "levofloxacin", "levothyroxine",
    "lipitor", "lisinopril", "loratadine", "lorazepam", "losartan",
    "meloxicam", "metformin", "methotrexate", "metoprolol", "metronidazole",
    "montelukast", "morphine", "motrin", "naproxen", "nexium",
    "nitrofurantoin", "norvasc", "omeprazole", "ondansetron", "oxycodone",
    "pantoprazole", "paracetamol", "penicillin", "plavix", "prednisone",
    "pregabalin", "prilosec", "propranolol", "prozac", "quetiapine",
    "ramipril", "ranitidine", "rosuvastatin", "sertraline", "sildenafil",
    "simvastatin", "spironolactone", "synthroid", "tamsulosin", "tramadol",
    "trazodone", "tylenol", "valsartan", "venlafaxine", "ventolin",
    "warfarin", "xanax", "xarelto", "zantac", "zestril", "zithromax",
    "zocor", "zoloft", "zolpidem", "zyrtec",
];

/// Pharmaceutically common word endings for the morphological layer.
const PHARMA_SUFFIXES: &[&str] = &[
    "cillin", "prazole", "sartan", "statin", "dipine", "oxetine", "azepam",
    "mycin", "tinib", "pril", "zole", "olol", "afil", "mab", "vir", "ine",
    "ide", "ate", "one", "ol", "in",
];

/// Common-word stoplist: weekday and month names plus frequent
/// prescription-layout words. Sorted for binary search, lowercase.
const COMMON_WORDS: &[&str] = &[
    "april", "august", "december", "doctor", "february", "friday",
    "january", "july", "june", "march", "may", "monday", "morning",
    "notes", "november", "october", "patient", "please", "quantity",
    "refill", "saturday", "september", "signature", "sunday", "tablet",
    "take", "thursday", "total", "tuesday", "wednesday",
];

static SUPPLEMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(multivitamin|vitamin\s+[a-k]\d{0,2}|folic\s+acid|fish\s+oil|omega[\s-]?3|calcium|magnesium|potassium|zinc|iron|biotin|melatonin|probiotic|coq10|coenzyme\s+q10)\b",
    )
    .expect("invalid supplement pattern")
});

static KNOWN_MEDICINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = KNOWN_MEDICINES.join("|");
    Regex::new(&format!(r"(?i)\b({alternation})\b")).expect("invalid known-medicine pattern")
});

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z][A-Za-z-]*").expect("invalid word pattern"));

static CAPITALIZED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][A-Za-z]{3,}\b").expect("invalid capitalized pattern"));

static NAME_WITH_DOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([a-z][a-z-]{2,})\s+\d+(?:\.\d+)?\s*(?:mcg|mg|µg|g|ml|iu|meq|units?)\b")
        .expect("invalid name-with-dose pattern")
});

static DOSAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(\d+(?:\.\d+)?(?:\s*/\s*\d+(?:\.\d+)?)?)\s*(mcg|mg|µg|milligrams?|micrograms?|grams?|milliliters?|ml|meq|iu|units?|g)\b",
    )
    .expect("invalid dosage pattern")
});

static CONTEXT_KEYWORDS: &[&str] = &[
    "take", "tablet", "capsule", "pill", "medication", "rx", "prescription",
    "dose", "daily", "twice", "once", "mg", "mcg",
];

/// A frequency family with its compiled pattern.
struct FrequencyPattern {
    kind: FrequencyKind,
    regex: Regex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyKind {
    TimesPerPeriod,
    EveryNHours,
    DayPart,
    AsNeeded,
    Shorthand,
    TakeTablets,
}

static FREQUENCY_PATTERNS: LazyLock<Vec<FrequencyPattern>> = LazyLock::new(|| {
    vec![
        frequency(
            FrequencyKind::TimesPerPeriod,
            r"(?i)\b(?:once|twice|thrice|(?:one|two|three|four|\d+)\s+times?)(?:\s+(?:a|per))?\s+(?:day|daily|week|weekly|night|nightly)\b",
        ),
        frequency(
            FrequencyKind::EveryNHours,
            r"(?i)\bevery\s+\d+(?:\s*-\s*\d+)?\s+hours?\b",
        ),
        frequency(
            FrequencyKind::DayPart,
            r"(?i)\b(?:at\s+bedtime|bedtime|in\s+the\s+morning|in\s+the\s+evening|every\s+(?:morning|evening|night)|(?:with|before|after)\s+(?:meals?|food|breakfast|lunch|dinner)|morning|evening)\b",
        ),
        frequency(
            FrequencyKind::AsNeeded,
            r"(?i)\bas\s+needed\b|\bif\s+needed\b|\bwhen\s+required\b|\bp\.?r\.?n\.?\b",
        ),
        frequency(
            FrequencyKind::Shorthand,
            r"(?i)\b(?:bid|tid|qid|qd|qod|qam|qpm|qhs|hs|ac|pc|q\s*\d+\s*h)\b",
        ),
        frequency(
            FrequencyKind::TakeTablets,
            r"(?i)\btake\s+\d+\s+(?:tablets?|capsules?|pills?)(?:\s+(?:daily|a\s+day|as\s+directed))?\b",
        ),
    ]
});

fn frequency(kind: FrequencyKind, regex_str: &str) -> FrequencyPattern {
    FrequencyPattern {
        kind,
        regex: Regex::new(regex_str).expect("invalid frequency pattern"),
    }
}

/// Which layer produced a name match. Ordered by descending trust.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameLayer {
    KnownMedicine,
    Supplement,
    PharmaSuffix,
    NameWithDose,
    CapitalizedWord,
}

/// One name hit within a line, before within-line deduplication.
#[derive(Debug, Clone)]
pub struct NameMatch {
    pub text: String,
    pub layer: NameLayer,
}

/// The engine's medicine vocabulary: the built-in tables plus any terms
/// registered by the caller. Compiled once per analyzer.
#[derive(Debug, Default)]
pub struct MedicineVocabulary {
    extra: Vec<String>,
    extra_re: Option<Regex>,
}

impl MedicineVocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register caller-supplied terms, matched and scored like the built-in
    /// known-medicine list.
    pub fn with_terms(terms: &[String]) -> Self {
        let extra: Vec<String> = terms
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        let extra_re = if extra.is_empty() {
            None
        } else {
            let alternation = extra
                .iter()
                .map(|t| regex::escape(t))
                .collect::<Vec<_>>()
                .join("|");
            Some(
                Regex::new(&format!(r"(?i)\b({alternation})\b"))
                    .expect("invalid extra-vocabulary pattern"),
            )
        };

        Self { extra, extra_re }
    }

    /// Explicit known-medicine list membership (layer 1 trust).
    pub fn is_known_medicine(&self, name: &str) -> bool {
        let lower = name.trim().to_lowercase();
        KNOWN_MEDICINES.binary_search(&lower.as_str()).is_ok()
            || self.extra.iter().any(|t| t == &lower)
    }

    /// Iterator over every vocabulary word, for dictionary-based OCR
    /// correction.
    pub fn dictionary_terms(&self) -> impl Iterator<Item = &str> {
        KNOWN_MEDICINES
            .iter()
            .copied()
            .chain(self.extra.iter().map(String::as_str))
    }

    /// Apply every name layer to a line and union the hits. Within-line
    /// deduplication is the extractor's job.
    pub fn match_names(&self, line: &str) -> Vec<NameMatch> {
        let mut matches = Vec::new();

        for m in KNOWN_MEDICINE_RE.find_iter(line) {
            matches.push(NameMatch {
                text: m.as_str().to_string(),
                layer: NameLayer::KnownMedicine,
            });
        }

        if let Some(re) = &self.extra_re {
            for m in re.find_iter(line) {
                matches.push(NameMatch {
                    text: m.as_str().to_string(),
                    layer: NameLayer::KnownMedicine,
                });
            }
        }

        for m in SUPPLEMENT_RE.find_iter(line) {
            matches.push(NameMatch {
                text: m.as_str().to_string(),
                layer: NameLayer::Supplement,
            });
        }

        for m in WORD_RE.find_iter(line) {
            if has_pharma_suffix(m.as_str()) {
                matches.push(NameMatch {
                    text: m.as_str().to_string(),
                    layer: NameLayer::PharmaSuffix,
                });
            }
        }

        for caps in NAME_WITH_DOSE_RE.captures_iter(line) {
            matches.push(NameMatch {
                text: caps[1].to_string(),
                layer: NameLayer::NameWithDose,
            });
        }

        // The fallback layer exists to catch unknown brand names; stoplist
        // words are never medicine names, and neighbor dosage/frequency
        // bonuses would otherwise push them past the acceptance threshold.
        for m in CAPITALIZED_RE.find_iter(line) {
            if !is_common_word(m.as_str()) {
                matches.push(NameMatch {
                    text: m.as_str().to_string(),
                    layer: NameLayer::CapitalizedWord,
                });
            }
        }

        matches
    }
}

/// Morphological layer: a word of at least 3 letters ending in a
/// pharmaceutically common suffix.
pub fn has_pharma_suffix(name: &str) -> bool {
    let lower = name.trim().to_lowercase();
    lower.chars().count() >= 3 && PHARMA_SUFFIXES.iter().any(|s| lower.ends_with(s))
}

/// Common-word stoplist membership (weekdays, months, layout words).
pub fn is_common_word(name: &str) -> bool {
    let lower = name.trim().to_lowercase();
    COMMON_WORDS.binary_search(&lower.as_str()).is_ok()
}

/// Find a dosage on a line: a number (decimal or `a/b` ratio) immediately
/// followed by a recognized unit. Returns the formatted `number+unit` form.
pub fn find_dosage(line: &str) -> Option<String> {
    DOSAGE_RE.captures(line).map(|caps| {
        let number: String = caps[1].chars().filter(|c| !c.is_whitespace()).collect();
        let unit = caps[2].to_lowercase();
        format!("{number}{unit}")
    })
}

/// Find a frequency phrase on a line. Families are tried in fixed order and
/// the first hit wins.
pub fn find_frequency(line: &str) -> Option<String> {
    FREQUENCY_PATTERNS
        .iter()
        .find_map(|p| p.regex.find(line))
        .map(|m| m.as_str().trim().to_string())
}

/// Which frequency family a line matches.
pub fn frequency_kind(line: &str) -> Option<FrequencyKind> {
    FREQUENCY_PATTERNS
        .iter()
        .find(|p| p.regex.is_match(line))
        .map(|p| p.kind)
}

/// True when the line carries a prescription-context keyword.
pub fn contains_context_keyword(line: &str) -> bool {
    let lower = line.to_lowercase();
    CONTEXT_KEYWORDS.iter().any(|k| lower.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_medicines_sorted_for_binary_search() {
        for window in KNOWN_MEDICINES.windows(2) {
            assert!(window[0] < window[1], "{:?} >= {:?}", window[0], window[1]);
        }
    }

    #[test]
    fn common_words_sorted_for_binary_search() {
        for window in COMMON_WORDS.windows(2) {
            assert!(window[0] < window[1], "{:?} >= {:?}", window[0], window[1]);
        }
    }

    #[test]
    fn known_medicine_matches_case_insensitively() {
        let vocab = MedicineVocabulary::new();
        assert!(vocab.is_known_medicine("Lisinopril"));
        assert!(vocab.is_known_medicine("ASPIRIN"));
        assert!(!vocab.is_known_medicine("Monday"));
    }

    #[test]
    fn extra_terms_count_as_known() {
        let vocab = MedicineVocabulary::with_terms(&["Dabigatran".to_string()]);
        assert!(vocab.is_known_medicine("dabigatran"));
        let hits = vocab.match_names("Dabigatran 150mg twice daily");
        assert!(hits
            .iter()
            .any(|m| m.layer == NameLayer::KnownMedicine && m.text == "Dabigatran"));
    }

    #[test]
    fn layers_union_on_one_line() {
        let vocab = MedicineVocabulary::new();
        let hits = vocab.match_names("Lisinopril 10mg");
        // Known list, suffix rule, name+dose, and capitalized fallback all
        // fire for the same token.
        assert!(hits.iter().any(|m| m.layer == NameLayer::KnownMedicine));
        assert!(hits.iter().any(|m| m.layer == NameLayer::PharmaSuffix));
        assert!(hits.iter().any(|m| m.layer == NameLayer::NameWithDose));
        assert!(hits.iter().any(|m| m.layer == NameLayer::CapitalizedWord));
        assert!(hits.iter().all(|m| m.text.eq_ignore_ascii_case("lisinopril")));
    }

    #[test]
    fn supplement_layer_matches_multiword_terms() {
        let vocab = MedicineVocabulary::new();
        let hits = vocab.match_names("Vitamin D3 1000 IU and fish oil");
        assert!(hits
            .iter()
            .any(|m| m.layer == NameLayer::Supplement && m.text == "Vitamin D3"));
        assert!(hits
            .iter()
            .any(|m| m.layer == NameLayer::Supplement && m.text == "fish oil"));
    }

    #[test]
    fn suffix_rule_examples() {
        assert!(has_pharma_suffix("lisinopril"));
        assert!(has_pharma_suffix("amoxicillin"));
        assert!(has_pharma_suffix("Omeprazole"));
        assert!(has_pharma_suffix("losartan"));
        assert!(has_pharma_suffix("erlotinib"));
        assert!(!has_pharma_suffix("Monday"));
        assert!(!has_pharma_suffix("ol")); // below 3 letters
    }

    #[test]
    fn capitalized_fallback_requires_four_letters() {
        let vocab = MedicineVocabulary::new();
        let hits = vocab.match_names("Zyx Abcd");
        assert!(!hits.iter().any(|m| m.text == "Zyx"));
        assert!(hits
            .iter()
            .any(|m| m.layer == NameLayer::CapitalizedWord && m.text == "Abcd"));
    }

    #[test]
    fn capitalized_fallback_skips_stoplist_words() {
        let vocab = MedicineVocabulary::new();
        assert!(vocab.match_names("Monday Refill").is_empty());
        // Non-stoplist capitalized tokens still come through.
        assert!(vocab
            .match_names("Monday Bravexa")
            .iter()
            .any(|m| m.layer == NameLayer::CapitalizedWord && m.text == "Bravexa"));
    }

    #[test]
    fn dosage_simple() {
        assert_eq!(find_dosage("Lisinopril 10mg once daily").as_deref(), Some("10mg"));
        assert_eq!(find_dosage("take 2.5 mg at night").as_deref(), Some("2.5mg"));
        assert_eq!(find_dosage("insulin 10 units").as_deref(), Some("10units"));
        assert_eq!(find_dosage("Vitamin D 1000 IU").as_deref(), Some("1000iu"));
    }

    #[test]
    fn dosage_ratio_form() {
        assert_eq!(
            find_dosage("Augmentin 875/125 mg").as_deref(),
            Some("875/125mg")
        );
    }

    #[test]
    fn dosage_requires_unit() {
        assert_eq!(find_dosage("take 2 in the morning"), None);
        assert_eq!(find_dosage("Rx# 1234567"), None);
    }

    #[test]
    fn frequency_times_per_period() {
        assert_eq!(
            find_frequency("Lisinopril 10mg once daily").as_deref(),
            Some("once daily")
        );
        assert_eq!(
            find_frequency("twice a day with food").as_deref(),
            Some("twice a day")
        );
        assert_eq!(
            find_frequency("3 times daily").as_deref(),
            Some("3 times daily")
        );
        assert_eq!(
            find_frequency("two times per week").as_deref(),
            Some("two times per week")
        );
    }

    #[test]
    fn frequency_every_n_hours() {
        assert_eq!(
            frequency_kind("every 6 hours as tolerated"),
            Some(FrequencyKind::EveryNHours)
        );
        assert_eq!(
            find_frequency("every 4-6 hours").as_deref(),
            Some("every 4-6 hours")
        );
    }

    #[test]
    fn frequency_day_part_and_meals() {
        assert_eq!(frequency_kind("at bedtime"), Some(FrequencyKind::DayPart));
        assert_eq!(
            find_frequency("with meals").as_deref(),
            Some("with meals")
        );
        assert_eq!(
            find_frequency("before breakfast").as_deref(),
            Some("before breakfast")
        );
    }

    #[test]
    fn frequency_as_needed() {
        assert_eq!(frequency_kind("PRN for pain"), Some(FrequencyKind::AsNeeded));
        assert_eq!(find_frequency("as needed").as_deref(), Some("as needed"));
    }

    #[test]
    fn frequency_shorthand() {
        assert_eq!(frequency_kind("1 tab po bid"), Some(FrequencyKind::Shorthand));
        assert_eq!(find_frequency("qhs").as_deref(), Some("qhs"));
        assert_eq!(find_frequency("q 8 h").as_deref(), Some("q 8 h"));
    }

    #[test]
    fn frequency_take_tablets() {
        assert_eq!(
            find_frequency("take 2 tablets as directed").as_deref(),
            Some("take 2 tablets as directed")
        );
    }

    #[test]
    fn no_frequency_on_plain_text() {
        assert_eq!(find_frequency("Lisinopril 10mg"), None);
        assert_eq!(find_frequency("Monday"), None);
    }

    #[test]
    fn context_keywords() {
        assert!(contains_context_keyword("Take with water"));
        assert!(contains_context_keyword("500mg tablet"));
        assert!(!contains_context_keyword("Monday"));
    }

    #[test]
    fn common_word_stoplist() {
        assert!(is_common_word("Monday"));
        assert!(is_common_word("january"));
        assert!(is_common_word("Refill"));
        assert!(!is_common_word("Lisinopril"));
    }
}

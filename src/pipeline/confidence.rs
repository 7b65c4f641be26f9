//! Confidence scoring: additive weighted bonuses over a fixed base,
//! clamped to [0, 1].
//!
//! Scoring is deterministic and order-independent: every bonus is a pure
//! function of the same candidate, summed once. The weights were tuned
//! empirically and live in [`ScoringWeights`] so callers can recalibrate.

use super::extract::Candidate;
use super::patterns::{self, MedicineVocabulary};
use crate::config::ScoringWeights;

/// Score one candidate. Always returns a value in [0, 1].
pub(crate) fn score_candidate(
    candidate: &Candidate,
    vocabulary: &MedicineVocabulary,
    weights: &ScoringWeights,
) -> f32 {
    let name = candidate.name.trim();
    let mut score = weights.base;

    if vocabulary.is_known_medicine(name) {
        score += weights.known_medicine;
    }

    // Additive with the known-list bonus; a name can earn both.
    if patterns::has_pharma_suffix(name) {
        score += weights.pharma_suffix;
    }

    if candidate.dosage.is_some() {
        score += weights.dosage_present;
    }

    if candidate.frequency.is_some() {
        score += weights.frequency_present;
    }

    if name.chars().count() < 4 {
        score += weights.short_name;
    }

    if patterns::contains_context_keyword(&candidate.line_text) {
        score += weights.context_keyword;
    }

    if has_clean_capital_shape(name) {
        score += weights.clean_capitalization;
    }

    if patterns::is_common_word(name) {
        score += weights.common_word;
    }

    score.clamp(0.0, 1.0)
}

/// One capital letter followed by lowercase letters only: the clean
/// proper-noun shape a printed medicine name usually has.
fn has_clean_capital_shape(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => chars.all(|c| c.is_lowercase()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, dosage: Option<&str>, frequency: Option<&str>, line: &str) -> Candidate {
        Candidate {
            name: name.to_string(),
            dosage: dosage.map(str::to_string),
            frequency: frequency.map(str::to_string),
            line_index: 0,
            line_text: line.to_string(),
        }
    }

    fn score(candidate: &Candidate) -> f32 {
        score_candidate(
            candidate,
            &MedicineVocabulary::new(),
            &ScoringWeights::default(),
        )
    }

    #[test]
    fn fully_supported_known_medicine_scores_high() {
        // Base + known list + suffix + dosage + frequency + context keyword
        // + clean capital shape, clamped to 1.0.
        let c = candidate(
            "Lisinopril",
            Some("10mg"),
            Some("once daily"),
            "Lisinopril 10mg once daily",
        );
        let s = score(&c);
        assert!(s >= 0.8, "expected >= 0.8, got {s}");
        assert!(s <= 1.0);
    }

    #[test]
    fn bare_stoplist_word_stays_at_threshold() {
        // Base 0.2 + clean shape 0.1 - common word 0.15 = 0.15, which the
        // strict acceptance check rejects.
        let c = candidate("Monday", None, None, "Monday");
        let s = score(&c);
        assert!(s <= 0.15, "expected <= 0.15, got {s}");
    }

    #[test]
    fn unknown_capitalized_word_clears_threshold() {
        let c = candidate("Xelvanta", None, None, "Xelvanta");
        let s = score(&c);
        // Base + clean capital shape only.
        assert!((s - 0.3).abs() < 1e-6, "expected 0.3, got {s}");
    }

    #[test]
    fn dosage_and_frequency_bonuses_are_additive() {
        let bare = score(&candidate("Xelvanta", None, None, "Xelvanta"));
        let with_dose = score(&candidate("Xelvanta", Some("10mg"), None, "Xelvanta"));
        let with_both = score(&candidate(
            "Xelvanta",
            Some("10mg"),
            Some("bid"),
            "Xelvanta",
        ));
        assert!((with_dose - bare - 0.2).abs() < 1e-6);
        assert!((with_both - with_dose - 0.1).abs() < 1e-6);
    }

    #[test]
    fn short_names_are_penalized() {
        let c = candidate("Ib", None, None, "Ib");
        let s = score(&c);
        // Base 0.2 + clean shape 0.1 - short 0.1
        assert!((s - 0.2).abs() < 1e-6, "expected 0.2, got {s}");
    }

    #[test]
    fn context_keyword_bonus_comes_from_source_line() {
        let without = score(&candidate("Xelvanta", None, None, "Xelvanta"));
        let with = score(&candidate("Xelvanta", None, None, "take Xelvanta"));
        assert!((with - without - 0.15).abs() < 1e-6);
    }

    #[test]
    fn mixed_case_name_gets_no_shape_bonus() {
        assert!(has_clean_capital_shape("Lisinopril"));
        assert!(!has_clean_capital_shape("LISINOPRIL"));
        assert!(!has_clean_capital_shape("lisinopril"));
        assert!(!has_clean_capital_shape("Vitamin D"));
        assert!(!has_clean_capital_shape(""));
    }

    #[test]
    fn score_never_exceeds_one() {
        let c = candidate(
            "Lisinopril",
            Some("10mg"),
            Some("once daily"),
            "take Lisinopril 10mg tablet once daily",
        );
        assert!(score(&c) <= 1.0);
    }

    #[test]
    fn score_never_goes_negative_under_adversarial_weights() {
        let weights = ScoringWeights {
            base: 0.0,
            known_medicine: -5.0,
            pharma_suffix: -5.0,
            dosage_present: -5.0,
            frequency_present: -5.0,
            short_name: -5.0,
            context_keyword: -5.0,
            clean_capitalization: -5.0,
            common_word: -5.0,
        };
        let c = candidate(
            "Lisinopril",
            Some("10mg"),
            Some("once daily"),
            "take Lisinopril 10mg once daily",
        );
        let s = score_candidate(&c, &MedicineVocabulary::new(), &weights);
        assert_eq!(s, 0.0);
    }

    #[test]
    fn score_clamps_under_inflated_weights() {
        let weights = ScoringWeights {
            base: 5.0,
            ..ScoringWeights::default()
        };
        let c = candidate("Xelvanta", None, None, "Xelvanta");
        let s = score_candidate(&c, &MedicineVocabulary::new(), &weights);
        assert_eq!(s, 1.0);
    }

    #[test]
    fn extra_vocabulary_earns_known_medicine_bonus() {
        let vocabulary = MedicineVocabulary::with_terms(&["xelvanta".to_string()]);
        let c = candidate("Xelvanta", None, None, "Xelvanta");
        let s = score_candidate(&c, &vocabulary, &ScoringWeights::default());
        // Base + known + clean shape.
        assert!((s - 0.9).abs() < 1e-6, "expected 0.9, got {s}");
    }
}

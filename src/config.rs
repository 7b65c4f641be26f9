//! Engine configuration.
//!
//! The acceptance threshold and every scoring bonus were tuned empirically
//! against real prescription samples, so they are carried as configurable
//! defaults rather than hard constants. Callers recalibrating against their
//! own corpus override individual fields and leave the rest at `Default`.

use serde::{Deserialize, Serialize};

/// Additive scoring weights applied by the confidence scorer.
///
/// All bonuses are summed over the same candidate and the total is clamped
/// to [0, 1]; order never matters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Starting score for every candidate.
    pub base: f32,
    /// Name matched the explicit known-medicine list.
    pub known_medicine: f32,
    /// Name ends in a pharmaceutically common suffix. Additive with
    /// `known_medicine`; a name can earn both.
    pub pharma_suffix: f32,
    /// A dosage was found on the line or an immediate neighbor.
    pub dosage_present: f32,
    /// A frequency was found on the line or an immediate neighbor.
    pub frequency_present: f32,
    /// Penalty (negative) for names shorter than 4 characters.
    pub short_name: f32,
    /// Source line contains a prescription-context keyword.
    pub context_keyword: f32,
    /// Name is exactly one capital letter followed by lowercase letters.
    pub clean_capitalization: f32,
    /// Penalty (negative) for names in the common-word stoplist (weekdays,
    /// months, frequent layout words). Keeps the capitalized-word fallback
    /// layer from promoting ordinary prose.
    pub common_word: f32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base: 0.2,
            known_medicine: 0.6,
            pharma_suffix: 0.3,
            dosage_present: 0.2,
            frequency_present: 0.1,
            short_name: -0.1,
            context_keyword: 0.15,
            clean_capitalization: 0.1,
            common_word: -0.15,
        }
    }
}

/// Tunables for one analyzer instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// A candidate becomes a detection only when its confidence strictly
    /// exceeds this.
    pub acceptance_threshold: f32,
    pub weights: ScoringWeights,
    /// Run dictionary-based OCR-misread correction before extraction.
    pub correct_ocr_errors: bool,
    /// Extra vocabulary matched and scored as known medicines, for
    /// formularies the built-in list does not cover.
    pub extra_medicines: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: 0.15,
            weights: ScoringWeights::default(),
            correct_ocr_errors: true,
            extra_medicines: Vec::new(),
        }
    }
}

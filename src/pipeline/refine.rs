//! Deduplication and refinement: the sole constructor of
//! [`DetectedMedicine`].
//!
//! Collapses repeated detections of the same normalized name, keeps the
//! highest-confidence variant, materializes the cleaned title-cased name,
//! and sorts the final list by descending confidence.

use chrono::Utc;
use uuid::Uuid;

use super::bbox::resolve_bounding_box;
use super::extract::Candidate;
use crate::models::medicine::{
    DetectedMedicine, MedicineSource, DOSAGE_NOT_SPECIFIED, FREQUENCY_AS_DIRECTED,
};
use crate::models::ocr::TextBlock;

/// A candidate that cleared the acceptance threshold.
#[derive(Debug, Clone)]
pub(crate) struct ScoredCandidate {
    pub candidate: Candidate,
    pub confidence: f32,
}

/// Group accepted candidates by normalized name, keep the best per group,
/// and materialize the final detections.
///
/// Ties keep the earliest candidate, and the stable descending sort keeps
/// output deterministic for identical input.
pub(crate) fn refine_detections(
    scored: Vec<ScoredCandidate>,
    blocks: &[TextBlock],
) -> Vec<DetectedMedicine> {
    let mut best: Vec<(String, ScoredCandidate)> = Vec::new();

    for entry in scored {
        let key = normalize_name(&entry.candidate.name);
        match best.iter_mut().find(|(k, _)| *k == key) {
            Some((_, kept)) if entry.confidence > kept.confidence => *kept = entry,
            Some(_) => {}
            None => best.push((key, entry)),
        }
    }

    let mut detections: Vec<DetectedMedicine> = best
        .into_iter()
        .map(|(_, entry)| materialize(entry, blocks))
        .collect();

    detections.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    detections
}

fn materialize(entry: ScoredCandidate, blocks: &[TextBlock]) -> DetectedMedicine {
    let ScoredCandidate { candidate, confidence } = entry;
    let bounding_box = resolve_bounding_box(&candidate.name, blocks);

    DetectedMedicine {
        id: Uuid::new_v4(),
        name: clean_medicine_name(&candidate.name),
        dosage: candidate
            .dosage
            .unwrap_or_else(|| DOSAGE_NOT_SPECIFIED.to_string()),
        frequency: candidate
            .frequency
            .unwrap_or_else(|| FREQUENCY_AS_DIRECTED.to_string()),
        confidence,
        detected: true,
        source: MedicineSource::Detected,
        bounding_box,
        created_at: Utc::now(),
    }
}

/// Grouping key: trimmed and lowercased.
pub(crate) fn normalize_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Cleaned display name: letters, digits, spaces, and hyphens only, then
/// title-cased per word.
pub fn clean_medicine_name(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '-')
        .collect();

    stripped
        .to_lowercase()
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

//! Entity extraction: turns non-noise lines into pre-score candidates.

use super::noise::is_noise_line;
use super::patterns::{self, MedicineVocabulary};

/// Pre-confidence candidate. Ephemeral; discarded after scoring, never
/// exposed outside the pipeline.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub name: String,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub line_index: usize,
    pub line_text: String,
}

/// Apply every name layer to every non-noise line, then look for a dosage
/// and a frequency near each hit.
///
/// The neighbor search order is fixed: current line, then the immediately
/// preceding line, then the following one. The first match wins; matches
/// from different lines are never merged.
pub(crate) fn extract_candidates(
    lines: &[String],
    vocabulary: &MedicineVocabulary,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        if is_noise_line(line) {
            continue;
        }

        for name in unique_names(vocabulary, line) {
            candidates.push(Candidate {
                name,
                dosage: search_neighbors(lines, index, patterns::find_dosage),
                frequency: search_neighbors(lines, index, patterns::find_frequency),
                line_index: index,
                line_text: line.clone(),
            });
        }
    }

    candidates
}

/// Union of all layer hits on one line, de-duplicated case-insensitively.
/// Layers are applied in trust order, so the first occurrence survives.
fn unique_names(vocabulary: &MedicineVocabulary, line: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for hit in vocabulary.match_names(line) {
        if !names.iter().any(|n| n.eq_ignore_ascii_case(&hit.text)) {
            names.push(hit.text);
        }
    }
    names
}

fn search_neighbors(
    lines: &[String],
    index: usize,
    finder: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    if let Some(found) = finder(&lines[index]) {
        return Some(found);
    }
    if index > 0 {
        if let Some(found) = finder(&lines[index - 1]) {
            return Some(found);
        }
    }
    lines.get(index + 1).and_then(|line| finder(line))
}

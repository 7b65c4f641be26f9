//! Dictionary-based OCR-misread correction.
//!
//! OCR engines routinely mangle printed drug names ("Metfonnin" for
//! "Metformin", "rn" for "m"). Before extraction runs, each word is checked
//! against the medicine vocabulary and replaced when it is an unambiguous
//! near-miss. Conservative on purpose: only words of 5+ characters, edit
//! distance at most 2, and a single best match qualify, so ordinary prose is
//! left alone.

use super::patterns::MedicineVocabulary;

const MAX_EDIT_DISTANCE: u32 = 2;
const MIN_WORD_LEN: usize = 5;

/// Correct medicine-name misreads in one line. Non-word characters and
/// word order are preserved.
pub fn correct_line(line: &str, vocabulary: &MedicineVocabulary) -> String {
    let mut result = String::with_capacity(line.len());
    let mut word = String::new();

    for ch in line.chars() {
        if ch.is_alphanumeric() {
            word.push(ch);
        } else {
            flush_word(&mut result, &mut word, vocabulary);
            result.push(ch);
        }
    }
    flush_word(&mut result, &mut word, vocabulary);

    result
}

fn flush_word(result: &mut String, word: &mut String, vocabulary: &MedicineVocabulary) {
    if !word.is_empty() {
        result.push_str(&correct_word(word, vocabulary));
        word.clear();
    }
}

fn correct_word(word: &str, vocabulary: &MedicineVocabulary) -> String {
    if word.chars().count() < MIN_WORD_LEN {
        return word.to_string();
    }

    let lower = word.to_lowercase();
    if vocabulary.is_known_medicine(&lower) {
        return word.to_string();
    }

    let mut best: Option<&str> = None;
    let mut best_distance = MAX_EDIT_DISTANCE + 1;
    let mut ambiguous = false;

    for term in vocabulary.dictionary_terms() {
        // Terms differing in length by more than the distance cap cannot match.
        let len_diff = (lower.len() as i64 - term.len() as i64).unsigned_abs() as u32;
        if len_diff > MAX_EDIT_DISTANCE {
            continue;
        }

        let distance = edit_distance(&lower, term);
        if distance < best_distance {
            best_distance = distance;
            best = Some(term);
            ambiguous = false;
        } else if distance == best_distance && best.is_some() {
            ambiguous = true;
        }
    }

    match best {
        Some(term) if !ambiguous => preserve_case(word, term),
        _ => word.to_string(),
    }
}

/// Carry the original capitalization pattern over to the corrected term.
fn preserve_case(original: &str, correction: &str) -> String {
    if original.chars().all(|c| c.is_uppercase() || !c.is_alphabetic()) {
        return correction.to_uppercase();
    }

    if original.chars().next().is_some_and(|c| c.is_uppercase()) {
        let mut chars = correction.chars();
        match chars.next() {
            Some(c) => c.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    } else {
        correction.to_string()
    }
}

/// Levenshtein distance, two-row formulation.
fn edit_distance(a: &str, b: &str) -> u32 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len() as u32;
    }
    if b_chars.is_empty() {
        return a_chars.len() as u32;
    }

    let mut prev: Vec<u32> = (0..=b_chars.len() as u32).collect();
    let mut curr = vec![0u32; b_chars.len() + 1];

    for (i, &a_ch) in a_chars.iter().enumerate() {
        curr[0] = (i + 1) as u32;
        for (j, &b_ch) in b_chars.iter().enumerate() {
            let cost = u32::from(a_ch != b_ch);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

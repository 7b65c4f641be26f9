//! Text normalization: the first pipeline stage.

/// Split raw OCR text into trimmed, non-empty lines, preserving order.
///
/// The position in the returned vec is the line index later stages use as
/// their join key. Empty or whitespace-only input yields an empty vec, not
/// an error.
pub fn normalize_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

//! Bounding-box resolution: maps a detected name back to the OCR block
//! hierarchy so the review UI can highlight it on the source image.

use crate::models::ocr::{BoundingBox, TextBlock};

/// Find a screen-space rectangle for a name.
///
/// Blocks are scanned in order; the first block whose text contains the name
/// (case-insensitive) is inspected line by line, and the first containing
/// line with a usable frame wins. A zero-area block frame is treated the
/// same as a missing one, so malformed provider frames degrade to `None`
/// instead of nonsense rectangles. First match wins; occurrences are never
/// aggregated.
pub fn resolve_bounding_box(name: &str, blocks: &[TextBlock]) -> Option<BoundingBox> {
    let needle = name.to_lowercase();

    for block in blocks {
        if !block.text.to_lowercase().contains(&needle) {
            continue;
        }

        for line in &block.lines {
            if line.text.to_lowercase().contains(&needle) && line.frame.has_area() {
                return Some(line.frame);
            }
        }

        if block.frame.has_area() {
            return Some(block.frame);
        }
    }

    None
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ocr::BoundingBox;

/// Sentinel emitted when no dosage could be located near a detection.
pub const DOSAGE_NOT_SPECIFIED: &str = "Not specified";

/// Sentinel emitted when no frequency could be located near a detection.
pub const FREQUENCY_AS_DIRECTED: &str = "As directed";

/// Where a medicine record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedicineSource {
    /// Emitted by this engine.
    Detected,
    /// Added by hand in the review screen. The engine never emits this; the
    /// review UI constructs such records itself with confidence 1.0.
    Manual,
}

/// One confidence-scored medicine mention, deduplicated per engine run.
///
/// Constructed exclusively by the refiner stage and never mutated by the
/// engine afterwards; edits happen downstream in the review UI on a copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedMedicine {
    pub id: Uuid,
    /// Cleaned, title-cased medicine name.
    pub name: String,
    /// Formatted number+unit string, or [`DOSAGE_NOT_SPECIFIED`].
    pub dosage: String,
    /// Recognized schedule phrase, or [`FREQUENCY_AS_DIRECTED`].
    pub frequency: String,
    /// Always in [0, 1].
    pub confidence: f32,
    pub detected: bool,
    pub source: MedicineSource,
    /// Present only when the name could be re-located in the OCR hierarchy.
    pub bounding_box: Option<BoundingBox>,
    pub created_at: DateTime<Utc>,
}

/// Final engine output, consumed by the review UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Sorted by confidence, descending.
    pub detected_medicines: Vec<DetectedMedicine>,
    /// Pass-through of the input document's full text.
    pub ocr_text: String,
    /// Mean confidence across detections, 0.0 when the list is empty.
    pub confidence: f32,
    /// Wall-clock seconds spent in the pipeline.
    pub processing_time: f64,
}

impl AnalysisResult {
    pub fn empty(ocr_text: String, processing_time: f64) -> Self {
        Self {
            detected_medicines: Vec::new(),
            ocr_text,
            confidence: 0.0,
            processing_time,
        }
    }
}

pub mod bbox;
pub mod confidence;
pub mod correction;
pub mod extract;
pub mod noise;
pub mod normalize;
pub mod orchestrator;
pub mod patterns;
pub mod refine;

pub use orchestrator::{ImageSource, OcrProvider, PrescriptionAnalyzer};

use thiserror::Error;

/// Failures that cross the engine boundary.
///
/// Malformed-but-present data never surfaces here; it is recovered locally
/// with safe defaults (zero-area frames, empty results). Only the absence of
/// input, an OCR provider failing before a document exists, propagates, so
/// the caller can distinguish "retry the scan" from "no medicines found".
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("OCR provider failed: {0}")]
    Provider(String),

    #[error("image reference is invalid: {0}")]
    InvalidImage(String),
}

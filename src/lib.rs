//! Rxsight: prescription-text interpretation engine.
//!
//! Takes the raw output of an external OCR step (free text plus positional
//! text blocks) and produces a structured, confidence-scored list of
//! candidate medicines. Best-effort heuristics only — every result is meant
//! to be reviewed by a human before it is treated as medical fact.

pub mod config;
pub mod models;
pub mod pipeline;

pub use config::{EngineConfig, ScoringWeights};
pub use models::medicine::{AnalysisResult, DetectedMedicine, MedicineSource};
pub use models::ocr::{BoundingBox, OcrDocument, TextBlock, TextElement, TextLine};
pub use pipeline::orchestrator::{ImageSource, OcrProvider, PrescriptionAnalyzer};
pub use pipeline::AnalysisError;

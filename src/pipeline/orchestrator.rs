//! Pipeline orchestration.
//!
//! Sequences normalization, correction, classification, extraction, scoring,
//! and refinement over one OCR document, measures wall-clock time, and emits
//! the structured tracing events for the run. The stages themselves stay
//! pure and silent; this is the only module with side effects (tracing) or a
//! clock.

use std::time::Instant;

use super::confidence::score_candidate;
use super::correction::correct_line;
use super::extract::extract_candidates;
use super::normalize::normalize_lines;
use super::patterns::MedicineVocabulary;
use super::refine::{refine_detections, ScoredCandidate};
use super::AnalysisError;
use crate::config::EngineConfig;
use crate::models::medicine::AnalysisResult;
use crate::models::ocr::OcrDocument;

/// Reference to the photographed prescription handed to the OCR provider.
#[derive(Debug, Clone)]
pub enum ImageSource {
    Uri(String),
    Blob(Vec<u8>),
}

/// The external OCR capability, injected so tests and offline callers can
/// substitute a fake. A provider failure means no document ever existed; it
/// propagates instead of being folded into an empty result, which the
/// review UI could not tell apart from "no medicines found".
pub trait OcrProvider {
    fn recognize(&self, image: &ImageSource) -> Result<OcrDocument, AnalysisError>;
}

/// Runs the interpretation pipeline over OCR documents.
///
/// Pure per invocation: no shared mutable state, so independent analyzers
/// (or one analyzer behind a shared reference) may process images in
/// parallel without locking.
pub struct PrescriptionAnalyzer {
    provider: Box<dyn OcrProvider + Send + Sync>,
    config: EngineConfig,
    vocabulary: MedicineVocabulary,
}

impl PrescriptionAnalyzer {
    pub fn new(provider: Box<dyn OcrProvider + Send + Sync>) -> Self {
        Self::with_config(provider, EngineConfig::default())
    }

    pub fn with_config(
        provider: Box<dyn OcrProvider + Send + Sync>,
        config: EngineConfig,
    ) -> Self {
        let vocabulary = if config.extra_medicines.is_empty() {
            MedicineVocabulary::new()
        } else {
            MedicineVocabulary::with_terms(&config.extra_medicines)
        };
        Self {
            provider,
            config,
            vocabulary,
        }
    }

    /// Run OCR through the injected provider, then interpret the document.
    /// Provider errors propagate; elapsed time up to the failure is
    /// informational only and discarded.
    pub fn analyze_image(&self, image: &ImageSource) -> Result<AnalysisResult, AnalysisError> {
        validate_image(image)?;
        let document = self.provider.recognize(image)?;
        Ok(self.analyze_document(&document))
    }

    /// Interpret an already-fetched OCR document. Infallible: blank input
    /// and malformed frames are normal outcomes, not errors.
    pub fn analyze_document(&self, document: &OcrDocument) -> AnalysisResult {
        let started = Instant::now();

        if document.full_text.trim().is_empty() {
            tracing::debug!("blank OCR text, returning empty result");
            return AnalysisResult::empty(
                document.full_text.clone(),
                started.elapsed().as_secs_f64(),
            );
        }

        let mut lines = normalize_lines(&document.full_text);
        tracing::debug!(lines = lines.len(), "normalized OCR text");

        if self.config.correct_ocr_errors {
            for line in &mut lines {
                *line = correct_line(line, &self.vocabulary);
            }
            tracing::debug!("applied vocabulary correction");
        }

        let candidates = extract_candidates(&lines, &self.vocabulary);
        let candidate_count = candidates.len();
        tracing::debug!(candidates = candidate_count, "extracted candidates");

        let accepted: Vec<ScoredCandidate> = candidates
            .into_iter()
            .filter_map(|candidate| {
                let confidence =
                    score_candidate(&candidate, &self.vocabulary, &self.config.weights);
                (confidence > self.config.acceptance_threshold).then_some(ScoredCandidate {
                    candidate,
                    confidence,
                })
            })
            .collect();
        tracing::debug!(accepted = accepted.len(), "scored candidates");

        let detected_medicines = refine_detections(accepted, &document.blocks);

        let confidence = if detected_medicines.is_empty() {
            0.0
        } else {
            detected_medicines.iter().map(|d| d.confidence).sum::<f32>()
                / detected_medicines.len() as f32
        };

        let processing_time = started.elapsed().as_secs_f64();
        tracing::info!(
            lines = lines.len(),
            candidates = candidate_count,
            detected = detected_medicines.len(),
            mean_confidence = confidence,
            elapsed_ms = processing_time * 1000.0,
            "prescription analysis complete"
        );

        AnalysisResult {
            detected_medicines,
            ocr_text: document.full_text.clone(),
            confidence,
            processing_time,
        }
    }
}

/// An empty reference can never produce a document; reject it before the
/// provider round-trip.
fn validate_image(image: &ImageSource) -> Result<(), AnalysisError> {
    match image {
        ImageSource::Uri(uri) if uri.trim().is_empty() => {
            Err(AnalysisError::InvalidImage("empty image URI".into()))
        }
        ImageSource::Blob(bytes) if bytes.is_empty() => {
            Err(AnalysisError::InvalidImage("empty image blob".into()))
        }
        _ => Ok(()),
    }
}

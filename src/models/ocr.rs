//! Canonical OCR document shapes, plus the ingestion boundary that maps
//! heterogeneous provider payloads into them.
//!
//! OCR providers disagree about field names (`fullText` vs `text`,
//! `boundingBox` vs `frame`, `x` vs `left` vs `originX`) and sometimes emit
//! numbers as strings. All of that is normalized exactly once, here, so the
//! pipeline stages only ever see one shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rectangle locating recognized text on the source image.
/// A zero-area box means "no usable position".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// True when the box carries any usable extent.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 || self.height > 0.0
    }
}

/// Output of the external OCR step: the full recognized text plus the
/// positional block hierarchy. Immutable for the engine's lifetime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrDocument {
    pub full_text: String,
    pub blocks: Vec<TextBlock>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    pub frame: BoundingBox,
    pub lines: Vec<TextLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextLine {
    pub text: String,
    pub frame: BoundingBox,
    pub elements: Vec<TextElement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextElement {
    pub text: String,
    pub frame: BoundingBox,
}

impl OcrDocument {
    pub fn from_text(full_text: impl Into<String>) -> Self {
        Self {
            full_text: full_text.into(),
            blocks: Vec::new(),
        }
    }

    /// Normalize a duck-typed provider payload into the canonical shape.
    ///
    /// Tolerant by contract: unknown fields are ignored, missing or
    /// unparseable frame coordinates default to 0.0 (a zero-area box), and a
    /// payload with no recognizable block array still yields a usable
    /// document as long as some text field is present.
    pub fn from_provider_json(payload: &Value) -> Self {
        let full_text = string_field(payload, &["fullText", "full_text", "text"])
            .unwrap_or_default();

        let blocks = array_field(payload, &["blocks", "textBlocks", "text_blocks"])
            .map(|items| items.iter().map(parse_block).collect())
            .unwrap_or_default();

        Self { full_text, blocks }
    }
}

fn parse_block(value: &Value) -> TextBlock {
    TextBlock {
        text: string_field(value, &["text", "blockText"]).unwrap_or_default(),
        frame: parse_frame(value),
        lines: array_field(value, &["lines", "textLines"])
            .map(|items| items.iter().map(parse_line).collect())
            .unwrap_or_default(),
    }
}

fn parse_line(value: &Value) -> TextLine {
    TextLine {
        text: string_field(value, &["text", "lineText"]).unwrap_or_default(),
        frame: parse_frame(value),
        elements: array_field(value, &["elements", "words"])
            .map(|items| items.iter().map(parse_element).collect())
            .unwrap_or_default(),
    }
}

fn parse_element(value: &Value) -> TextElement {
    TextElement {
        text: string_field(value, &["text"]).unwrap_or_default(),
        frame: parse_frame(value),
    }
}

fn parse_frame(value: &Value) -> BoundingBox {
    let frame = field(value, &["frame", "boundingBox", "bounding_box", "bounds", "rect"])
        .unwrap_or(value);

    BoundingBox {
        x: numeric_field(frame, &["x", "left", "originX", "origin_x"]),
        y: numeric_field(frame, &["y", "top", "originY", "origin_y"]),
        width: numeric_field(frame, &["width", "w"]),
        height: numeric_field(frame, &["height", "h"]),
    }
}

fn field<'a>(value: &'a Value, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|n| value.get(n))
}

fn string_field(value: &Value, names: &[&str]) -> Option<String> {
    field(value, names)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn array_field<'a>(value: &'a Value, names: &[&str]) -> Option<&'a Vec<Value>> {
    field(value, names).and_then(Value::as_array)
}

/// Coordinates arrive as numbers or numeric strings; anything else is 0.0.
fn numeric_field(value: &Value, names: &[&str]) -> f32 {
    field(value, names)
        .and_then(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .map(|n| n as f32)
        .unwrap_or(0.0)
}

pub mod medicine;
pub mod ocr;

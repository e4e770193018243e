// Adapters layer: concrete implementations of the domain ports for file formats.

pub mod docx;
pub mod xlsx;

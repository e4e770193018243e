use crate::domain::model::{HeadingRecord, LayoutPolicy, Paragraph, Sheet, TransformResult};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Source of ordered body paragraphs.
pub trait DocumentReader {
    fn read_paragraphs(&self, path: &Path) -> Result<Vec<Paragraph>>;
}

/// Persists and reloads worksheets.
pub trait SpreadsheetWriter {
    fn save(&self, sheet: &Sheet, path: &Path) -> Result<()>;
    fn open(&self, path: &Path) -> Result<Sheet>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &Path;
    fn output_path(&self) -> PathBuf;
    fn heading_style(&self) -> &str;
    fn sheet_name(&self) -> &str;
    fn layout(&self) -> LayoutPolicy;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<HeadingRecord>>;
    fn transform(&self, data: Vec<HeadingRecord>) -> Result<TransformResult>;
    fn load(&self, result: TransformResult) -> Result<PathBuf>;
}

#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::extract::DEFAULT_HEADING_STYLE;
use crate::core::ConfigProvider;
use crate::domain::model::{LayoutPolicy, Sheet};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Excel caps column widths at 255 characters.
const MAX_EXCEL_COLUMN_WIDTH: usize = 255;

/// Fully resolved settings for one conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertOptions {
    pub input_path: PathBuf,
    /// Defaults to the input path with an `.xlsx` extension.
    pub output_path: Option<PathBuf>,
    pub heading_style: String,
    pub sheet_name: String,
    pub layout: LayoutPolicy,
}

impl ConvertOptions {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: Some(output_path.into()),
            ..Self::for_input(input_path)
        }
    }

    pub fn for_input(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: None,
            heading_style: DEFAULT_HEADING_STYLE.to_string(),
            sheet_name: Sheet::DEFAULT_NAME.to_string(),
            layout: LayoutPolicy::default(),
        }
    }
}

impl ConfigProvider for ConvertOptions {
    fn input_path(&self) -> &Path {
        &self.input_path
    }

    fn output_path(&self) -> PathBuf {
        self.output_path
            .clone()
            .unwrap_or_else(|| self.input_path.with_extension("xlsx"))
    }

    fn heading_style(&self) -> &str {
        &self.heading_style
    }

    fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    fn layout(&self) -> LayoutPolicy {
        self.layout
    }
}

impl Validate for ConvertOptions {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input.path", &self.input_path)?;
        validation::validate_file_extension("input.path", &self.input_path, &["docx"])?;

        let output_path = self.output_path();
        validation::validate_path("output.path", &output_path)?;
        validation::validate_file_extension("output.path", &output_path, &["xlsx"])?;

        validation::validate_non_empty_string("input.heading_style", &self.heading_style)?;
        validation::validate_sheet_name("output.sheet_name", &self.sheet_name)?;

        validation::validate_range(
            "layout.max_column_width",
            self.layout.max_width,
            1,
            MAX_EXCEL_COLUMN_WIDTH,
        )?;
        validation::validate_range(
            "layout.padding",
            self.layout.padding,
            0,
            MAX_EXCEL_COLUMN_WIDTH,
        )?;
        validation::validate_range(
            "layout.default_column_width",
            self.layout.default_width,
            0.0,
            MAX_EXCEL_COLUMN_WIDTH as f64,
        )?;

        Ok(())
    }
}

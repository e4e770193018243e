pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{docx::DocxReader, xlsx::XlsxSheetWriter};
pub use config::ConvertOptions;
pub use core::{
    etl::EtlEngine,
    pipeline::{convert, convert_with, DocxPipeline},
};
pub use utils::error::{EtlError, Result};

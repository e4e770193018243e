pub mod etl;
pub mod extract;
pub mod layout;
pub mod pipeline;
pub mod shape;

pub use crate::domain::model::{HeadingRecord, OutputRow, TransformResult};
pub use crate::domain::ports::{ConfigProvider, DocumentReader, Pipeline, SpreadsheetWriter};
pub use crate::utils::error::Result;

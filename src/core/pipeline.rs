use crate::adapters::{docx::DocxReader, xlsx::XlsxSheetWriter};
use crate::config::ConvertOptions;
use crate::core::etl::EtlEngine;
use crate::core::extract::extract_headings;
use crate::core::layout::apply_layout;
use crate::core::shape::shape_records;
use crate::core::{ConfigProvider, DocumentReader, Pipeline, SpreadsheetWriter};
use crate::domain::model::{HeadingRecord, Sheet, TransformResult};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Heading-grouped document to spreadsheet conversion.
pub struct DocxPipeline<R: DocumentReader, W: SpreadsheetWriter, C: ConfigProvider> {
    reader: R,
    writer: W,
    config: C,
}

impl<R: DocumentReader, W: SpreadsheetWriter, C: ConfigProvider> DocxPipeline<R, W, C> {
    pub fn new(reader: R, writer: W, config: C) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

impl<R: DocumentReader, W: SpreadsheetWriter, C: ConfigProvider> Pipeline
    for DocxPipeline<R, W, C>
{
    fn extract(&self) -> Result<Vec<HeadingRecord>> {
        let input = self.config.input_path();
        tracing::debug!("Reading paragraphs from: {}", input.display());

        let paragraphs = self.reader.read_paragraphs(input)?;
        tracing::debug!("Document has {} body paragraphs", paragraphs.len());

        Ok(extract_headings(&paragraphs, self.config.heading_style()))
    }

    fn transform(&self, data: Vec<HeadingRecord>) -> Result<TransformResult> {
        let item_count = data.iter().map(|record| record.items.len()).sum();
        let rows = shape_records(&data);

        Ok(TransformResult { rows, item_count })
    }

    fn load(&self, result: TransformResult) -> Result<PathBuf> {
        let output_path = self.config.output_path();

        // 先寫出原始資料
        let sheet = Sheet::from_rows(self.config.sheet_name(), &result.rows);
        self.writer.save(&sheet, &output_path)?;

        // 重新開啟並套用換行與欄寬
        // 全空白的尾端資料列不會被讀回
        let mut sheet = self.writer.open(&output_path)?;
        sheet.ensure_row_count(result.rows.len() + 1);
        apply_layout(&mut sheet, &self.config.layout());
        self.writer.save(&sheet, &output_path)?;

        println!("Excel file has been saved to {}", output_path.display());
        Ok(output_path)
    }
}

/// Converts `input` to `output` with the default heading style and layout.
pub fn convert(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<PathBuf> {
    let options = ConvertOptions::new(input.as_ref(), output.as_ref());
    convert_with(options)
}

pub fn convert_with<C: ConfigProvider>(config: C) -> Result<PathBuf> {
    let pipeline = DocxPipeline::new(DocxReader, XlsxSheetWriter, config);
    EtlEngine::new(pipeline).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Paragraph;
    use crate::utils::error::EtlError;
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct MockReader {
        paragraphs: Vec<Paragraph>,
    }

    impl DocumentReader for MockReader {
        fn read_paragraphs(&self, _path: &Path) -> Result<Vec<Paragraph>> {
            Ok(self.paragraphs.clone())
        }
    }

    #[derive(Default)]
    struct MockWriter {
        files: RefCell<HashMap<PathBuf, Sheet>>,
        saves: RefCell<usize>,
    }

    impl SpreadsheetWriter for MockWriter {
        fn save(&self, sheet: &Sheet, path: &Path) -> Result<()> {
            *self.saves.borrow_mut() += 1;
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), sheet.clone());
            Ok(())
        }

        fn open(&self, path: &Path) -> Result<Sheet> {
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                EtlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path.display()),
                ))
            })
        }
    }

    fn mit_document() -> Vec<Paragraph> {
        vec![
            Paragraph::new("Normal", "Contacts"),
            Paragraph::new("Heading 1", "MIT"),
            Paragraph::new("Normal", "Alice, Student, USA"),
            Paragraph::new("Normal", "Bob, Staff"),
        ]
    }

    #[test]
    fn test_pipeline_end_to_end_with_mocks() {
        let reader = MockReader {
            paragraphs: mit_document(),
        };
        let config = ConvertOptions::new("in.docx", "out.xlsx");
        let pipeline = DocxPipeline::new(reader, MockWriter::default(), config);

        let engine = EtlEngine::new(pipeline);
        let output = engine.run().unwrap();
        assert_eq!(output, PathBuf::from("out.xlsx"));

        let writer = &engine.pipeline().writer;
        assert_eq!(*writer.saves.borrow(), 2);

        let files = writer.files.borrow();
        let sheet = files.get(Path::new("out.xlsx")).unwrap();
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.cell_text(1, 0), "MIT");
        assert_eq!(sheet.cell_text(1, 1), "Alice\nBob");
        assert_eq!(sheet.cell_text(1, 2), "Student\nStaff");
        assert_eq!(sheet.cell_text(1, 3), "USA\n");
        assert!(sheet.cell(1, 3).unwrap().wrap_text);
        // "Alice\nBob" 九個字元 + 2 小於預設寬度 13
        assert_eq!(sheet.column_width(1), Some(13.0));
    }

    /// Drops trailing rows that hold no text, like a reopened workbook does.
    #[derive(Default)]
    struct TrimmingWriter {
        inner: MockWriter,
    }

    impl SpreadsheetWriter for TrimmingWriter {
        fn save(&self, sheet: &Sheet, path: &Path) -> Result<()> {
            self.inner.save(sheet, path)
        }

        fn open(&self, path: &Path) -> Result<Sheet> {
            let stored = self.inner.open(path)?;
            let kept = stored
                .rows()
                .iter()
                .rposition(|cells| cells.iter().any(|cell| !cell.text.is_empty()))
                .map_or(0, |last| last + 1);

            let mut sheet = Sheet::new(stored.name());
            for cells in &stored.rows()[..kept] {
                sheet.push_row(cells.iter().map(|cell| cell.text.clone()));
            }
            Ok(sheet)
        }
    }

    #[test]
    fn test_blank_trailing_row_survives_reopen() {
        let reader = MockReader {
            paragraphs: vec![
                Paragraph::new("Heading 1", "MIT"),
                Paragraph::new("Normal", "Alice, Student, USA"),
                Paragraph::new("Heading 1", "   "),
            ],
        };
        let pipeline = DocxPipeline::new(
            reader,
            TrimmingWriter::default(),
            ConvertOptions::new("in.docx", "out.xlsx"),
        );
        let engine = EtlEngine::new(pipeline);
        engine.run().unwrap();

        let files = engine.pipeline().writer.inner.files.borrow();
        let sheet = files.get(Path::new("out.xlsx")).unwrap();
        assert_eq!(sheet.row_count(), 3);
        for col in 0..4 {
            let cell = sheet.cell(2, col).unwrap();
            assert!(cell.text.is_empty());
            assert!(cell.wrap_text);
        }
    }

    #[test]
    fn test_transform_counts_items() {
        let pipeline = DocxPipeline::new(
            MockReader { paragraphs: vec![] },
            MockWriter::default(),
            ConvertOptions::new("in.docx", "out.xlsx"),
        );

        let records = pipeline.extract().unwrap();
        assert!(records.is_empty());

        let result = pipeline
            .transform(vec![HeadingRecord {
                title: "MIT".to_string(),
                items: vec!["a".to_string(), "b".to_string()],
            }])
            .unwrap();
        assert_eq!(result.item_count, 2);
        assert_eq!(result.rows.len(), 1);
    }

    #[test]
    fn test_empty_document_writes_header_only() {
        let pipeline = DocxPipeline::new(
            MockReader { paragraphs: vec![] },
            MockWriter::default(),
            ConvertOptions::new("in.docx", "out.xlsx"),
        );
        let engine = EtlEngine::new(pipeline);
        engine.run().unwrap();

        let files = engine.pipeline().writer.files.borrow();
        let sheet = files.get(Path::new("out.xlsx")).unwrap();
        assert_eq!(sheet.row_count(), 1);
        assert_eq!(sheet.cell_text(0, 0), "University");
        assert!(sheet.column_widths().is_empty());
    }
}

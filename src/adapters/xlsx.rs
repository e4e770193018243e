//! Worksheet persistence: written with `rust_xlsxwriter`, reopened with `calamine`.

use crate::core::SpreadsheetWriter;
use crate::domain::model::{Cell, Sheet};
use crate::utils::error::{EtlError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{ColNum, Format, FormatAlign, FormatBorder, RowNum, Workbook};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxSheetWriter;

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center)
}

fn cast_row_num(index: usize) -> Result<RowNum> {
    RowNum::try_from(index).map_err(|_| EtlError::ProcessingError {
        message: format!("row index {} exceeds worksheet limits", index),
    })
}

fn cast_col_num(index: usize) -> Result<ColNum> {
    ColNum::try_from(index).map_err(|_| EtlError::ProcessingError {
        message: format!("column index {} exceeds worksheet limits", index),
    })
}

/// Inverts the cell padding `rust_xlsxwriter` adds to a column width, so the
/// stored `<col width>` equals the layout width.
fn to_writer_width(width: f64) -> f64 {
    const MAX_DIGIT_WIDTH: f64 = 7.0;
    const PADDING: f64 = 5.0;

    if width >= 1.0 + PADDING / MAX_DIGIT_WIDTH {
        width - PADDING / MAX_DIGIT_WIDTH
    } else {
        width * MAX_DIGIT_WIDTH / (MAX_DIGIT_WIDTH + PADDING)
    }
}

fn cell_text(value: &Data) -> String {
    match value {
        Data::Empty => String::new(),
        Data::String(text) => text.clone(),
        other => other.to_string(),
    }
}

impl SpreadsheetWriter for XlsxSheetWriter {
    fn save(&self, sheet: &Sheet, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let fmt_header = header_format();
        let fmt_wrap = Format::new().set_text_wrap();

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name())?;

        for (idx_row, cells) in sheet.rows().iter().enumerate() {
            let row = cast_row_num(idx_row)?;
            for (idx_col, Cell { text, wrap_text }) in cells.iter().enumerate() {
                let col = cast_col_num(idx_col)?;
                let format = if idx_row == 0 {
                    Some(&fmt_header)
                } else if *wrap_text {
                    Some(&fmt_wrap)
                } else {
                    None
                };

                match (text.is_empty(), format) {
                    (true, None) => continue,
                    (true, Some(format)) => worksheet.write_blank(row, col, format)?,
                    (false, None) => worksheet.write_string(row, col, text)?,
                    (false, Some(format)) => {
                        worksheet.write_string_with_format(row, col, text, format)?
                    }
                };
            }
        }

        for (&idx_col, &width) in sheet.column_widths() {
            worksheet.set_column_width(cast_col_num(idx_col)?, to_writer_width(width))?;
        }

        workbook.save(path)?;
        tracing::debug!(
            "Saved {} rows to {}",
            sheet.row_count(),
            path.display()
        );
        Ok(())
    }

    /// Loads cell values of the first worksheet. Formatting is not carried over.
    fn open(&self, path: &Path) -> Result<Sheet> {
        let mut workbook = open_workbook_auto(path)?;
        let name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| EtlError::ProcessingError {
                message: format!("{} contains no worksheets", path.display()),
            })?;
        let range = workbook.worksheet_range(&name)?;

        let mut sheet = Sheet::new(name);
        if let Some((end_row, end_col)) = range.end() {
            for row in 0..=end_row {
                sheet.push_row((0..=end_col).map(|col| {
                    range
                        .get_value((row, col))
                        .map(cell_text)
                        .unwrap_or_default()
                }));
            }
        }

        Ok(sheet)
    }
}

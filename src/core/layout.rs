use crate::domain::model::{LayoutPolicy, OutputRow, Sheet};

/// Wraps every data cell and widens columns to fit their content.
///
/// Widths only grow: each non-empty cell proposes `chars + padding` (capped at
/// `max_width`) and the column keeps the larger of that and its current width.
pub fn apply_layout(sheet: &mut Sheet, policy: &LayoutPolicy) {
    let columns = OutputRow::HEADERS.len();

    for row in 1..sheet.row_count() {
        for col in 0..columns {
            sheet.set_wrap_text(row, col);

            let chars = sheet.cell_text(row, col).chars().count();
            if chars == 0 {
                continue;
            }

            let current = sheet.column_width(col).unwrap_or(policy.default_width);
            let candidate = policy.candidate_width(chars);
            sheet.set_column_width(col, current.max(candidate));
        }
    }

    tracing::debug!("Column widths after layout: {:?}", sheet.column_widths());
}

use crate::domain::model::{HeadingRecord, Paragraph};

pub const DEFAULT_HEADING_STYLE: &str = "Heading 1";

/// Groups paragraphs under the top-level headings that precede them.
///
/// A paragraph whose style name starts with `heading_style` opens a new
/// record. Non-blank paragraphs are appended, trimmed, to the open record;
/// anything before the first heading is dropped.
pub fn extract_headings(paragraphs: &[Paragraph], heading_style: &str) -> Vec<HeadingRecord> {
    let mut headings = Vec::new();
    let mut current: Option<HeadingRecord> = None;

    for paragraph in paragraphs {
        if paragraph.style.starts_with(heading_style) {
            if let Some(done) = current.take() {
                headings.push(done);
            }
            current = Some(HeadingRecord::new(paragraph.text.trim()));
            continue;
        }

        let text = paragraph.text.trim();
        match current.as_mut() {
            Some(record) if !text.is_empty() => record.items.push(text.to_string()),
            Some(_) => {}
            None => tracing::trace!("Skipping paragraph before first heading"),
        }
    }

    headings.extend(current);
    headings
}

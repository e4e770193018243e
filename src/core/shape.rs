use crate::domain::model::{HeadingRecord, OutputRow};

const FIELD_DELIMITER: char = ',';

/// Splits one item into `(name, role, country)`.
///
/// The country is the last segment, and only when the item has more than two
/// segments: `"Name, Role"` has no country.
fn split_item(item: &str) -> (&str, &str, &str) {
    let parts: Vec<&str> = item.split(FIELD_DELIMITER).collect();

    let name = parts.first().map(|s| s.trim()).unwrap_or("");
    let role = parts.get(1).map(|s| s.trim()).unwrap_or("");
    let country = match parts.as_slice() {
        [_, _, .., last] => last.trim(),
        _ => "",
    };

    (name, role, country)
}

pub fn shape_record(record: &HeadingRecord) -> OutputRow {
    let mut names = Vec::with_capacity(record.items.len());
    let mut roles = Vec::with_capacity(record.items.len());
    let mut countries = Vec::with_capacity(record.items.len());

    for item in &record.items {
        let (name, role, country) = split_item(item);
        names.push(name);
        roles.push(role);
        countries.push(country);
    }

    OutputRow {
        title: record.title.clone(),
        names: names.join("\n"),
        roles: roles.join("\n"),
        countries: countries.join("\n"),
    }
}

pub fn shape_records(records: &[HeadingRecord]) -> Vec<OutputRow> {
    records.iter().map(shape_record).collect()
}

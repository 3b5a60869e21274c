//! Canonical serialization of entries.
//!
//! The output is what [`crate::parser::parse_entry`] reads back into an
//! identical [`Entry`]: fields in canonical order, one line each, blocks
//! separated by a single blank line and one trailing newline.

use osgdb_core::entry::{Entry, Value};

use crate::parser::BUILDING_HEADING;

/// Serialize an entry to record text.
pub fn write_entry(entry: &Entry) -> String {
    let mut out = format!("# {}\n\n", entry.title);

    for (field, values) in entry.fields() {
        out.push_str(&field_line(field.name(), &values));
    }

    if !entry.note.is_empty() {
        out.push('\n');
        out.push_str(&entry.note);
        out.push('\n');
    }

    let building = &entry.building;
    if !building.is_empty() {
        out.push('\n');
        out.push_str(BUILDING_HEADING);
        out.push_str("\n\n");
        for (field, values) in &building.fields {
            out.push_str(&field_line(field.name(), values));
        }
        if !building.note.is_empty() {
            if !building.fields.is_empty() {
                out.push('\n');
            }
            out.push_str(&building.note);
            out.push('\n');
        }
    }

    out
}

fn field_line(name: &str, values: &[Value]) -> String {
    let joined = values
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("- {name}: {joined}\n")
}

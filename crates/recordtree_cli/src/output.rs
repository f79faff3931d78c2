//! Text rendering for addressed trees.

use recordtree_core::{column_keys, Record};
use std::fmt::Write;

const INDENT: &str = "  ";

/// Renders one line per record, with section headers between levels.
///
/// Field columns follow first-seen order within each sibling sequence.
/// Section-header rows are tagged since they cannot be deleted.
pub fn render_tree(records: &[Record]) -> String {
    let mut out = String::new();
    if records.is_empty() {
        out.push_str("(no records)\n");
        return out;
    }
    render_sequence(&mut out, records, 0);
    out
}

fn render_sequence(out: &mut String, records: &[Record], depth: usize) {
    let columns = column_keys(records);
    let indent = INDENT.repeat(depth * 2);
    for record in records {
        let cells = columns
            .iter()
            .map(|key| {
                format!("{key}={}", record.field_text(key))
            })
            .collect::<Vec<_>>()
            .join(" ");
        let tag = if record.is_section_header() {
            " (header)"
        } else {
            ""
        };
        let _ = writeln!(out, "{indent}{}  {cells}{tag}", record.canonical_address());

        if let Some(sections) = record.sections.as_ref() {
            for (name, section) in sections {
                let _ = writeln!(out, "{indent}{INDENT}[{name}]");
                render_sequence(out, &section.records, depth + 1);
            }
        }
    }
}

//! Terminal summaries for the audit and census commands.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use osmfr_model::AddressField;

use crate::commands::{AuditOutcome, ShapeOutcome, TagCensus};

pub fn print_audit_summary(outcome: &AuditOutcome) {
    println!("Records audited: {}", outcome.records);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Anomalies"),
        header_cell("Example"),
    ]);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    for field in AddressField::ALL {
        let count = outcome.anomalies.count(field);
        let example = outcome
            .anomalies
            .values(field)
            .next()
            .unwrap_or("-")
            .to_string();
        table.add_row(vec![
            Cell::new(field.stem()),
            count_cell(count),
            Cell::new(example),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(outcome.anomalies.total()).add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);
    println!("{table}");

    for path in &outcome.written {
        println!("Candidates: {}", path.display());
    }
}

pub fn print_shape_summary(outcome: &ShapeOutcome) {
    println!("Documents written: {}", outcome.records);
    if outcome.skipped > 0 {
        println!("Elements skipped: {}", outcome.skipped);
    }
    println!("Output: {}", outcome.output.display());
}

pub fn print_tag_census(census: &TagCensus) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS);
    table.set_header(vec![header_cell("Key class"), header_cell("Count")]);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table.add_row(vec![Cell::new("lower"), Cell::new(census.lower)]);
    table.add_row(vec![Cell::new("lower_colon"), Cell::new(census.lower_colon)]);
    table.add_row(vec![Cell::new("problemchars"), count_cell(census.problem)]);
    table.add_row(vec![Cell::new("other"), Cell::new(census.other)]);
    println!("{table}");
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Red)
    } else {
        Cell::new(count).fg(Color::Green)
    }
}

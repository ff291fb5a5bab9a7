//! Table styling shared by all commands.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::report::Report;

/// Placeholder for empty cells.
pub const EMPTY: &str = "-";

impl Report {
    /// Render as a styled table.
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.set_header(self.header.iter().map(|label| header_cell(label)));
        if self.key_value {
            apply_table_style(&mut table);
        } else {
            apply_listing_style(&mut table);
        }
        for row in &self.rows {
            table.add_row(row.iter().enumerate().map(|(idx, value)| {
                if value == EMPTY {
                    dim_cell(value)
                } else if idx == 0 && self.key_value {
                    Cell::new(value).add_attribute(Attribute::Bold)
                } else {
                    Cell::new(value)
                }
            }));
        }
        for &index in &self.right_aligned {
            align_column(&mut table, index, CellAlignment::Right);
        }
        table
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_listing_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

//! Table row flattening.

use crate::model::Table;

/// Flatten a table into one fragment per row.
///
/// Every cell is trimmed and the row joined with `" | "`. Blank cells keep
/// their position so columns stay aligned across rows; a row is dropped
/// only when every cell is blank. Row order is preserved.
pub fn table_fragments(table: &Table) -> Vec<String> {
    table
        .rows
        .iter()
        .filter(|row| !row.is_blank())
        .map(|row| {
            row.cells
                .iter()
                .map(|cell| cell.trim())
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect()
}

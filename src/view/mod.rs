//! Output renderers
//!
//! Pure functions from a bug list to text. Nothing here touches the
//! network; the only environment input is the terminal width, which the
//! caller passes in.

pub mod csv;
pub mod json;
pub mod table;

use crate::bug::BugRecord;
use crate::Result;

/// Columns assumed when the terminal size cannot be determined
pub const DEFAULT_COLUMNS: u16 = 80;

/// Output format of a triage run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

/// Render `bugs` in `format`; `columns` only affects the table
pub fn render(format: OutputFormat, bugs: &[BugRecord], columns: u16) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(table::render(bugs, columns)),
        OutputFormat::Csv => Ok(csv::render(bugs)),
        OutputFormat::Json => json::render(bugs),
    }
}

/// Width of the controlling terminal
pub fn terminal_columns() -> u16 {
    match crossterm::terminal::size() {
        Ok((columns, _rows)) if columns > 0 => columns,
        _ => DEFAULT_COLUMNS,
    }
}

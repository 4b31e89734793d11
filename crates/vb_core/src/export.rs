//! One-way CSV export of a rendered table view: header row of column names,
//! one row per player, plain numbers with derived columns at their display
//! precision. Exports are never re-imported.

use crate::error::ExportError;
use crate::report::TableView;
use chrono::NaiveDate;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Write a view as CSV to any writer.
pub fn write_csv<W: Write>(view: &TableView, writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(TableView::headers())?;
    for row in &view.rows {
        wtr.write_record(row.cells())?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write a view as CSV to a file.
pub fn export_to_file<P: AsRef<Path>>(view: &TableView, path: P) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_csv(view, file)
}

/// Advisory file name for an export: opponent/match context, scope label and
/// date, slugged. Nothing parses these back; it only has to be readable and
/// filesystem-safe.
pub fn file_name(context: &str, scope: &str, date: NaiveDate) -> String {
    format!("{}_{}_{}.csv", slug(context), slug(scope), date.format("%Y-%m-%d"))
}

fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_sep = true;
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            last_was_sep = false;
        } else if !last_was_sep {
            out.push('_');
            last_was_sep = true;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

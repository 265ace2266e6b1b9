//! Delimited-text export of a selection
//!
//! Writes one header record of column labels followed by one record per row,
//! in the order given. The entity id is not exported.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::errors::DashboardResult;
use crate::merge::MergedRow;
use crate::observability::{log_event_with_fields, Event};
use crate::selection::Metric;

/// Default file name for exports
pub const DEFAULT_EXPORT_FILE: &str = "criterios_avaliativos_detalhados.csv";

/// Header of the entity name column
pub const ENTITY_LABEL: &str = "Entity";

/// Header record for the export
pub fn header() -> Vec<&'static str> {
    std::iter::once(ENTITY_LABEL)
        .chain(Metric::ALL.iter().map(Metric::label))
        .collect()
}

fn record(row: &MergedRow) -> Vec<String> {
    std::iter::once(row.name().to_string())
        .chain(Metric::ALL.iter().map(|m| match m.count(row) {
            Some(c) => c.to_string(),
            None => format!("{:.1}", m.value(row)),
        }))
        .collect()
}

/// Writes `rows` as CSV and returns the number of data records
pub fn export_csv<W: Write>(rows: &[&MergedRow], writer: W) -> DashboardResult<usize> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(header())?;
    for row in rows {
        out.write_record(record(row))?;
    }
    out.flush()?;
    Ok(rows.len())
}

/// Writes `rows` as CSV to a file, replacing it if present
pub fn export_to_path(rows: &[&MergedRow], path: &Path) -> DashboardResult<usize> {
    let file = File::create(path)?;
    let written = export_csv(rows, file)?;

    let count = written.to_string();
    let path = path.display().to_string();
    log_event_with_fields(Event::ExportComplete, &[("path", path.as_str()), ("rows", count.as_str())]);

    Ok(written)
}

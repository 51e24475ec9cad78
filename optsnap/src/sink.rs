//! Append-only CSV output.

use std::fs::OpenOptions;
use std::path::Path;

use optsnap_core::{CombinedRow, HEADER, SnapError};

/// File name rows for `symbol` at `expiration` (`YYYY-MM-DD`) are appended to.
#[must_use]
pub fn snapshot_file_name(symbol: &str, expiration: &str) -> String {
    format!("{symbol}_options_{expiration}.csv")
}

/// Append `rows` to the CSV file at `path`, creating it if needed.
///
/// The header line is written only when the file did not exist before this call.
/// The file is opened, written and closed within the call; concurrent writers to the
/// same path are not coordinated.
///
/// Returns whether the file was created.
///
/// # Errors
/// Returns `Io` when the file cannot be opened or flushed and `Csv` when a record
/// cannot be encoded.
pub fn append_rows(path: &Path, rows: &[CombinedRow]) -> Result<bool, SnapError> {
    let display = path.display().to_string();
    let is_new = !path.exists();

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| SnapError::io(display.clone(), &e))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    let csv_err = |e: csv::Error| SnapError::Csv {
        path: display.clone(),
        msg: e.to_string(),
    };

    if is_new {
        writer.write_record(HEADER).map_err(csv_err)?;
    }
    for row in rows {
        writer.write_record(row.to_record()).map_err(csv_err)?;
    }
    writer.flush().map_err(|e| SnapError::io(display.clone(), &e))?;
    Ok(is_new)
}

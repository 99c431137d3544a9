//! On-disk row format of the users file.
//!
//! Standard CSV: a header row naming the five columns, then one row per
//! record. Any row that does not parse into exactly five fields fails the
//! whole read.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use common::{AppError, AppResult};
use domain::{is_valid_header, UserRecord, HEADER_COLUMNS, RECORD_FIELD_COUNT};

/// Rows read from the users file
#[derive(Debug, Default)]
pub struct LoadedRows {
    pub records: Vec<UserRecord>,
    /// Whether the last byte on disk is a line break
    pub ends_with_newline: bool,
}

/// Write the header row if the file is absent or empty.
///
/// Returns true if a header was written.
pub fn ensure_header(path: &Path) -> AppResult<bool> {
    match fs::metadata(path) {
        Ok(meta) if meta.len() > 0 => return Ok(false),
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| AppError::storage(parent, e))?;
            }
        }
        Err(e) => return Err(AppError::storage(path, e)),
    }

    let mut writer = csv_writer(Vec::new());
    writer
        .write_record(HEADER_COLUMNS)
        .map_err(|e| AppError::internal(format!("Header encoding failed: {}", e)))?;
    let bytes = into_bytes(writer)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::storage(path, e))?;
    file.write_all(&bytes)
        .and_then(|_| file.sync_data())
        .map_err(|e| AppError::storage(path, e))?;
    Ok(true)
}

/// Read every record from the users file, end to end.
pub fn read_rows(path: &Path) -> AppResult<LoadedRows> {
    let bytes = fs::read(path).map_err(|e| AppError::storage(path, e))?;
    let ends_with_newline = bytes.last().map_or(true, |b| *b == b'\n');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes.as_slice());
    let mut rows = reader.records();

    let header = match rows.next() {
        Some(row) => row.map_err(|e| csv_error(path, e))?,
        None => return Err(AppError::malformed(1, "missing header row")),
    };
    let columns: Vec<&str> = header.iter().collect();
    if !is_valid_header(&columns) {
        return Err(AppError::malformed(line_of(&header), "unrecognised header row"));
    }

    let mut records = Vec::new();
    for row in rows {
        let row = row.map_err(|e| csv_error(path, e))?;
        if row.len() != RECORD_FIELD_COUNT {
            return Err(AppError::malformed(
                line_of(&row),
                format!("expected {} fields, found {}", RECORD_FIELD_COUNT, row.len()),
            ));
        }
        let record: UserRecord = row
            .deserialize(None)
            .map_err(|e| AppError::malformed(line_of(&row), e.to_string()))?;
        records.push(record);
    }

    Ok(LoadedRows {
        records,
        ends_with_newline,
    })
}

/// Append one record and flush it to disk.
///
/// The file must already exist; a missing file is a storage error rather
/// than a silent re-creation without header.
pub fn append_row(path: &Path, record: &UserRecord, needs_line_break: bool) -> AppResult<()> {
    let mut bytes = Vec::new();
    if needs_line_break {
        bytes.push(b'\n');
    }
    bytes.extend(encode_row(record)?);

    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|e| AppError::storage(path, e))?;
    file.write_all(&bytes)
        .and_then(|_| file.sync_data())
        .map_err(|e| AppError::storage(path, e))
}

/// Encode a record as a single CSV row, quoting where needed.
pub fn encode_row(record: &UserRecord) -> AppResult<Vec<u8>> {
    let mut writer = csv_writer(Vec::new());
    writer
        .serialize(record)
        .map_err(|e| AppError::internal(format!("Record encoding failed: {}", e)))?;
    into_bytes(writer)
}

fn csv_writer(buf: Vec<u8>) -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(buf)
}

fn into_bytes(writer: csv::Writer<Vec<u8>>) -> AppResult<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| AppError::internal(format!("Record encoding failed: {}", e.error())))
}

fn line_of(row: &csv::StringRecord) -> u64 {
    row.position().map_or(0, |p| p.line())
}

fn csv_error(path: &Path, err: csv::Error) -> AppError {
    let line = err.position().map_or(0, |p| p.line());
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(e) => AppError::storage(path, e),
        _ => AppError::malformed(line, reason),
    }
}

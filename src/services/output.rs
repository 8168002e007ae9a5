// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Batch output files.
//!
//! Each batch is written to a temporary file in the output directory and
//! renamed over the destination once complete, so an interrupted run never
//! leaves a truncated batch file behind.

use crate::error::{AppError, Result};
use crate::models::{EndpointSpec, FetchResult};
use serde_json::Value;
use std::fs;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Export tag carried in every batch file name.
const EXPORT_TAG: &str = "day_3";

/// Header row; the first column is the unnamed row index.
const HEADER: [&str; 6] = ["", "id", "statusCode", "data", "pagination", "message"];

/// `{path with / → _}_day_3_{start}.csv`
pub fn batch_file_name(endpoint: &EndpointSpec, start: usize) -> String {
    format!("{}_{}_{}.csv", endpoint.file_stem(), EXPORT_TAG, start)
}

/// Write one batch's records, replacing any previous file of the same name.
///
/// Returns `AppError::WriteConflict` when the destination (or directory)
/// refuses access, `AppError::Write` for any other failure.
pub fn write_batch(
    dir: &Path,
    endpoint: &EndpointSpec,
    start: usize,
    records: &[FetchResult],
) -> Result<PathBuf> {
    let final_path = dir.join(batch_file_name(endpoint, start));

    fs::create_dir_all(dir).map_err(|e| AppError::from_write_io(e, &final_path))?;

    let temp_file =
        NamedTempFile::new_in(dir).map_err(|e| AppError::from_write_io(e, &final_path))?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(temp_file));

    writer
        .write_record(HEADER)
        .map_err(|e| csv_error(e, &final_path))?;

    for (index, record) in records.iter().enumerate() {
        writer
            .write_record([
                index.to_string(),
                record.id.to_string(),
                cell(&record.status_code),
                cell(&record.data),
                cell(&record.pagination),
                cell(&record.message),
            ])
            .map_err(|e| csv_error(e, &final_path))?;
    }

    let buf_writer = writer.into_inner().map_err(|e| {
        let err = e.error();
        AppError::from_write_io(io::Error::new(err.kind(), err.to_string()), &final_path)
    })?;
    let temp_file = buf_writer
        .into_inner()
        .map_err(|e| AppError::from_write_io(e.into_error(), &final_path))?;

    temp_file
        .persist(&final_path)
        .map_err(|e| AppError::from_write_io(e.error, &final_path))?;

    Ok(final_path)
}

/// Strings are written bare (so the sentinel reads `None`), null as an
/// empty cell, everything else as compact JSON.
fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn csv_error(err: csv::Error, path: &Path) -> AppError {
    match err.into_kind() {
        csv::ErrorKind::Io(io_err) => AppError::from_write_io(io_err, path),
        other => AppError::Write(format!("{}: {:?}", path.display(), other)),
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Roster loading from spreadsheets and CSV files.
//!
//! Only the `id`, `name` and `email` columns are read; anything else in the
//! sheet is ignored. Row order is preserved.

use crate::error::{AppError, Result};
use crate::models::{UserId, UserRecord};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// Extensions handled by the spreadsheet reader; everything else is CSV.
const SPREADSHEET_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

/// Stand-in for cells past the end of a short row.
static EMPTY_CELL: Data = Data::Empty;

/// Read the roster at `path`.
///
/// Returns `AppError::SourceNotFound` when the file does not exist and
/// `AppError::Roster` for anything else that prevents reading it.
pub fn read_roster<P: AsRef<Path>>(path: P) -> Result<Vec<UserRecord>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(AppError::SourceNotFound(path.to_path_buf()));
    }

    let is_spreadsheet = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SPREADSHEET_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false);

    let users = if is_spreadsheet {
        read_spreadsheet(path)?
    } else {
        read_csv(path)?
    };

    tracing::info!(path = %path.display(), count = users.len(), "Loaded roster");
    Ok(users)
}

/// Read the roster, treating a missing file as an empty roster.
///
/// Any other failure is returned to the caller.
pub fn load_roster_or_empty<P: AsRef<Path>>(path: P) -> Result<Vec<UserRecord>> {
    match read_roster(path) {
        Err(AppError::SourceNotFound(missing)) => {
            tracing::error!(
                path = %missing.display(),
                "Roster file not found, check that the path is correct"
            );
            Ok(Vec::new())
        }
        other => other,
    }
}

/// Positions of the three projected columns.
#[derive(Debug, Clone, Copy)]
struct RosterColumns {
    id: usize,
    name: usize,
    email: usize,
}

impl RosterColumns {
    fn locate<S: AsRef<str>>(headers: &[S]) -> Result<Self> {
        let find = |wanted: &str| {
            headers
                .iter()
                .position(|h| h.as_ref().trim().eq_ignore_ascii_case(wanted))
                .ok_or_else(|| AppError::Roster(format!("missing required column '{}'", wanted)))
        };

        Ok(Self {
            id: find("id")?,
            name: find("name")?,
            email: find("email")?,
        })
    }
}

fn read_spreadsheet(path: &Path) -> Result<Vec<UserRecord>> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| AppError::Roster(format!("{}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::Roster("workbook has no worksheets".to_string()))?
        .map_err(|e| AppError::Roster(format!("{}", e)))?;

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .ok_or_else(|| AppError::Roster("worksheet is empty".to_string()))?
        .iter()
        .map(|cell| cell.to_string())
        .collect();
    let columns = RosterColumns::locate(&header)?;

    let mut users = Vec::new();
    for (index, row) in rows.enumerate() {
        let cell = |col: usize| row.get(col).unwrap_or(&EMPTY_CELL);
        push_row(
            &mut users,
            index + 2,
            spreadsheet_id(cell(columns.id)),
            spreadsheet_text(cell(columns.name)),
            spreadsheet_text(cell(columns.email)),
        );
    }

    Ok(users)
}

fn spreadsheet_id(cell: &Data) -> Option<UserId> {
    match cell {
        Data::Empty => None,
        Data::Int(value) => Some(UserId::Int(*value)),
        Data::Float(value) => Some(UserId::from_f64(*value)),
        Data::String(value) => non_empty(value).map(|v| UserId::Text(v.to_string())),
        other => Some(UserId::Text(other.to_string())),
    }
}

fn spreadsheet_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(value) => non_empty(value).map(str::to_string),
        other => non_empty(&other.to_string()).map(str::to_string),
    }
}

fn read_csv(path: &Path) -> Result<Vec<UserRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| AppError::Roster(e.to_string()))?;

    let header = reader
        .headers()
        .map_err(|e| AppError::Roster(e.to_string()))?
        .clone();
    let names: Vec<&str> = header.iter().collect();
    let columns = RosterColumns::locate(&names)?;

    let mut users = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| AppError::Roster(e.to_string()))?;
        let cell = |col: usize| record.get(col).and_then(non_empty);
        push_row(
            &mut users,
            index + 2,
            cell(columns.id).map(UserId::from_text),
            cell(columns.name).map(str::to_string),
            cell(columns.email).map(str::to_string),
        );
    }

    Ok(users)
}

/// Append a row; blank rows are dropped silently, rows without an id
/// with a warning.
fn push_row(
    users: &mut Vec<UserRecord>,
    line: usize,
    id: Option<UserId>,
    name: Option<String>,
    email: Option<String>,
) {
    match id {
        Some(id) => users.push(UserRecord { id, name, email }),
        None if name.is_none() && email.is_none() => {}
        None => tracing::warn!(line, ?name, ?email, "Skipping roster row without an id"),
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_columns_ignores_case_and_extras() {
        let headers = ["Email", "extra", " ID ", "name"];
        let columns = RosterColumns::locate(&headers).unwrap();
        assert_eq!((columns.id, columns.name, columns.email), (2, 3, 0));
    }

    #[test]
    fn test_locate_columns_missing() {
        let err = RosterColumns::locate(&["id", "name"]).unwrap_err();
        assert!(matches!(err, AppError::Roster(msg) if msg.contains("email")));
    }

    #[test]
    fn test_spreadsheet_id_cells() {
        assert_eq!(spreadsheet_id(&Data::Float(12.0)), Some(UserId::Int(12)));
        assert_eq!(spreadsheet_id(&Data::Int(5)), Some(UserId::Int(5)));
        assert_eq!(
            spreadsheet_id(&Data::String("007".to_string())),
            Some(UserId::Text("007".to_string()))
        );
        assert_eq!(spreadsheet_id(&Data::Empty), None);
        assert_eq!(spreadsheet_id(&Data::String("  ".to_string())), None);
    }

    #[test]
    fn test_push_row_skips_blank_rows() {
        let mut users = Vec::new();
        push_row(&mut users, 2, None, None, None);
        push_row(&mut users, 3, None, Some("Ghost".to_string()), None);
        push_row(&mut users, 4, Some(UserId::Int(1)), None, None);
        assert_eq!(users, vec![UserRecord::new(1, None, None)]);
    }
}

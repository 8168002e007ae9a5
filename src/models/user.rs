//! Roster user model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User identifier as it appears in the roster.
///
/// Serialized untagged so integer ids reach the hub as JSON numbers and
/// everything else as JSON strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Int(i64),
    Text(String),
}

impl UserId {
    /// Interpret a raw text cell.
    ///
    /// Only plain integers become `Int`: an optional `-`, digits without a
    /// leading zero, and an optional all-zero fraction (`"12.0"`). Anything
    /// else (`"007"`, `"+5"`, `"1e3"`) stays text, as it would in a
    /// spreadsheet text cell.
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        match plain_integer(trimmed) {
            Some(value) => UserId::Int(value),
            None => UserId::Text(trimmed.to_string()),
        }
    }

    /// Interpret a numeric spreadsheet cell.
    pub fn from_f64(value: f64) -> Self {
        match integral_f64(value) {
            Some(int) => UserId::Int(int),
            None => UserId::Text(value.to_string()),
        }
    }
}

fn plain_integer(text: &str) -> Option<i64> {
    let integer = match text.split_once('.') {
        Some((integer, fraction))
            if !fraction.is_empty() && fraction.bytes().all(|b| b == b'0') =>
        {
            integer
        }
        Some(_) => return None,
        None => text,
    };

    let digits = integer.strip_prefix('-').unwrap_or(integer);
    let well_formed = !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'));

    if well_formed {
        integer.parse().ok()
    } else {
        None
    }
}

fn integral_f64(value: f64) -> Option<i64> {
    let in_range = value >= i64::MIN as f64 && value <= i64::MAX as f64;
    (value.is_finite() && value.fract() == 0.0 && in_range).then_some(value as i64)
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Int(id) => write!(f, "{}", id),
            UserId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        UserId::Int(id)
    }
}

impl From<i32> for UserId {
    fn from(id: i32) -> Self {
        UserId::Int(i64::from(id))
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        UserId::Text(id.to_string())
    }
}

/// One roster row, projected to the three columns the export needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    /// Display name (None when the cell is empty)
    pub name: Option<String>,
    /// Email address (None when the cell is empty)
    pub email: Option<String>,
}

impl UserRecord {
    pub fn new(id: impl Into<UserId>, name: Option<&str>, email: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.map(str::to_string),
            email: email.map(str::to_string),
        }
    }

    /// The row as read from the roster, for error logs.
    pub fn source_tuple(&self) -> String {
        format!(
            "({}, {}, {})",
            self.id,
            self.name.as_deref().unwrap_or("None"),
            self.email.as_deref().unwrap_or("None")
        )
    }
}

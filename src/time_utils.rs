// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for the query date window.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Format used for the `startDate` / `endDate` query parameters.
const WINDOW_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One-day lookback window, fixed for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateWindow {
    /// Window ending at midnight of `reference` and starting one day earlier.
    pub fn one_day_ending(reference: NaiveDate) -> Self {
        let end = reference.and_time(NaiveTime::MIN);
        Self {
            start: end - Duration::days(1),
            end,
        }
    }

    pub fn start_param(&self) -> String {
        format_window_date(self.start)
    }

    pub fn end_param(&self) -> String {
        format_window_date(self.end)
    }
}

/// Format a window bound as `YYYY-MM-DD HH:MM:SS`.
pub fn format_window_date(date: NaiveDateTime) -> String {
    date.format(WINDOW_FORMAT).to_string()
}

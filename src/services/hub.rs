// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wearable hub API client.
//!
//! Handles:
//! - Building the date-windowed endpoint URL
//! - Authenticated GET requests
//! - Parsing the JSON body regardless of HTTP status

use crate::error::AppError;
use crate::time_utils::DateWindow;
use serde_json::Value;
use std::time::Duration;

/// Hub API client.
#[derive(Clone)]
pub struct HubClient {
    http: reqwest::Client,
    base_url: String,
}

impl HubClient {
    /// Create a client for `base_url`.
    ///
    /// Without a timeout a stalled request blocks its batch indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, AppError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder.build().map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `{base}/{path}?startDate=..&endDate=..` for the given window.
    pub fn endpoint_url(&self, path: &str, window: &DateWindow) -> String {
        format!(
            "{}/{}?startDate={}&endDate={}",
            self.base_url,
            path.trim_start_matches('/'),
            urlencoding::encode(&window.start_param()),
            urlencoding::encode(&window.end_param()),
        )
    }

    /// GET `url` with the given `Authorization` value and parse the body.
    ///
    /// Error statuses are not rejected here: the hub reports failures in
    /// the body's `statusCode`/`message`, which end up in the export.
    pub async fn fetch(&self, url: &str, authorization: &str) -> Result<Value, AppError> {
        let response = self
            .http
            .get(url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(|e| AppError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), url, "Hub returned error status");
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Fetch(format!("Failed to read body: {}", e)))?;

        serde_json::from_str(&body).map_err(|e| {
            AppError::InvalidResponse(format!("JSON parse error (HTTP {}): {}", status, e))
        })
    }
}

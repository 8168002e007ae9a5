// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Batch extraction service.
//!
//! Handles the core workflow, for each endpoint:
//! 1. Read the roster (a missing file means nothing to export)
//! 2. Split it into fixed-size batches
//! 3. Fetch every user of a batch from the hub
//! 4. Flush the batch to its own CSV file
//!
//! Failures are logged and recorded in the returned reports. A failing
//! user or batch file never stops the run; an unreadable roster does.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    BatchReport, EndpointReport, EndpointSpec, FetchResult, RunReport, UserFailure, UserOutcome,
    UserRecord, WriteStatus,
};
use crate::services::{load_roster_or_empty, write_batch, HubClient, TokenMinter};
use crate::time_utils::DateWindow;
use futures_util::stream::{self, StreamExt};
use std::ops::Range;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Split `len` rows into contiguous ranges of at most `batch_size`.
pub fn batch_ranges(len: usize, batch_size: usize) -> Vec<Range<usize>> {
    let batch_size = batch_size.max(1);
    (0..len)
        .step_by(batch_size)
        .map(|start| start..(start + batch_size).min(len))
        .collect()
}

/// Exports hub data for every roster user and endpoint.
pub struct Extractor {
    client: HubClient,
    minter: TokenMinter,
    endpoints: Vec<EndpointSpec>,
    roster_path: PathBuf,
    output_dir: PathBuf,
    window: DateWindow,
    batch_size: usize,
    concurrency: usize,
}

impl Extractor {
    /// Build an extractor for the default endpoint set.
    pub fn new(config: &Config, client: HubClient) -> Result<Self> {
        let mut minter = TokenMinter::new(&config.signing_secret);
        if let Some(ttl) = config.token_ttl {
            // One expiry for the whole run keeps tokens reproducible
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_err(|e| AppError::Internal(e.into()))?;
            minter = minter.with_expiry((now + ttl).as_secs());
        }

        Ok(Self {
            client,
            minter,
            endpoints: EndpointSpec::defaults(),
            roster_path: config.roster_path.clone(),
            output_dir: config.output_dir.clone(),
            window: DateWindow::one_day_ending(config.reference_date),
            batch_size: config.batch_size.max(1),
            concurrency: config.concurrency.max(1),
        })
    }

    /// Replace the endpoint set.
    pub fn with_endpoints(mut self, endpoints: Vec<EndpointSpec>) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn endpoints(&self) -> &[EndpointSpec] {
        &self.endpoints
    }

    /// The query window shared by every request of this run.
    pub fn window(&self) -> DateWindow {
        self.window
    }

    /// Export every endpoint in order.
    ///
    /// A roster that exists but cannot be read stops the run: every later
    /// endpoint would read the same file. The reason lands in
    /// `RunReport::error`.
    pub async fn run(&self) -> RunReport {
        let mut report = RunReport::default();

        for endpoint in &self.endpoints {
            tracing::info!(endpoint = %endpoint.path, "Processing endpoint");
            let endpoint_report = self.run_endpoint(endpoint).await;

            if let Some(error) = &endpoint_report.error {
                tracing::error!(
                    endpoint = %endpoint.path,
                    error = %error,
                    "Failed to read roster, stopping run"
                );
                report.error = Some(error.clone());
                report.endpoints.push(endpoint_report);
                break;
            }

            tracing::info!(
                endpoint = %endpoint.path,
                batches = endpoint_report.batches.len(),
                files = endpoint_report.files_written().len(),
                failures = endpoint_report.failure_count(),
                "Endpoint complete"
            );
            report.endpoints.push(endpoint_report);
        }

        report
    }

    /// Export one endpoint: read the roster, then process each batch.
    ///
    /// A missing roster yields an empty report; any other roster error is
    /// recorded in `EndpointReport::error` with no batches processed.
    pub async fn run_endpoint(&self, endpoint: &EndpointSpec) -> EndpointReport {
        let mut report = EndpointReport {
            endpoint: endpoint.clone(),
            roster_size: 0,
            batches: Vec::new(),
            error: None,
        };

        let roster = match load_roster_or_empty(&self.roster_path) {
            Ok(roster) => roster,
            Err(e) => {
                report.error = Some(e.to_string());
                return report;
            }
        };
        report.roster_size = roster.len();

        if roster.is_empty() {
            tracing::info!(endpoint = %endpoint.path, "No users to process");
            return report;
        }

        for range in batch_ranges(roster.len(), self.batch_size) {
            let start = range.start;
            let batch = self.process_batch(endpoint, start, &roster[range]).await;
            report.batches.push(batch);
        }

        report
    }

    /// Fetch every user of one batch and flush the results.
    pub async fn process_batch(
        &self,
        endpoint: &EndpointSpec,
        start: usize,
        users: &[UserRecord],
    ) -> BatchReport {
        tracing::info!(
            endpoint = %endpoint.path,
            start,
            size = users.len(),
            "Processing batch"
        );

        let url = self.client.endpoint_url(&endpoint.path, &self.window);

        // Ordered: results come back in roster order whatever the concurrency
        let outcomes: Vec<UserOutcome> = stream::iter(users)
            .map(|user| self.fetch_user(&url, user))
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut records = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                UserOutcome::Fetched(record) => records.push(record),
                UserOutcome::Failed(failure) => failures.push(failure),
            }
        }

        let write = match write_batch(&self.output_dir, endpoint, start, &records) {
            Ok(path) => {
                tracing::info!(path = %path.display(), rows = records.len(), "Batch written");
                WriteStatus::Written(path)
            }
            Err(AppError::WriteConflict(path)) => {
                tracing::error!(
                    path = %path.display(),
                    "Output file is locked, make sure it is not open in another program"
                );
                WriteStatus::Conflict(path)
            }
            Err(e) => {
                tracing::error!(endpoint = %endpoint.path, start, error = %e, "Failed to write batch");
                WriteStatus::Failed(e.to_string())
            }
        };

        tracing::info!(
            endpoint = %endpoint.path,
            start,
            fetched = records.len(),
            failed = failures.len(),
            "Batch complete"
        );

        BatchReport {
            start,
            users: users.len(),
            fetched: records.len(),
            failures,
            write,
        }
    }

    async fn fetch_user(&self, url: &str, user: &UserRecord) -> UserOutcome {
        match self.try_fetch_user(url, user).await {
            Ok(record) => {
                tracing::debug!(user = %user.id, "Fetched user data");
                UserOutcome::Fetched(record)
            }
            Err(e) => {
                let source_tuple = user.source_tuple();
                tracing::warn!(user = %source_tuple, error = %e, "Error processing user");
                UserOutcome::Failed(UserFailure {
                    source_tuple,
                    error: e.to_string(),
                })
            }
        }
    }

    async fn try_fetch_user(&self, url: &str, user: &UserRecord) -> Result<FetchResult> {
        let authorization = self.minter.mint(user)?;
        let body = self.client.fetch(url, &authorization).await?;
        FetchResult::from_response(user.id.clone(), &body)
    }
}

//! Outcome types reported by the batch extractor.

use crate::models::{EndpointSpec, FetchResult};
use std::path::PathBuf;

/// Why a single user produced no record.
#[derive(Debug, Clone, PartialEq)]
pub struct UserFailure {
    /// `(id, name, email)` as read from the roster
    pub source_tuple: String,
    pub error: String,
}

/// Result of fetching one user.
#[derive(Debug, Clone, PartialEq)]
pub enum UserOutcome {
    Fetched(FetchResult),
    Failed(UserFailure),
}

/// What happened to a batch's output file.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteStatus {
    Written(PathBuf),
    /// Destination was locked or not writable; batch data dropped
    Conflict(PathBuf),
    Failed(String),
}

/// One batch of one endpoint.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Roster offset of the first user in the batch
    pub start: usize,
    pub users: usize,
    pub fetched: usize,
    pub failures: Vec<UserFailure>,
    pub write: WriteStatus,
}

impl BatchReport {
    pub fn output_path(&self) -> Option<&PathBuf> {
        match &self.write {
            WriteStatus::Written(path) => Some(path),
            _ => None,
        }
    }
}

/// All batches of one endpoint.
#[derive(Debug, Clone)]
pub struct EndpointReport {
    pub endpoint: EndpointSpec,
    pub roster_size: usize,
    pub batches: Vec<BatchReport>,
    /// Set when the endpoint stopped early (e.g. malformed roster)
    pub error: Option<String>,
}

impl EndpointReport {
    pub fn files_written(&self) -> Vec<&PathBuf> {
        self.batches.iter().filter_map(BatchReport::output_path).collect()
    }

    pub fn failure_count(&self) -> usize {
        self.batches.iter().map(|b| b.failures.len()).sum()
    }
}

/// Summary of a full run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub endpoints: Vec<EndpointReport>,
    /// Why the run stopped before the last endpoint, if it did
    pub error: Option<String>,
}

impl RunReport {
    pub fn files_written(&self) -> usize {
        self.endpoints.iter().map(|e| e.files_written().len()).sum()
    }

    pub fn failure_count(&self) -> usize {
        self.endpoints.iter().map(EndpointReport::failure_count).sum()
    }

    pub fn fetched_count(&self) -> usize {
        self.endpoints
            .iter()
            .flat_map(|e| &e.batches)
            .map(|b| b.fetched)
            .sum()
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the extraction pipeline.

pub mod endpoint;
pub mod fetch_result;
pub mod report;
pub mod user;

pub use endpoint::EndpointSpec;
pub use fetch_result::{FetchResult, MISSING_FIELD_SENTINEL};
pub use report::{BatchReport, EndpointReport, RunReport, UserFailure, UserOutcome, WriteStatus};
pub use user::{UserId, UserRecord};

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Wearable-Export: bulk export of per-user wearable data from the hub API
//!
//! This crate reads a user roster, calls each hub backup endpoint on behalf
//! of every user with a signed identity token, and writes the responses to
//! per-batch CSV files.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

pub use services::Extractor;

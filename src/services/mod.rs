// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - extraction pipeline stages.

pub mod extractor;
pub mod hub;
pub mod output;
pub mod roster;
pub mod token;

pub use extractor::{batch_ranges, Extractor};
pub use hub::HubClient;
pub use output::{batch_file_name, write_batch};
pub use roster::{load_roster_or_empty, read_roster};
pub use token::{IdentityClaims, TokenMinter};

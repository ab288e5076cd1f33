// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client with a consistent User-Agent header.
//!
//! Every request warden sends to a Directus instance goes through a client
//! built here, so the admin activity log shows `warden/{platform}/{git_sha}`.

mod client;

pub use client::{builder, new_client_with_timeout, user_agent};

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Typed client for the Directus access-control admin API.
//!
//! This crate provides:
//! - [`DirectusClient`] for `/auth/login`, `/roles`, `/policies` and `/permissions`
//! - [`Filter`], a closed recursive form of Directus permission rules
//! - [`CreateOutcome`], which folds `RECORD_NOT_UNIQUE` conflicts into a
//!   first-class "already exists" result

mod client;
pub mod error;
pub mod filter;
pub mod model;
mod outcome;

pub use client::DirectusClient;
pub use error::{DirectusError, Result, RECORD_NOT_UNIQUE};
pub use filter::{CompareOp, Filter, FilterValue};
pub use model::{
	Action, Fields, PermissionOwner, PermissionRequest, PolicySpec, RecordId, RoleSpec,
};
pub use outcome::CreateOutcome;

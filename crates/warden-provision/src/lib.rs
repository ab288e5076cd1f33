// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Access provisioning for a Directus backend.
//!
//! A run logs in as admin, decides between the policy and the legacy role
//! permission model, ensures the authenticated-user role (and policy), then
//! replays the permission [`catalog`] against it. Re-running is safe:
//! records that already exist are counted, not duplicated.

pub mod catalog;
mod ensure;
pub mod error;
pub mod progress;
mod provisioner;
mod tally;

pub use catalog::{default_catalog, pair_count, CollectionGrants, Grant};
pub use error::{ProvisionError, RecordKind, Result};
pub use progress::{NoOpProgressHook, ProgressEvent, ProgressHook, SharedProgressHook};
pub use provisioner::{
	AccessModel, Credentials, ProvisionPlan, ProvisionReport, Provisioner, DEFAULT_PAUSE,
	DEFAULT_POLICY_NAME, DEFAULT_ROLE_NAME,
};
pub use tally::Tally;

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Progress notifications emitted while provisioning.
//!
//! The provisioner never prints. Front ends register a [`ProgressHook`] to
//! render each step; the default hook discards everything.

use std::sync::Arc;

use warden_directus::{Action, CreateOutcome, RecordId};

use crate::provisioner::AccessModel;
use crate::tally::Tally;

#[derive(Debug)]
pub enum ProgressEvent<'a> {
	LoginStarted,
	LoginSucceeded,
	DetectionStarted,
	AccessModelDetected(AccessModel),
	RoleStarted { name: &'a str },
	RoleCreated { id: &'a RecordId },
	/// Creation hit a uniqueness conflict; the existing record is being fetched.
	RoleExists,
	RoleResolved { id: &'a RecordId },
	PolicyStarted { name: &'a str },
	PolicyCreated { id: &'a RecordId },
	PolicyExists,
	PolicyResolved { id: &'a RecordId },
	LinkStarted,
	LinkSucceeded,
	LinkFailed { message: &'a str },
	PermissionsStarted,
	CollectionStarted { collection: &'a str },
	PermissionResolved {
		collection: &'a str,
		action: Action,
		outcome: &'a CreateOutcome<RecordId>,
	},
	Finished { tally: &'a Tally },
}

pub trait ProgressHook: Send + Sync {
	fn on_event(&self, event: &ProgressEvent<'_>);
}

pub type SharedProgressHook = Arc<dyn ProgressHook>;

pub struct NoOpProgressHook;

impl ProgressHook for NoOpProgressHook {
	fn on_event(&self, _event: &ProgressEvent<'_>) {}
}

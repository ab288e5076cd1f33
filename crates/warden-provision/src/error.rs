// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Fatal provisioning errors. Anything represented here aborts the run.

use std::fmt;

use thiserror::Error;
use warden_directus::DirectusError;

pub type Result<T> = std::result::Result<T, ProvisionError>;

/// Which access record a setup error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
	Role,
	Policy,
}

impl fmt::Display for RecordKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RecordKind::Role => f.write_str("role"),
			RecordKind::Policy => f.write_str("policy"),
		}
	}
}

#[derive(Error, Debug)]
pub enum ProvisionError {
	#[error("Admin login failed. Check the admin credentials in the configuration: {0}")]
	Authentication(#[source] DirectusError),

	#[error("Could not reach Directus: {0}")]
	Connection(#[source] DirectusError),

	#[error("Failed to create {kind} \"{name}\": {source}")]
	Creation {
		kind: RecordKind,
		name: String,
		#[source]
		source: DirectusError,
	},

	#[error("{kind} \"{name}\" already exists but looking it up failed: {source}")]
	Lookup {
		kind: RecordKind,
		name: String,
		#[source]
		source: DirectusError,
	},

	#[error("{kind} \"{name}\" already exists but no record with that name was returned")]
	NotFound { kind: RecordKind, name: String },
}

impl ProvisionError {
	/// Classifies a failed login: rejected credentials versus everything
	/// that kept the request from being answered.
	pub fn from_login(err: DirectusError) -> Self {
		match err {
			DirectusError::AuthenticationFailed { .. } => ProvisionError::Authentication(err),
			other => ProvisionError::Connection(other),
		}
	}

	pub fn is_authentication(&self) -> bool {
		matches!(self, ProvisionError::Authentication(_))
	}
}

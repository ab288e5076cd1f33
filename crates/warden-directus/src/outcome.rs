// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::error::DirectusError;

/// Result of an idempotent create against Directus.
#[derive(Debug)]
pub enum CreateOutcome<T> {
	/// The record was created; carries its new primary key.
	Created(T),
	/// The server rejected the create with `RECORD_NOT_UNIQUE`.
	AlreadyExists,
	/// Anything else, transport errors included.
	Failed(DirectusError),
}

impl<T> CreateOutcome<T> {
	/// Folds a raw create result, turning uniqueness conflicts into
	/// [`CreateOutcome::AlreadyExists`].
	pub fn from_result(result: Result<T, DirectusError>) -> Self {
		match result {
			Ok(value) => CreateOutcome::Created(value),
			Err(e) if e.is_record_not_unique() => CreateOutcome::AlreadyExists,
			Err(e) => CreateOutcome::Failed(e),
		}
	}

	pub fn is_created(&self) -> bool {
		matches!(self, CreateOutcome::Created(_))
	}

	pub fn is_already_existing(&self) -> bool {
		matches!(self, CreateOutcome::AlreadyExists)
	}

	pub fn is_failed(&self) -> bool {
		matches!(self, CreateOutcome::Failed(_))
	}

	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CreateOutcome<U> {
		match self {
			CreateOutcome::Created(value) => CreateOutcome::Created(f(value)),
			CreateOutcome::AlreadyExists => CreateOutcome::AlreadyExists,
			CreateOutcome::Failed(e) => CreateOutcome::Failed(e),
		}
	}
}

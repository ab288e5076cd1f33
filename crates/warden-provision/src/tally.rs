// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use warden_directus::CreateOutcome;

/// Per-run permission counters.
///
/// Invariant: `created + existing + failed == total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
	pub created: usize,
	pub existing: usize,
	pub failed: usize,
	pub total: usize,
}

impl Tally {
	pub fn record<T>(&mut self, outcome: &CreateOutcome<T>) {
		self.total += 1;
		match outcome {
			CreateOutcome::Created(_) => self.created += 1,
			CreateOutcome::AlreadyExists => self.existing += 1,
			CreateOutcome::Failed(_) => self.failed += 1,
		}
	}

	pub fn is_balanced(&self) -> bool {
		self.created + self.existing + self.failed == self.total
	}

	pub fn has_failures(&self) -> bool {
		self.failed > 0
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use warden_directus::DirectusError;

	fn outcome(kind: u8) -> CreateOutcome<i64> {
		match kind % 3 {
			0 => CreateOutcome::Created(1),
			1 => CreateOutcome::AlreadyExists,
			_ => CreateOutcome::Failed(DirectusError::ParseFailed("bad body".to_string())),
		}
	}

	#[test]
	fn empty_tally_is_balanced() {
		let tally = Tally::default();
		assert!(tally.is_balanced());
		assert!(!tally.has_failures());
	}

	#[test]
	fn record_counts_each_outcome() {
		let mut tally = Tally::default();
		tally.record(&outcome(0));
		tally.record(&outcome(1));
		tally.record(&outcome(2));
		assert_eq!(
			tally,
			Tally {
				created: 1,
				existing: 1,
				failed: 1,
				total: 3
			}
		);
		assert!(tally.has_failures());
	}

	proptest! {
		#[test]
		fn tally_stays_balanced(kinds in prop::collection::vec(any::<u8>(), 0..100)) {
			let mut tally = Tally::default();
			for kind in &kinds {
				tally.record(&outcome(*kind));
			}
			prop_assert!(tally.is_balanced());
			prop_assert_eq!(tally.total, kinds.len());
		}
	}
}

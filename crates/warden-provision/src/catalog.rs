// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The permission table granted to the "Authenticated User" role.
//!
//! Grants are replayed in declaration order. Owner-scoped rules use the
//! `$CURRENT_USER` placeholder, which Directus resolves per request.

use warden_directus::{Action, Fields, Filter};

#[derive(Debug, Clone, PartialEq)]
pub struct Grant {
	pub action: Action,
	pub filter: Filter,
	pub fields: Fields,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionGrants {
	pub collection: String,
	pub grants: Vec<Grant>,
}

impl CollectionGrants {
	pub fn new(collection: impl Into<String>) -> Self {
		Self {
			collection: collection.into(),
			grants: Vec::new(),
		}
	}

	pub fn grant(self, action: Action, filter: Filter) -> Self {
		self.grant_fields(action, filter, Fields::All)
	}

	pub fn grant_fields(mut self, action: Action, filter: Filter, fields: Fields) -> Self {
		self.grants.push(Grant {
			action,
			filter,
			fields,
		});
		self
	}

	/// Every action, unrestricted.
	pub fn open(collection: impl Into<String>) -> Self {
		Action::ALL
			.into_iter()
			.fold(Self::new(collection), |c, action| c.grant(action, Filter::Unrestricted))
	}

	/// Anyone may read and create; only the record's owner, named by
	/// `owner_field`, may update or delete.
	pub fn owner_editable(collection: impl Into<String>, owner_field: &str) -> Self {
		Self::new(collection)
			.grant(Action::Read, Filter::Unrestricted)
			.grant(Action::Create, Filter::Unrestricted)
			.grant(Action::Update, Filter::owned_by_current_user(owner_field))
			.grant(Action::Delete, Filter::owned_by_current_user(owner_field))
	}

	pub fn has_action(&self, action: Action) -> bool {
		self.grants.iter().any(|g| g.action == action)
	}
}

/// Number of (collection, action) pairs, i.e. permission create calls.
pub fn pair_count(catalog: &[CollectionGrants]) -> usize {
	catalog.iter().map(|c| c.grants.len()).sum()
}

pub fn default_catalog() -> Vec<CollectionGrants> {
	vec![
		CollectionGrants::owner_editable("voicebanks", "user_created"),
		CollectionGrants::owner_editable("projects", "user_created"),
		CollectionGrants::open("notes"),
		CollectionGrants::new("tags")
			.grant(Action::Read, Filter::Unrestricted)
			.grant(Action::Create, Filter::Unrestricted),
		CollectionGrants::open("projects_tags"),
		CollectionGrants::owner_editable("projects_likes", "user_id"),
		CollectionGrants::new("collaborations")
			.grant(Action::Read, Filter::owned_by_current_user("user_id"))
			.grant(Action::Create, Filter::Unrestricted)
			.grant(Action::Update, Filter::owned_by_current_user("user_id"))
			.grant(Action::Delete, Filter::Unrestricted),
		CollectionGrants::new("notifications")
			.grant(Action::Read, Filter::owned_by_current_user("user_id"))
			.grant_fields(
				Action::Update,
				Filter::owned_by_current_user("user_id"),
				Fields::only(["is_read"]),
			)
			.grant(Action::Delete, Filter::owned_by_current_user("user_id")),
		CollectionGrants::owner_editable("directus_files", "uploaded_by"),
		CollectionGrants::new("directus_users").grant_fields(
			Action::Read,
			Filter::Unrestricted,
			Fields::only(["id", "first_name", "last_name", "email", "avatar"]),
		),
	]
}

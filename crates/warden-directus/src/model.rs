// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request and response shapes for the access-control endpoints.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::filter::Filter;

/// Primary key of a Directus record. Roles and policies use UUIDs,
/// permissions use integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
	Int(i64),
	Text(String),
}

impl fmt::Display for RecordId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RecordId::Int(id) => write!(f, "{id}"),
			RecordId::Text(id) => f.write_str(id),
		}
	}
}

impl From<&str> for RecordId {
	fn from(id: &str) -> Self {
		RecordId::Text(id.to_string())
	}
}

impl From<i64> for RecordId {
	fn from(id: i64) -> Self {
		RecordId::Int(id)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
	Create,
	Read,
	Update,
	Delete,
}

impl Action {
	pub const ALL: [Action; 4] = [Action::Read, Action::Create, Action::Update, Action::Delete];

	pub fn as_str(&self) -> &'static str {
		match self {
			Action::Create => "create",
			Action::Read => "read",
			Action::Update => "update",
			Action::Delete => "delete",
		}
	}
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Field allow-list of a permission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Fields {
	/// `["*"]`
	#[default]
	All,
	Only(Vec<String>),
}

impl Fields {
	pub fn only<I, S>(fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Fields::Only(fields.into_iter().map(Into::into).collect())
	}

	pub fn to_vec(&self) -> Vec<String> {
		match self {
			Fields::All => vec!["*".to_string()],
			Fields::Only(fields) => fields.clone(),
		}
	}
}

impl Serialize for Fields {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		self.to_vec().serialize(serializer)
	}
}

/// Body of `POST /roles`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RoleSpec {
	pub name: String,
	pub icon: String,
	pub description: String,
	pub admin_access: bool,
	pub app_access: bool,
}

/// Body of `POST /policies`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PolicySpec {
	pub name: String,
	pub icon: String,
	pub description: String,
	pub admin_access: bool,
	pub app_access: bool,
}

/// Record a permission is attached to: a policy on backends with the
/// policy layer, the role itself on legacy backends.
///
/// Serializes as a single `"policy"` or `"role"` key, so a request can never
/// carry both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionOwner {
	Role(RecordId),
	Policy(RecordId),
}

impl PermissionOwner {
	pub fn id(&self) -> &RecordId {
		match self {
			PermissionOwner::Role(id) | PermissionOwner::Policy(id) => id,
		}
	}
}

/// Body of `POST /permissions`.
#[derive(Debug, Clone, Serialize)]
pub struct PermissionRequest {
	pub collection: String,
	pub action: Action,
	pub permissions: Filter,
	pub fields: Fields,
	#[serde(flatten)]
	pub owner: PermissionOwner,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
	pub email: &'a str,
	pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct PolicyRolesPatch<'a> {
	pub roles: [&'a RecordId; 1],
}

/// Every Directus item response wraps its payload in `data`.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
	pub data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginData {
	pub access_token: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecordRef {
	pub id: RecordId,
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! End-to-end provisioning run.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument};
use warden_common_secret::SecretString;
use warden_directus::{DirectusClient, PermissionOwner, PolicySpec, RecordId, RoleSpec};

use crate::catalog::{default_catalog, CollectionGrants};
use crate::ensure::{ensure_permission, ensure_policy, ensure_role};
use crate::error::{ProvisionError, Result};
use crate::progress::{NoOpProgressHook, ProgressEvent, SharedProgressHook};
use crate::tally::Tally;

pub const DEFAULT_ROLE_NAME: &str = "Authenticated User";
pub const DEFAULT_POLICY_NAME: &str = "Authenticated User Policy";
pub const DEFAULT_PAUSE: Duration = Duration::from_millis(50);

/// Permission model the backend exposes, as reported by `GET /policies`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessModel {
	/// Directus >= 10.10: permissions hang off a policy linked to the role.
	Policies,
	/// Older releases: permissions reference the role directly.
	Roles,
}

impl fmt::Display for AccessModel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			AccessModel::Policies => f.write_str("policies"),
			AccessModel::Roles => f.write_str("roles"),
		}
	}
}

#[derive(Debug, Clone)]
pub struct Credentials {
	pub email: String,
	pub password: SecretString,
}

/// What to provision: the role, the policy used on policy-capable backends,
/// the permission table, and the pause between permission calls.
#[derive(Debug, Clone)]
pub struct ProvisionPlan {
	pub role: RoleSpec,
	pub policy: PolicySpec,
	pub catalog: Vec<CollectionGrants>,
	pub pause: Duration,
}

impl ProvisionPlan {
	pub fn new(role_name: impl Into<String>, policy_name: impl Into<String>) -> Self {
		Self {
			role: RoleSpec {
				name: role_name.into(),
				icon: "supervised_user_circle".to_string(),
				description: "Authenticated users who can create music projects".to_string(),
				admin_access: false,
				app_access: true,
			},
			policy: PolicySpec {
				name: policy_name.into(),
				icon: "shield".to_string(),
				description: "Permissions for authenticated users".to_string(),
				admin_access: false,
				app_access: true,
			},
			catalog: default_catalog(),
			pause: DEFAULT_PAUSE,
		}
	}

	pub fn with_pause(mut self, pause: Duration) -> Self {
		self.pause = pause;
		self
	}
}

impl Default for ProvisionPlan {
	fn default() -> Self {
		Self::new(DEFAULT_ROLE_NAME, DEFAULT_POLICY_NAME)
	}
}

#[derive(Debug)]
pub struct ProvisionReport {
	pub access_model: AccessModel,
	pub role_id: RecordId,
	pub policy_id: Option<RecordId>,
	/// Set when the policy could not be linked to the role.
	pub link_warning: Option<String>,
	pub tally: Tally,
}

impl ProvisionReport {
	/// The record every permission of this run was attached to.
	pub fn owner(&self) -> PermissionOwner {
		match &self.policy_id {
			Some(id) => PermissionOwner::Policy(id.clone()),
			None => PermissionOwner::Role(self.role_id.clone()),
		}
	}
}

pub struct Provisioner {
	client: DirectusClient,
	plan: ProvisionPlan,
	hook: SharedProgressHook,
}

impl Provisioner {
	pub fn new(client: DirectusClient, plan: ProvisionPlan) -> Self {
		Self {
			client,
			plan,
			hook: Arc::new(NoOpProgressHook),
		}
	}

	pub fn with_progress(mut self, hook: SharedProgressHook) -> Self {
		self.hook = hook;
		self
	}

	/// Logs in, detects the access model, ensures role (and policy), then
	/// replays the permission table.
	///
	/// Only setup failures are returned as errors. Individual permission
	/// failures are counted in the report's tally.
	#[instrument(skip_all, fields(base_url = %self.client.base_url()))]
	pub async fn run(self, credentials: &Credentials) -> Result<ProvisionReport> {
		let Provisioner { client, plan, hook } = self;
		let hook = hook.as_ref();

		hook.on_event(&ProgressEvent::LoginStarted);
		let token = client
			.login(&credentials.email, &credentials.password)
			.await
			.map_err(ProvisionError::from_login)?;
		hook.on_event(&ProgressEvent::LoginSucceeded);
		let client = client.with_token(token);

		hook.on_event(&ProgressEvent::DetectionStarted);
		let access_model = if client.supports_policies().await {
			AccessModel::Policies
		} else {
			AccessModel::Roles
		};
		info!(access_model = %access_model, "access model detected");
		hook.on_event(&ProgressEvent::AccessModelDetected(access_model));

		let role_id = ensure_role(&client, &plan.role, hook).await?;

		let (owner, policy_id, link_warning) = match access_model {
			AccessModel::Policies => {
				let (policy_id, warning) = ensure_policy(&client, &plan.policy, &role_id, hook).await?;
				(PermissionOwner::Policy(policy_id.clone()), Some(policy_id), warning)
			}
			AccessModel::Roles => (PermissionOwner::Role(role_id.clone()), None, None),
		};

		hook.on_event(&ProgressEvent::PermissionsStarted);
		let mut tally = Tally::default();
		let mut first = true;
		for collection in &plan.catalog {
			hook.on_event(&ProgressEvent::CollectionStarted {
				collection: &collection.collection,
			});

			for grant in &collection.grants {
				if !first && !plan.pause.is_zero() {
					tokio::time::sleep(plan.pause).await;
				}
				first = false;

				let outcome = ensure_permission(&client, &owner, &collection.collection, grant).await;
				tally.record(&outcome);
				hook.on_event(&ProgressEvent::PermissionResolved {
					collection: &collection.collection,
					action: grant.action,
					outcome: &outcome,
				});
			}
		}

		info!(
			created = tally.created,
			existing = tally.existing,
			failed = tally.failed,
			total = tally.total,
			"permissions provisioned"
		);
		hook.on_event(&ProgressEvent::Finished { tally: &tally });

		Ok(ProvisionReport {
			access_model,
			role_id,
			policy_id,
			link_warning,
			tally,
		})
	}
}

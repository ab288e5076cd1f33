// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Create-or-fetch steps for roles, policies and permissions.

use tracing::{info, instrument, warn};
use warden_directus::{
	CreateOutcome, DirectusClient, PermissionOwner, PermissionRequest, PolicySpec, RecordId,
	RoleSpec,
};

use crate::catalog::Grant;
use crate::error::{ProvisionError, RecordKind, Result};
use crate::progress::{ProgressEvent, ProgressHook};

/// Creates the role, or resolves the id of the role that already carries
/// its name.
#[instrument(skip_all, fields(role = %spec.name))]
pub async fn ensure_role(
	client: &DirectusClient,
	spec: &RoleSpec,
	hook: &dyn ProgressHook,
) -> Result<RecordId> {
	hook.on_event(&ProgressEvent::RoleStarted { name: &spec.name });

	match client.create_role(spec).await {
		CreateOutcome::Created(id) => {
			info!(id = %id, "role created");
			hook.on_event(&ProgressEvent::RoleCreated { id: &id });
			Ok(id)
		}
		CreateOutcome::AlreadyExists => {
			hook.on_event(&ProgressEvent::RoleExists);
			let id = client
				.find_role_by_name(&spec.name)
				.await
				.map_err(|source| ProvisionError::Lookup {
					kind: RecordKind::Role,
					name: spec.name.clone(),
					source,
				})?
				.ok_or_else(|| ProvisionError::NotFound {
					kind: RecordKind::Role,
					name: spec.name.clone(),
				})?;
			info!(id = %id, "existing role resolved");
			hook.on_event(&ProgressEvent::RoleResolved { id: &id });
			Ok(id)
		}
		CreateOutcome::Failed(source) => Err(ProvisionError::Creation {
			kind: RecordKind::Role,
			name: spec.name.clone(),
			source,
		}),
	}
}

/// Creates the policy (or resolves the existing one) and links it to the
/// role. Returns the policy id and the link warning, if linking failed.
#[instrument(skip_all, fields(policy = %spec.name, role_id = %role_id))]
pub async fn ensure_policy(
	client: &DirectusClient,
	spec: &PolicySpec,
	role_id: &RecordId,
	hook: &dyn ProgressHook,
) -> Result<(RecordId, Option<String>)> {
	hook.on_event(&ProgressEvent::PolicyStarted { name: &spec.name });

	let policy_id = match client.create_policy(spec).await {
		CreateOutcome::Created(id) => {
			info!(id = %id, "policy created");
			hook.on_event(&ProgressEvent::PolicyCreated { id: &id });
			id
		}
		CreateOutcome::AlreadyExists => {
			hook.on_event(&ProgressEvent::PolicyExists);
			let id = client
				.find_policy_by_name(&spec.name)
				.await
				.map_err(|source| ProvisionError::Lookup {
					kind: RecordKind::Policy,
					name: spec.name.clone(),
					source,
				})?
				.ok_or_else(|| ProvisionError::NotFound {
					kind: RecordKind::Policy,
					name: spec.name.clone(),
				})?;
			info!(id = %id, "existing policy resolved");
			hook.on_event(&ProgressEvent::PolicyResolved { id: &id });
			id
		}
		CreateOutcome::Failed(source) => {
			return Err(ProvisionError::Creation {
				kind: RecordKind::Policy,
				name: spec.name.clone(),
				source,
			})
		}
	};

	let warning = link_policy(client, &policy_id, role_id, hook).await;
	Ok((policy_id, warning))
}

/// Best effort: a failed link is reported and returned, never raised.
async fn link_policy(
	client: &DirectusClient,
	policy_id: &RecordId,
	role_id: &RecordId,
	hook: &dyn ProgressHook,
) -> Option<String> {
	hook.on_event(&ProgressEvent::LinkStarted);

	match client.attach_policy_to_role(policy_id, role_id).await {
		Ok(()) => {
			info!("policy linked to role");
			hook.on_event(&ProgressEvent::LinkSucceeded);
			None
		}
		Err(e) => {
			let message = e.api_message().unwrap_or("unknown error").to_string();
			warn!(error = %e, "failed to link policy to role, continuing");
			hook.on_event(&ProgressEvent::LinkFailed { message: &message });
			Some(message)
		}
	}
}

/// Issues one permission create for `grant` on `collection`, attached to
/// `owner`.
pub async fn ensure_permission(
	client: &DirectusClient,
	owner: &PermissionOwner,
	collection: &str,
	grant: &Grant,
) -> CreateOutcome<RecordId> {
	let request = PermissionRequest {
		collection: collection.to_string(),
		action: grant.action,
		permissions: grant.filter.clone(),
		fields: grant.fields.clone(),
		owner: owner.clone(),
	};

	let outcome = client.create_permission(&request).await;
	if let CreateOutcome::Failed(e) = &outcome {
		warn!(
			collection,
			action = %grant.action,
			owner = %owner.id(),
			error = %e,
			"permission create failed"
		);
	}
	outcome
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Admin client for the Directus access-control endpoints.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};
use url::Url;
use warden_common_secret::SecretString;

use crate::error::{DirectusError, Result};
use crate::model::{
	DataEnvelope, LoginData, LoginRequest, PermissionRequest, PolicyRolesPatch, PolicySpec,
	RecordId, RecordRef, RoleSpec,
};
use crate::outcome::CreateOutcome;

pub struct DirectusClient {
	base_url: Url,
	http: Client,
	auth_token: Option<SecretString>,
}

impl DirectusClient {
	/// Creates an unauthenticated client for the instance at `base_url`.
	///
	/// A path prefix on the base URL is preserved, so
	/// `https://cms.example.com/directus` resolves `roles` to
	/// `https://cms.example.com/directus/roles`.
	pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self> {
		let base_url = normalize_base(base_url)?;
		let http = warden_common_http::new_client_with_timeout(request_timeout)
			.map_err(DirectusError::ClientBuild)?;
		Ok(Self {
			base_url,
			http,
			auth_token: None,
		})
	}

	pub fn with_token(mut self, token: SecretString) -> Self {
		self.auth_token = Some(token);
		self
	}

	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	pub fn is_authenticated(&self) -> bool {
		self.auth_token.is_some()
	}

	/// Exchanges admin credentials for an access token.
	#[instrument(skip_all, fields(email = %email))]
	pub async fn login(&self, email: &str, password: &SecretString) -> Result<SecretString> {
		let url = self.endpoint("auth/login")?;
		debug!("requesting admin access token");

		let response = self
			.http
			.post(url)
			.json(&LoginRequest {
				email,
				password: password.expose(),
			})
			.send()
			.await
			.map_err(DirectusError::Request)?;

		if !response.status().is_success() {
			let status = response.status().as_u16();
			let body = response.text().await.unwrap_or_default();
			let message = DirectusError::from_response(status, body)
				.api_message()
				.map(str::to_string);
			warn!(status, "admin login rejected");
			return Err(DirectusError::AuthenticationFailed { status, message });
		}

		let envelope: DataEnvelope<LoginData> = parse(response).await?;
		Ok(SecretString::new(envelope.data.access_token))
	}

	/// Reports whether the instance exposes the `/policies` collection.
	///
	/// Any 2xx answer counts as support; the body is not inspected. Non-2xx
	/// statuses and transport errors both mean the legacy role model.
	#[instrument(skip_all)]
	pub async fn supports_policies(&self) -> bool {
		let url = match self.endpoint("policies") {
			Ok(url) => url,
			Err(_) => return false,
		};

		match self.authorized(self.http.get(url)).send().await {
			Ok(response) => {
				let status = response.status();
				debug!(status = status.as_u16(), "policies endpoint answered");
				status.is_success()
			}
			Err(e) => {
				debug!(error = %e, "policies endpoint unreachable");
				false
			}
		}
	}

	pub async fn create_role(&self, spec: &RoleSpec) -> CreateOutcome<RecordId> {
		CreateOutcome::from_result(self.create_record("roles", spec).await)
	}

	pub async fn find_role_by_name(&self, name: &str) -> Result<Option<RecordId>> {
		self.find_by_name("roles", name).await
	}

	pub async fn create_policy(&self, spec: &PolicySpec) -> CreateOutcome<RecordId> {
		CreateOutcome::from_result(self.create_record("policies", spec).await)
	}

	pub async fn find_policy_by_name(&self, name: &str) -> Result<Option<RecordId>> {
		self.find_by_name("policies", name).await
	}

	/// Sets the policy's role association to `[role_id]`.
	#[instrument(skip_all, fields(policy_id = %policy_id, role_id = %role_id))]
	pub async fn attach_policy_to_role(&self, policy_id: &RecordId, role_id: &RecordId) -> Result<()> {
		let url = self.endpoint(&format!("policies/{policy_id}"))?;
		let response = self
			.authorized(self.http.patch(url))
			.json(&PolicyRolesPatch { roles: [role_id] })
			.send()
			.await
			.map_err(DirectusError::Request)?;

		check(response).await?;
		Ok(())
	}

	pub async fn create_permission(&self, request: &PermissionRequest) -> CreateOutcome<RecordId> {
		CreateOutcome::from_result(self.create_record("permissions", request).await)
	}

	#[instrument(skip_all, fields(collection = %collection))]
	async fn create_record<B: Serialize>(&self, collection: &str, body: &B) -> Result<RecordId> {
		let url = self.endpoint(collection)?;
		let response = self
			.authorized(self.http.post(url))
			.json(body)
			.send()
			.await
			.map_err(DirectusError::Request)?;

		let response = check(response).await?;
		let envelope: DataEnvelope<RecordRef> = parse(response).await?;
		debug!(id = %envelope.data.id, "record created");
		Ok(envelope.data.id)
	}

	#[instrument(skip_all, fields(collection = %collection, name = %name))]
	async fn find_by_name(&self, collection: &str, name: &str) -> Result<Option<RecordId>> {
		let url = self.endpoint(collection)?;
		let response = self
			.authorized(self.http.get(url))
			.query(&[("filter[name][_eq]", name)])
			.send()
			.await
			.map_err(DirectusError::Request)?;

		let response = check(response).await?;
		let envelope: DataEnvelope<Vec<RecordRef>> = parse(response).await?;
		Ok(envelope.data.into_iter().next().map(|r| r.id))
	}

	fn endpoint(&self, path: &str) -> Result<Url> {
		self
			.base_url
			.join(path)
			.map_err(|e| DirectusError::InvalidBaseUrl(e.to_string()))
	}

	fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
		match &self.auth_token {
			Some(token) => request.bearer_auth(token.expose()),
			None => request,
		}
	}
}

fn normalize_base(base_url: &str) -> Result<Url> {
	let trimmed = base_url.trim().trim_end_matches('/');
	let url = Url::parse(&format!("{trimmed}/"))
		.map_err(|e| DirectusError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

	match url.scheme() {
		"http" | "https" => Ok(url),
		other => Err(DirectusError::InvalidBaseUrl(format!(
			"{base_url}: unsupported scheme {other}"
		))),
	}
}

async fn check(response: Response) -> Result<Response> {
	if response.status().is_success() {
		return Ok(response);
	}

	let status = response.status().as_u16();
	let body = response.text().await.unwrap_or_default();
	let err = DirectusError::from_response(status, body);
	debug!(status, code = ?err.code(), "request rejected");
	Err(err)
}

async fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
	response
		.json()
		.await
		.map_err(|e| DirectusError::ParseFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn normalize_base_adds_single_trailing_slash() {
		let url = normalize_base("http://localhost:8055///").unwrap();
		assert_eq!(url.as_str(), "http://localhost:8055/");
	}

	#[test]
	fn normalize_base_keeps_path_prefix() {
		let url = normalize_base("https://cms.example.com/directus").unwrap();
		assert_eq!(url.join("roles").unwrap().as_str(), "https://cms.example.com/directus/roles");
	}

	#[test]
	fn normalize_base_rejects_other_schemes() {
		assert!(matches!(
			normalize_base("ftp://example.com"),
			Err(DirectusError::InvalidBaseUrl(_))
		));
		assert!(matches!(
			normalize_base("not a url"),
			Err(DirectusError::InvalidBaseUrl(_))
		));
	}

	#[test]
	fn new_client_starts_unauthenticated() {
		let client = DirectusClient::new("http://localhost:8055", Duration::from_secs(5)).unwrap();
		assert!(!client.is_authenticated());
		let client = client.with_token(SecretString::from("token"));
		assert!(client.is_authenticated());
	}
}

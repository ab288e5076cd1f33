// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Validation of resolved configuration.

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;
use crate::runtime::WardenConfig;

pub const MAX_PAUSE: Duration = Duration::from_secs(10);

pub fn validate(config: &WardenConfig) -> Result<(), ConfigError> {
	let base_url = config.directus.base_url.trim();
	let url = Url::parse(base_url)
		.map_err(|e| ConfigError::invalid_value("directus.base_url", format!("{base_url}: {e}")))?;
	if !matches!(url.scheme(), "http" | "https") {
		return Err(ConfigError::invalid_value(
			"directus.base_url",
			format!("{base_url}: scheme must be http or https"),
		));
	}

	if config.directus.admin_email.trim().is_empty() {
		return Err(ConfigError::invalid_value(
			"directus.admin_email",
			"must not be empty",
		));
	}

	if config.directus.request_timeout.is_zero() {
		return Err(ConfigError::invalid_value(
			"directus.request_timeout_secs",
			"must be greater than zero",
		));
	}

	if config.provisioning.role_name.trim().is_empty() {
		return Err(ConfigError::invalid_value(
			"provisioning.role_name",
			"must not be empty",
		));
	}

	if config.provisioning.policy_name.trim().is_empty() {
		return Err(ConfigError::invalid_value(
			"provisioning.policy_name",
			"must not be empty",
		));
	}

	if config.provisioning.pause > MAX_PAUSE {
		return Err(ConfigError::validation(format!(
			"provisioning.pause_ms is {} but may be at most {}",
			config.provisioning.pause.as_millis(),
			MAX_PAUSE.as_millis()
		)));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_defaults_are_valid() {
		assert!(validate(&WardenConfig::default()).is_ok());
	}

	#[test]
	fn test_rejects_non_http_scheme() {
		let mut config = WardenConfig::default();
		config.directus.base_url = "ftp://cms.example.com".to_string();
		let err = validate(&config).unwrap_err();
		assert!(err.to_string().contains("http or https"));
	}

	#[test]
	fn test_rejects_unparsable_url() {
		let mut config = WardenConfig::default();
		config.directus.base_url = "localhost 8055".to_string();
		assert!(validate(&config).is_err());
	}

	#[test]
	fn test_rejects_empty_email() {
		let mut config = WardenConfig::default();
		config.directus.admin_email = "  ".to_string();
		assert!(validate(&config).is_err());
	}

	#[test]
	fn test_rejects_zero_timeout() {
		let mut config = WardenConfig::default();
		config.directus.request_timeout = Duration::ZERO;
		assert!(validate(&config).is_err());
	}

	proptest! {
		#[test]
		fn pause_bound_is_enforced(ms in 0u64..30_000) {
			let mut config = WardenConfig::default();
			config.provisioning.pause = Duration::from_millis(ms);
			prop_assert_eq!(validate(&config).is_ok(), ms <= 10_000);
		}
	}
}

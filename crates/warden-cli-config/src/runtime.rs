// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Fully resolved runtime configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use warden_common_secret::SecretString;

use crate::error::ConfigError;
use crate::layer::{ConfigLayer, DirectusConfigLayer, LoggingConfigLayer, ProvisioningConfigLayer};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8055";
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";
pub const DEFAULT_ROLE_NAME: &str = "Authenticated User";
pub const DEFAULT_POLICY_NAME: &str = "Authenticated User Policy";
pub const DEFAULT_PAUSE_MS: u64 = 50;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
	Trace,
	Debug,
	Info,
	#[default]
	Warn,
	Error,
}

impl LogLevel {
	pub fn as_str(&self) -> &'static str {
		match self {
			LogLevel::Trace => "trace",
			LogLevel::Debug => "debug",
			LogLevel::Info => "info",
			LogLevel::Warn => "warn",
			LogLevel::Error => "error",
		}
	}
}

impl fmt::Display for LogLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for LogLevel {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"trace" => Ok(LogLevel::Trace),
			"debug" => Ok(LogLevel::Debug),
			"info" => Ok(LogLevel::Info),
			"warn" | "warning" => Ok(LogLevel::Warn),
			"error" => Ok(LogLevel::Error),
			other => Err(ConfigError::invalid_value(
				"logging.level",
				format!("unknown level '{other}'"),
			)),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Pretty,
	#[default]
	Compact,
	Json,
}

impl FromStr for LogFormat {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"pretty" => Ok(LogFormat::Pretty),
			"compact" => Ok(LogFormat::Compact),
			"json" => Ok(LogFormat::Json),
			other => Err(ConfigError::invalid_value(
				"logging.format",
				format!("unknown format '{other}'"),
			)),
		}
	}
}

#[derive(Debug, Clone)]
pub struct DirectusConfig {
	pub base_url: String,
	pub admin_email: String,
	pub admin_password: SecretString,
	pub request_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProvisioningConfig {
	pub role_name: String,
	pub policy_name: String,
	pub pause: Duration,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoggingConfig {
	pub level: LogLevel,
	pub format: LogFormat,
}

#[derive(Debug, Clone)]
pub struct WardenConfig {
	pub directus: DirectusConfig,
	pub provisioning: ProvisioningConfig,
	pub logging: LoggingConfig,
}

impl DirectusConfigLayer {
	pub fn finalize(self) -> DirectusConfig {
		DirectusConfig {
			base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
			admin_email: self
				.admin_email
				.unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string()),
			admin_password: self
				.admin_password
				.unwrap_or_else(|| SecretString::from(DEFAULT_ADMIN_PASSWORD)),
			request_timeout: Duration::from_secs(
				self
					.request_timeout_secs
					.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
			),
		}
	}
}

impl ProvisioningConfigLayer {
	pub fn finalize(self) -> ProvisioningConfig {
		ProvisioningConfig {
			role_name: self.role_name.unwrap_or_else(|| DEFAULT_ROLE_NAME.to_string()),
			policy_name: self
				.policy_name
				.unwrap_or_else(|| DEFAULT_POLICY_NAME.to_string()),
			pause: Duration::from_millis(self.pause_ms.unwrap_or(DEFAULT_PAUSE_MS)),
		}
	}
}

impl LoggingConfigLayer {
	pub fn finalize(self) -> LoggingConfig {
		LoggingConfig {
			level: self.level.unwrap_or_default(),
			format: self.format.unwrap_or_default(),
		}
	}
}

impl WardenConfig {
	/// Resolves a merged layer, filling gaps with defaults. Does not validate.
	pub fn from_layer(layer: ConfigLayer) -> Self {
		Self {
			directus: layer.directus.unwrap_or_default().finalize(),
			provisioning: layer.provisioning.unwrap_or_default().finalize(),
			logging: layer.logging.unwrap_or_default().finalize(),
		}
	}
}

impl Default for WardenConfig {
	fn default() -> Self {
		Self::from_layer(ConfigLayer::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_match_local_directus() {
		let config = WardenConfig::default();
		assert_eq!(config.directus.base_url, "http://localhost:8055");
		assert_eq!(config.directus.admin_email, "admin@example.com");
		assert_eq!(config.directus.admin_password.expose(), "admin");
		assert_eq!(config.directus.request_timeout, Duration::from_secs(30));
		assert_eq!(config.provisioning.role_name, "Authenticated User");
		assert_eq!(config.provisioning.policy_name, "Authenticated User Policy");
		assert_eq!(config.provisioning.pause, Duration::from_millis(50));
		assert_eq!(config.logging, LoggingConfig::default());
	}

	#[test]
	fn test_log_level_parsing() {
		assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
		assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
		assert!("loud".parse::<LogLevel>().is_err());
	}

	#[test]
	fn test_log_format_parsing() {
		assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
		assert_eq!(" Pretty ".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
		assert!("xml".parse::<LogFormat>().is_err());
	}
}

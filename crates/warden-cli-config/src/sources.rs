// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: defaults, TOML files, environment and CLI flags.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::env::load_secret_with;
use crate::error::ConfigError;
use crate::layer::{ConfigLayer, DirectusConfigLayer, LoggingConfigLayer, ProvisioningConfigLayer};
use crate::runtime::{LogFormat, LogLevel};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	UserFile = 30,
	ExplicitFile = 40,
	Environment = 50,
	Cli = 60,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ConfigLayer, ConfigError>;
}

/// Built-in defaults source. Resolution fills every gap, so the layer is empty.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct FileSource {
	path: PathBuf,
	precedence: Precedence,
	required: bool,
}

impl FileSource {
	/// The per-user file; skipped when absent.
	pub fn user(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			precedence: Precedence::UserFile,
			required: false,
		}
	}

	/// A file named on the command line; absence is an error.
	pub fn explicit(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			precedence: Precedence::ExplicitFile,
			required: true,
		}
	}
}

impl ConfigSource for FileSource {
	fn name(&self) -> &'static str {
		match self.precedence {
			Precedence::ExplicitFile => "explicit-file",
			_ => "user-file",
		}
	}

	fn precedence(&self) -> Precedence {
		self.precedence
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		if !self.path.exists() {
			if self.required {
				return Err(ConfigError::FileNotFound(self.path.clone()));
			}
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ConfigLayer = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: `WARDEN_<FIELD>`; the admin password also accepts
/// `WARDEN_ADMIN_PASSWORD_FILE`.
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading environment variables");
		layer_from_env(|name| std::env::var(name).ok())
	}
}

pub(crate) fn layer_from_env<F>(lookup: F) -> Result<ConfigLayer, ConfigError>
where
	F: Fn(&str) -> Option<String>,
{
	let var = |name: &str| lookup(name).filter(|s| !s.is_empty());
	let number = |name: &str| -> Result<Option<u64>, ConfigError> {
		match var(name) {
			Some(v) => v
				.trim()
				.parse()
				.map(Some)
				.map_err(|_| ConfigError::invalid_value(name, format!("invalid integer '{v}'"))),
			None => Ok(None),
		}
	};

	let admin_password = load_secret_with("WARDEN_ADMIN_PASSWORD", &lookup)
		.map_err(|e| ConfigError::Secret(e.to_string()))?;

	Ok(ConfigLayer {
		directus: Some(DirectusConfigLayer {
			base_url: var("WARDEN_BASE_URL"),
			admin_email: var("WARDEN_ADMIN_EMAIL"),
			admin_password,
			request_timeout_secs: number("WARDEN_REQUEST_TIMEOUT_SECS")?,
		}),
		provisioning: Some(ProvisioningConfigLayer {
			role_name: var("WARDEN_ROLE_NAME"),
			policy_name: var("WARDEN_POLICY_NAME"),
			pause_ms: number("WARDEN_PAUSE_MS")?,
		}),
		logging: Some(LoggingConfigLayer {
			level: var("WARDEN_LOG_LEVEL")
				.map(|v| v.parse::<LogLevel>())
				.transpose()?,
			format: var("WARDEN_LOG_FORMAT")
				.map(|v| v.parse::<LogFormat>())
				.transpose()?,
		}),
	})
}

/// Values given as command-line flags.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
	pub base_url: Option<String>,
	pub admin_email: Option<String>,
	pub log_level: Option<LogLevel>,
	pub log_format: Option<LogFormat>,
}

/// CLI override source, the highest precedence.
pub struct CliSource {
	overrides: CliOverrides,
}

impl CliSource {
	pub fn new(overrides: CliOverrides) -> Self {
		Self { overrides }
	}
}

impl ConfigSource for CliSource {
	fn name(&self) -> &'static str {
		"cli"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Cli
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		let o = self.overrides.clone();
		Ok(ConfigLayer {
			directus: Some(DirectusConfigLayer {
				base_url: o.base_url,
				admin_email: o.admin_email,
				..Default::default()
			}),
			provisioning: None,
			logging: Some(LoggingConfigLayer {
				level: o.log_level,
				format: o.log_format,
			}),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;
	use std::io::Write;

	fn env(vars: &[(&'static str, &str)]) -> Result<ConfigLayer, ConfigError> {
		let vars: HashMap<&'static str, String> =
			vars.iter().map(|(k, v)| (*k, v.to_string())).collect();
		layer_from_env(|name| vars.get(name).cloned())
	}

	#[test]
	fn test_precedence_ordering() {
		assert!(Precedence::Cli > Precedence::Environment);
		assert!(Precedence::Environment > Precedence::ExplicitFile);
		assert!(Precedence::ExplicitFile > Precedence::UserFile);
		assert!(Precedence::UserFile > Precedence::Defaults);
	}

	#[test]
	fn test_defaults_source_returns_empty_layer() {
		let layer = DefaultsSource.load().unwrap();
		assert!(layer.directus.is_none());
		assert!(layer.provisioning.is_none());
		assert!(layer.logging.is_none());
	}

	#[test]
	fn test_user_file_missing_is_skipped() {
		let layer = FileSource::user("/nonexistent/warden/config.toml")
			.load()
			.unwrap();
		assert!(layer.directus.is_none());
	}

	#[test]
	fn test_explicit_file_missing_is_error() {
		let err = FileSource::explicit("/nonexistent/warden/config.toml")
			.load()
			.unwrap_err();
		assert!(matches!(err, ConfigError::FileNotFound(_)));
	}

	#[test]
	fn test_file_parse_error_names_path() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[directus\nbase_url = 1").unwrap();
		let err = FileSource::explicit(file.path()).load().unwrap_err();
		match err {
			ConfigError::TomlParse { path, .. } => assert_eq!(path, file.path()),
			other => panic!("expected parse error, got {other:?}"),
		}
	}

	#[test]
	fn test_env_reads_warden_vars() {
		let layer = env(&[
			("WARDEN_BASE_URL", "https://cms.example.com"),
			("WARDEN_ADMIN_PASSWORD", "s3cret"),
			("WARDEN_PAUSE_MS", "0"),
			("WARDEN_LOG_LEVEL", "info"),
			("WARDEN_LOG_FORMAT", "json"),
		])
		.unwrap();

		let directus = layer.directus.unwrap();
		assert_eq!(directus.base_url.as_deref(), Some("https://cms.example.com"));
		assert_eq!(directus.admin_password.unwrap().expose(), "s3cret");
		assert!(directus.admin_email.is_none());
		assert_eq!(layer.provisioning.unwrap().pause_ms, Some(0));
		let logging = layer.logging.unwrap();
		assert_eq!(logging.level, Some(LogLevel::Info));
		assert_eq!(logging.format, Some(LogFormat::Json));
	}

	#[test]
	fn test_env_empty_values_are_ignored() {
		let layer = env(&[("WARDEN_ROLE_NAME", "")]).unwrap();
		assert!(layer.provisioning.unwrap().role_name.is_none());
	}

	#[test]
	fn test_env_rejects_non_numeric_pause() {
		let err = env(&[("WARDEN_PAUSE_MS", "fast")]).unwrap_err();
		assert!(err.to_string().contains("WARDEN_PAUSE_MS"));
	}

	#[test]
	fn test_cli_source_sets_only_given_flags() {
		let layer = CliSource::new(CliOverrides {
			base_url: Some("http://directus:8055".to_string()),
			log_format: Some(LogFormat::Json),
			..Default::default()
		})
		.load()
		.unwrap();

		let directus = layer.directus.unwrap();
		assert_eq!(directus.base_url.as_deref(), Some("http://directus:8055"));
		assert!(directus.admin_email.is_none());
		assert!(directus.admin_password.is_none());
		assert!(layer.provisioning.is_none());
	}
}

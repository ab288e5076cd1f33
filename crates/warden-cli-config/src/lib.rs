// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration management for the warden CLI.
//!
//! This crate provides:
//! - XDG Base Directory compliant path resolution
//! - Layered configuration from multiple sources
//! - TOML configuration file parsing
//! - Environment variable overrides (`WARDEN_*`)
//! - Configuration validation

pub mod env;
pub mod error;
pub mod layer;
pub mod paths;
pub mod runtime;
pub mod sources;
pub mod validation;

use std::path::Path;

use tracing::debug;

pub use env::SecretEnvError;
pub use error::ConfigError;
pub use layer::ConfigLayer;
pub use runtime::{
	DirectusConfig, LogFormat, LogLevel, LoggingConfig, ProvisioningConfig, WardenConfig,
};
pub use sources::{CliOverrides, ConfigSource, Precedence};

/// Load configuration with CLI overrides.
///
/// Precedence (highest to lowest):
/// 1. CLI flags
/// 2. Environment variables (`WARDEN_*`)
/// 3. The file passed as `explicit_file`, which must exist
/// 4. The user file (`$XDG_CONFIG_HOME/warden/config.toml`)
/// 5. Built-in defaults
pub fn load_config_with_cli(
	explicit_file: Option<&Path>,
	cli: CliOverrides,
) -> Result<WardenConfig, ConfigError> {
	let mut sources: Vec<Box<dyn ConfigSource>> = vec![
		Box::new(sources::DefaultsSource),
		Box::new(sources::EnvSource),
		Box::new(sources::CliSource::new(cli)),
	];

	match paths::user_config_file() {
		Ok(path) => sources.push(Box::new(sources::FileSource::user(path))),
		Err(e) => debug!(error = %e, "no user config location, skipping"),
	}
	if let Some(path) = explicit_file {
		sources.push(Box::new(sources::FileSource::explicit(path)));
	}

	load_from_sources(sources)
}

/// Merge `sources` in precedence order, resolve defaults and validate.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<WardenConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		merged.merge(source.load()?);
	}

	let config = WardenConfig::from_layer(merged);
	validation::validate(&config)?;

	debug!(
		base_url = %config.directus.base_url,
		admin_email = %config.directus.admin_email,
		role = %config.provisioning.role_name,
		policy = %config.provisioning.policy_name,
		pause_ms = config.provisioning.pause.as_millis() as u64,
		"configuration loaded"
	);

	Ok(config)
}

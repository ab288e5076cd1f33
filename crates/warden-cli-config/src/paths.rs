// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! XDG Base Directory compliant path resolution.

use std::path::{Path, PathBuf};

use crate::ConfigError;

/// Resolve the user config file: `$XDG_CONFIG_HOME/warden/config.toml`,
/// falling back to `~/.config/warden/config.toml`.
pub fn user_config_file() -> Result<PathBuf, ConfigError> {
	let config_home = match std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
		Some(dir) => PathBuf::from(dir),
		None => dirs::home_dir()
			.ok_or(ConfigError::HomeDirNotFound)?
			.join(".config"),
	};

	let path = config_file_in(&config_home);
	tracing::debug!(path = %path.display(), "resolved user config file");
	Ok(path)
}

fn config_file_in(config_home: &Path) -> PathBuf {
	config_home.join("warden").join("config.toml")
}

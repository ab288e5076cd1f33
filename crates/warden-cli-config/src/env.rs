// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Environment helpers.

use std::path::PathBuf;

use thiserror::Error;
use warden_common_secret::SecretString;

#[derive(Debug, Error)]
pub enum SecretEnvError {
	#[error("both {name} and {name}_FILE are set; use only one")]
	BothSet { name: String },

	#[error("failed to read {name}_FILE at {path}: {source}")]
	FileRead {
		name: String,
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// Load a secret from `NAME`, or from the file named by `NAME_FILE`.
///
/// Surrounding whitespace in the file is trimmed. Setting both variables is
/// an error; setting neither yields `None`.
pub(crate) fn load_secret_with<F>(name: &str, lookup: F) -> Result<Option<SecretString>, SecretEnvError>
where
	F: Fn(&str) -> Option<String>,
{
	let file_key = format!("{name}_FILE");
	let direct = lookup(name).filter(|v| !v.is_empty());
	let file = lookup(&file_key).filter(|v| !v.is_empty());

	match (direct, file) {
		(Some(_), Some(_)) => Err(SecretEnvError::BothSet {
			name: name.to_string(),
		}),
		(Some(value), None) => Ok(Some(SecretString::new(value))),
		(None, Some(path)) => {
			let path = PathBuf::from(path);
			let contents = std::fs::read_to_string(&path).map_err(|source| SecretEnvError::FileRead {
				name: name.to_string(),
				path: path.clone(),
				source,
			})?;
			Ok(Some(SecretString::new(contents.trim().to_string())))
		}
		(None, None) => Ok(None),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;
	use std::io::Write;

	fn lookup<'a>(vars: &'a HashMap<&'static str, String>) -> impl Fn(&str) -> Option<String> + 'a {
		move |key| vars.get(key).cloned()
	}

	#[test]
	fn test_direct_value() {
		let vars = HashMap::from([("WARDEN_ADMIN_PASSWORD", "hunter2".to_string())]);
		let secret = load_secret_with("WARDEN_ADMIN_PASSWORD", lookup(&vars)).unwrap();
		assert_eq!(secret.unwrap().expose(), "hunter2");
	}

	#[test]
	fn test_file_value_is_trimmed() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "  from-file  ").unwrap();
		let vars = HashMap::from([(
			"WARDEN_ADMIN_PASSWORD_FILE",
			file.path().display().to_string(),
		)]);

		let secret = load_secret_with("WARDEN_ADMIN_PASSWORD", lookup(&vars)).unwrap();
		assert_eq!(secret.unwrap().expose(), "from-file");
	}

	#[test]
	fn test_both_set_is_rejected() {
		let vars = HashMap::from([
			("WARDEN_ADMIN_PASSWORD", "a".to_string()),
			("WARDEN_ADMIN_PASSWORD_FILE", "/tmp/b".to_string()),
		]);
		let err = load_secret_with("WARDEN_ADMIN_PASSWORD", lookup(&vars)).unwrap_err();
		assert!(matches!(err, SecretEnvError::BothSet { .. }));
	}

	#[test]
	fn test_missing_file_is_reported() {
		let vars = HashMap::from([(
			"WARDEN_ADMIN_PASSWORD_FILE",
			"/nonexistent/warden/password".to_string(),
		)]);
		let err = load_secret_with("WARDEN_ADMIN_PASSWORD", lookup(&vars)).unwrap_err();
		assert!(err.to_string().contains("/nonexistent/warden/password"));
	}

	#[test]
	fn test_unset_is_none() {
		let vars = HashMap::new();
		assert!(load_secret_with("WARDEN_ADMIN_PASSWORD", lookup(&vars))
			.unwrap()
			.is_none());
	}
}

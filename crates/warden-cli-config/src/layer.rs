// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration layers.
//!
//! Every source produces a [`ConfigLayer`] in which each field is optional.
//! Layers are merged in precedence order; a `Some` in a later layer replaces
//! the earlier value.

use serde::Deserialize;
use warden_common_secret::SecretString;

use crate::runtime::{LogFormat, LogLevel};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigLayer {
	pub directus: Option<DirectusConfigLayer>,
	pub provisioning: Option<ProvisioningConfigLayer>,
	pub logging: Option<LoggingConfigLayer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectusConfigLayer {
	pub base_url: Option<String>,
	pub admin_email: Option<String>,
	pub admin_password: Option<SecretString>,
	pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ProvisioningConfigLayer {
	pub role_name: Option<String>,
	pub policy_name: Option<String>,
	pub pause_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct LoggingConfigLayer {
	pub level: Option<LogLevel>,
	pub format: Option<LogFormat>,
}

fn merge_section<T>(base: &mut Option<T>, other: Option<T>, merge: impl FnOnce(&mut T, T)) {
	let Some(incoming) = other else {
		return;
	};
	match base {
		Some(existing) => merge(existing, incoming),
		None => *base = Some(incoming),
	}
}

fn take<T>(slot: &mut Option<T>, incoming: Option<T>) {
	if incoming.is_some() {
		*slot = incoming;
	}
}

impl ConfigLayer {
	pub fn merge(&mut self, other: ConfigLayer) {
		merge_section(&mut self.directus, other.directus, DirectusConfigLayer::merge);
		merge_section(
			&mut self.provisioning,
			other.provisioning,
			ProvisioningConfigLayer::merge,
		);
		merge_section(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}

impl DirectusConfigLayer {
	pub fn merge(&mut self, other: Self) {
		take(&mut self.base_url, other.base_url);
		take(&mut self.admin_email, other.admin_email);
		take(&mut self.admin_password, other.admin_password);
		take(&mut self.request_timeout_secs, other.request_timeout_secs);
	}
}

impl ProvisioningConfigLayer {
	pub fn merge(&mut self, other: Self) {
		take(&mut self.role_name, other.role_name);
		take(&mut self.policy_name, other.policy_name);
		take(&mut self.pause_ms, other.pause_ms);
	}
}

impl LoggingConfigLayer {
	pub fn merge(&mut self, other: Self) {
		take(&mut self.level, other.level);
		take(&mut self.format, other.format);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_merge_overwrites_set_fields_only() {
		let mut base = ConfigLayer {
			directus: Some(DirectusConfigLayer {
				base_url: Some("http://localhost:8055".to_string()),
				admin_email: Some("admin@example.com".to_string()),
				..Default::default()
			}),
			..Default::default()
		};
		base.merge(ConfigLayer {
			directus: Some(DirectusConfigLayer {
				base_url: Some("https://cms.example.com".to_string()),
				..Default::default()
			}),
			..Default::default()
		});

		let directus = base.directus.unwrap();
		assert_eq!(directus.base_url.as_deref(), Some("https://cms.example.com"));
		assert_eq!(directus.admin_email.as_deref(), Some("admin@example.com"));
	}

	#[test]
	fn test_merge_fills_missing_section() {
		let mut base = ConfigLayer::default();
		base.merge(ConfigLayer {
			logging: Some(LoggingConfigLayer {
				level: Some(LogLevel::Debug),
				format: None,
			}),
			..Default::default()
		});
		assert_eq!(base.logging.unwrap().level, Some(LogLevel::Debug));
	}

	#[test]
	fn test_parse_toml_sections() {
		let layer: ConfigLayer = toml::from_str(
			r#"
			[directus]
			base_url = "https://cms.example.com"
			admin_password = "s3cret"

			[provisioning]
			pause_ms = 0

			[logging]
			level = "debug"
			format = "json"
			"#,
		)
		.unwrap();

		let directus = layer.directus.unwrap();
		assert_eq!(directus.admin_password.unwrap().expose(), "s3cret");
		assert_eq!(layer.provisioning.unwrap().pause_ms, Some(0));
		let logging = layer.logging.unwrap();
		assert_eq!(logging.level, Some(LogLevel::Debug));
		assert_eq!(logging.format, Some(LogFormat::Json));
	}

	proptest! {
		#[test]
		fn merge_prefers_later_value(a in proptest::option::of(0u64..10_000), b in proptest::option::of(0u64..10_000)) {
			let mut base = ProvisioningConfigLayer { pause_ms: a, ..Default::default() };
			base.merge(ProvisioningConfigLayer { pause_ms: b, ..Default::default() });
			prop_assert_eq!(base.pause_ms, b.or(a));
		}
	}
}

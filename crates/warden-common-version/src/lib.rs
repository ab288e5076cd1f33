// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Compile-time build information for the warden binary and its HTTP
//! User-Agent.

shadow_rs::shadow!(build);

/// Target platform as `{os}-{arch}`, e.g. "linux-x86_64".
pub const PLATFORM: &str = env!("WARDEN_PLATFORM");

#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
	pub version: &'static str,
	pub git_sha: &'static str,
	pub build_timestamp: &'static str,
	pub platform: &'static str,
}

impl BuildInfo {
	#[allow(clippy::const_is_empty)]
	pub const fn current() -> Self {
		Self {
			version: build::PKG_VERSION,
			git_sha: if build::SHORT_COMMIT.is_empty() {
				"unknown"
			} else {
				build::SHORT_COMMIT
			},
			build_timestamp: build::BUILD_TIME,
			platform: PLATFORM,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn build_info_has_version() {
		let info = BuildInfo::current();
		assert!(!info.version.is_empty());
		assert!(!info.git_sha.is_empty());
	}

	#[test]
	fn platform_is_os_dash_arch() {
		assert!(PLATFORM.contains('-'));
	}
}

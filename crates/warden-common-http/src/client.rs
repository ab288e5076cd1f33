// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use warden_common_version::BuildInfo;

/// Client builder preloaded with the warden User-Agent.
///
/// ```ignore
/// let client = warden_common_http::builder()
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Builds a client whose requests give up after `timeout`.
pub fn new_client_with_timeout(timeout: Duration) -> reqwest::Result<Client> {
	builder().timeout(timeout).build()
}

/// Format: `warden/{platform}/{git_sha}`
pub fn user_agent() -> String {
	let info = BuildInfo::current();
	format!("warden/{}/{}", info.platform, info.git_sha)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_agent_has_three_segments() {
		let ua = user_agent();
		let parts: Vec<&str> = ua.split('/').collect();
		assert_eq!(parts.len(), 3);
		assert_eq!(parts[0], "warden");
	}

	#[test]
	fn client_with_timeout_builds() {
		assert!(new_client_with_timeout(Duration::from_secs(5)).is_ok());
	}
}

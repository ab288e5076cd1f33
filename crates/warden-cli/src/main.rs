// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! warden - provisions the authenticated-user role, policy and permissions
//! on a Directus backend.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use warden_cli_config::{load_config_with_cli, CliOverrides, LogFormat, LogLevel, WardenConfig};
use warden_directus::DirectusClient;
use warden_provision::{Credentials, ProvisionPlan, ProvisionReport, Provisioner};

mod logging;
mod output;
mod plan;
mod version;

/// Warden - Directus access provisioning
#[derive(Parser, Debug)]
#[command(name = "warden", version, about, long_about = None)]
struct Args {
	/// Path to a configuration file (must exist)
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Directus base URL (overrides config)
	#[arg(long)]
	base_url: Option<String>,

	/// Admin account email (overrides config)
	#[arg(long)]
	admin_email: Option<String>,

	/// Log level (overrides config)
	#[arg(short, long)]
	log_level: Option<String>,

	/// Output logs as JSON (overrides config)
	#[arg(long)]
	json_logs: bool,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
	/// Create the role, policy and permissions (default)
	Apply,
	/// Print the permission table without contacting Directus
	Plan {
		/// Print as JSON
		#[arg(long)]
		json: bool,
	},
	/// Show version and build information
	Version,
}

impl TryFrom<&Args> for CliOverrides {
	type Error = anyhow::Error;

	fn try_from(args: &Args) -> Result<Self> {
		let log_level = args
			.log_level
			.as_deref()
			.map(str::parse::<LogLevel>)
			.transpose()?;

		Ok(Self {
			base_url: args.base_url.clone(),
			admin_email: args.admin_email.clone(),
			log_level,
			log_format: args.json_logs.then_some(LogFormat::Json),
		})
	}
}

fn load_config(args: &Args) -> Result<WardenConfig> {
	let overrides = CliOverrides::try_from(args)?;
	load_config_with_cli(args.config.as_deref(), overrides).context("failed to load configuration")
}

async fn apply(config: &WardenConfig) -> Result<ProvisionReport> {
	let client = DirectusClient::new(&config.directus.base_url, config.directus.request_timeout)?;

	let plan = ProvisionPlan::new(
		config.provisioning.role_name.clone(),
		config.provisioning.policy_name.clone(),
	)
	.with_pause(config.provisioning.pause);

	let credentials = Credentials {
		email: config.directus.admin_email.clone(),
		password: config.directus.admin_password.clone(),
	};

	let report = Provisioner::new(client, plan)
		.with_progress(Arc::new(output::TerminalReporter))
		.run(&credentials)
		.await?;
	Ok(report)
}

/// Reports the outcome of `apply`. A completed run exits 0 even when some
/// permissions failed; those are already in the summary.
fn finish(result: Result<ProvisionReport>, config: &WardenConfig) -> ExitCode {
	match result {
		Ok(report) => {
			output::success(
				&report,
				&config.directus.base_url,
				&config.provisioning.role_name,
			);
			ExitCode::SUCCESS
		}
		Err(e) => {
			output::fatal(&e, &config.directus.base_url);
			ExitCode::FAILURE
		}
	}
}

#[tokio::main]
async fn main() -> ExitCode {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("{}", version::format_version_info());
		return ExitCode::SUCCESS;
	}

	let config = match load_config(&args) {
		Ok(config) => config,
		Err(e) => {
			eprintln!("Error: {e:#}");
			return ExitCode::FAILURE;
		}
	};

	logging::init_tracing(&config.logging);

	match args.command.clone().unwrap_or(Command::Apply) {
		Command::Plan { json } => {
			let catalog = ProvisionPlan::default().catalog;
			match plan::print(&catalog, json) {
				Ok(()) => ExitCode::SUCCESS,
				Err(e) => {
					eprintln!("Error: {e:#}");
					ExitCode::FAILURE
				}
			}
		}
		Command::Apply => {
			info!(
				base_url = %config.directus.base_url,
				role = %config.provisioning.role_name,
				"starting provisioning"
			);
			output::banner();

			finish(apply(&config).await, &config)
		}
		Command::Version => ExitCode::SUCCESS,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use warden_directus::{DirectusError, RecordId};
	use warden_provision::{AccessModel, ProvisionError, Tally};

	#[test]
	fn apply_is_the_default_command() {
		let args = Args::try_parse_from(["warden"]).unwrap();
		assert!(args.command.is_none());
	}

	#[test]
	fn flags_become_overrides() {
		let args = Args::try_parse_from([
			"warden",
			"--base-url",
			"https://cms.example.com",
			"--log-level",
			"debug",
			"--json-logs",
			"plan",
			"--json",
		])
		.unwrap();

		let overrides = CliOverrides::try_from(&args).unwrap();
		assert_eq!(overrides.base_url.as_deref(), Some("https://cms.example.com"));
		assert_eq!(overrides.log_level, Some(LogLevel::Debug));
		assert_eq!(overrides.log_format, Some(LogFormat::Json));
		assert!(matches!(args.command, Some(Command::Plan { json: true })));
	}

	#[test]
	fn rejected_login_exits_with_failure() {
		let err = ProvisionError::from_login(DirectusError::AuthenticationFailed {
			status: 401,
			message: None,
		});
		assert!(err.to_string().contains("Check the admin credentials"));

		let code = finish(Err(err.into()), &WardenConfig::default());
		assert_eq!(code, ExitCode::FAILURE);
	}

	#[test]
	fn completed_run_with_failed_permissions_exits_successfully() {
		let report = ProvisionReport {
			access_model: AccessModel::Roles,
			role_id: RecordId::from("role-1"),
			policy_id: None,
			link_warning: None,
			tally: Tally {
				created: 30,
				existing: 3,
				failed: 1,
				total: 34,
			},
		};

		let code = finish(Ok(report), &WardenConfig::default());
		assert_eq!(code, ExitCode::SUCCESS);
	}

	#[test]
	fn unknown_log_level_is_rejected() {
		let args = Args::try_parse_from(["warden", "--log-level", "chatty"]).unwrap();
		assert!(CliOverrides::try_from(&args).is_err());
	}
}

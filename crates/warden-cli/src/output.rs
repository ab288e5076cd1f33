// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Colored terminal output for `warden apply`.

use colored::{ColoredString, Colorize};
use warden_directus::CreateOutcome;
use warden_provision::{AccessModel, ProgressEvent, ProgressHook, ProvisionReport, Tally};

/// Prints every provisioning step to stdout as it happens.
pub struct TerminalReporter;

impl ProgressHook for TerminalReporter {
	fn on_event(&self, event: &ProgressEvent<'_>) {
		if let ProgressEvent::Finished { tally } = event {
			for line in summary_lines(tally) {
				println!("{line}");
			}
			return;
		}
		if let Some(line) = event_line(event) {
			println!("{line}");
		}
	}
}

fn event_line(event: &ProgressEvent<'_>) -> Option<ColoredString> {
	let line = match event {
		ProgressEvent::LoginStarted => "\n🔐 Logging in as admin...".blue(),
		ProgressEvent::LoginSucceeded => "✅ Logged in".green(),
		ProgressEvent::DetectionStarted => "\n🔍 Detecting permission model...".blue(),
		ProgressEvent::AccessModelDetected(AccessModel::Policies) => {
			"✅ Policy-based access control detected (Directus >= 10.10)".green()
		}
		ProgressEvent::AccessModelDetected(AccessModel::Roles) => {
			"✅ Role-based access control detected (Directus < 10.10)".green()
		}
		ProgressEvent::RoleStarted { name } => format!("\n👤 Creating role \"{name}\"...").blue(),
		ProgressEvent::RoleCreated { id } => format!("✅ Role created with ID: {id}").green(),
		ProgressEvent::RoleExists => "⚠️  Role already exists, fetching it...".yellow(),
		ProgressEvent::RoleResolved { id } => format!("✅ Existing role found with ID: {id}").green(),
		ProgressEvent::PolicyStarted { name } => format!("\n📋 Creating policy \"{name}\"...").blue(),
		ProgressEvent::PolicyCreated { id } => format!("✅ Policy created with ID: {id}").green(),
		ProgressEvent::PolicyExists => "⚠️  Policy already exists, fetching it...".yellow(),
		ProgressEvent::PolicyResolved { id } => {
			format!("✅ Existing policy found with ID: {id}").green()
		}
		ProgressEvent::LinkStarted => "🔗 Linking policy to role...".blue(),
		ProgressEvent::LinkSucceeded => "✅ Policy linked to role".green(),
		ProgressEvent::LinkFailed { message } => {
			format!("⚠️  Could not link policy to role: {message}").yellow()
		}
		ProgressEvent::PermissionsStarted => "\n🔧 Configuring permissions...".cyan(),
		ProgressEvent::CollectionStarted { collection } => {
			format!("\n  📦 Collection: {collection}").cyan()
		}
		ProgressEvent::PermissionResolved {
			action, outcome, ..
		} => match outcome {
			CreateOutcome::Created(_) => format!("    ✅ {action} - created").green(),
			CreateOutcome::AlreadyExists => format!("    ℹ️  {action} - already exists").blue(),
			CreateOutcome::Failed(e) => {
				let reason = e.api_message().map(str::to_string).unwrap_or_else(|| e.to_string());
				format!("    ❌ {action} - error: {reason}").red()
			}
		},
		ProgressEvent::Finished { .. } => return None,
	};
	Some(line)
}

fn summary_lines(tally: &Tally) -> Vec<ColoredString> {
	let errors = format!("   ❌ {} errors", tally.failed);
	vec![
		"\n📊 Summary:".cyan(),
		format!("   ✅ {} permissions created", tally.created).green(),
		format!("   ℹ️  {} permissions already existed", tally.existing).blue(),
		if tally.has_failures() {
			errors.red()
		} else {
			errors.green()
		},
		format!("   📈 Total: {} permissions", tally.total).cyan(),
	]
}

pub fn banner() {
	println!("{}", "\n╔═══════════════════════════════════════════════════╗".cyan());
	println!("{}", "║        🚀 Directus access provisioning            ║".cyan());
	println!("{}", "║       (policy / role model auto-detect)           ║".magenta());
	println!("{}", "╚═══════════════════════════════════════════════════╝".cyan());
}

pub fn success(report: &ProvisionReport, base_url: &str, role_name: &str) {
	println!("{}", "\n╔═══════════════════════════════════════════════════╗".green());
	println!("{}", "║              ✅ Provisioning complete!            ║".green());
	println!("{}", "╚═══════════════════════════════════════════════════╝".green());

	for line in next_steps(report.access_model, base_url, role_name) {
		println!("{line}");
	}
}

fn next_steps(access_model: AccessModel, base_url: &str, role_name: &str) -> Vec<ColoredString> {
	let step_four = match access_model {
		AccessModel::Policies => "4. Check the policy and its permissions",
		AccessModel::Roles => "4. Check the permissions directly on the role",
	};

	vec![
		"\n📋 Next steps:".cyan(),
		format!("1. Open Directus: {base_url}").blue(),
		"2. Settings → Access Control → Roles".blue(),
		format!("3. Click on \"{role_name}\"").blue(),
		step_four.blue(),
		"\n💡 Create a test user:".yellow(),
		"   User Directory → Create User".yellow(),
		"   Email: test@example.com".yellow(),
		"   Password: password123".yellow(),
		format!("   Role: {role_name}").yellow(),
		"\n🎯 Try the API:".yellow(),
		"   1. Log in as test@example.com".yellow(),
		"   2. Copy the access_token".yellow(),
		"   3. Call the endpoints with it!\n".yellow(),
	]
}

/// Fatal path: the error, then what to check before retrying. Errors
/// from the provisioner already embed their cause in the message.
pub fn fatal(err: &anyhow::Error, base_url: &str) {
	for line in fatal_lines(err, base_url) {
		eprintln!("{line}");
	}
}

fn fatal_lines(err: &anyhow::Error, base_url: &str) -> Vec<ColoredString> {
	vec![
		format!("\n❌ Fatal error: {err}").red(),
		"\n🔍 Checklist:".yellow(),
		format!("- Directus is running at {base_url}").yellow(),
		"- The admin credentials in the configuration are correct".yellow(),
		"- The application schema has been applied".yellow(),
		"\n💡 Alternative:".yellow(),
		"   Configure the permissions manually in Settings → Access Control".yellow(),
	]
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `warden plan`: the permission table, printed without touching the backend.

use colored::Colorize;
use serde_json::{json, Value};
use warden_provision::{pair_count, CollectionGrants};

pub fn print(catalog: &[CollectionGrants], as_json: bool) -> anyhow::Result<()> {
	if as_json {
		println!("{}", serde_json::to_string_pretty(&to_json(catalog))?);
		return Ok(());
	}

	for line in text_lines(catalog) {
		println!("{line}");
	}
	println!(
		"\n{} {} permissions",
		"Total:".cyan(),
		pair_count(catalog).to_string().bold()
	);
	Ok(())
}

fn text_lines(catalog: &[CollectionGrants]) -> Vec<String> {
	let mut lines = Vec::new();
	for collection in catalog {
		lines.push(format!("\n📦 {}", collection.collection.cyan()));
		for grant in &collection.grants {
			lines.push(format!(
				"  {:<7} permissions={} fields={}",
				grant.action.as_str(),
				grant.filter.to_json(),
				grant.fields.to_vec().join(",")
			));
		}
	}
	lines
}

fn to_json(catalog: &[CollectionGrants]) -> Value {
	let grants: Vec<Value> = catalog
		.iter()
		.flat_map(|c| {
			c.grants.iter().map(move |g| {
				json!({
					"collection": c.collection,
					"action": g.action,
					"permissions": g.filter,
					"fields": g.fields,
				})
			})
		})
		.collect();
	Value::Array(grants)
}

#[cfg(test)]
mod tests {
	use super::*;
	use warden_provision::default_catalog;

	#[test]
	fn text_lists_every_pair() {
		let catalog = default_catalog();
		let lines = text_lines(&catalog);
		let grant_lines = lines.iter().filter(|l| l.contains("permissions=")).count();
		assert_eq!(grant_lines, 34);
		assert!(lines
			.iter()
			.any(|l| l.contains("update") && l.contains("fields=is_read")));
	}

	#[test]
	fn json_carries_filters_and_fields() {
		let value = to_json(&default_catalog());
		let grants = value.as_array().unwrap();
		assert_eq!(grants.len(), 34);

		let notification_update = grants
			.iter()
			.find(|g| g["collection"] == "notifications" && g["action"] == "update")
			.unwrap();
		assert_eq!(
			notification_update["permissions"],
			json!({ "user_id": { "_eq": "$CURRENT_USER" } })
		);
		assert_eq!(notification_update["fields"], json!(["is_read"]));
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Permission filter expressions.
//!
//! Directus evaluates a permission's `permissions` field server-side as a
//! JSON filter rule. [`Filter`] is the closed, recursive form of that rule;
//! it serializes to the exact JSON the `/permissions` endpoint expects:
//!
//! ```
//! use warden_directus::Filter;
//!
//! let rule = Filter::owned_by_current_user("user_created");
//! assert_eq!(
//! 	serde_json::to_value(&rule).unwrap(),
//! 	serde_json::json!({ "user_created": { "_eq": "$CURRENT_USER" } }),
//! );
//! assert_eq!(serde_json::to_value(Filter::Unrestricted).unwrap(), serde_json::json!({}));
//! ```

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
	Eq,
	Neq,
	Lt,
	Lte,
	Gt,
	Gte,
	In,
	Nin,
	Null,
	NNull,
	Contains,
}

impl CompareOp {
	pub fn as_str(&self) -> &'static str {
		match self {
			CompareOp::Eq => "_eq",
			CompareOp::Neq => "_neq",
			CompareOp::Lt => "_lt",
			CompareOp::Lte => "_lte",
			CompareOp::Gt => "_gt",
			CompareOp::Gte => "_gte",
			CompareOp::In => "_in",
			CompareOp::Nin => "_nin",
			CompareOp::Null => "_null",
			CompareOp::NNull => "_nnull",
			CompareOp::Contains => "_contains",
		}
	}
}

/// Right-hand side of a comparison.
///
/// The dynamic variants are placeholders Directus resolves per request
/// against the acting user.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
	CurrentUser,
	CurrentRole,
	CurrentPolicies,
	Now,
	Literal(Value),
}

impl FilterValue {
	fn to_json(&self) -> Value {
		match self {
			FilterValue::CurrentUser => Value::from("$CURRENT_USER"),
			FilterValue::CurrentRole => Value::from("$CURRENT_ROLE"),
			FilterValue::CurrentPolicies => Value::from("$CURRENT_POLICIES"),
			FilterValue::Now => Value::from("$NOW"),
			FilterValue::Literal(v) => v.clone(),
		}
	}
}

macro_rules! literal_from {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for FilterValue {
				fn from(value: $ty) -> Self {
					FilterValue::Literal(value.into())
				}
			}
		)*
	};
}

literal_from!(Value, &str, String, bool, i64, u64, f64);

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
	/// `{}`: the action applies to every record.
	Unrestricted,
	/// `{ field: { op: value } }`. Dotted paths nest through relations.
	Compare {
		field: String,
		op: CompareOp,
		value: FilterValue,
	},
	And(Vec<Filter>),
	Or(Vec<Filter>),
}

impl Filter {
	pub fn compare(field: impl Into<String>, op: CompareOp, value: impl Into<FilterValue>) -> Self {
		Filter::Compare {
			field: field.into(),
			op,
			value: value.into(),
		}
	}

	pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
		Self::compare(field, CompareOp::Eq, value)
	}

	/// Restricts the action to records whose `field` points at the caller.
	pub fn owned_by_current_user(field: impl Into<String>) -> Self {
		Self::eq(field, FilterValue::CurrentUser)
	}

	pub fn and(self, other: Filter) -> Self {
		match self {
			Filter::Unrestricted => other,
			Filter::And(mut rules) => {
				rules.push(other);
				Filter::And(rules)
			}
			rule => Filter::And(vec![rule, other]),
		}
	}

	pub fn is_unrestricted(&self) -> bool {
		matches!(self, Filter::Unrestricted)
	}

	/// True when any comparison in the tree references the acting user.
	pub fn references_current_user(&self) -> bool {
		match self {
			Filter::Unrestricted => false,
			Filter::Compare { value, .. } => *value == FilterValue::CurrentUser,
			Filter::And(rules) | Filter::Or(rules) => rules.iter().any(Filter::references_current_user),
		}
	}

	pub fn to_json(&self) -> Value {
		match self {
			Filter::Unrestricted => Value::Object(Map::new()),
			Filter::Compare { field, op, value } => {
				let mut node = Value::Object(Map::from_iter([(op.as_str().to_string(), value.to_json())]));
				for segment in field.rsplit('.') {
					node = Value::Object(Map::from_iter([(segment.to_string(), node)]));
				}
				node
			}
			Filter::And(rules) => logical("_and", rules),
			Filter::Or(rules) => logical("_or", rules),
		}
	}
}

fn logical(key: &str, rules: &[Filter]) -> Value {
	let rules = rules.iter().map(Filter::to_json).collect();
	Value::Object(Map::from_iter([(key.to_string(), Value::Array(rules))]))
}

impl Default for Filter {
	fn default() -> Self {
		Filter::Unrestricted
	}
}

impl Serialize for Filter {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		self.to_json().serialize(serializer)
	}
}

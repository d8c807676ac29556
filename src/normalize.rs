use regex::Regex;
use serde_json::{Map, Value};

use std::sync::LazyLock;

use crate::{error::ValidationError, models::EmailRecord};

pub const REQUIRED_FIELDS: [&str; 6] = ["to", "to_name", "from", "from_name", "subject", "body"];

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("<[^<]+?>").expect("tag pattern is a valid regex"));

/// Checks that every required field is present. `null` counts as absent.
pub fn validate(raw: &Map<String, Value>) -> Result<(), ValidationError> {
    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| raw.get(**field).is_none_or(Value::is_null))
        .map(ToString::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    let not_strings: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !raw.get(**field).is_some_and(Value::is_string))
        .map(ToString::to_string)
        .collect();
    if !not_strings.is_empty() {
        return Err(ValidationError::NotAString(not_strings));
    }

    Ok(())
}

/// Strips tags from the body and renames `to`/`from` into the record shape.
pub fn transform(mut raw: Map<String, Value>) -> EmailRecord {
    let mut take = |key: &str| match raw.remove(key) {
        Some(Value::String(s)) => s,
        _ => String::new(),
    };

    let body = take("body");
    EmailRecord {
        to_email: take("to"),
        to_name: take("to_name"),
        from_email: take("from"),
        from_name: take("from_name"),
        subject: take("subject"),
        body: strip_tags(&body),
    }
}

pub fn strip_tags(body: &str) -> String {
    TAG.replace_all(body, "").into_owned()
}

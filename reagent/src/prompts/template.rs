//! `{{variable}}` substitution.
//!
//! Variable names are ASCII word characters. A placeholder whose variable is not
//! supplied renders as the empty string; text outside placeholders is kept verbatim.

use std::borrow::Borrow;
use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use serde_json::Value;

static VARIABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("placeholder pattern is a valid regex"));

/// Replaces each `{{name}}` with `variables[name]`, or nothing when absent.
pub fn render<K, V>(template: &str, variables: &HashMap<K, V>) -> String
where
    K: Borrow<str> + Eq + Hash,
    V: AsRef<str>,
{
    VARIABLE
        .replace_all(template, |caps: &Captures<'_>| {
            variables
                .get(&caps[1])
                .map(|v| v.as_ref().to_string())
                .unwrap_or_default()
        })
        .into_owned()
}

/// Renders with the fields of a serializable value as variables.
///
/// Strings are inserted as-is, `null` fields count as missing and other values are
/// inserted as JSON text. A value that does not serialize to an object supplies no
/// variables.
pub fn render_value<T: Serialize>(template: &str, context: &T) -> Result<String, serde_json::Error> {
    let variables: HashMap<String, String> = match serde_json::to_value(context)? {
        Value::Object(fields) => fields
            .into_iter()
            .filter_map(|(k, v)| match v {
                Value::Null => None,
                Value::String(s) => Some((k, s)),
                other => Some((k, other.to_string())),
            })
            .collect(),
        _ => HashMap::new(),
    };
    Ok(render(template, &variables))
}

/// Distinct variable names, sorted.
pub fn extract_variables(template: &str) -> BTreeSet<String> {
    VARIABLE
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect()
}

pub fn has_variables(template: &str) -> bool {
    VARIABLE.is_match(template)
}

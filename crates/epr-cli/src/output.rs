//! Terminal rendering of results.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use serde_json_path::JsonPath;

/// Pretty JSON for `value`, or the JSON array of nodes `jsonpath` selects.
pub fn render<T: Serialize>(value: &T, jsonpath: Option<&str>) -> Result<String> {
    let value = serde_json::to_value(value).context("failed to serialize result")?;
    let rendered = match jsonpath {
        None => serde_json::to_string_pretty(&value),
        Some(expr) => {
            let path = JsonPath::parse(expr)
                .with_context(|| format!("invalid JSONPath expression: {expr}"))?;
            let nodes: Vec<&Value> = path.query(&value).all();
            serde_json::to_string_pretty(&nodes)
        }
    };
    rendered.context("failed to render result")
}

//! Response envelope unpacking.
//!
//! A GraphQL response is `{"data": {...}, "errors": [...]}`. A non-empty
//! `errors` array wins over any data that came back alongside it.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::errors::{ClientError, Result};

/// Return `data.<operation>` from `envelope`, or the registry's errors.
pub fn extract_payload(envelope: Value, operation: &str) -> Result<Value> {
    if let Some(errors) = envelope
        .get("errors")
        .and_then(Value::as_array)
        .filter(|errors| !errors.is_empty())
    {
        let messages: Vec<String> = errors.iter().map(error_message).collect();
        warn!(operation, errors = messages.len(), "registry returned GraphQL errors");
        return Err(ClientError::Remote {
            operation: operation.to_string(),
            messages,
        });
    }

    let Value::Object(mut root) = envelope else {
        return Err(ClientError::UnexpectedPayload {
            operation: operation.to_string(),
            expected: "JSON object envelope",
        });
    };
    match root.remove("data") {
        Some(Value::Object(mut data)) => match data.remove(operation) {
            Some(payload) if !payload.is_null() => Ok(payload),
            _ => Err(ClientError::MissingData {
                operation: operation.to_string(),
            }),
        },
        _ => Err(ClientError::MissingData {
            operation: operation.to_string(),
        }),
    }
}

/// Interpret a mutation payload as the created record's identifier.
pub fn into_id(payload: Value, operation: &str) -> Result<String> {
    match payload {
        Value::String(id) => Ok(id),
        _ => Err(ClientError::UnexpectedPayload {
            operation: operation.to_string(),
            expected: "string identifier",
        }),
    }
}

/// Interpret a search payload as a list of records, in server order.
pub fn into_records<R: DeserializeOwned>(payload: Value, operation: &str) -> Result<Vec<R>> {
    let Value::Array(items) = payload else {
        return Err(ClientError::UnexpectedPayload {
            operation: operation.to_string(),
            expected: "array of records",
        });
    };
    items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item)
                .map_err(|e| ClientError::Decode(format!("{operation}: {e}")))
        })
        .collect()
}

fn error_message(entry: &Value) -> String {
    entry
        .get("message")
        .and_then(Value::as_str)
        .map_or_else(|| entry.to_string(), str::to_string)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

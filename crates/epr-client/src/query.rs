//! GraphQL request documents.
//!
//! Every request carries one variable, `$obj`, holding the record or filter
//! mapping. Documents are built by string formatting; their text must stay
//! byte-stable because the registry logs and caches on it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::operation::{MutationKind, SearchKind};

/// Field selected when the caller requests none.
pub const FALLBACK_FIELD: &str = "id";

/// A GraphQL request body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphQLQuery {
    /// Query or mutation document.
    pub query: String,
    /// Request variables.
    pub variables: Variables,
}

/// The `variables` object of a request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Variables {
    /// Filter or record mapping bound to `$obj`.
    pub obj: Map<String, Value>,
}

/// Build a search query selecting `fields` (or `id` when empty).
pub fn build_search_query<S: AsRef<str>>(
    kind: SearchKind,
    params: Map<String, Value>,
    fields: &[S],
) -> GraphQLQuery {
    let selection = if fields.is_empty() {
        FALLBACK_FIELD.to_string()
    } else {
        fields.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",")
    };
    let query = format!(
        "query ($obj: {input}!) {{{op}({selector}: $obj) {{ {selection} }}}}",
        input = kind.input_type(),
        op = kind.operation(),
        selector = kind.selector(),
    );
    GraphQLQuery {
        query,
        variables: Variables { obj: params },
    }
}

/// Build a create mutation. Mutations select no fields; the registry
/// returns the new identifier directly.
pub fn build_mutation_query(kind: MutationKind, params: Map<String, Value>) -> GraphQLQuery {
    let query = format!(
        "mutation ($obj: {input}!){{{op}({selector}: $obj)}}",
        input = kind.input_type(),
        op = kind.operation(),
        selector = kind.selector(),
    );
    GraphQLQuery {
        query,
        variables: Variables { obj: params },
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

//! # epr-client
//!
//! GraphQL client for the Event Provenance Registry.
//!
//! - **Documents**: [`build_search_query`] / [`build_mutation_query`] over the
//!   closed [`SearchKind`] / [`MutationKind`] operation tables
//! - **Transport**: the [`Transport`] seam and its `reqwest` implementation
//! - **Envelopes**: registry errors are surfaced before any payload is read
//!   ([`envelope`])
//! - **Client**: raw, by-name, and typed record operations ([`Client`])
//! - **Orchestration**: [`create`] and [`search`] runs over a [`Config`],
//!   plus [`plan_create`] / [`plan_search`] for dry runs

#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod create;
pub mod envelope;
pub mod errors;
pub mod operation;
pub mod query;
pub mod search;
pub mod transport;

pub use client::{Client, RegistryRecord};
pub use config::{Config, CreateResults, SearchResults};
pub use create::{create, plan_create};
pub use errors::{ClientError, Result};
pub use operation::{MutationKind, SearchKind};
pub use query::{GraphQLQuery, Variables, build_mutation_query, build_search_query};
pub use search::{plan_search, search};
pub use transport::{ClientConfig, ReqwestTransport, Transport};

//! Registry client.
//!
//! [`Client`] builds documents, hands them to a [`Transport`], and unpacks
//! the response. The untyped [`Client::search`] and [`Client::mutation`]
//! take operation names; the typed methods take records.

use std::borrow::Cow;
use std::sync::Arc;

use epr_core::{Event, EventReceiver, EventReceiverGroup, Projection, Record};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::envelope::{extract_payload, into_id, into_records};
use crate::errors::Result;
use crate::operation::{MutationKind, SearchKind};
use crate::query::{GraphQLQuery, build_mutation_query, build_search_query};
use crate::transport::{ClientConfig, ReqwestTransport, Transport};

/// A record the registry can search for and create.
pub trait RegistryRecord: Record + Clone {
    /// Search operation returning this record.
    const SEARCH: SearchKind;
    /// Mutation creating this record.
    const CREATE: MutationKind;

    /// The record as it should be sent to a create mutation.
    fn prepare_create(&self) -> Cow<'_, Self> {
        Cow::Borrowed(self)
    }
}

impl RegistryRecord for Event {
    const SEARCH: SearchKind = SearchKind::Events;
    const CREATE: MutationKind = MutationKind::CreateEvent;
}

impl RegistryRecord for EventReceiver {
    const SEARCH: SearchKind = SearchKind::EventReceivers;
    const CREATE: MutationKind = MutationKind::CreateEventReceiver;

    /// Attaches a computed fingerprint when none is set and one can be derived.
    fn prepare_create(&self) -> Cow<'_, Self> {
        if !self.fingerprint.is_empty() {
            return Cow::Borrowed(self);
        }
        self.compute_fingerprint().map_or(Cow::Borrowed(self), |fingerprint| {
            Cow::Owned(Self {
                fingerprint,
                ..self.clone()
            })
        })
    }
}

impl RegistryRecord for EventReceiverGroup {
    const SEARCH: SearchKind = SearchKind::EventReceiverGroups;
    const CREATE: MutationKind = MutationKind::CreateEventReceiverGroup;

    /// Attaches a computed fingerprint when none is set and one can be derived.
    fn prepare_create(&self) -> Cow<'_, Self> {
        if !self.fingerprint.is_empty() {
            return Cow::Borrowed(self);
        }
        self.compute_fingerprint().map_or(Cow::Borrowed(self), |fingerprint| {
            Cow::Owned(Self {
                fingerprint,
                ..self.clone()
            })
        })
    }
}

/// Search filter document for `filter`: only its non-empty fields.
pub fn search_query_for<R: RegistryRecord, S: AsRef<str>>(
    filter: &R,
    fields: &[S],
) -> Result<GraphQLQuery> {
    let params = filter.to_params(Projection::NonEmpty)?;
    Ok(build_search_query(R::SEARCH, params, fields))
}

/// Create mutation document for `record`, sent exactly as given.
pub fn create_query_for<R: RegistryRecord>(record: &R) -> Result<GraphQLQuery> {
    let params = record.to_params(Projection::Full)?;
    Ok(build_mutation_query(R::CREATE, params))
}

/// Event Provenance Registry client.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}

impl Client {
    /// Client talking to the registry described by `config`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config)?;
        debug!(endpoint = %transport.endpoint(), "registry client ready");
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Client over a caller-supplied transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send a prepared document and return the raw response envelope.
    pub async fn query(&self, query: &GraphQLQuery) -> Result<Value> {
        self.transport.execute(query).await
    }

    /// Run the search `operation` and return the raw response envelope.
    #[instrument(skip(self, params, fields))]
    pub async fn search<S: AsRef<str> + Sync>(
        &self,
        operation: &str,
        params: Map<String, Value>,
        fields: &[S],
    ) -> Result<Value> {
        let kind: SearchKind = operation.parse()?;
        self.query(&build_search_query(kind, params, fields)).await
    }

    /// Run the create `operation` and return the raw response envelope.
    #[instrument(skip(self, params))]
    pub async fn mutation(&self, operation: &str, params: Map<String, Value>) -> Result<Value> {
        let kind: MutationKind = operation.parse()?;
        self.query(&build_mutation_query(kind, params)).await
    }

    /// Every record matching the non-empty fields of `filter`, in server order.
    pub async fn search_records<R: RegistryRecord + Sync, S: AsRef<str> + Sync>(
        &self,
        filter: &R,
        fields: &[S],
    ) -> Result<Vec<R>> {
        let operation = R::SEARCH.operation();
        let envelope = self.query(&search_query_for(filter, fields)?).await?;
        let records = into_records(extract_payload(envelope, operation)?, operation)?;
        debug!(operation, matches = records.len(), "search complete");
        Ok(records)
    }

    /// Create `record` as given and return the registry-assigned identifier.
    pub async fn create_record<R: RegistryRecord + Sync>(&self, record: &R) -> Result<String> {
        let operation = R::CREATE.operation();
        let envelope = self.query(&create_query_for(record)?).await?;
        let id = into_id(extract_payload(envelope, operation)?, operation)?;
        debug!(operation, %id, "record created");
        Ok(id)
    }

    /// Events matching `filter`.
    pub async fn search_events<S: AsRef<str> + Sync>(
        &self,
        filter: &Event,
        fields: &[S],
    ) -> Result<Vec<Event>> {
        self.search_records(filter, fields).await
    }

    /// Event receivers matching `filter`.
    pub async fn search_event_receivers<S: AsRef<str> + Sync>(
        &self,
        filter: &EventReceiver,
        fields: &[S],
    ) -> Result<Vec<EventReceiver>> {
        self.search_records(filter, fields).await
    }

    /// Event receiver groups matching `filter`.
    pub async fn search_event_receiver_groups<S: AsRef<str> + Sync>(
        &self,
        filter: &EventReceiverGroup,
        fields: &[S],
    ) -> Result<Vec<EventReceiverGroup>> {
        self.search_records(filter, fields).await
    }

    /// Create an event.
    pub async fn create_event(&self, event: &Event) -> Result<String> {
        self.create_record(event).await
    }

    /// Create an event receiver.
    pub async fn create_event_receiver(&self, receiver: &EventReceiver) -> Result<String> {
        self.create_record(receiver).await
    }

    /// Create an event receiver group.
    pub async fn create_event_receiver_group(&self, group: &EventReceiverGroup) -> Result<String> {
        self.create_record(group).await
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

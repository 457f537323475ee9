//! Orchestration input and result bundles.

use epr_core::{Event, EventReceiver, EventReceiverGroup};
use serde::{Deserialize, Serialize};

use crate::operation::SearchKind;

/// Records to create, or filters to search with, plus optional field
/// selections for searches.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Events, in processing order.
    pub events: Vec<Event>,
    /// Event receivers, in processing order.
    pub event_receivers: Vec<EventReceiver>,
    /// Event receiver groups, in processing order.
    pub event_receiver_groups: Vec<EventReceiverGroup>,
    /// Fields requested by event searches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_fields: Option<Vec<String>>,
    /// Fields requested by event receiver searches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_receiver_fields: Option<Vec<String>>,
    /// Fields requested by event receiver group searches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_receiver_group_fields: Option<Vec<String>>,
}

impl Config {
    /// Fields to request for `kind`: the caller's selection, or the
    /// kind's defaults when none (or an empty one) was given.
    pub fn fields_for(&self, kind: SearchKind) -> Vec<String> {
        let chosen = match kind {
            SearchKind::Events => self.event_fields.as_deref(),
            SearchKind::EventReceivers => self.event_receiver_fields.as_deref(),
            SearchKind::EventReceiverGroups => self.event_receiver_group_fields.as_deref(),
        };
        match chosen {
            Some(fields) if !fields.is_empty() => fields.to_vec(),
            _ => kind
                .default_fields()
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// Total number of records across all kinds.
    pub fn len(&self) -> usize {
        self.events.len() + self.event_receivers.len() + self.event_receiver_groups.len()
    }

    /// Whether there is nothing to process.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Identifiers assigned by a create run, in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateResults {
    /// Created event ids.
    pub events: Vec<String>,
    /// Created event receiver ids.
    pub event_receivers: Vec<String>,
    /// Created event receiver group ids.
    pub event_receiver_groups: Vec<String>,
}

/// Most recent match per filter, in input order. `None` marks a filter
/// with no matches.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Matched events.
    pub events: Vec<Option<Event>>,
    /// Matched event receivers.
    pub event_receivers: Vec<Option<EventReceiver>>,
    /// Matched event receiver groups.
    pub event_receiver_groups: Vec<Option<EventReceiverGroup>>,
}

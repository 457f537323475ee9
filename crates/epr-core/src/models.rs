//! Registry records and their serialization modes.
//!
//! Records serialize to a flat JSON field mapping. Server-assigned fields
//! (`id`, `created_at`, `updated_at`) are left out of that mapping while
//! empty, so freshly built records never send blank identifiers.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::errors::{CoreError, Result};
use crate::fingerprint::{FingerprintKind, is_truthy};

/// The three record kinds stored by the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// [`Event`].
    Event,
    /// [`EventReceiver`].
    EventReceiver,
    /// [`EventReceiverGroup`].
    EventReceiverGroup,
}

impl RecordKind {
    /// Singular snake-case name (`event_receiver`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::EventReceiver => "event_receiver",
            Self::EventReceiverGroup => "event_receiver_group",
        }
    }

    /// Plural snake-case name (`event_receivers`).
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Event => "events",
            Self::EventReceiver => "event_receivers",
            Self::EventReceiverGroup => "event_receiver_groups",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a record is turned into a variables payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Projection {
    /// Every field. Used for create mutations.
    #[default]
    Full,
    /// Only truthy fields. Used for search filters, where an all-empty
    /// record projects to `{}` and matches everything.
    NonEmpty,
}

/// A record that can be sent to the registry.
pub trait Record: Serialize + DeserializeOwned {
    /// Which kind of record this is.
    const KIND: RecordKind;

    /// Serialize to a JSON field mapping under `projection`.
    fn to_params(&self, projection: Projection) -> Result<Map<String, Value>> {
        let kind = Self::KIND.as_str();
        let value =
            serde_json::to_value(self).map_err(|source| CoreError::Serialize { kind, source })?;
        let Value::Object(mut map) = value else {
            return Err(CoreError::NotAnObject { kind });
        };
        if projection == Projection::NonEmpty {
            map.retain(|_, v| is_truthy(v));
        }
        Ok(map)
    }
}

/// Registry responses may carry `null` for unset fields; read those as the
/// field's empty value.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ─────────────────────────────────────────────────────────────────────────────
// Event
// ─────────────────────────────────────────────────────────────────────────────

/// An immutable occurrence tied to a receiver.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    /// Server-assigned identifier.
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub id: String,
    /// Event name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Version of the thing the event describes.
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    /// Release identifier.
    #[serde(deserialize_with = "null_as_default")]
    pub release: String,
    /// Platform the event originated on.
    #[serde(deserialize_with = "null_as_default")]
    pub platform_id: String,
    /// Package the event refers to.
    #[serde(deserialize_with = "null_as_default")]
    pub package: String,
    /// Free-form description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Arbitrary event payload.
    #[serde(deserialize_with = "null_as_default")]
    pub payload: Map<String, Value>,
    /// Whether the described operation succeeded.
    #[serde(deserialize_with = "null_as_default")]
    pub success: bool,
    /// Server-assigned creation timestamp.
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub created_at: String,
    /// Receiver this event was delivered to.
    #[serde(deserialize_with = "null_as_default")]
    pub event_receiver_id: String,
    /// Receiver snapshot embedded by the server in search results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_receiver: Option<EventReceiver>,
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.version == other.version
            && self.release == other.release
            && self.platform_id == other.platform_id
            && self.package == other.package
            && self.description == other.description
            && self.payload == other.payload
            && self.success == other.success
            && self.event_receiver_id == other.event_receiver_id
            && self.event_receiver == other.event_receiver
    }
}

impl Record for Event {
    const KIND: RecordKind = RecordKind::Event;
}

// ─────────────────────────────────────────────────────────────────────────────
// EventReceiver
// ─────────────────────────────────────────────────────────────────────────────

/// A typed, versioned definition of an event source and its payload schema.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventReceiver {
    /// Server-assigned identifier.
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub id: String,
    /// Receiver name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Receiver type, e.g. `dev.cdevents.build.finished`.
    #[serde(rename = "type")]
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    /// Receiver version.
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    /// Free-form description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Expected payload schema.
    #[serde(deserialize_with = "null_as_default")]
    pub schema: Map<String, Value>,
    /// Content fingerprint; see [`EventReceiver::compute_fingerprint`].
    #[serde(deserialize_with = "null_as_default")]
    pub fingerprint: String,
    /// Server-assigned creation timestamp.
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub created_at: String,
}

impl EventReceiver {
    /// Fingerprint over type, description, name, and version.
    ///
    /// `None` when any of those is empty.
    pub fn compute_fingerprint(&self) -> Option<String> {
        let fields = Map::from_iter([
            ("type".to_string(), Value::from(self.kind.as_str())),
            ("description".to_string(), Value::from(self.description.as_str())),
            ("name".to_string(), Value::from(self.name.as_str())),
            ("version".to_string(), Value::from(self.version.as_str())),
        ]);
        FingerprintKind::Receiver.compute(&fields)
    }
}

impl PartialEq for EventReceiver {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.version == other.version
            && self.description == other.description
            && self.schema == other.schema
            && self.fingerprint == other.fingerprint
    }
}

impl Record for EventReceiver {
    const KIND: RecordKind = RecordKind::EventReceiver;
}

// ─────────────────────────────────────────────────────────────────────────────
// EventReceiverGroup
// ─────────────────────────────────────────────────────────────────────────────

/// A named, ordered collection of receivers with an enabled flag.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventReceiverGroup {
    /// Server-assigned identifier.
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub id: String,
    /// Group name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Group type.
    #[serde(rename = "type")]
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    /// Group version.
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    /// Free-form description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Whether the group is active.
    #[serde(deserialize_with = "null_as_default")]
    pub enabled: bool,
    /// Member receivers, in the order they were entered.
    #[serde(deserialize_with = "null_as_default")]
    pub event_receiver_ids: Vec<String>,
    /// Server-assigned creation timestamp.
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub created_at: String,
    /// Server-assigned update timestamp.
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub updated_at: String,
    /// Content fingerprint; see [`EventReceiverGroup::compute_fingerprint`].
    #[serde(deserialize_with = "null_as_default")]
    pub fingerprint: String,
}

impl EventReceiverGroup {
    /// Fingerprint over type, description, name, version, enabled, and the
    /// member ids (order-sensitive).
    ///
    /// `None` when any of those is empty or the group is disabled.
    pub fn compute_fingerprint(&self) -> Option<String> {
        let fields = Map::from_iter([
            ("type".to_string(), Value::from(self.kind.as_str())),
            ("description".to_string(), Value::from(self.description.as_str())),
            ("name".to_string(), Value::from(self.name.as_str())),
            ("version".to_string(), Value::from(self.version.as_str())),
            ("enabled".to_string(), Value::Bool(self.enabled)),
            (
                "event_receiver_ids".to_string(),
                Value::from(self.event_receiver_ids.clone()),
            ),
        ]);
        FingerprintKind::Group.compute(&fields)
    }
}

impl PartialEq for EventReceiverGroup {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.version == other.version
            && self.description == other.description
            && self.enabled == other.enabled
            && self.event_receiver_ids == other.event_receiver_ids
            && self.fingerprint == other.fingerprint
    }
}

impl Record for EventReceiverGroup {
    const KIND: RecordKind = RecordKind::EventReceiverGroup;
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

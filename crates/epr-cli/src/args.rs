//! Record arguments for `create` and `search`.
//!
//! Each target maps one command line onto a single-record [`Config`].

use clap::{Args, Subcommand};
use epr_client::Config;
use epr_core::{Event, EventReceiver, EventReceiverGroup};
use serde_json::{Map, Value};

/// What `create` should create.
#[derive(Subcommand, Debug)]
pub enum CreateTarget {
    /// Create an event.
    Event(CreateEventArgs),
    /// Create an event receiver.
    EventReceiver(CreateReceiverArgs),
    /// Create an event receiver group.
    EventReceiverGroup(CreateGroupArgs),
}

impl CreateTarget {
    /// Single-record create config.
    pub fn into_config(self) -> Config {
        match self {
            Self::Event(args) => Config {
                events: vec![args.into()],
                ..Config::default()
            },
            Self::EventReceiver(args) => Config {
                event_receivers: vec![args.into()],
                ..Config::default()
            },
            Self::EventReceiverGroup(args) => Config {
                event_receiver_groups: vec![args.into()],
                ..Config::default()
            },
        }
    }
}

#[derive(Args, Debug)]
pub struct CreateEventArgs {
    /// Event name.
    #[arg(long)]
    name: String,
    /// Version of the thing the event describes.
    #[arg(long)]
    version: String,
    /// Release identifier.
    #[arg(long)]
    release: String,
    /// Platform the event originated on.
    #[arg(long)]
    platform_id: String,
    /// Package the event refers to.
    #[arg(long)]
    package: String,
    /// Free-form description.
    #[arg(long)]
    description: String,
    /// Event payload as a JSON object.
    #[arg(long, value_parser = parse_json_object)]
    payload: Map<String, Value>,
    /// Receiver the event belongs to.
    #[arg(long)]
    event_receiver_id: String,
    /// Mark the event as successful.
    #[arg(long)]
    success: bool,
}

impl From<CreateEventArgs> for Event {
    fn from(args: CreateEventArgs) -> Self {
        Self {
            name: args.name,
            version: args.version,
            release: args.release,
            platform_id: args.platform_id,
            package: args.package,
            description: args.description,
            payload: args.payload,
            success: args.success,
            event_receiver_id: args.event_receiver_id,
            ..Self::default()
        }
    }
}

#[derive(Args, Debug)]
pub struct CreateReceiverArgs {
    /// Receiver name.
    #[arg(long)]
    name: String,
    /// Receiver type.
    #[arg(long = "type")]
    kind: String,
    /// Receiver version.
    #[arg(long)]
    version: String,
    /// Free-form description.
    #[arg(long)]
    description: String,
    /// Payload schema as a JSON object.
    #[arg(long, value_parser = parse_json_object)]
    schema: Map<String, Value>,
}

impl From<CreateReceiverArgs> for EventReceiver {
    fn from(args: CreateReceiverArgs) -> Self {
        Self {
            name: args.name,
            kind: args.kind,
            version: args.version,
            description: args.description,
            schema: args.schema,
            ..Self::default()
        }
    }
}

#[derive(Args, Debug)]
pub struct CreateGroupArgs {
    /// Group name.
    #[arg(long)]
    name: String,
    /// Group type.
    #[arg(long = "type")]
    kind: Option<String>,
    /// Group version.
    #[arg(long)]
    version: String,
    /// Free-form description.
    #[arg(long)]
    description: String,
    /// Member receiver ids (comma separated).
    #[arg(long, value_delimiter = ',', required = true)]
    event_receiver_ids: Vec<String>,
    /// Create the group disabled.
    #[arg(long)]
    disable: bool,
}

impl From<CreateGroupArgs> for EventReceiverGroup {
    fn from(args: CreateGroupArgs) -> Self {
        Self {
            name: args.name,
            kind: args.kind.unwrap_or_default(),
            version: args.version,
            description: args.description,
            enabled: !args.disable,
            event_receiver_ids: clean_list(args.event_receiver_ids),
            ..Self::default()
        }
    }
}

/// What `search` should look for.
#[derive(Subcommand, Debug)]
pub enum SearchTarget {
    /// Search events.
    Event(SearchEventArgs),
    /// Search event receivers.
    EventReceiver(SearchReceiverArgs),
    /// Search event receiver groups.
    EventReceiverGroup(SearchGroupArgs),
}

impl SearchTarget {
    /// Single-filter search config with the requested fields.
    pub fn into_config(self) -> Config {
        match self {
            Self::Event(args) => Config {
                event_fields: args.fields.selection(),
                events: vec![args.into()],
                ..Config::default()
            },
            Self::EventReceiver(args) => Config {
                event_receiver_fields: args.fields.selection(),
                event_receivers: vec![args.into()],
                ..Config::default()
            },
            Self::EventReceiverGroup(args) => Config {
                event_receiver_group_fields: args.fields.selection(),
                event_receiver_groups: vec![args.into()],
                ..Config::default()
            },
        }
    }
}

#[derive(Args, Debug)]
pub struct FieldsArg {
    /// Fields to return (comma separated).
    #[arg(long, value_delimiter = ',')]
    fields: Vec<String>,
}

impl FieldsArg {
    fn selection(&self) -> Option<Vec<String>> {
        let fields = clean_list(self.fields.clone());
        (!fields.is_empty()).then_some(fields)
    }
}

#[derive(Args, Debug)]
pub struct SearchEventArgs {
    /// Event id.
    #[arg(long)]
    id: Option<String>,
    /// Event name.
    #[arg(long)]
    name: Option<String>,
    /// Event version.
    #[arg(long)]
    version: Option<String>,
    /// Release identifier.
    #[arg(long)]
    release: Option<String>,
    /// Platform id.
    #[arg(long)]
    platform_id: Option<String>,
    /// Package.
    #[arg(long)]
    package: Option<String>,
    /// Description.
    #[arg(long)]
    description: Option<String>,
    /// Payload as a JSON object.
    #[arg(long, value_parser = parse_json_object)]
    payload: Option<Map<String, Value>>,
    /// Success (`true` or `false`).
    #[arg(long)]
    success: Option<bool>,
    /// Receiver id.
    #[arg(long)]
    event_receiver_id: Option<String>,
    #[command(flatten)]
    fields: FieldsArg,
}

impl From<SearchEventArgs> for Event {
    fn from(args: SearchEventArgs) -> Self {
        Self {
            id: args.id.unwrap_or_default(),
            name: args.name.unwrap_or_default(),
            version: args.version.unwrap_or_default(),
            release: args.release.unwrap_or_default(),
            platform_id: args.platform_id.unwrap_or_default(),
            package: args.package.unwrap_or_default(),
            description: args.description.unwrap_or_default(),
            payload: args.payload.unwrap_or_default(),
            success: args.success.unwrap_or_default(),
            event_receiver_id: args.event_receiver_id.unwrap_or_default(),
            ..Self::default()
        }
    }
}

#[derive(Args, Debug)]
pub struct SearchReceiverArgs {
    /// Receiver id.
    #[arg(long)]
    id: Option<String>,
    /// Receiver name.
    #[arg(long)]
    name: Option<String>,
    /// Receiver type.
    #[arg(long = "type")]
    kind: Option<String>,
    /// Receiver version.
    #[arg(long)]
    version: Option<String>,
    /// Description.
    #[arg(long)]
    description: Option<String>,
    /// Schema as a JSON object.
    #[arg(long, value_parser = parse_json_object)]
    schema: Option<Map<String, Value>>,
    #[command(flatten)]
    fields: FieldsArg,
}

impl From<SearchReceiverArgs> for EventReceiver {
    fn from(args: SearchReceiverArgs) -> Self {
        Self {
            id: args.id.unwrap_or_default(),
            name: args.name.unwrap_or_default(),
            kind: args.kind.unwrap_or_default(),
            version: args.version.unwrap_or_default(),
            description: args.description.unwrap_or_default(),
            schema: args.schema.unwrap_or_default(),
            ..Self::default()
        }
    }
}

#[derive(Args, Debug)]
pub struct SearchGroupArgs {
    /// Group id.
    #[arg(long)]
    id: Option<String>,
    /// Group name.
    #[arg(long)]
    name: Option<String>,
    /// Group type.
    #[arg(long = "type")]
    kind: Option<String>,
    /// Group version.
    #[arg(long)]
    version: Option<String>,
    /// Description.
    #[arg(long)]
    description: Option<String>,
    /// Member receiver ids (comma separated).
    #[arg(long, value_delimiter = ',')]
    event_receiver_ids: Vec<String>,
    /// Enabled (`true` or `false`).
    #[arg(long)]
    enabled: Option<bool>,
    #[command(flatten)]
    fields: FieldsArg,
}

impl From<SearchGroupArgs> for EventReceiverGroup {
    fn from(args: SearchGroupArgs) -> Self {
        Self {
            id: args.id.unwrap_or_default(),
            name: args.name.unwrap_or_default(),
            kind: args.kind.unwrap_or_default(),
            version: args.version.unwrap_or_default(),
            description: args.description.unwrap_or_default(),
            event_receiver_ids: clean_list(args.event_receiver_ids),
            enabled: args.enabled.unwrap_or_default(),
            ..Self::default()
        }
    }
}

fn parse_json_object(raw: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("expected a JSON object".to_string()),
        Err(e) => Err(format!("invalid JSON: {e}")),
    }
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

//! Operation tables.
//!
//! Each search and mutation kind knows its GraphQL operation name, the
//! input type its variable is declared as, and the argument selector the
//! variable is passed under.

use std::fmt;
use std::str::FromStr;

use epr_core::RecordKind;

use crate::errors::ClientError;

/// Registry search operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchKind {
    /// `events`
    Events,
    /// `event_receivers`
    EventReceivers,
    /// `event_receiver_groups`
    EventReceiverGroups,
}

impl SearchKind {
    /// Every search kind, in processing order.
    pub const ALL: [Self; 3] = [Self::Events, Self::EventReceivers, Self::EventReceiverGroups];

    /// GraphQL operation name.
    pub const fn operation(self) -> &'static str {
        self.record_kind().plural()
    }

    /// GraphQL input type of the `$obj` variable.
    pub const fn input_type(self) -> &'static str {
        match self {
            Self::Events => "FindEventInput",
            Self::EventReceivers => "FindEventReceiverInput",
            Self::EventReceiverGroups => "FindEventReceiverGroupInput",
        }
    }

    /// Argument name the variable is bound to.
    pub const fn selector(self) -> &'static str {
        self.record_kind().as_str()
    }

    /// Record kind returned by this search.
    pub const fn record_kind(self) -> RecordKind {
        match self {
            Self::Events => RecordKind::Event,
            Self::EventReceivers => RecordKind::EventReceiver,
            Self::EventReceiverGroups => RecordKind::EventReceiverGroup,
        }
    }

    /// Fields requested when the caller does not choose any.
    pub const fn default_fields(self) -> &'static [&'static str] {
        match self {
            Self::Events => &[
                "id",
                "name",
                "version",
                "release",
                "platform_id",
                "package",
                "description",
                "success",
                "event_receiver_id",
            ],
            Self::EventReceivers => &[
                "id",
                "name",
                "type",
                "version",
                "description",
                "schema",
                "fingerprint",
                "created_at",
            ],
            Self::EventReceiverGroups => &[
                "id",
                "name",
                "type",
                "version",
                "description",
                "enabled",
                "created_at",
            ],
        }
    }
}

impl FromStr for SearchKind {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.operation() == s)
            .ok_or_else(|| ClientError::UnknownOperation(s.to_string()))
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operation())
    }
}

/// Registry create mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// `create_event`
    CreateEvent,
    /// `create_event_receiver`
    CreateEventReceiver,
    /// `create_event_receiver_group`
    CreateEventReceiverGroup,
}

impl MutationKind {
    /// Every mutation kind, in processing order.
    pub const ALL: [Self; 3] = [
        Self::CreateEvent,
        Self::CreateEventReceiver,
        Self::CreateEventReceiverGroup,
    ];

    /// GraphQL operation name.
    pub const fn operation(self) -> &'static str {
        match self {
            Self::CreateEvent => "create_event",
            Self::CreateEventReceiver => "create_event_receiver",
            Self::CreateEventReceiverGroup => "create_event_receiver_group",
        }
    }

    /// GraphQL input type of the `$obj` variable.
    pub const fn input_type(self) -> &'static str {
        match self {
            Self::CreateEvent => "CreateEventInput",
            Self::CreateEventReceiver => "CreateEventReceiverInput",
            Self::CreateEventReceiverGroup => "CreateEventReceiverGroupInput",
        }
    }

    /// Argument name the variable is bound to.
    pub const fn selector(self) -> &'static str {
        self.record_kind().as_str()
    }

    /// Record kind created by this mutation.
    pub const fn record_kind(self) -> RecordKind {
        match self {
            Self::CreateEvent => RecordKind::Event,
            Self::CreateEventReceiver => RecordKind::EventReceiver,
            Self::CreateEventReceiverGroup => RecordKind::EventReceiverGroup,
        }
    }
}

impl FromStr for MutationKind {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.operation() == s)
            .ok_or_else(|| ClientError::UnknownOperation(s.to_string()))
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operation())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn search_names_round_trip() {
        for kind in SearchKind::ALL {
            assert_eq!(kind.operation().parse::<SearchKind>().unwrap(), kind);
        }
    }

    #[test]
    fn mutation_names_round_trip() {
        for kind in MutationKind::ALL {
            assert_eq!(kind.operation().parse::<MutationKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_search_is_rejected() {
        let err = "widgets".parse::<SearchKind>().unwrap_err();
        assert_matches!(err, ClientError::UnknownOperation(ref name) if name == "widgets");
    }

    #[test]
    fn mutation_name_is_not_a_search() {
        assert!("create_event".parse::<SearchKind>().is_err());
        assert!("events".parse::<MutationKind>().is_err());
    }

    #[test]
    fn selectors_are_singular() {
        assert_eq!(SearchKind::EventReceiverGroups.selector(), "event_receiver_group");
        assert_eq!(MutationKind::CreateEventReceiver.selector(), "event_receiver");
    }

    #[test]
    fn default_fields_start_with_id() {
        for kind in SearchKind::ALL {
            assert_eq!(kind.default_fields().first(), Some(&"id"));
        }
        assert!(SearchKind::EventReceivers.default_fields().contains(&"fingerprint"));
        assert!(SearchKind::EventReceiverGroups.default_fields().contains(&"enabled"));
    }
}

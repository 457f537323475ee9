//! Search orchestration.
//!
//! Each filter is sent as its non-empty fields. When several records match,
//! the last one the registry returns is kept; a filter with no matches
//! leaves `None` in its slot.

use tracing::{debug, info};

use crate::client::{Client, RegistryRecord, search_query_for};
use crate::config::{Config, SearchResults};
use crate::errors::Result;
use crate::operation::SearchKind;
use crate::query::GraphQLQuery;

/// Run every filter in `config` and keep the most recent match for each.
pub async fn search(client: &Client, config: &Config) -> Result<SearchResults> {
    info!(filters = config.len(), "starting search run");
    let results = SearchResults {
        events: search_all(
            client,
            &config.events,
            &config.fields_for(SearchKind::Events),
        )
        .await?,
        event_receivers: search_all(
            client,
            &config.event_receivers,
            &config.fields_for(SearchKind::EventReceivers),
        )
        .await?,
        event_receiver_groups: search_all(
            client,
            &config.event_receiver_groups,
            &config.fields_for(SearchKind::EventReceiverGroups),
        )
        .await?,
    };
    info!("search run complete");
    Ok(results)
}

/// The search documents [`search`] would send, in send order.
pub fn plan_search(config: &Config) -> Result<Vec<GraphQLQuery>> {
    let mut plan = Vec::with_capacity(config.len());
    plan_all(&config.events, &config.fields_for(SearchKind::Events), &mut plan)?;
    plan_all(
        &config.event_receivers,
        &config.fields_for(SearchKind::EventReceivers),
        &mut plan,
    )?;
    plan_all(
        &config.event_receiver_groups,
        &config.fields_for(SearchKind::EventReceiverGroups),
        &mut plan,
    )?;
    Ok(plan)
}

async fn search_all<R: RegistryRecord + Sync>(
    client: &Client,
    filters: &[R],
    fields: &[String],
) -> Result<Vec<Option<R>>> {
    let mut found = Vec::with_capacity(filters.len());
    for (index, filter) in filters.iter().enumerate() {
        info!(kind = %R::KIND, index, "searching");
        let mut matches = client.search_records(filter, fields).await?;
        debug!(kind = %R::KIND, index, matches = matches.len(), "keeping most recent match");
        found.push(matches.pop());
    }
    Ok(found)
}

fn plan_all<R: RegistryRecord>(
    filters: &[R],
    fields: &[String],
    plan: &mut Vec<GraphQLQuery>,
) -> Result<()> {
    for filter in filters {
        plan.push(search_query_for(filter, fields)?);
    }
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use epr_core::{Event, EventReceiver, EventReceiverGroup};
    use serde_json::{Map, Value, json};

    use super::*;
    use crate::transport::Transport;

    /// Returns queued envelopes in order.
    struct QueueTransport {
        responses: Mutex<Vec<Value>>,
        sent: Mutex<Vec<GraphQLQuery>>,
    }

    impl QueueTransport {
        fn new(mut responses: Vec<Value>) -> Arc<Self> {
            responses.reverse();
            Arc::new(Self {
                responses: Mutex::new(responses),
                sent: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Transport for QueueTransport {
        async fn execute(&self, query: &GraphQLQuery) -> crate::errors::Result<Value> {
            self.sent.lock().unwrap().push(query.clone());
            Ok(self.responses.lock().unwrap().pop().unwrap_or(Value::Null))
        }
    }

    #[tokio::test]
    async fn keeps_last_match() {
        let transport = QueueTransport::new(vec![json!({"data": {"events": [
            {"id": "A", "name": "e"},
            {"id": "B", "name": "e"},
            {"id": "C", "name": "e"}
        ]}})]);
        let client = Client::with_transport(transport);
        let config = Config {
            events: vec![Event {
                name: "e".into(),
                ..Event::default()
            }],
            ..Config::default()
        };

        let results = search(&client, &config).await.unwrap();
        assert_eq!(results.events.len(), 1);
        assert_eq!(results.events[0].as_ref().unwrap().id, "C");
    }

    #[tokio::test]
    async fn no_match_keeps_slot_position() {
        let transport = QueueTransport::new(vec![
            json!({"data": {"event_receivers": []}}),
            json!({"data": {"event_receivers": [{"id": "R2", "name": "two", "type": "t"}]}}),
        ]);
        let client = Client::with_transport(transport);
        let config = Config {
            event_receivers: vec![
                EventReceiver {
                    name: "one".into(),
                    ..EventReceiver::default()
                },
                EventReceiver {
                    name: "two".into(),
                    ..EventReceiver::default()
                },
            ],
            ..Config::default()
        };

        let results = search(&client, &config).await.unwrap();
        assert!(results.event_receivers[0].is_none());
        assert_eq!(results.event_receivers[1].as_ref().unwrap().id, "R2");
    }

    #[tokio::test]
    async fn filters_send_only_non_empty_fields() {
        let transport = QueueTransport::new(vec![
            json!({"data": {"event_receiver_groups": []}}),
            json!({"data": {"event_receiver_groups": []}}),
        ]);
        let client = Client::with_transport(transport.clone());
        let config = Config {
            event_receiver_groups: vec![
                EventReceiverGroup::default(),
                EventReceiverGroup {
                    name: "g".into(),
                    enabled: true,
                    ..EventReceiverGroup::default()
                },
            ],
            ..Config::default()
        };

        let _ = search(&client, &config).await.unwrap();
        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent[0].variables.obj, Map::new());
        assert_eq!(
            serde_json::to_value(&sent[1].variables.obj).unwrap(),
            json!({"name": "g", "enabled": true})
        );
    }

    #[tokio::test]
    async fn uses_default_and_overridden_fields() {
        let transport = QueueTransport::new(vec![
            json!({"data": {"events": []}}),
            json!({"data": {"event_receivers": []}}),
        ]);
        let client = Client::with_transport(transport.clone());
        let config = Config {
            events: vec![Event::default()],
            event_receivers: vec![EventReceiver::default()],
            event_receiver_fields: Some(vec!["id".into(), "fingerprint".into()]),
            ..Config::default()
        };

        let _ = search(&client, &config).await.unwrap();
        let sent = transport.sent.lock().unwrap();
        assert_eq!(
            sent[0].query,
            "query ($obj: FindEventInput!) {events(event: $obj) { id,name,version,release,platform_id,package,description,success,event_receiver_id }}"
        );
        assert!(sent[1].query.ends_with("{ id,fingerprint }}"));
    }

    #[tokio::test]
    async fn plan_matches_documents_sent() {
        let transport = QueueTransport::new(vec![
            json!({"data": {"events": []}}),
            json!({"data": {"event_receiver_groups": []}}),
        ]);
        let client = Client::with_transport(transport.clone());
        let config = Config {
            events: vec![Event {
                success: true,
                ..Event::default()
            }],
            event_receiver_groups: vec![EventReceiverGroup::default()],
            ..Config::default()
        };

        let plan = plan_search(&config).unwrap();
        let _ = search(&client, &config).await.unwrap();
        assert_eq!(plan, *transport.sent.lock().unwrap());
    }
}

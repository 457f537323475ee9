//! Create orchestration.
//!
//! Events are created first, then receivers, then groups, one request per
//! record. The first failure aborts the run.

use tracing::{debug, info};

use crate::client::{Client, RegistryRecord, create_query_for};
use crate::config::{Config, CreateResults};
use crate::errors::Result;
use crate::query::GraphQLQuery;

/// Create every record in `config` and collect the assigned identifiers.
pub async fn create(client: &Client, config: &Config) -> Result<CreateResults> {
    info!(records = config.len(), "starting create run");
    let results = CreateResults {
        events: create_all(client, &config.events).await?,
        event_receivers: create_all(client, &config.event_receivers).await?,
        event_receiver_groups: create_all(client, &config.event_receiver_groups).await?,
    };
    info!("create run complete");
    Ok(results)
}

/// The mutation documents [`create`] would send, in send order.
pub fn plan_create(config: &Config) -> Result<Vec<GraphQLQuery>> {
    let mut plan = Vec::with_capacity(config.len());
    plan_all(&config.events, &mut plan)?;
    plan_all(&config.event_receivers, &mut plan)?;
    plan_all(&config.event_receiver_groups, &mut plan)?;
    Ok(plan)
}

async fn create_all<R: RegistryRecord + Sync>(
    client: &Client,
    records: &[R],
) -> Result<Vec<String>> {
    let mut ids = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let record = record.prepare_create();
        info!(kind = %R::KIND, index, "creating record");
        let id = client.create_record(&*record).await?;
        debug!(kind = %R::KIND, index, %id, "record created");
        ids.push(id);
    }
    Ok(ids)
}

fn plan_all<R: RegistryRecord>(records: &[R], plan: &mut Vec<GraphQLQuery>) -> Result<()> {
    for record in records {
        plan.push(create_query_for(&*record.prepare_create())?);
    }
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use epr_core::{Event, EventReceiver, EventReceiverGroup};
    use serde_json::{Value, json};

    use super::*;
    use crate::errors::ClientError;
    use crate::transport::Transport;

    /// Answers every mutation with a sequential id.
    #[derive(Default)]
    struct CountingTransport {
        sent: Mutex<Vec<GraphQLQuery>>,
        fail_at: Option<usize>,
    }

    #[async_trait]
    impl Transport for CountingTransport {
        async fn execute(&self, query: &GraphQLQuery) -> crate::errors::Result<Value> {
            let mut sent = self.sent.lock().unwrap();
            sent.push(query.clone());
            let n = sent.len();
            if self.fail_at == Some(n) {
                return Ok(json!({"errors": [{"message": "duplicate"}]}));
            }
            let op = query
                .query
                .split('{')
                .nth(1)
                .and_then(|rest| rest.split('(').next())
                .unwrap()
                .to_string();
            Ok(json!({"data": {op: format!("id-{n}")}}))
        }
    }

    fn config() -> Config {
        Config {
            events: vec![Event {
                name: "foo".into(),
                event_receiver_id: "r1".into(),
                ..Event::default()
            }],
            event_receivers: vec![EventReceiver {
                name: "recv".into(),
                kind: "t".into(),
                version: "1.0.0".into(),
                description: "d".into(),
                ..EventReceiver::default()
            }],
            event_receiver_groups: vec![EventReceiverGroup {
                name: "grp".into(),
                kind: "t".into(),
                version: "1.0.0".into(),
                description: "d".into(),
                enabled: true,
                event_receiver_ids: vec!["r1".into()],
                ..EventReceiverGroup::default()
            }],
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn creates_in_kind_order() {
        let transport = Arc::new(CountingTransport::default());
        let client = Client::with_transport(transport.clone());

        let results = create(&client, &config()).await.unwrap();
        assert_eq!(
            results,
            CreateResults {
                events: vec!["id-1".into()],
                event_receivers: vec!["id-2".into()],
                event_receiver_groups: vec!["id-3".into()],
            }
        );

        let sent = transport.sent.lock().unwrap();
        assert!(sent[0].query.contains("create_event(event: $obj)"));
        assert!(sent[1].query.contains("create_event_receiver(event_receiver: $obj)"));
        assert!(sent[2].query.contains("create_event_receiver_group(event_receiver_group: $obj)"));
    }

    #[tokio::test]
    async fn attaches_fingerprints_before_sending() {
        let transport = Arc::new(CountingTransport::default());
        let client = Client::with_transport(transport.clone());
        let config = config();

        let _ = create(&client, &config).await.unwrap();

        let sent = transport.sent.lock().unwrap();
        assert_eq!(
            sent[1].variables.obj["fingerprint"],
            json!(config.event_receivers[0].compute_fingerprint().unwrap())
        );
        assert_eq!(
            sent[2].variables.obj["fingerprint"],
            json!(config.event_receiver_groups[0].compute_fingerprint().unwrap())
        );
    }

    #[tokio::test]
    async fn uncomputable_fingerprint_is_left_empty() {
        let transport = Arc::new(CountingTransport::default());
        let client = Client::with_transport(transport.clone());
        let mut config = config();
        config.event_receiver_groups[0].enabled = false;

        let _ = create(&client, &config).await.unwrap();
        assert_eq!(transport.sent.lock().unwrap()[2].variables.obj["fingerprint"], json!(""));
    }

    #[tokio::test]
    async fn first_failure_aborts_run() {
        let transport = Arc::new(CountingTransport {
            fail_at: Some(2),
            ..CountingTransport::default()
        });
        let client = Client::with_transport(transport.clone());

        let err = create(&client, &config()).await.unwrap_err();
        assert_matches!(err, ClientError::Remote { ref operation, .. } if operation == "create_event_receiver");
        assert_eq!(transport.sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn plan_matches_documents_sent() {
        let transport = Arc::new(CountingTransport::default());
        let client = Client::with_transport(transport.clone());
        let config = config();

        let plan = plan_create(&config).unwrap();
        let _ = create(&client, &config).await.unwrap();
        assert_eq!(plan, *transport.sent.lock().unwrap());
    }

    #[test]
    fn empty_config_plans_nothing() {
        assert!(plan_create(&Config::default()).unwrap().is_empty());
    }
}

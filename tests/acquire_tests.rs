//! Acquisition cycle against a scripted in-memory client

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use pokecatalog::acquire::{acquire_catalog, load_action, AcquireOptions, FanOutPolicy};
use pokecatalog::action::Action;
use pokecatalog::client::{decode_detail, CatalogClient, RawDetailRecord, Summary, SummaryPage};
use pokecatalog::error::CatalogError;
use pokecatalog::reducer::reducer;
use pokecatalog::state::AppState;
use pretty_assertions::assert_eq;
use serde_json::json;

/// Serves `names` as the listing. Detail lookups can be delayed, failed,
/// answered with a record missing its stats, or with stats of the wrong shape.
#[derive(Default)]
struct ScriptedClient {
    names: Vec<String>,
    delays_ms: HashMap<String, u64>,
    failing: HashSet<String>,
    malformed: HashSet<String>,
    wrong_shape: HashSet<String>,
    detail_calls: AtomicUsize,
}

impl ScriptedClient {
    fn with_names(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|name| name.to_string()).collect(),
            ..Self::default()
        }
    }

    fn delay(mut self, name: &str, ms: u64) -> Self {
        self.delays_ms.insert(name.to_string(), ms);
        self
    }

    fn failing(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    fn malformed(mut self, name: &str) -> Self {
        self.malformed.insert(name.to_string());
        self
    }

    fn wrong_shape(mut self, name: &str) -> Self {
        self.wrong_shape.insert(name.to_string());
        self
    }

    fn record(&self, name: &str) -> Result<RawDetailRecord, CatalogError> {
        let id = self
            .names
            .iter()
            .position(|candidate| candidate == name)
            .map(|idx| idx as u32 + 1)
            .unwrap_or(0);
        let mut value = json!({
            "id": id,
            "name": name,
            "height": 7,
            "weight": 69,
            "sprites": {
                "front_default": format!("https://img/front/{id}.png"),
                "other": { "official-artwork": { "front_default": null } }
            },
            "types": [ { "slot": 1, "type": { "name": "normal", "url": "" } } ],
            "stats": [
                { "base_stat": 50, "stat": { "name": "hp" } },
                { "base_stat": 60, "stat": { "name": "attack" } }
            ]
        });
        if self.malformed.contains(name) {
            value["stats"] = serde_json::Value::Null;
        }
        if self.wrong_shape.contains(name) {
            value["stats"] = json!({ "hp": 45 });
        }
        decode_detail(name, value)
    }
}

#[async_trait]
impl CatalogClient for ScriptedClient {
    async fn list_summaries(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<SummaryPage, CatalogError> {
        Ok(SummaryPage {
            count: self.names.len(),
            results: self
                .names
                .iter()
                .skip(offset)
                .take(limit)
                .map(Summary::named)
                .collect(),
        })
    }

    async fn get_detail(&self, name: &str) -> Result<RawDetailRecord, CatalogError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(ms) = self.delays_ms.get(name) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
        if self.failing.contains(name) {
            return Err(CatalogError::Transport(format!("{name}: connection reset")));
        }
        self.record(name)
    }
}

fn names(acquired: &[pokecatalog::entity::Entity]) -> Vec<&str> {
    acquired.iter().map(|entity| entity.name.as_str()).collect()
}

#[tokio::test(start_paused = true)]
async fn keeps_listing_order_when_details_complete_in_reverse() {
    let client = ScriptedClient::with_names(&["bulbasaur", "ivysaur", "venusaur"])
        .delay("bulbasaur", 30)
        .delay("ivysaur", 20)
        .delay("venusaur", 10);

    let acquired = acquire_catalog(&client, &AcquireOptions::default())
        .await
        .unwrap();

    assert_eq!(names(&acquired.entities), vec!["Bulbasaur", "Ivysaur", "Venusaur"]);
    assert_eq!(
        acquired.entities.iter().map(|e| e.id).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert!(acquired.failures.is_empty());
}

#[tokio::test]
async fn one_failed_detail_fails_the_cycle() {
    let client =
        ScriptedClient::with_names(&["a", "b", "c", "d", "e"]).failing("c");

    let err = acquire_catalog(&client, &AcquireOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::Transport(_)));
    assert!(err.to_string().contains("connection reset"));
}

#[tokio::test]
async fn malformed_record_fails_the_cycle() {
    let client = ScriptedClient::with_names(&["a", "b", "c"]).malformed("b");

    let err = acquire_catalog(&client, &AcquireOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::MalformedRecord { .. }));
}

#[tokio::test]
async fn partial_policy_keeps_survivors_in_order() {
    let client = ScriptedClient::with_names(&["a", "b", "c", "d"])
        .failing("b")
        .malformed("d");
    let options = AcquireOptions {
        limit: None,
        policy: FanOutPolicy::Partial,
    };

    let acquired = acquire_catalog(&client, &options).await.unwrap();

    assert_eq!(names(&acquired.entities), vec!["A", "C"]);
    assert_eq!(acquired.failures.len(), 2);
}

#[tokio::test]
async fn limit_caps_the_listing() {
    let client = ScriptedClient::with_names(&["a", "b", "c", "d", "e"]);
    let options = AcquireOptions {
        limit: Some(2),
        policy: FanOutPolicy::FailFast,
    };

    let acquired = acquire_catalog(&client, &options).await.unwrap();

    assert_eq!(names(&acquired.entities), vec!["A", "B"]);
    assert_eq!(client.detail_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn empty_catalog_skips_the_fan_out() {
    let client = ScriptedClient::default();

    let acquired = acquire_catalog(&client, &AcquireOptions::default())
        .await
        .unwrap();

    assert!(acquired.entities.is_empty());
    assert_eq!(client.detail_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn wrong_shape_detail_is_malformed_not_transport() {
    let client = ScriptedClient::with_names(&["a", "b", "c"]).wrong_shape("b");

    let err = acquire_catalog(&client, &AcquireOptions::default())
        .await
        .unwrap_err();

    assert!(
        matches!(&err, CatalogError::MalformedRecord { name, .. } if name == "b"),
        "{err:?}"
    );
}

#[tokio::test]
async fn wrong_shape_is_reported_as_malformed_under_partial() {
    let client = ScriptedClient::with_names(&["a", "b"]).wrong_shape("b");
    let options = AcquireOptions {
        limit: None,
        policy: FanOutPolicy::Partial,
    };

    let acquired = acquire_catalog(&client, &options).await.unwrap();

    assert_eq!(names(&acquired.entities), vec!["A"]);
    assert!(acquired.failures[0].starts_with("malformed record b"));
}

#[tokio::test]
async fn failed_cycle_leaves_controller_empty_and_idle() {
    let mut state = AppState::default();
    let result = reducer(&mut state, Action::Init);
    assert!(state.loading());
    assert_eq!(result.effects.len(), 1);

    let client =
        ScriptedClient::with_names(&["a", "b", "c", "d", "e"]).failing("d");
    let action = load_action(&client, state.epoch, &AcquireOptions::default()).await;
    assert!(matches!(action, Action::CatalogDidError { .. }));

    reducer(&mut state, action);
    assert!(state.entities().is_empty());
    assert!(!state.loading());
    assert!(state.failed());
}

#[tokio::test]
async fn successful_cycle_publishes_all_entities() {
    let mut state = AppState::default();
    reducer(&mut state, Action::Init);

    let client = ScriptedClient::with_names(&["a", "b", "c"]);
    let action = load_action(&client, state.epoch, &AcquireOptions::default()).await;

    let result = reducer(&mut state, action);
    assert!(result.changed);
    assert_eq!(state.visible_count(), 3);
    assert!(!state.can_load_more());
}

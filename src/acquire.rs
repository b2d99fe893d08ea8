//! One acquisition cycle: count lookup, full listing, detail fan-out

use futures_util::future::{join_all, try_join_all};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::client::{CatalogClient, HttpCatalogClient, Summary};
use crate::config::CatalogConfig;
use crate::entity::Entity;
use crate::error::CatalogError;
use crate::normalize::normalize;

/// What to publish when some detail requests fail.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FanOutPolicy {
    /// Any failure fails the whole cycle.
    #[default]
    FailFast,
    /// Keep what normalized, report the rest.
    Partial,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AcquireOptions {
    pub limit: Option<usize>,
    pub policy: FanOutPolicy,
}

impl From<&CatalogConfig> for AcquireOptions {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            limit: config.limit,
            policy: config.policy,
        }
    }
}

/// A finished cycle. `failures` is always empty under [`FanOutPolicy::FailFast`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Acquired {
    pub entities: Vec<Entity>,
    pub failures: Vec<String>,
}

/// Fetch and normalize the whole catalog.
///
/// The returned entities follow the listing order regardless of the order in
/// which detail requests complete.
pub async fn acquire_catalog<C>(client: &C, options: &AcquireOptions) -> Result<Acquired, CatalogError>
where
    C: CatalogClient + ?Sized,
{
    let head = client.list_summaries(0, 1).await?;
    let total = match options.limit {
        Some(limit) => head.count.min(limit),
        None => head.count,
    };
    tracing::info!(available = head.count, requested = total, "catalog count fetched");
    if total == 0 {
        return Ok(Acquired::default());
    }

    let listing = client.list_summaries(0, total).await?;
    let references = listing.results;
    tracing::debug!(references = references.len(), "catalog listing fetched");

    let acquired = match options.policy {
        FanOutPolicy::FailFast => {
            let entities = try_join_all(
                references
                    .iter()
                    .map(|summary| fetch_entity(client, summary)),
            )
            .await?;
            Acquired {
                entities,
                failures: Vec::new(),
            }
        }
        FanOutPolicy::Partial => {
            let results = join_all(
                references
                    .iter()
                    .map(|summary| fetch_entity(client, summary)),
            )
            .await;
            let mut acquired = Acquired::default();
            for result in results {
                match result {
                    Ok(entity) => acquired.entities.push(entity),
                    Err(err) => acquired.failures.push(err.to_string()),
                }
            }
            acquired
        }
    };

    if !acquired.failures.is_empty() {
        tracing::warn!(
            failed = acquired.failures.len(),
            loaded = acquired.entities.len(),
            "catalog loaded with failures"
        );
    }
    Ok(acquired)
}

/// Run one cycle against `client` and turn the outcome into the action the
/// reducer expects for `epoch`.
pub async fn load_action<C>(client: &C, epoch: u64, options: &AcquireOptions) -> Action
where
    C: CatalogClient + ?Sized,
{
    match acquire_catalog(client, options).await {
        Ok(acquired) => Action::CatalogDidLoad {
            epoch,
            entities: acquired.entities,
            failures: acquired.failures,
        },
        Err(err) => Action::CatalogDidError {
            epoch,
            error: err.to_string(),
        },
    }
}

/// Build the HTTP client from `config` and run one cycle.
pub async fn run_cycle(epoch: u64, config: &CatalogConfig) -> Action {
    match HttpCatalogClient::from_config(config) {
        Ok(client) => load_action(&client, epoch, &AcquireOptions::from(config)).await,
        Err(err) => {
            tracing::warn!(epoch, error = %err, "catalog client unavailable");
            Action::CatalogDidError {
                epoch,
                error: err.to_string(),
            }
        }
    }
}

async fn fetch_entity<C>(client: &C, summary: &Summary) -> Result<Entity, CatalogError>
where
    C: CatalogClient + ?Sized,
{
    let record = client.get_detail(&summary.name).await.map_err(|err| {
        tracing::warn!(name = %summary.name, error = %err, "detail request failed");
        err
    })?;
    normalize(record).map_err(|err| {
        tracing::warn!(name = %summary.name, error = %err, "detail record rejected");
        err
    })
}

//! Read-only access to the remote catalog service

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::CatalogConfig;
use crate::error::CatalogError;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Lightweight listing reference.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Summary {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl Summary {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: String::new(),
        }
    }
}

/// One page of the listing plus the total count available.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SummaryPage {
    pub count: usize,
    pub results: Vec<Summary>,
}

/// Raw detail record as the service sends it.
///
/// Every field is optional here; [`crate::normalize::normalize`] decides which
/// absences are fatal.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct RawDetailRecord {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub sprites: Option<RawSprites>,
    pub types: Option<Vec<RawTypeSlot>>,
    pub height: Option<u32>,
    pub weight: Option<u32>,
    pub stats: Option<Vec<RawStatSlot>>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct RawSprites {
    pub front_default: Option<String>,
    pub other: Option<RawOtherSprites>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct RawOtherSprites {
    #[serde(rename = "official-artwork")]
    pub official_artwork: Option<RawArtwork>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct RawArtwork {
    pub front_default: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RawNamedResource {
    pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RawTypeSlot {
    #[serde(rename = "type")]
    pub type_info: Option<RawNamedResource>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RawStatSlot {
    pub base_stat: Option<u32>,
    pub stat: Option<RawNamedResource>,
}

/// The two operations acquisition depends on.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn list_summaries(&self, offset: usize, limit: usize)
        -> Result<SummaryPage, CatalogError>;

    async fn get_detail(&self, name: &str) -> Result<RawDetailRecord, CatalogError>;
}

/// `reqwest` implementation against a PokeAPI-compatible service.
#[derive(Clone, Debug)]
pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        tracing::debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|err| CatalogError::Transport(format!("{url}: invalid body: {err}")))
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn list_summaries(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<SummaryPage, CatalogError> {
        let url = format!("{}/pokemon?offset={offset}&limit={limit}", self.base_url);
        self.fetch_json(&url).await
    }

    async fn get_detail(&self, name: &str) -> Result<RawDetailRecord, CatalogError> {
        let url = format!("{}/pokemon/{name}", self.base_url);
        let body: serde_json::Value = self.fetch_json(&url).await?;
        decode_detail(name, body)
    }
}

/// Decode a detail body that is valid JSON. A body of the wrong shape is a
/// malformed record, not a transport failure.
pub fn decode_detail(
    name: &str,
    body: serde_json::Value,
) -> Result<RawDetailRecord, CatalogError> {
    RawDetailRecord::deserialize(body)
        .map_err(|err| CatalogError::malformed(name, err.to_string()))
}

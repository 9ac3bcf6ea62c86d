use async_trait::async_trait;
use reqwest::Client;

use super::types::{
    CollectionRequest,
    CollectionResponse,
};
use crate::{
    core::{
        http::{
            http_client,
            post_json,
        },
        CardRecord,
        CubeError,
    },
    settings::SynergySettings,
};

/// Batch lookup of card metadata by name. Partial answers are fine: names the
/// service does not know are simply missing from the result.
#[async_trait]
pub trait CardDatabase: Send + Sync {
    async fn fetch_collection(&self, names: &[String]) -> Result<Vec<CardRecord>, CubeError>;
}

pub struct ScryfallClient {
    client: Client,
    endpoint: String,
    user_agent: String,
}

impl ScryfallClient {
    pub fn new(settings: &SynergySettings) -> Result<Self, CubeError> {
        Ok(Self {
            client: http_client(settings.http_timeout_secs)?,
            endpoint: settings.collection_endpoint.clone(),
            user_agent: settings.user_agent.clone(),
        })
    }
}

#[async_trait]
impl CardDatabase for ScryfallClient {
    async fn fetch_collection(&self, names: &[String]) -> Result<Vec<CardRecord>, CubeError> {
        let request = CollectionRequest::for_names(names);
        let response = post_json(&self.client, &self.endpoint, &self.user_agent, &request).await?;
        let response: CollectionResponse = response.json().await?;

        Ok(response.data.into_iter().map(CardRecord::from).collect())
    }
}

/// Stands in for the card database when running offline; every lookup fails
/// so callers go straight to pool data.
pub struct UnavailableDatabase;

#[async_trait]
impl CardDatabase for UnavailableDatabase {
    async fn fetch_collection(&self, _names: &[String]) -> Result<Vec<CardRecord>, CubeError> {
        Err(CubeError::Custom("card database unavailable (offline mode)".to_string()))
    }
}

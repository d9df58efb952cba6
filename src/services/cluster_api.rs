use crate::models::responses::error_message;
use crate::models::{ClusterResponse, Message, Player, PlayerCluster, PlayerCreated, PlayerQuery};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the clustering API
#[derive(Debug, Error)]
pub enum ClusterApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// The clustering operation the form handler depends on
#[async_trait]
pub trait ClusterApi: Send + Sync {
    /// Ask the server which cluster a player belongs to
    async fn cluster_player(&self, query: &PlayerQuery) -> Result<ClusterResponse, ClusterApiError>;
}

/// Paths of the clustering API, relative to its base URL
#[derive(Debug, Clone)]
pub struct ClusterEndpoints {
    pub cluster_player: String,
    pub cluster_all: String,
    pub players: String,
}

impl Default for ClusterEndpoints {
    fn default() -> Self {
        Self {
            cluster_player: "/cluster-player".to_string(),
            cluster_all: "/cluster-all".to_string(),
            players: "/players".to_string(),
        }
    }
}

/// HTTP client for the player clustering service
///
/// Besides single-player clustering it covers the service's player store
/// (`/players`) and batch clustering (`/cluster-all`).
pub struct HttpClusterApi {
    base_url: String,
    endpoints: ClusterEndpoints,
    client: Client,
}

impl HttpClusterApi {
    /// Create a new client with a request timeout
    pub fn new(
        base_url: String,
        endpoints: ClusterEndpoints,
        timeout: Duration,
    ) -> Result<Self, ClusterApiError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            endpoints,
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Full URL of the single-player clustering endpoint
    pub fn cluster_player_url(&self) -> String {
        self.url(&self.endpoints.cluster_player)
    }

    /// List every stored player
    pub async fn list_players(&self) -> Result<Vec<Player>, ClusterApiError> {
        let url = self.url(&self.endpoints.players);
        tracing::debug!("Listing players from: {}", url);

        let response = self.client.get(&url).send().await?;
        read_json(response).await
    }

    /// Store a player; the server assigns its id
    pub async fn add_player(&self, player: &Player) -> Result<PlayerCreated, ClusterApiError> {
        let url = self.url(&self.endpoints.players);

        let response = self.client.post(&url).json(player).send().await?;
        let created: PlayerCreated = read_json(response).await?;

        tracing::debug!("Added player {}", created.id);
        Ok(created)
    }

    /// Remove a stored player by id
    pub async fn delete_player(&self, player_id: &str) -> Result<Message, ClusterApiError> {
        let url = format!(
            "{}/{}",
            self.url(&self.endpoints.players),
            urlencoding::encode(player_id)
        );

        let response = self.client.delete(&url).send().await?;
        read_json(response).await
    }

    /// Assign a cluster to each player in one request
    pub async fn cluster_all(&self, players: &[Player]) -> Result<Vec<PlayerCluster>, ClusterApiError> {
        let url = self.url(&self.endpoints.cluster_all);

        let response = self.client.post(&url).json(players).send().await?;
        let json: Value = read_json(response).await?;

        if let Some(error) = json.get("error") {
            return Err(ClusterApiError::ApiError(error_message(error.clone())));
        }

        serde_json::from_value(json)
            .map_err(|e| ClusterApiError::InvalidResponse(format!("Failed to parse clusters: {}", e)))
    }

    /// Check that the server answers HTTP at all
    ///
    /// Any status counts as reachable; only transport failures are errors.
    pub async fn ping(&self) -> Result<(), ClusterApiError> {
        let response = self.client.get(&self.base_url).send().await?;
        tracing::trace!("Clustering API answered ping with {}", response.status());
        Ok(())
    }
}

#[async_trait]
impl ClusterApi for HttpClusterApi {
    async fn cluster_player(&self, query: &PlayerQuery) -> Result<ClusterResponse, ClusterApiError> {
        let url = self.cluster_player_url();
        tracing::debug!("Posting player query to: {}", url);

        let response = self.client.post(&url).json(query).send().await?;
        let status = response.status();

        // Failures come back as 400 with an `{error}` body, so the body is
        // parsed whatever the status
        let body = response.text().await?;
        let json: Value = serde_json::from_str(&body).map_err(|e| {
            ClusterApiError::InvalidResponse(format!("Response is not valid JSON ({}): {}", status, e))
        })?;
        let parsed = serde_json::from_value(json).map_err(|e| {
            ClusterApiError::InvalidResponse(format!("Unexpected response shape ({}): {}", status, e))
        })?;

        tracing::debug!("Clustering API answered {}", status);
        Ok(parsed)
    }
}

/// Decode a JSON body, turning non-success statuses into [`ClusterApiError::ApiError`]
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClusterApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|json| json.get("error").cloned())
            .map(error_message)
            .unwrap_or_else(|| format!("status {}", status));
        return Err(ClusterApiError::ApiError(message));
    }

    serde_json::from_str(&body)
        .map_err(|e| ClusterApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
}

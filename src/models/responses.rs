use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::domain::{RecommendedPlayer, Scalar};

/// Reply from `POST /cluster-player`
///
/// The server answers either `{error}` or `{cluster, recommendedPlayers}`.
/// A non-null `error` wins over any other field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawClusterResponse")]
pub enum ClusterResponse {
    Error(String),
    Clustered {
        cluster: Scalar,
        recommended_players: Vec<RecommendedPlayer>,
    },
}

#[derive(Debug, Deserialize)]
struct RawClusterResponse {
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    cluster: Option<Scalar>,
    #[serde(rename = "recommendedPlayers", default)]
    recommended_players: Vec<RecommendedPlayer>,
}

impl TryFrom<RawClusterResponse> for ClusterResponse {
    type Error = String;

    fn try_from(raw: RawClusterResponse) -> Result<Self, String> {
        if let Some(error) = raw.error {
            return Ok(ClusterResponse::Error(error_message(error)));
        }

        let cluster = raw
            .cluster
            .ok_or_else(|| "response has neither `error` nor `cluster`".to_string())?;

        Ok(ClusterResponse::Clustered {
            cluster,
            recommended_players: raw.recommended_players,
        })
    }
}

/// Text of an `error` property, without JSON quoting for plain strings
pub fn error_message(error: Value) -> String {
    match error {
        Value::String(message) => message,
        other => other.to_string(),
    }
}

/// Reply from `POST /players`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerCreated {
    pub id: String,
    pub message: String,
}

/// Plain acknowledgement, e.g. from `DELETE /players/<id>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

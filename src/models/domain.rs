use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::requests::PlayerQuery;

/// A JSON scalar coming back from the clustering API
///
/// The API is loose about types: cluster ids are integers from the model but
/// strings are accepted, player ids are strings or numbers, and dataset rows
/// may carry nulls. Values are rendered the way they print in JSON text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(f64),
    Bool(bool),
    #[default]
    Null,
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            // f64 Display prints 20.0 as "20" and 3.5 as "3.5"
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

/// Similar player returned alongside a predicted cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedPlayer {
    #[serde(default)]
    pub id: Scalar,
    #[serde(default)]
    pub level: Scalar,
    #[serde(default)]
    pub rank: Scalar,
    #[serde(rename = "maxBudgetPerSession", default)]
    pub max_budget_per_session: Scalar,
}

/// Stored player record managed through the `/players` endpoints
///
/// The store keeps whatever a client posted and marshals absent attributes
/// as `null`, so every attribute is optional here. Outgoing clustering
/// requests go through [`Player::to_query`], which only accepts complete
/// records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "desiredServices", default, skip_serializing_if = "Option::is_none")]
    pub desired_services: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<f64>,
    #[serde(rename = "maxBudgetPerSession", default, skip_serializing_if = "Option::is_none")]
    pub max_budget_per_session: Option<f64>,
    #[serde(rename = "travelDistance", default, skip_serializing_if = "Option::is_none")]
    pub travel_distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
}

impl Player {
    /// Record for a player described by a complete query
    pub fn new(id: Option<String>, name: Option<String>, query: PlayerQuery) -> Self {
        Self {
            id,
            name,
            desired_services: Some(query.desired_services),
            level: Some(query.level),
            rank: Some(query.rank),
            max_budget_per_session: Some(query.max_budget_per_session),
            travel_distance: Some(query.travel_distance),
            goals: Some(query.goals),
            languages: Some(query.languages),
        }
    }

    /// Clustering query for this player, if no attribute is missing
    pub fn to_query(&self) -> Option<PlayerQuery> {
        Some(PlayerQuery {
            desired_services: self.desired_services.clone()?,
            level: self.level.clone()?,
            rank: self.rank?,
            max_budget_per_session: self.max_budget_per_session?,
            travel_distance: self.travel_distance?,
            goals: self.goals.clone()?,
            languages: self.languages.clone()?,
        })
    }
}

/// Cluster assignment for one player in a batch clustering run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerCluster {
    pub id: Scalar,
    pub cluster: Scalar,
}

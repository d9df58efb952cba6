use serde::{Deserialize, Serialize};

/// Payload sent to `POST /cluster-player`
///
/// Built fresh from the form on every submission and dropped once the
/// response has been rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerQuery {
    #[serde(rename = "desiredServices")]
    pub desired_services: Vec<String>,
    pub level: String,
    pub rank: f64,
    #[serde(rename = "maxBudgetPerSession")]
    pub max_budget_per_session: f64,
    #[serde(rename = "travelDistance")]
    pub travel_distance: f64,
    pub goals: Vec<String>,
    pub languages: Vec<String>,
}

/// Raw text of the player form, keyed by element id
///
/// Field names follow the element ids of the host page, so a urlencoded
/// submission of that page deserializes straight into this struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormFields {
    #[serde(rename = "desiredServices", default)]
    pub desired_services: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub rank: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub travel: String,
    #[serde(default)]
    pub goals: String,
    #[serde(default)]
    pub languages: String,
}

/// Element ids read from the player form
pub const FIELD_IDS: [&str; 7] = [
    "desiredServices",
    "level",
    "rank",
    "budget",
    "travel",
    "goals",
    "languages",
];

impl FormFields {
    /// Look up a field value by element id
    pub fn value(&self, id: &str) -> Option<&str> {
        let value = match id {
            "desiredServices" => &self.desired_services,
            "level" => &self.level,
            "rank" => &self.rank,
            "budget" => &self.budget,
            "travel" => &self.travel,
            "goals" => &self.goals,
            "languages" => &self.languages,
            _ => return None,
        };
        Some(value.as_str())
    }
}

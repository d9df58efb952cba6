//! Player Cluster Client - form handler for the player clustering API
//!
//! Reads the player form, posts a [`PlayerQuery`] to the clustering service
//! and renders the predicted cluster with its similar players (or the error)
//! into a result element.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{parse_form, FormSource, ResultElement, ResultSink, SubmissionHandler, SubmitEvent, SubmitOutcome};
pub use models::{ClusterResponse, FormFields, PlayerQuery, RecommendedPlayer};
pub use services::{ClusterApi, HttpClusterApi};

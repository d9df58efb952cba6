// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Player, PlayerCluster, RecommendedPlayer, Scalar};
pub use requests::{FormFields, PlayerQuery, FIELD_IDS};
pub use responses::{ClusterResponse, ErrorResponse, HealthResponse, Message, PlayerCreated};

// Service exports
pub mod cluster_api;

pub use cluster_api::{ClusterApi, ClusterApiError, ClusterEndpoints, HttpClusterApi};

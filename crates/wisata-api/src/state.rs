use chrono::{DateTime, Utc};
use std::sync::Arc;

use wisata_core::models::place::PointMethod;
use wisata_retrieval::{NearestPipeline, PlaceDirectory};

/// Shared server state: the immutable place directory plus request defaults.
/// Queries only ever read from it, so a bare Arc is all the locking needed.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<PlaceDirectory>,
    pub pipeline: NearestPipeline,
    pub default_k: usize,
    pub default_method: PointMethod,
    pub boot_time: DateTime<Utc>,
    pub app_version: String,
    pub git_sha: Option<String>,
}

impl AppState {
    pub fn new(
        directory: Arc<PlaceDirectory>,
        default_k: usize,
        default_method: PointMethod,
        app_version: String,
        git_sha: Option<String>,
    ) -> Self {
        let pipeline = NearestPipeline::new(directory.clone());
        Self {
            directory,
            pipeline,
            default_k,
            default_method,
            boot_time: Utc::now(),
            app_version,
            git_sha,
        }
    }
}

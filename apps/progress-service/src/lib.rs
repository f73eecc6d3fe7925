//! LexiQuest progress service.
//!
//! Scores answer submissions with `lexiquest-core` and keeps learner
//! progress, sessions, streaks and rewards in a pluggable [`ProgressStore`].
//! HTTP routing and authentication live in the embedding application.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use config::ServiceConfig;
pub use error::{Result, ServiceError};
pub use services::ProgressService;
pub use store::{MemoryStore, ProgressStore};

/// Install the global tracing subscriber, filtered by `RUST_LOG`
/// (default `info`).
pub fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;
    Ok(())
}

/// Build a service over `store` with configuration from the environment.
pub fn build_from_env<S: ProgressStore>(store: Arc<S>) -> anyhow::Result<ProgressService<S>> {
    Ok(build(store, ServiceConfig::from_env()?))
}

fn build<S: ProgressStore>(store: Arc<S>, config: ServiceConfig) -> ProgressService<S> {
    tracing::info!(
        review_queue_limit = config.review_queue_limit,
        weak_area_threshold = config.weak_area_threshold,
        leaderboard_limit = config.leaderboard_limit,
        "Loaded progress service configuration"
    );
    ProgressService::new(store, config)
}

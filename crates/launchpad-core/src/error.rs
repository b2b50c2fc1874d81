use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchpadError {
    #[error("cannot provision configuration: {0}")]
    Provision(String),

    #[error("{endpoint} not ready after {:.1}s", .elapsed.as_secs_f64())]
    GateTimeout { endpoint: String, elapsed: Duration },

    #[error("{name} unavailable: {reason}")]
    Unavailable { name: String, reason: String },

    #[error("declined")]
    Declined,

    #[error("failed to start service process: {0}")]
    Launch(#[source] std::io::Error),

    #[error("unknown seed target '{0}': expected all, users, beatmaps, queues, or requests")]
    UnknownSeedTarget(String),

    #[error("fixture file not found: {0}")]
    MissingFixture(String),

    #[error("schema not present: run 'launchpad reset' first")]
    SchemaMissing,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Postgres(#[from] postgres::Error),

    #[error(transparent)]
    Redis(#[from] redis::RedisError),
}

pub type Result<T> = std::result::Result<T, LaunchpadError>;

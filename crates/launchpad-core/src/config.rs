//! The persisted configuration record and its resolution.
//!
//! Mode branching (development vs. production topology) happens here and
//! only here: every component downstream of `ConfigRecord` receives a
//! fully-populated record and never inspects the mode again.

use std::path::Path;

use crate::envfile;
use crate::error::Result;
use crate::gate::DependencyEndpoint;
use crate::paths;

// ---------------------------------------------------------------------------
// EnvMode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvMode {
    Dev,
    Prod,
}

impl EnvMode {
    /// Lenient parse: unrecognized values fall back to `Prod`, matching the
    /// service's own default of refusing development shortcuts unless asked.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "dev" | "development" => EnvMode::Dev,
            _ => EnvMode::Prod,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnvMode::Dev => "dev",
            EnvMode::Prod => "prod",
        }
    }
}

impl std::fmt::Display for EnvMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean env values accepted by the original service configuration.
pub fn parse_bool(s: &str) -> bool {
    matches!(s.to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

// ---------------------------------------------------------------------------
// Sub-configurations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

impl PostgresConfig {
    fn defaults(mode: EnvMode) -> Self {
        Self {
            host: match mode {
                EnvMode::Dev => "localhost".to_string(),
                EnvMode::Prod => "postgresql".to_string(),
            },
            port: 5432,
            username: "postgres".to_string(),
            password: "postgres".to_string(),
            database: "graveboards".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub db: u32,
}

impl RedisConfig {
    fn defaults(mode: EnvMode) -> Self {
        Self {
            host: match mode {
                EnvMode::Dev => "localhost".to_string(),
                EnvMode::Prod => "redis".to_string(),
            },
            port: 6379,
            username: String::new(),
            password: String::new(),
            db: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// ConfigRecord
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRecord {
    pub env: EnvMode,
    pub base_url: String,
    pub jwt_secret_key: String,
    pub jwt_algorithm: String,
    pub admin_user_ids: Vec<u64>,
    pub disable_security: bool,
    pub osu_client_id: String,
    pub osu_client_secret: String,
    pub postgresql: PostgresConfig,
    pub redis: RedisConfig,
}

impl ConfigRecord {
    /// A record with every non-secret field set to its mode-appropriate
    /// default. Secrets and identities are left empty for the provisioner
    /// to fill in.
    pub fn defaults(mode: EnvMode) -> Self {
        Self {
            env: mode,
            base_url: "http://localhost:3000".to_string(),
            jwt_secret_key: String::new(),
            jwt_algorithm: "HS256".to_string(),
            admin_user_ids: Vec::new(),
            disable_security: false,
            osu_client_id: String::new(),
            osu_client_secret: String::new(),
            postgresql: PostgresConfig::defaults(mode),
            redis: RedisConfig::defaults(mode),
        }
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    pub fn load(root: &Path) -> Result<Self> {
        let pairs = envfile::load(&paths::env_file_path(root))?;
        Ok(Self::from_pairs(&pairs))
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        envfile::save(&paths::env_file_path(root), &self.to_pairs())
    }

    pub fn exists(root: &Path) -> bool {
        paths::env_file_path(root).exists()
    }

    /// Build a record from parsed env pairs. Missing or unparsable values
    /// fall back to mode defaults, mirroring the service's own lenient
    /// getenv handling.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mode = envfile::get(pairs, "ENV")
            .map(EnvMode::parse)
            .unwrap_or(EnvMode::Prod);
        let mut record = Self::defaults(mode);

        let get = |key: &str| envfile::get(pairs, key).map(str::to_string);
        if let Some(v) = get("BASE_URL") {
            record.base_url = v;
        }
        if let Some(v) = get("JWT_SECRET_KEY") {
            record.jwt_secret_key = v;
        }
        if let Some(v) = get("JWT_ALGORITHM") {
            record.jwt_algorithm = v;
        }
        if let Some(v) = get("ADMIN_USER_IDS") {
            record.admin_user_ids = parse_user_ids(&v);
        }
        if let Some(v) = get("DISABLE_SECURITY") {
            record.disable_security = parse_bool(&v);
        }
        if let Some(v) = get("OSU_CLIENT_ID") {
            record.osu_client_id = v;
        }
        if let Some(v) = get("OSU_CLIENT_SECRET") {
            record.osu_client_secret = v;
        }

        if let Some(v) = get("POSTGRESQL_HOST") {
            record.postgresql.host = v;
        }
        if let Some(v) = get("POSTGRESQL_PORT").and_then(|v| v.parse().ok()) {
            record.postgresql.port = v;
        }
        if let Some(v) = get("POSTGRESQL_USERNAME") {
            record.postgresql.username = v;
        }
        if let Some(v) = get("POSTGRESQL_PASSWORD") {
            record.postgresql.password = v;
        }
        if let Some(v) = get("POSTGRESQL_DATABASE") {
            record.postgresql.database = v;
        }

        if let Some(v) = get("REDIS_HOST") {
            record.redis.host = v;
        }
        if let Some(v) = get("REDIS_PORT").and_then(|v| v.parse().ok()) {
            record.redis.port = v;
        }
        if let Some(v) = get("REDIS_USERNAME") {
            record.redis.username = v;
        }
        if let Some(v) = get("REDIS_PASSWORD") {
            record.redis.password = v;
        }
        if let Some(v) = get("REDIS_DB").and_then(|v| v.parse().ok()) {
            record.redis.db = v;
        }

        record
    }

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let p = |k: &str, v: String| (k.to_string(), v);
        vec![
            p("ENV", self.env.to_string()),
            p("BASE_URL", self.base_url.clone()),
            p("JWT_SECRET_KEY", self.jwt_secret_key.clone()),
            p("JWT_ALGORITHM", self.jwt_algorithm.clone()),
            p("ADMIN_USER_IDS", render_user_ids(&self.admin_user_ids)),
            p("DISABLE_SECURITY", self.disable_security.to_string()),
            p("OSU_CLIENT_ID", self.osu_client_id.clone()),
            p("OSU_CLIENT_SECRET", self.osu_client_secret.clone()),
            p("POSTGRESQL_HOST", self.postgresql.host.clone()),
            p("POSTGRESQL_PORT", self.postgresql.port.to_string()),
            p("POSTGRESQL_USERNAME", self.postgresql.username.clone()),
            p("POSTGRESQL_PASSWORD", self.postgresql.password.clone()),
            p("POSTGRESQL_DATABASE", self.postgresql.database.clone()),
            p("REDIS_HOST", self.redis.host.clone()),
            p("REDIS_PORT", self.redis.port.to_string()),
            p("REDIS_USERNAME", self.redis.username.clone()),
            p("REDIS_PASSWORD", self.redis.password.clone()),
            p("REDIS_DB", self.redis.db.to_string()),
        ]
    }

    // -----------------------------------------------------------------------
    // Resolution
    // -----------------------------------------------------------------------

    /// Overlay process environment variables over the record. Only the
    /// startup-surface keys participate; everything else comes from the
    /// persisted record.
    pub fn overlay(&mut self, vars: &[(String, String)]) {
        let get = |key: &str| {
            vars.iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };
        if let Some(v) = get("ENV") {
            self.env = EnvMode::parse(v);
        }
        if let Some(v) = get("POSTGRESQL_HOST") {
            self.postgresql.host = v.to_string();
        }
        if let Some(v) = get("POSTGRESQL_PORT").and_then(|v| v.parse().ok()) {
            self.postgresql.port = v;
        }
        if let Some(v) = get("REDIS_HOST") {
            self.redis.host = v.to_string();
        }
        if let Some(v) = get("REDIS_PORT").and_then(|v| v.parse().ok()) {
            self.redis.port = v;
        }
    }

    /// Dependency endpoints in gating order: database first, then cache.
    /// The cache may hold database-backed state, so the database must be
    /// ready before the cache is considered.
    pub fn endpoints(&self) -> Vec<DependencyEndpoint> {
        vec![
            DependencyEndpoint::new(
                "database",
                &self.postgresql.host,
                self.postgresql.port,
            ),
            DependencyEndpoint::new("cache", &self.redis.host, self.redis.port),
        ]
    }

    /// The first-listed administrator, owner of the master queue.
    pub fn primary_admin(&self) -> Option<u64> {
        self.admin_user_ids.first().copied()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_user_ids(s: &str) -> Vec<u64> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .filter_map(|t| t.parse().ok())
        .collect()
}

fn render_user_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

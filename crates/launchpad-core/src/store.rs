//! Storage seam for the lifecycle dispatcher.
//!
//! Lifecycle commands run against `Store` instead of a concrete database so
//! the dispatch, confirmation, and composition logic is testable without a
//! live server. The production implementation is `postgres::PostgresStore`.

use serde::Deserialize;

use crate::config::ConfigRecord;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Fixture row shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UserRow {
    pub id: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BeatmapRow {
    pub id: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BeatmapsetRow {
    pub id: u64,
    pub user_id: u64,
    #[serde(default)]
    pub beatmaps: Vec<BeatmapRow>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct QueueRow {
    pub user_id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RequestRow {
    pub user_id: u64,
    pub queue_id: u64,
    pub beatmapset_id: u64,
    #[serde(default)]
    pub comment: Option<String>,
}

// ---------------------------------------------------------------------------
// Status types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, serde::Serialize)]
pub struct TableCount {
    pub table: String,
    pub rows: i64,
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Managed tables, in the order status reports them.
pub const MANAGED_TABLES: [&str; 5] = ["users", "beatmapsets", "beatmaps", "queues", "requests"];

pub trait Store {
    /// Whether the managed schema objects exist.
    fn schema_present(&mut self) -> Result<bool>;

    /// Row counts for every managed table, in `MANAGED_TABLES` order.
    fn table_counts(&mut self) -> Result<Vec<TableCount>>;

    /// Drop and recreate every managed schema object, then re-insert the
    /// structural baseline (admin role, administrator users and API keys,
    /// master queue) derived from `config`. Runs as one transaction: a
    /// failure leaves the previous state intact, never a half-dropped schema.
    fn recreate_schema(&mut self, config: &ConfigRecord) -> Result<()>;

    /// Discard all cache state.
    fn flush_cache(&mut self) -> Result<()>;

    // Per-row fixture inserts. Each returns false when the row was already
    // present (seeding is idempotent, duplicates are skips).
    fn insert_user(&mut self, row: &UserRow) -> Result<bool>;
    fn insert_beatmapset(&mut self, row: &BeatmapsetRow) -> Result<bool>;
    fn insert_queue(&mut self, row: &QueueRow) -> Result<bool>;
    fn insert_request(&mut self, row: &RequestRow) -> Result<bool>;
}

// ---------------------------------------------------------------------------
// In-memory store for tests
// ---------------------------------------------------------------------------

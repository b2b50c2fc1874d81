//! Lifecycle dispatcher: status, reset, seed, fresh.
//!
//! Each command is a single terminal transaction against a `Store`.
//! Destructive commands pass through one confirmation gate that defaults to
//! declining: empty input, a closed stream, or anything but `y` aborts with
//! zero mutation. `fresh` is pure composition of reset and seed — the final
//! state is indistinguishable from running the two commands back-to-back.

use std::io::{BufRead, Write};
use std::path::Path;

use crate::config::ConfigRecord;
use crate::error::{LaunchpadError, Result};
use crate::seed::{self, SeedReport, SeedTarget};
use crate::store::{Store, TableCount};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, serde::Serialize)]
pub struct StatusReport {
    pub schema_present: bool,
    pub tables: Vec<TableCount>,
    pub seeded: bool,
}

pub fn status(store: &mut dyn Store) -> Result<StatusReport> {
    if !store.schema_present()? {
        return Ok(StatusReport {
            schema_present: false,
            tables: Vec::new(),
            seeded: false,
        });
    }
    let tables = store.table_counts()?;
    // Bootstrap rows land in users/queues; seed presence is judged by the
    // fixture-only tables.
    let seeded = tables
        .iter()
        .any(|t| matches!(t.table.as_str(), "beatmapsets" | "requests") && t.rows > 0);
    Ok(StatusReport {
        schema_present: true,
        tables,
        seeded,
    })
}

// ---------------------------------------------------------------------------
// Confirmation gate
// ---------------------------------------------------------------------------

/// Present `prompt` and require an explicit `y`. Everything else — empty
/// input, `n`, junk, or a closed stream — declines.
pub fn confirm(prompt: &str, input: &mut dyn BufRead, output: &mut dyn Write) -> Result<()> {
    write!(output, "{prompt}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    match line.trim().to_ascii_lowercase().as_str() {
        "y" => Ok(()),
        _ => Err(LaunchpadError::Declined),
    }
}

pub fn reset_prompt() -> String {
    "This drops and recreates the database schema, destroying all data. Continue? [y/N]: "
        .to_string()
}

pub fn fresh_prompt(target: SeedTarget) -> String {
    format!(
        "This drops and recreates the database schema, destroying all data, \
         then seeds '{target}'. Continue? [y/N]: "
    )
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Drop and recreate the managed schema, re-insert the structural baseline,
/// and flush the cache. Confirmation is the caller's responsibility.
pub fn reset(store: &mut dyn Store, config: &ConfigRecord) -> Result<()> {
    store.recreate_schema(config)?;
    store.flush_cache()?;
    Ok(())
}

/// Seed fixtures for `target`. Requires the schema to be present.
pub fn seed(store: &mut dyn Store, root: &Path, target: SeedTarget) -> Result<SeedReport> {
    if !store.schema_present()? {
        return Err(LaunchpadError::SchemaMissing);
    }
    seed::run(store, root, target)
}

/// `reset` followed by `seed`, as one logical operation behind one gate.
pub fn fresh(
    store: &mut dyn Store,
    config: &ConfigRecord,
    root: &Path,
    target: SeedTarget,
) -> Result<SeedReport> {
    reset(store, config)?;
    seed(store, root, target)
}

// ---------------------------------------------------------------------------
// Confirmation-gated wrappers
// ---------------------------------------------------------------------------

pub fn reset_confirmed(
    store: &mut dyn Store,
    config: &ConfigRecord,
    assume_yes: bool,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<()> {
    if !assume_yes {
        confirm(&reset_prompt(), input, output)?;
    }
    reset(store, config)
}

pub fn fresh_confirmed(
    store: &mut dyn Store,
    config: &ConfigRecord,
    root: &Path,
    target: SeedTarget,
    assume_yes: bool,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<SeedReport> {
    if !assume_yes {
        confirm(&fresh_prompt(target), input, output)?;
    }
    fresh(store, config, root, target)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

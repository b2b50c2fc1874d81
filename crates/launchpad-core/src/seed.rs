//! Fixture seeding.
//!
//! CLI-facing targets map to internal seeders carrying a dependency graph:
//! users must exist before beatmapsets and queues, and all three before
//! requests. A seed run resolves the requested targets plus transitive
//! dependencies into topological layers and runs them in order, one row at
//! a time. Rows already present are skips; row failures are collected into
//! the report without aborting the rest of the run.

use std::collections::BTreeSet;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{LaunchpadError, Result};
use crate::paths;
use crate::store::Store;

// ---------------------------------------------------------------------------
// Targets
// ---------------------------------------------------------------------------

/// User-selectable seeding scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedTarget {
    All,
    Users,
    Beatmaps,
    Queues,
    Requests,
}

impl std::str::FromStr for SeedTarget {
    type Err = LaunchpadError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(SeedTarget::All),
            "users" => Ok(SeedTarget::Users),
            "beatmaps" => Ok(SeedTarget::Beatmaps),
            "queues" => Ok(SeedTarget::Queues),
            "requests" => Ok(SeedTarget::Requests),
            _ => Err(LaunchpadError::UnknownSeedTarget(s.to_string())),
        }
    }
}

impl std::fmt::Display for SeedTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SeedTarget::All => "all",
            SeedTarget::Users => "users",
            SeedTarget::Beatmaps => "beatmaps",
            SeedTarget::Queues => "queues",
            SeedTarget::Requests => "requests",
        };
        f.write_str(s)
    }
}

/// Internal seeder identity, one per concrete fixture set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SeederTarget {
    User,
    Beatmap,
    Queue,
    Request,
}

impl SeederTarget {
    pub fn label(&self) -> &'static str {
        match self {
            SeederTarget::User => "users",
            SeederTarget::Beatmap => "beatmaps",
            SeederTarget::Queue => "queues",
            SeederTarget::Request => "requests",
        }
    }

    fn dependencies(&self) -> &'static [SeederTarget] {
        match self {
            SeederTarget::User => &[],
            SeederTarget::Beatmap => &[SeederTarget::User],
            SeederTarget::Queue => &[SeederTarget::User],
            SeederTarget::Request => &[
                SeederTarget::User,
                SeederTarget::Queue,
                SeederTarget::Beatmap,
            ],
        }
    }

    fn from_cli(target: SeedTarget) -> BTreeSet<SeederTarget> {
        match target {
            SeedTarget::All => [
                SeederTarget::User,
                SeederTarget::Beatmap,
                SeederTarget::Queue,
                SeederTarget::Request,
            ]
            .into(),
            SeedTarget::Users => [SeederTarget::User].into(),
            SeedTarget::Beatmaps => [SeederTarget::Beatmap].into(),
            SeedTarget::Queues => [SeederTarget::Queue].into(),
            SeedTarget::Requests => [SeederTarget::Request].into(),
        }
    }
}

/// Resolve a CLI target into execution layers: the requested seeders plus
/// their transitive dependencies, grouped so every seeder runs after all of
/// its dependencies.
pub fn execution_layers(target: SeedTarget) -> Vec<Vec<SeederTarget>> {
    let mut pending = SeederTarget::from_cli(target);
    // Close over dependencies.
    loop {
        let missing: BTreeSet<SeederTarget> = pending
            .iter()
            .flat_map(|t| t.dependencies().iter().copied())
            .filter(|d| !pending.contains(d))
            .collect();
        if missing.is_empty() {
            break;
        }
        pending.extend(missing);
    }

    let mut layers = Vec::new();
    let mut done: BTreeSet<SeederTarget> = BTreeSet::new();
    while !pending.is_empty() {
        let ready: Vec<SeederTarget> = pending
            .iter()
            .copied()
            .filter(|t| t.dependencies().iter().all(|d| done.contains(d)))
            .collect();
        // The static graph is acyclic, so every iteration frees something.
        debug_assert!(!ready.is_empty());
        for t in &ready {
            pending.remove(t);
            done.insert(*t);
        }
        layers.push(ready);
    }
    layers
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, serde::Serialize)]
pub struct TargetReport {
    pub target: &'static str,
    pub inserted: usize,
    pub skipped: usize,
    pub failures: Vec<String>,
}

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct SeedReport {
    pub targets: Vec<TargetReport>,
}

impl SeedReport {
    pub fn inserted(&self) -> usize {
        self.targets.iter().map(|t| t.inserted).sum()
    }

    pub fn skipped(&self) -> usize {
        self.targets.iter().map(|t| t.skipped).sum()
    }

    pub fn has_failures(&self) -> bool {
        self.targets.iter().any(|t| !t.failures.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Seeding run
// ---------------------------------------------------------------------------

/// Seed `target` (plus dependencies) from the fixture files under `root`.
pub fn run(store: &mut dyn Store, root: &Path, target: SeedTarget) -> Result<SeedReport> {
    let mut report = SeedReport::default();
    for layer in execution_layers(target) {
        for seeder in layer {
            report.targets.push(seed_one(store, root, seeder));
        }
    }
    Ok(report)
}

fn seed_one(store: &mut dyn Store, root: &Path, seeder: SeederTarget) -> TargetReport {
    let mut report = TargetReport {
        target: seeder.label(),
        inserted: 0,
        skipped: 0,
        failures: Vec::new(),
    };

    macro_rules! seed_rows {
        ($file:expr, $insert:ident) => {
            match load_fixture(root, $file) {
                Ok(rows) => {
                    for (i, row) in rows.iter().enumerate() {
                        match store.$insert(row) {
                            Ok(true) => report.inserted += 1,
                            Ok(false) => report.skipped += 1,
                            Err(e) => report.failures.push(format!("row {}: {e}", i + 1)),
                        }
                    }
                }
                Err(e) => report.failures.push(e.to_string()),
            }
        };
    }

    match seeder {
        SeederTarget::User => {
            seed_rows!(paths::USERS_FIXTURE, insert_user);
        }
        SeederTarget::Beatmap => {
            seed_rows!(paths::BEATMAPSETS_FIXTURE, insert_beatmapset);
        }
        SeederTarget::Queue => {
            seed_rows!(paths::QUEUES_FIXTURE, insert_queue);
        }
        SeederTarget::Request => {
            seed_rows!(paths::REQUESTS_FIXTURE, insert_request);
        }
    }

    tracing::debug!(
        seeder = report.target,
        inserted = report.inserted,
        skipped = report.skipped,
        failures = report.failures.len(),
        "seeded"
    );
    report
}

fn load_fixture<T: DeserializeOwned>(root: &Path, file: &str) -> Result<Vec<T>> {
    let path = paths::fixture_path(root, file);
    if !path.exists() {
        return Err(LaunchpadError::MissingFixture(path.display().to_string()));
    }
    let content = std::fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&content)?)
}

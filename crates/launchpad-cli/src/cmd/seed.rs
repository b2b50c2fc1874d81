use crate::output::print_json;
use launchpad_core::lifecycle;
use launchpad_core::postgres::PostgresStore;
use launchpad_core::seed::{SeedReport, SeedTarget};
use std::path::Path;

pub fn run(root: &Path, target: &str, json: bool) -> anyhow::Result<()> {
    let target: SeedTarget = target.parse()?;
    let config = super::load_config(root)?;
    let mut store = PostgresStore::connect(&config)?;

    let report = lifecycle::seed(&mut store, root, target)?;
    print_report(&report, json)
}

/// Report the seed run per target, then fail the invocation if any row
/// failed — partial success is never reported as success.
pub(crate) fn print_report(report: &SeedReport, json: bool) -> anyhow::Result<()> {
    if json {
        print_json(report)?;
    } else {
        for t in &report.targets {
            println!(
                "{}: {} inserted, {} skipped{}",
                t.target,
                t.inserted,
                t.skipped,
                if t.failures.is_empty() {
                    String::new()
                } else {
                    format!(", {} failed", t.failures.len())
                }
            );
            for failure in &t.failures {
                println!("  {failure}");
            }
        }
    }

    if report.has_failures() {
        anyhow::bail!("seeding completed with failures");
    }
    Ok(())
}

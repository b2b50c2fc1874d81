use launchpad_core::lifecycle;
use launchpad_core::postgres::PostgresStore;
use launchpad_core::seed::SeedTarget;
use std::path::Path;

pub fn run(root: &Path, target: &str, yes: bool, json: bool) -> anyhow::Result<()> {
    let target: SeedTarget = target.parse()?;
    let config = super::load_config(root)?;
    let mut store = PostgresStore::connect(&config)?;

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    let report =
        lifecycle::fresh_confirmed(&mut store, &config, root, target, yes, &mut input, &mut output)?;

    println!("Database reset — schema recreated, cache flushed.");
    super::seed::print_report(&report, json)
}

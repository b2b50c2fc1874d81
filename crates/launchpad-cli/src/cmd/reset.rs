use launchpad_core::lifecycle;
use launchpad_core::postgres::PostgresStore;
use std::path::Path;

pub fn run(root: &Path, yes: bool) -> anyhow::Result<()> {
    let config = super::load_config(root)?;
    let mut store = PostgresStore::connect(&config)?;

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    lifecycle::reset_confirmed(&mut store, &config, yes, &mut input, &mut output)?;

    println!("Database reset — schema recreated, cache flushed.");
    Ok(())
}

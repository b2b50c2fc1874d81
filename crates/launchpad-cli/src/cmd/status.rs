use crate::output::{print_json, print_table};
use launchpad_core::lifecycle;
use launchpad_core::postgres::PostgresStore;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = super::load_config(root)?;
    let mut store = PostgresStore::connect(&config)?;
    let report = lifecycle::status(&mut store)?;

    if json {
        return print_json(&report);
    }

    if !report.schema_present {
        println!("Schema: missing — run 'launchpad reset' to create it");
        return Ok(());
    }

    println!("Schema: present");
    let rows: Vec<Vec<String>> = report
        .tables
        .iter()
        .map(|t| vec![t.table.clone(), t.rows.to_string()])
        .collect();
    print_table(&["TABLE", "ROWS"], rows);
    println!(
        "Seed data: {}",
        if report.seeded { "present" } else { "none" }
    );
    Ok(())
}

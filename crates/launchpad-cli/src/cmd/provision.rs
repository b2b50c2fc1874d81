use launchpad_core::config::{ConfigRecord, EnvMode};
use launchpad_core::{paths, provision};
use std::path::Path;

pub fn run(root: &Path) -> anyhow::Result<()> {
    if ConfigRecord::exists(root) {
        println!(
            "already provisioned: {}",
            paths::env_file_path(root).display()
        );
        return Ok(());
    }

    let mode = std::env::var("ENV")
        .map(|v| EnvMode::parse(&v))
        .unwrap_or(EnvMode::Dev);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    provision::ensure_configuration(root, mode, &mut input, &mut output)?;
    Ok(())
}

use launchpad_core::config::{parse_bool, EnvMode};
use launchpad_core::{gate, launch, provision};
use std::path::Path;
use std::time::Duration;

/// Provision if needed, gate on the database then the cache, then hand the
/// process over to the service. Returns only on failure.
pub fn run(root: &Path, timeout_secs: u64, quiet: bool, argv: &[String]) -> anyhow::Result<()> {
    let vars: Vec<(String, String)> = std::env::vars().collect();
    let env_var = |key: &str| {
        vars.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };

    // First runs are a development affair: provision with the development
    // topology unless ENV says otherwise.
    let mode = env_var("ENV").map(EnvMode::parse).unwrap_or(EnvMode::Dev);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    let mut record = provision::ensure_configuration(root, mode, &mut input, &mut output)?;
    record.overlay(&vars);

    let quiet = quiet || env_var("QUIET").is_some_and(parse_bool);
    gate::await_ready(
        &record.endpoints(),
        Duration::from_secs(timeout_secs),
        quiet,
        &mut output,
    )?;

    // Never returns on success: the service owns the process from here.
    match launch::exec_main(argv) {
        Ok(never) => match never {},
        Err(e) => Err(e.into()),
    }
}

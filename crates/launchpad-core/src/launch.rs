//! Hand-off to the main service process.
//!
//! On Unix the current process image is replaced, so the service receives
//! OS signals directly and its exit code is the process's exit code — the
//! behavior container orchestration expects for graceful shutdown.
//! Elsewhere the portable fallback spawns, waits, and exits with the
//! child's status. Either way the success path never returns.

use std::convert::Infallible;
use std::process::Command;

use crate::error::{LaunchpadError, Result};

/// Transfer control to `argv`. Returns only when the target failed to start.
pub fn exec_main(argv: &[String]) -> Result<Infallible> {
    let (program, args) = argv.split_first().ok_or_else(|| {
        LaunchpadError::Launch(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "no program given",
        ))
    })?;
    exec(program, args)
}

#[cfg(unix)]
fn exec(program: &str, args: &[String]) -> Result<Infallible> {
    use std::os::unix::process::CommandExt;
    // exec only returns on failure
    let err = Command::new(program).args(args).exec();
    Err(LaunchpadError::Launch(err))
}

#[cfg(not(unix))]
fn exec(program: &str, args: &[String]) -> Result<Infallible> {
    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(LaunchpadError::Launch)?;
    std::process::exit(status.code().unwrap_or(1));
}

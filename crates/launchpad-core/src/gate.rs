//! Readiness gate: block until dependency endpoints accept TCP connections.
//!
//! Endpoints are gated sequentially in declared order. The next endpoint is
//! not probed until the current one is ready; on timeout the gate fails fast
//! and later endpoints are never probed. Deployments fail loudly instead of
//! starting against a half-available dependency set.

use std::io::Write;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use crate::error::{LaunchpadError, Result};

/// Delay between connection attempts against the same endpoint.
pub const POLL_DELAY: Duration = Duration::from_millis(250);

/// Cap on a single connection attempt. The effective per-attempt timeout is
/// clamped to the time remaining in the endpoint's window.
pub const PROBE_TIMEOUT: Duration = Duration::from_millis(500);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEndpoint {
    pub name: String,
    pub host: String,
    pub port: u16,
}

impl DependencyEndpoint {
    pub fn new(name: &str, host: &str, port: u16) -> Self {
        Self {
            name: name.to_string(),
            host: host.to_string(),
            port,
        }
    }
}

impl std::fmt::Display for DependencyEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}:{})", self.name, self.host, self.port)
    }
}

/// Outcome of a single connection probe. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Ready,
    Refused,
    TimedOut,
}

// ---------------------------------------------------------------------------
// Gating
// ---------------------------------------------------------------------------

/// Block until every endpoint accepts a connection, in declared order.
///
/// Each endpoint gets its own `timeout` window. A ready probe is trusted —
/// there is no re-verification once an endpoint has accepted. Progress lines
/// go to `out` unless `quiet`; the failure itself is always the returned
/// error, never suppressed.
pub fn await_ready(
    endpoints: &[DependencyEndpoint],
    timeout: Duration,
    quiet: bool,
    out: &mut dyn Write,
) -> Result<()> {
    for endpoint in endpoints {
        wait_for(endpoint, timeout, quiet, out)?;
    }
    Ok(())
}

fn wait_for(
    endpoint: &DependencyEndpoint,
    timeout: Duration,
    quiet: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let start = Instant::now();
    if !quiet {
        writeln!(out, "waiting for {endpoint} ...")?;
    }

    loop {
        let Some(remaining) = timeout.checked_sub(start.elapsed()) else {
            break;
        };
        // connect_timeout rejects a zero duration
        let attempt = remaining.min(PROBE_TIMEOUT).max(Duration::from_millis(1));

        match probe(endpoint, attempt) {
            ProbeOutcome::Ready => {
                if !quiet {
                    writeln!(
                        out,
                        "{} ready ({:.1}s)",
                        endpoint.name,
                        start.elapsed().as_secs_f64()
                    )?;
                }
                return Ok(());
            }
            outcome => {
                tracing::debug!(endpoint = %endpoint, ?outcome, "probe failed");
            }
        }

        let Some(remaining) = timeout.checked_sub(start.elapsed()) else {
            break;
        };
        std::thread::sleep(remaining.min(POLL_DELAY));
    }

    Err(LaunchpadError::GateTimeout {
        endpoint: endpoint.to_string(),
        elapsed: start.elapsed(),
    })
}

/// One TCP-level connection attempt, bounded by `attempt_timeout`.
///
/// Name resolution happens per attempt: under container orchestration the
/// endpoint's DNS name may not exist until its container is up, so a
/// resolution failure is a retryable refusal, not a fatal error.
pub fn probe(endpoint: &DependencyEndpoint, attempt_timeout: Duration) -> ProbeOutcome {
    let address = match resolve(&endpoint.host, endpoint.port) {
        Ok(address) => address,
        Err(_) => return ProbeOutcome::Refused,
    };
    match TcpStream::connect_timeout(&address, attempt_timeout) {
        Ok(_) => ProbeOutcome::Ready,
        Err(e) if e.kind() == std::io::ErrorKind::TimedOut => ProbeOutcome::TimedOut,
        Err(_) => ProbeOutcome::Refused,
    }
}

fn resolve(host: &str, port: u16) -> std::io::Result<SocketAddr> {
    (host, port).to_socket_addrs()?.next().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::AddrNotAvailable, "no resolved address")
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

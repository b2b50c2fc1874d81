use assert_cmd::Command;
use predicates::prelude::*;
use std::net::TcpListener;
use tempfile::TempDir;

fn launchpad(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("launchpad").unwrap();
    cmd.current_dir(dir.path())
        .env("LAUNCHPAD_ROOT", dir.path());
    // Keep ambient environment out of configuration resolution.
    for key in [
        "ENV",
        "QUIET",
        "POSTGRESQL_HOST",
        "POSTGRESQL_PORT",
        "REDIS_HOST",
        "REDIS_PORT",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

fn write_env(dir: &TempDir, db_port: u16, cache_port: u16) {
    let content = format!(
        "ENV=dev\n\
         JWT_SECRET_KEY={}\n\
         ADMIN_USER_IDS=42\n\
         POSTGRESQL_HOST=127.0.0.1\n\
         POSTGRESQL_PORT={db_port}\n\
         REDIS_HOST=127.0.0.1\n\
         REDIS_PORT={cache_port}\n",
        "x".repeat(32)
    );
    std::fs::write(dir.path().join(".env"), content).unwrap();
}

fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

// ---------------------------------------------------------------------------
// launchpad provision
// ---------------------------------------------------------------------------

#[test]
fn provision_writes_the_record() {
    let dir = TempDir::new().unwrap();
    launchpad(&dir)
        .arg("provision")
        .write_stdin("abc\nxyz\n42\nn\n")
        .assert()
        .success();

    let content = std::fs::read_to_string(dir.path().join(".env")).unwrap();
    assert!(content.contains("OSU_CLIENT_ID=abc"));
    assert!(content.contains("OSU_CLIENT_SECRET=xyz"));
    assert!(content.contains("ADMIN_USER_IDS=42"));
    assert!(content.contains("DISABLE_SECURITY=false"));
    assert!(content.contains("POSTGRESQL_HOST=localhost"));

    let secret = content
        .lines()
        .find_map(|l| l.strip_prefix("JWT_SECRET_KEY="))
        .unwrap();
    assert_eq!(secret.len(), 32);
    assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn provision_is_idempotent() {
    let dir = TempDir::new().unwrap();
    launchpad(&dir)
        .arg("provision")
        .write_stdin("abc\nxyz\n42\nn\n")
        .assert()
        .success();
    let first = std::fs::read_to_string(dir.path().join(".env")).unwrap();

    // No input: a second run must not prompt at all.
    launchpad(&dir)
        .arg("provision")
        .assert()
        .success()
        .stdout(predicate::str::contains("already provisioned"));
    let second = std::fs::read_to_string(dir.path().join(".env")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn provision_reprompts_on_bad_toggle() {
    let dir = TempDir::new().unwrap();
    launchpad(&dir)
        .arg("provision")
        .write_stdin("abc\nxyz\n42\nmaybe\ny\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("please answer y or n"));

    let content = std::fs::read_to_string(dir.path().join(".env")).unwrap();
    assert!(content.contains("DISABLE_SECURITY=true"));
}

// ---------------------------------------------------------------------------
// Lifecycle commands
// ---------------------------------------------------------------------------

#[test]
fn status_without_configuration_points_to_provision() {
    let dir = TempDir::new().unwrap();
    launchpad(&dir)
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("launchpad provision"));
}

#[test]
fn seed_unknown_target_fails() {
    let dir = TempDir::new().unwrap();
    launchpad(&dir)
        .args(["seed", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown seed target"));
}

#[test]
fn reset_against_unreachable_database_is_unavailable() {
    let dir = TempDir::new().unwrap();
    write_env(&dir, free_port(), free_port());

    launchpad(&dir)
        .args(["reset", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("database unavailable"));
}

#[test]
fn fresh_shares_the_reset_gate() {
    let dir = TempDir::new().unwrap();
    write_env(&dir, free_port(), free_port());

    // Unreachable database fails before any confirmation is read.
    launchpad(&dir)
        .args(["fresh", "all"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("database unavailable"));
}

// ---------------------------------------------------------------------------
// launchpad up
// ---------------------------------------------------------------------------

#[test]
fn up_gates_then_execs_the_service() {
    let dir = TempDir::new().unwrap();
    let db = TcpListener::bind("127.0.0.1:0").unwrap();
    let cache = TcpListener::bind("127.0.0.1:0").unwrap();
    write_env(
        &dir,
        db.local_addr().unwrap().port(),
        cache.local_addr().unwrap().port(),
    );

    launchpad(&dir)
        .args(["up", "--timeout-secs", "5", "--", "echo", "gated-ok"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gated-ok"));
}

#[test]
fn up_reports_gating_progress_in_order() {
    let dir = TempDir::new().unwrap();
    let db = TcpListener::bind("127.0.0.1:0").unwrap();
    let cache = TcpListener::bind("127.0.0.1:0").unwrap();
    write_env(
        &dir,
        db.local_addr().unwrap().port(),
        cache.local_addr().unwrap().port(),
    );

    let output = launchpad(&dir)
        .args(["up", "--timeout-secs", "5", "--", "true"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    let db_at = text.find("database ready").unwrap();
    let cache_at = text.find("cache ready").unwrap();
    assert!(db_at < cache_at);
}

#[test]
fn up_fails_when_database_never_ready() {
    let dir = TempDir::new().unwrap();
    write_env(&dir, free_port(), free_port());

    launchpad(&dir)
        .args(["up", "--timeout-secs", "1", "--quiet", "--", "true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("database"))
        .stderr(predicate::str::contains("not ready"));
}

#[test]
fn up_quiet_suppresses_progress() {
    let dir = TempDir::new().unwrap();
    let db = TcpListener::bind("127.0.0.1:0").unwrap();
    let cache = TcpListener::bind("127.0.0.1:0").unwrap();
    write_env(
        &dir,
        db.local_addr().unwrap().port(),
        cache.local_addr().unwrap().port(),
    );

    launchpad(&dir)
        .args(["up", "--timeout-secs", "5", "--quiet", "--", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("waiting for").not());
}

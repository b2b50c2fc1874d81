//! One-time environment provisioning.
//!
//! The persisted record short-circuits everything: if `.env` exists it is
//! loaded and returned untouched, with no prompts and no side effects.
//! Otherwise required values are collected interactively, the application
//! secret is generated locally, and the record is written create-if-absent
//! so a concurrent or repeated run can never clobber an existing one.

use std::io::{BufRead, Write};
use std::path::Path;

use crate::config::{ConfigRecord, EnvMode};
use crate::envfile;
use crate::error::{LaunchpadError, Result};
use crate::io;
use crate::paths;

/// Length of the generated symmetric secret.
pub const SECRET_LEN: usize = 32;

/// Load the persisted record, or interactively create it.
///
/// `input`/`output` carry the prompts so the flow runs against any
/// reader/writer pair, not just a TTY.
pub fn ensure_configuration(
    root: &Path,
    mode: EnvMode,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<ConfigRecord> {
    if ConfigRecord::exists(root) {
        return ConfigRecord::load(root);
    }

    let mut record = ConfigRecord::defaults(mode);
    record.jwt_secret_key = generate_secret();

    record.osu_client_id = prompt(input, output, "osu! OAuth client ID: ")?;
    record.osu_client_secret = prompt(input, output, "osu! OAuth client secret: ")?;
    record.admin_user_ids = prompt_admin_ids(input, output)?;
    record.disable_security = prompt_yes_no(input, output, "Disable security? [y/N]: ")?;

    let path = paths::env_file_path(root);
    let rendered = envfile::render(&record.to_pairs());
    let written = io::write_if_missing(&path, rendered.as_bytes())
        .map_err(|e| LaunchpadError::Provision(format!("cannot write {}: {e}", path.display())))?;
    if !written {
        // Lost the creation race: the record that got there first wins.
        return ConfigRecord::load(root);
    }

    writeln!(output, "wrote {}", path.display())?;
    Ok(record)
}

// ---------------------------------------------------------------------------
// Prompts
// ---------------------------------------------------------------------------

fn prompt(input: &mut dyn BufRead, output: &mut dyn Write, text: &str) -> Result<String> {
    write!(output, "{text}")?;
    output.flush()?;
    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    if read == 0 {
        return Err(LaunchpadError::Provision(
            "interactive input ended before provisioning completed".to_string(),
        ));
    }
    Ok(line.trim().to_string())
}

/// At least one numeric administrator id is required; re-prompt until given.
fn prompt_admin_ids(input: &mut dyn BufRead, output: &mut dyn Write) -> Result<Vec<u64>> {
    loop {
        let answer = prompt(
            input,
            output,
            "Administrator osu! user ID(s), comma-separated: ",
        )?;
        let ids: Vec<u64> = answer
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .filter_map(|t| t.parse().ok())
            .collect();
        if !ids.is_empty() {
            return Ok(ids);
        }
        writeln!(output, "at least one numeric user ID is required")?;
    }
}

/// Strict y/N toggle: empty input means no; anything other than `y` or `n`
/// (case-insensitive) re-prompts instead of silently defaulting.
fn prompt_yes_no(input: &mut dyn BufRead, output: &mut dyn Write, text: &str) -> Result<bool> {
    loop {
        let answer = prompt(input, output, text)?;
        match answer.to_ascii_lowercase().as_str() {
            "" | "n" => return Ok(false),
            "y" => return Ok(true),
            _ => writeln!(output, "please answer y or n")?,
        }
    }
}

// ---------------------------------------------------------------------------
// Secret generation
// ---------------------------------------------------------------------------

/// Generate the 32-character alphanumeric application secret.
pub fn generate_secret() -> String {
    use rand::{distributions::Alphanumeric, Rng};
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SECRET_LEN)
        .map(char::from)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn provision(dir: &TempDir, input: &str) -> (Result<ConfigRecord>, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = ensure_configuration(dir.path(), EnvMode::Dev, &mut reader, &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn first_run_collects_and_persists() {
        let dir = TempDir::new().unwrap();
        let (result, _) = provision(&dir, "abc\nxyz\n42\nn\n");
        let record = result.unwrap();

        assert_eq!(record.osu_client_id, "abc");
        assert_eq!(record.osu_client_secret, "xyz");
        assert_eq!(record.admin_user_ids, vec![42]);
        assert!(!record.disable_security);
        assert_eq!(record.jwt_secret_key.len(), SECRET_LEN);
        assert_eq!(record.postgresql.host, "localhost");
        assert_eq!(record.redis.host, "localhost");

        let persisted = ConfigRecord::load(dir.path()).unwrap();
        assert_eq!(persisted, record);
    }

    #[test]
    fn existing_record_short_circuits() {
        let dir = TempDir::new().unwrap();
        let (first, _) = provision(&dir, "abc\nxyz\n42\nn\n");
        let first = first.unwrap();

        // No prompts: the input would fail the y/n contract if ever read.
        let (second, output) = provision(&dir, "garbage\n");
        assert_eq!(second.unwrap(), first);
        assert!(output.is_empty());
    }

    #[test]
    fn secret_is_stable_across_reruns() {
        let dir = TempDir::new().unwrap();
        let (first, _) = provision(&dir, "a\nb\n1\nn\n");
        let (second, _) = provision(&dir, "c\nd\n2\ny\n");
        assert_eq!(
            first.unwrap().jwt_secret_key,
            second.unwrap().jwt_secret_key
        );
    }

    #[test]
    fn empty_admin_id_reprompts() {
        let dir = TempDir::new().unwrap();
        let (result, output) = provision(&dir, "abc\nxyz\n\n\n42\nn\n");
        assert_eq!(result.unwrap().admin_user_ids, vec![42]);
        assert!(output.contains("at least one numeric user ID"));
    }

    #[test]
    fn toggle_loops_on_invalid_token() {
        let dir = TempDir::new().unwrap();
        let (result, output) = provision(&dir, "abc\nxyz\n42\nmaybe\nY\n");
        assert!(result.unwrap().disable_security);
        assert!(output.contains("please answer y or n"));
    }

    #[test]
    fn toggle_defaults_to_no_on_empty_input() {
        let dir = TempDir::new().unwrap();
        let (result, _) = provision(&dir, "abc\nxyz\n42\n\n");
        assert!(!result.unwrap().disable_security);
    }

    #[test]
    fn exhausted_input_is_a_provisioning_error() {
        let dir = TempDir::new().unwrap();
        let (result, _) = provision(&dir, "abc\n");
        assert!(matches!(result, Err(LaunchpadError::Provision(_))));
        assert!(!crate::paths::env_file_path(dir.path()).exists());
    }

    #[test]
    fn unwritable_destination_is_a_provisioning_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();
        let mut reader = Cursor::new(b"abc\nxyz\n42\nn\n".to_vec());
        let mut output = Vec::new();
        let result = ensure_configuration(&blocker, EnvMode::Dev, &mut reader, &mut output);
        assert!(matches!(result, Err(LaunchpadError::Provision(_))));
    }

    #[test]
    fn secret_has_fixed_length_and_alphabet() {
        for _ in 0..50 {
            let secret = generate_secret();
            assert_eq!(secret.len(), SECRET_LEN);
            assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn secrets_differ_across_generations() {
        let a = generate_secret();
        let b = generate_secret();
        assert_ne!(a, b);
    }
}

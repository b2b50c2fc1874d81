use crate::error::Result;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically write `data` to `path` using a tempfile in the same directory.
/// A crash mid-write can never leave a partially-written file at `path`.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Write a file only if it does not already exist. Returns true if written.
///
/// This is the provisioner's create-if-absent primitive: an existing file is
/// never overwritten, so a persisted record survives every later invocation.
pub fn write_if_missing(path: &Path, data: &[u8]) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    atomic_write(path, data)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        atomic_write(&path, b"ENV=dev\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "ENV=dev\n");
    }

    #[test]
    fn atomic_write_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/fixtures.json");
        atomic_write(&path, b"[]").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn write_if_missing_skips_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, b"ENV=prod\n").unwrap();
        let written = write_if_missing(&path, b"ENV=dev\n").unwrap();
        assert!(!written);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "ENV=prod\n");
    }

    #[test]
    fn write_if_missing_writes_when_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        assert!(write_if_missing(&path, b"ENV=dev\n").unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "ENV=dev\n");
    }
}

use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File and directory constants
// ---------------------------------------------------------------------------

pub const ENV_FILE: &str = ".env";
pub const FIXTURES_DIR: &str = "fixtures";

pub const USERS_FIXTURE: &str = "users.json";
pub const BEATMAPSETS_FIXTURE: &str = "beatmapsets.json";
pub const QUEUES_FIXTURE: &str = "queues.json";
pub const REQUESTS_FIXTURE: &str = "requests.json";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn env_file_path(root: &Path) -> PathBuf {
    root.join(ENV_FILE)
}

pub fn fixtures_dir(root: &Path) -> PathBuf {
    root.join(FIXTURES_DIR)
}

pub fn fixture_path(root: &Path, file: &str) -> PathBuf {
    fixtures_dir(root).join(file)
}

pub mod fresh;
pub mod provision;
pub mod reset;
pub mod seed;
pub mod status;
pub mod up;

use anyhow::Context;
use launchpad_core::config::ConfigRecord;
use launchpad_core::paths;
use std::path::Path;

/// Load the persisted configuration, with a pointer to `provision` when it
/// does not exist yet.
pub(crate) fn load_config(root: &Path) -> anyhow::Result<ConfigRecord> {
    if !ConfigRecord::exists(root) {
        anyhow::bail!(
            "no configuration found at {} — run 'launchpad provision' first",
            paths::env_file_path(root).display()
        );
    }
    ConfigRecord::load(root).context("failed to load configuration")
}

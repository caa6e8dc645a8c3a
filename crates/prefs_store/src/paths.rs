use std::path::{Path, PathBuf};

pub const PREFS_DIR: &str = ".eclipse";
pub const PREFS_FILE: &str = "prefs.json";

#[must_use]
pub fn prefs_dir(base: &Path) -> PathBuf {
    base.join(PREFS_DIR)
}

#[must_use]
pub fn prefs_path(base: &Path) -> PathBuf {
    prefs_dir(base).join(PREFS_FILE)
}

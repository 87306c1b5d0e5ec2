//! Small helpers shared by the commands

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::constants::{DEADLINE_FORMAT, ENV_TODAY};

/// Display a path with forward slashes (cross-platform standard)
/// Converts Windows backslashes to forward slashes for consistent output
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// The current local date.
///
/// `DOPE_TODAY=YYYY-MM-DD` pins the date, e.g. for reproducible output.
/// An unparsable value is ignored with a warning.
pub fn today() -> NaiveDate {
    if let Some(pinned) = std::env::var(ENV_TODAY).ok().filter(|s| !s.is_empty()) {
        match NaiveDate::parse_from_str(&pinned, DEADLINE_FORMAT) {
            Ok(date) => return date,
            Err(e) => tracing::warn!("Ignoring {}='{}': {}", ENV_TODAY, pinned, e),
        }
    }
    Local::now().date_naive()
}

/// Expand a leading `~` to the home directory
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

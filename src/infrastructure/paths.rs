//! Platform directories for the application.
//!
//! Locations come from `directories::ProjectDirs` (XDG on Linux, Application
//! Support on macOS, AppData on Windows), with `~` expansion for user overrides.

use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "poi", "poi-countries")
}

/// Directory for trace output and other runtime files.
///
/// Uses `override_dir` when given, otherwise the platform data directory. Falls
/// back to the system temp directory when no home directory can be determined.
///
/// ```
/// use poi_countries::infrastructure::data_dir;
///
/// assert_eq!(data_dir(Some("/var/lib/poi")).to_str(), Some("/var/lib/poi"));
/// ```
#[must_use]
pub fn data_dir(override_dir: Option<&str>) -> PathBuf {
    if let Some(dir) = override_dir {
        return expand_tilde(dir);
    }

    project_dirs().map_or_else(
        || std::env::temp_dir().join("poi-countries"),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

/// Default location of the configuration file, if a home directory exists.
#[must_use]
pub fn config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a tilde, or a tilde when no home directory is known, are
/// returned unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = || BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());

    if path == "~" {
        return home().unwrap_or_else(|| PathBuf::from(path));
    }
    match path.strip_prefix("~/") {
        Some(rest) => home().map_or_else(|| PathBuf::from(path), |home| home.join(rest)),
        None => PathBuf::from(path),
    }
}

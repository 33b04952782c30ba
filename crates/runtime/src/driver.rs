//! Chromedriver executable discovery
//!
//! Handles locating the chromedriver binary used to control the headless
//! browser.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::warn;

use crate::error::{Error, Result};

/// Get the path to the chromedriver executable
///
/// This function attempts to locate chromedriver in the following order:
/// 1. CHROMEDRIVER environment variable (runtime override)
/// 2. `chromedriver` on PATH
/// 3. Common installation locations
///
/// Each candidate is probed with `chromedriver --version` before being
/// accepted, so a stale override falls through to the next source.
///
/// # Errors
///
/// Returns `Error::DriverNotFound` if no runnable binary is located.
pub fn get_driver_executable() -> Result<PathBuf> {
    // 1. Try the CHROMEDRIVER environment variable (runtime override)
    if let Some(path) = try_env_override() {
        if driver_is_usable(&path) {
            return Ok(path);
        }
        warn!(
            target = "vizshot",
            path = %path.display(),
            "CHROMEDRIVER is set but the binary is not runnable; falling back"
        );
    }

    // 2. Try PATH
    if let Some(path) = try_path_lookup() {
        if driver_is_usable(&path) {
            return Ok(path);
        }
        warn!(
            target = "vizshot",
            path = %path.display(),
            "chromedriver on PATH is not runnable; falling back"
        );
    }

    // 3. Try common installation locations
    for location in common_locations() {
        let path = PathBuf::from(location);
        if path.exists() && driver_is_usable(&path) {
            return Ok(path);
        }
    }

    Err(Error::DriverNotFound)
}

fn try_env_override() -> Option<PathBuf> {
    let value = std::env::var("CHROMEDRIVER").ok()?;
    let path = PathBuf::from(value);
    path.exists().then_some(path)
}

fn try_path_lookup() -> Option<PathBuf> {
    #[cfg(not(windows))]
    let which_cmd = "which";
    #[cfg(windows)]
    let which_cmd = "where";

    let output = Command::new(which_cmd).arg("chromedriver").output().ok()?;
    if !output.status.success() {
        return None;
    }

    let found = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let first = found.lines().next().unwrap_or(&found);
    if first.is_empty() {
        return None;
    }

    let path = PathBuf::from(first);
    path.exists().then_some(path)
}

#[cfg(not(windows))]
fn common_locations() -> &'static [&'static str] {
    &[
        "/usr/local/bin/chromedriver",
        "/usr/bin/chromedriver",
        "/opt/homebrew/bin/chromedriver",
        "/snap/bin/chromium.chromedriver",
    ]
}

#[cfg(windows)]
fn common_locations() -> &'static [&'static str] {
    &[
        "C:\\Program Files\\chromedriver\\chromedriver.exe",
        "C:\\Program Files (x86)\\chromedriver\\chromedriver.exe",
    ]
}

fn driver_is_usable(path: &Path) -> bool {
    Command::new(path)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_driver_executable() {
        let result = get_driver_executable();
        match result {
            Ok(path) => {
                println!("Found chromedriver at: {:?}", path);
                assert!(path.exists());
            }
            Err(Error::DriverNotFound) => {
                println!("chromedriver not found (expected in some environments)");
            }
            Err(e) => panic!("Unexpected error: {:?}", e),
        }
    }

    #[test]
    fn unusable_candidate_is_rejected() {
        // A directory exists but is not a runnable driver binary.
        let dir = std::env::temp_dir();
        assert!(!driver_is_usable(&dir));
    }
}

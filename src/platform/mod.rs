// tilmarks platform paths
// Config and data directories per OS, selected with `cfg(target_os)`.
//
// Linux:   $XDG_CONFIG_HOME/tilmarks, $XDG_DATA_HOME/tilmarks (XDG defaults otherwise)
// macOS:   ~/Library/Application Support/tilmarks for both
// Windows: %APPDATA%\tilmarks for both
//
// `TILMARKS_DATA_DIR` overrides the data directory on every platform.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "tilmarks";

/// Environment variable that overrides [`get_data_dir`].
pub const DATA_DIR_ENV: &str = "TILMARKS_DATA_DIR";

fn home_dir() -> PathBuf {
    let var = if cfg!(target_os = "windows") { "USERPROFILE" } else { "HOME" };
    PathBuf::from(env::var(var).unwrap_or_else(|_| String::from("/tmp")))
}

/// `$VAR` if set and non-empty, else `fallback`.
#[cfg_attr(target_os = "macos", allow(dead_code))]
fn env_dir_or(var: &str, fallback: impl FnOnce() -> PathBuf) -> PathBuf {
    env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(fallback)
}

/// Returns the configuration directory for tilmarks.
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        home_dir().join("Library").join("Application Support").join(APP_DIR)
    }
    #[cfg(target_os = "windows")]
    {
        env_dir_or("APPDATA", || home_dir().join("AppData").join("Roaming")).join(APP_DIR)
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        env_dir_or("XDG_CONFIG_HOME", || home_dir().join(".config")).join(APP_DIR)
    }
}

/// Returns the data directory for tilmarks (where the database lives).
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    #[cfg(target_os = "macos")]
    {
        home_dir().join("Library").join("Application Support").join(APP_DIR)
    }
    #[cfg(target_os = "windows")]
    {
        env_dir_or("APPDATA", || home_dir().join("AppData").join("Roaming")).join(APP_DIR)
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        env_dir_or("XDG_DATA_HOME", || home_dir().join(".local").join("share")).join(APP_DIR)
    }
}

/// Default database file inside the data directory.
pub fn default_database_path() -> PathBuf {
    get_data_dir().join("tilmarks.db")
}

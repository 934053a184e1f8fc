//! Where Exoscope keeps its files.
//!
//! Settings and logs live in one `.exoscope` folder under the OS config
//! directory, relocatable through `EXOSCOPE_CONFIG_HOME`. Detailed exports
//! go to the user's downloads folder unless the settings name another one.

use std::{
    path::{Path, PathBuf},
    sync::{LazyLock, Mutex},
};

use directories::{BaseDirs, UserDirs};
use thiserror::Error;

/// Folder created under the config root for settings and logs.
pub const APP_DIR_NAME: &str = ".exoscope";
/// Environment variable that relocates the config root.
pub const CONFIG_HOME_ENV: &str = "EXOSCOPE_CONFIG_HOME";
const LOGS_DIR_NAME: &str = "logs";

static CONFIG_HOME_OVERRIDE: LazyLock<Mutex<Option<PathBuf>>> = LazyLock::new(|| Mutex::new(None));

#[derive(Debug, Error)]
pub enum AppDirError {
    #[error("No suitable base config directory available for application files")]
    NoBaseDir,
    #[error("Failed to create application directory at {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The `.exoscope` folder, created on first use.
pub fn app_root_dir() -> Result<PathBuf, AppDirError> {
    let home = config_home().ok_or(AppDirError::NoBaseDir)?;
    ensure_dir(home.join(APP_DIR_NAME))
}

/// Per-launch log files, inside the `.exoscope` folder.
pub fn logs_dir() -> Result<PathBuf, AppDirError> {
    ensure_dir(app_root_dir()?.join(LOGS_DIR_NAME))
}

/// Folder that receives detailed CSV exports.
///
/// A configured folder wins; otherwise the OS downloads folder, the home
/// folder, and finally the `.exoscope` folder are tried in that order.
/// The configured folder is not created here; saving the export does that.
pub fn downloads_dir(configured: Option<&Path>) -> Result<PathBuf, AppDirError> {
    if let Some(dir) = configured {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = user_downloads_dir() {
        return Ok(dir);
    }
    tracing::warn!("No downloads folder found; exports go to the app folder");
    app_root_dir()
}

fn user_downloads_dir() -> Option<PathBuf> {
    let dirs = UserDirs::new()?;
    Some(
        dirs.download_dir()
            .unwrap_or_else(|| dirs.home_dir())
            .to_path_buf(),
    )
}

fn config_home() -> Option<PathBuf> {
    let overridden = CONFIG_HOME_OVERRIDE.lock().ok().and_then(|guard| guard.clone());
    overridden
        .or_else(|| std::env::var_os(CONFIG_HOME_ENV).map(PathBuf::from))
        .or_else(|| BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf()))
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf, AppDirError> {
    std::fs::create_dir_all(&path).map_err(|source| AppDirError::CreateDir {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

#[cfg(test)]
fn set_config_home_override(path: Option<PathBuf>) {
    let mut guard = CONFIG_HOME_OVERRIDE
        .lock()
        .unwrap_or_else(|err| err.into_inner());
    *guard = path;
}

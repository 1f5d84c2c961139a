use std::path::{Path, PathBuf};

use crate::consts::{APP_NAME, CONFIG_FILE_NAME, TOOL_NAME};

/// Error resolving a well-known directory from the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
  #[error("environment variable {0} is not set")]
  MissingEnv(&'static str),
}

fn env_path(var: &'static str) -> Option<PathBuf> {
  std::env::var_os(var).filter(|v| !v.is_empty()).map(PathBuf::from)
}

fn required_env_path(var: &'static str) -> Result<PathBuf, PathError> {
  env_path(var).ok_or(PathError::MissingEnv(var))
}

/// Returns the user's home directory
#[cfg(windows)]
pub fn home_dir() -> Result<PathBuf, PathError> {
  required_env_path("USERPROFILE")
}

/// Returns the user's home directory
#[cfg(not(windows))]
pub fn home_dir() -> Result<PathBuf, PathError> {
  required_env_path("HOME")
}

/// Returns the root under which programs keep their configuration
/// (`~/.config` unless overridden).
#[cfg(windows)]
pub fn user_config_root() -> Result<PathBuf, PathError> {
  required_env_path("APPDATA")
}

/// Returns the root under which programs keep their configuration
/// (`~/.config` unless overridden).
#[cfg(not(windows))]
pub fn user_config_root() -> Result<PathBuf, PathError> {
  match env_path("XDG_CONFIG_HOME") {
    Some(config_home) => Ok(config_home),
    None => Ok(home_dir()?.join(".config")),
  }
}

/// Returns the directory for this module's own state (provisioning profile)
#[cfg(windows)]
pub fn data_dir() -> Result<PathBuf, PathError> {
  Ok(required_env_path("LOCALAPPDATA")?.join(APP_NAME))
}

/// Returns the directory for this module's own state (provisioning profile)
#[cfg(not(windows))]
pub fn data_dir() -> Result<PathBuf, PathError> {
  let data_home = match env_path("XDG_DATA_HOME") {
    Some(data_home) => data_home,
    None => home_dir()?.join(".local").join("share"),
  };
  Ok(data_home.join(APP_NAME))
}

/// Location of the tool's global config file under `config_root`.
pub fn tool_config_path(config_root: &Path) -> PathBuf {
  config_root.join(TOOL_NAME).join(CONFIG_FILE_NAME)
}

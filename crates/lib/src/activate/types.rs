use std::path::PathBuf;

use serde::Serialize;

use crate::package::{Artifact, PackageError, PackageSet};
use crate::platform::paths::{PathError, user_config_root};
use crate::platform::{Platform, PlatformError};
use crate::settings::SettingsError;
use crate::util::hash::Hashable;

/// Everything host-specific that activation depends on.
#[derive(Debug, Clone)]
pub struct ActivationContext {
  /// Platform used to resolve the package.
  pub platform: Platform,
  /// The user config root, e.g. `~/.config`.
  pub config_root: PathBuf,
  /// Packages known to the host.
  pub packages: PackageSet,
}

impl ActivationContext {
  pub fn new(platform: Platform, config_root: PathBuf, packages: PackageSet) -> Self {
    Self {
      platform,
      config_root,
      packages,
    }
  }

  /// Build a context for the machine we are running on.
  pub fn detect(packages: PackageSet) -> Result<Self, ActivateError> {
    Ok(Self::new(Platform::detect()?, user_config_root()?, packages))
  }
}

/// A file to write, with its complete content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEffect {
  pub path: PathBuf,
  pub content: String,
}

/// The side effects an activation asks of the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EffectSet {
  /// Packages to add to the host's provisioning set.
  pub packages: Vec<Artifact>,
  /// Files to write, each fully replacing whatever is at its path.
  pub files: Vec<FileEffect>,
}

impl EffectSet {
  pub fn is_empty(&self) -> bool {
    self.packages.is_empty() && self.files.is_empty()
  }
}

impl Hashable for EffectSet {}

#[derive(Debug, thiserror::Error)]
pub enum ActivateError {
  #[error(transparent)]
  Package(#[from] PackageError),

  #[error(transparent)]
  Settings(#[from] SettingsError),

  #[error(transparent)]
  Platform(#[from] PlatformError),

  #[error("failed to locate the user config root: {0}")]
  Path(#[from] PathError),
}

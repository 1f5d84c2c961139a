//! Filesystem-backed host.
//!
//! # Storage Layout
//!
//! ```text
//! {state_dir}/
//! └── profile.json        # provisioned artifacts, keyed by object hash
//! ```
//!
//! Rendered config files go wherever their effect says. Both the profile and
//! config files are written to a temporary sibling first and then renamed
//! over the target, so readers never observe a partial file.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use super::{Host, HostError};
use crate::package::Artifact;
use crate::platform::paths::{PathError, data_dir};
use crate::util::hash::{Hashable, ObjectHash};

/// Profile file name within the state directory.
const PROFILE_FILENAME: &str = "profile.json";

/// Current profile format version.
pub const PROFILE_VERSION: u32 = 1;

/// The provisioning set as persisted on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
  pub version: u32,
  pub packages: BTreeMap<ObjectHash, Artifact>,
}

impl Default for Profile {
  fn default() -> Self {
    Self {
      version: PROFILE_VERSION,
      packages: BTreeMap::new(),
    }
  }
}

/// A host backed by the local filesystem.
#[derive(Debug, Clone)]
pub struct FilesystemHost {
  /// Directory holding `profile.json`.
  state_dir: PathBuf,
}

impl FilesystemHost {
  pub fn new(state_dir: PathBuf) -> Self {
    Self { state_dir }
  }

  /// A host keeping its state in the platform data directory:
  /// - Linux/macOS: `~/.local/share/gsm-module`
  /// - Windows: `%LOCALAPPDATA%\gsm-module`
  pub fn default_host() -> Result<Self, PathError> {
    Ok(Self::new(data_dir()?))
  }

  pub fn state_dir(&self) -> &Path {
    &self.state_dir
  }

  pub fn profile_path(&self) -> PathBuf {
    self.state_dir.join(PROFILE_FILENAME)
  }

  /// Load the profile. Returns an empty profile if none was saved yet.
  pub fn load_profile(&self) -> Result<Profile, HostError> {
    let path = self.profile_path();
    let content = match fs::read_to_string(&path) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Profile::default()),
      Err(source) => return Err(HostError::Read { path, source }),
    };

    let profile: Profile =
      serde_json::from_str(&content).map_err(|source| HostError::ParseProfile { path, source })?;

    if profile.version != PROFILE_VERSION {
      return Err(HostError::UnsupportedProfileVersion(profile.version));
    }
    Ok(profile)
  }

  fn save_profile(&self, profile: &Profile) -> Result<(), HostError> {
    let content = serde_json::to_string_pretty(profile).map_err(HostError::SerializeProfile)?;
    write_atomic(&self.profile_path(), &content)
  }

  /// All artifacts currently provisioned.
  pub fn provisioned(&self) -> Result<Vec<Artifact>, HostError> {
    Ok(self.load_profile()?.packages.into_values().collect())
  }
}

/// Write `content` to a temporary file next to `path`, then rename it over `path`.
fn write_atomic(path: &Path, content: &str) -> Result<(), HostError> {
  let write_err = |source| HostError::Write {
    path: path.to_path_buf(),
    source,
  };
  let parent = path.parent().unwrap_or(Path::new("."));
  fs::create_dir_all(parent).map_err(write_err)?;

  let mut temp = NamedTempFile::new_in(parent).map_err(write_err)?;
  temp.write_all(content.as_bytes()).map_err(write_err)?;
  if let Some(perms) = target_permissions(path) {
    temp.as_file().set_permissions(perms).map_err(write_err)?;
  }
  temp.persist(path).map_err(|e| write_err(e.error))?;
  Ok(())
}

/// Permissions the replacement file should carry.
///
/// Temp files are created 0600, so an existing target keeps its own mode and
/// a new one gets 0644.
fn target_permissions(path: &Path) -> Option<fs::Permissions> {
  if let Ok(metadata) = fs::metadata(path) {
    return Some(metadata.permissions());
  }
  new_file_permissions()
}

#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
  use std::os::unix::fs::PermissionsExt;
  Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
  None
}

impl Host for FilesystemHost {
  fn is_provisioned(&self, artifact: &Artifact) -> Result<bool, HostError> {
    let hash = artifact.compute_hash().map_err(HostError::Hash)?;
    Ok(self.load_profile()?.packages.contains_key(&hash))
  }

  fn provision(&mut self, artifact: &Artifact) -> Result<(), HostError> {
    let hash = artifact.compute_hash().map_err(HostError::Hash)?;
    let mut profile = self.load_profile()?;
    if profile.packages.insert(hash.clone(), artifact.clone()).is_none() {
      debug!(%hash, artifact = %artifact, "provisioned");
    }
    self.save_profile(&profile)
  }

  fn read_file(&self, path: &Path) -> Result<Option<String>, HostError> {
    match fs::read_to_string(path) {
      Ok(content) => Ok(Some(content)),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
      Err(source) => Err(HostError::Read {
        path: path.to_path_buf(),
        source,
      }),
    }
  }

  fn write_file(&mut self, path: &Path, content: &str) -> Result<(), HostError> {
    debug!(path = %path.display(), bytes = content.len(), "writing file");
    write_atomic(path, content)
  }
}

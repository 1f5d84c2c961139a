use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::TOOL_NAME;
use crate::platform::Platform;
use crate::util::hash::Hashable;

/// Version of the tool shipped in the built-in package set.
pub const BUILTIN_VERSION: &str = "0.1.0";

/// Triples the built-in package set provides the tool for.
const BUILTIN_PLATFORMS: &[&str] = &["x86_64-linux", "aarch64-linux", "x86_64-darwin", "aarch64-darwin"];

/// A resolved, installable package for one platform.
///
/// Artifacts are content-addressed: two identical artifacts share the same
/// [`ObjectHash`](crate::util::hash::ObjectHash), which the host uses as the
/// provisioning key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
  pub name: String,
  pub version: String,
  /// Platform triple this artifact was resolved for.
  pub platform: String,
  /// Where the host should fetch the artifact from. Opaque to this crate.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub source: Option<String>,
}

impl Hashable for Artifact {}

impl fmt::Display for Artifact {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{} ({})", self.name, self.version, self.platform)
  }
}

/// A package set entry. The platform comes from its key in the set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageEntry {
  pub name: String,
  pub version: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub source: Option<String>,
}

impl PackageEntry {
  fn for_platform(&self, platform: &Platform) -> Artifact {
    Artifact {
      name: self.name.clone(),
      version: self.version.clone(),
      platform: platform.triple(),
      source: self.source.clone(),
    }
  }
}

/// How the user selected the package to provision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PackageRef {
  /// The tool's own attribute, looked up for the current platform.
  #[default]
  Default,
  /// Another attribute of the package set, looked up for the current platform.
  Attr(String),
  /// An explicit artifact, used as-is on whatever platform is current.
  Explicit(PackageEntry),
}

/// Errors loading package sets or resolving references.
#[derive(Debug, thiserror::Error)]
pub enum PackageError {
  #[error("no package for lookup key '{key}'")]
  Unresolvable { key: String },

  #[error("failed to read package set {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse package set {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },
}

/// Known packages, keyed by attribute name then platform triple.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageSet {
  packages: BTreeMap<String, BTreeMap<String, PackageEntry>>,
}

impl PackageSet {
  pub fn empty() -> Self {
    Self::default()
  }

  /// The package set compiled into this crate.
  pub fn builtin() -> Self {
    let mut set = Self::empty();
    for triple in BUILTIN_PLATFORMS {
      set.insert(
        TOOL_NAME,
        triple,
        PackageEntry {
          name: TOOL_NAME.to_string(),
          version: BUILTIN_VERSION.to_string(),
          source: None,
        },
      );
    }
    set
  }

  /// Parse a package set from TOML. `origin` is only used in errors.
  pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, PackageError> {
    toml::from_str(content).map_err(|source| PackageError::Parse {
      path: origin.to_path_buf(),
      source,
    })
  }

  pub fn load(path: &Path) -> Result<Self, PackageError> {
    debug!(path = %path.display(), "loading package set");
    let content = fs::read_to_string(path).map_err(|source| PackageError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_toml_str(&content, path)
  }

  pub fn insert(&mut self, attr: &str, triple: &str, entry: PackageEntry) {
    self
      .packages
      .entry(attr.to_string())
      .or_default()
      .insert(triple.to_string(), entry);
  }

  /// Overlay `other` on top of this set. Entries for the same attribute and
  /// platform are replaced; everything else is kept.
  pub fn extend(&mut self, other: PackageSet) {
    for (attr, platforms) in other.packages {
      self.packages.entry(attr).or_default().extend(platforms);
    }
  }

  pub fn attrs(&self) -> impl Iterator<Item = &str> {
    self.packages.keys().map(String::as_str)
  }

  /// Look up `attr` for `platform`.
  pub fn lookup(&self, attr: &str, platform: &Platform) -> Result<Artifact, PackageError> {
    let triple = platform.triple();
    self
      .packages
      .get(attr)
      .and_then(|platforms| platforms.get(&triple))
      .map(|entry| entry.for_platform(platform))
      .ok_or_else(|| PackageError::Unresolvable {
        key: format!("{}.{}", attr, triple),
      })
  }

  /// Resolve a reference to exactly one artifact for `platform`.
  pub fn resolve(&self, reference: &PackageRef, platform: &Platform) -> Result<Artifact, PackageError> {
    let artifact = match reference {
      PackageRef::Default => self.lookup(TOOL_NAME, platform)?,
      PackageRef::Attr(attr) => self.lookup(attr, platform)?,
      PackageRef::Explicit(entry) => entry.for_platform(platform),
    };
    debug!(artifact = %artifact, "resolved package");
    Ok(artifact)
  }
}

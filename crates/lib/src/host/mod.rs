//! Applying an [`EffectSet`] to a host.
//!
//! The [`Host`] trait is the seam between the pure activation and a concrete
//! machine. [`plan`] compares the effects with the host's current state
//! without changing anything; [`apply`] performs them.
//!
//! Package provisioning is idempotent: an artifact that is already present
//! is not provisioned again. Files are always rewritten in full, even when
//! their content is unchanged.
//!
//! # Submodules
//!
//! - [`fs`] - [`FilesystemHost`], which writes real files and keeps the
//!   provisioning set in a JSON profile

pub mod fs;

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::activate::EffectSet;
use crate::package::Artifact;
use crate::util::hash::{ContentHash, HashError, hash_bytes};

pub use fs::FilesystemHost;

/// Errors raised while inspecting or changing host state.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
  #[error("failed to read {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to write {path}: {source}")]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse profile {path}: {source}")]
  ParseProfile {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("failed to serialize profile: {0}")]
  SerializeProfile(#[source] serde_json::Error),

  #[error("unsupported profile version: {0}")]
  UnsupportedProfileVersion(u32),

  #[error("failed to hash artifact: {0}")]
  Hash(#[source] HashError),
}

/// A machine that can provision packages and hold files.
pub trait Host {
  /// Whether `artifact` is already in the provisioning set.
  fn is_provisioned(&self, artifact: &Artifact) -> Result<bool, HostError>;

  /// Add `artifact` to the provisioning set.
  fn provision(&mut self, artifact: &Artifact) -> Result<(), HostError>;

  /// Current content at `path`, or `None` if nothing is there.
  fn read_file(&self, path: &Path) -> Result<Option<String>, HostError>;

  /// Replace whatever is at `path` with `content`.
  fn write_file(&mut self, path: &Path, content: &str) -> Result<(), HostError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageChange {
  Add,
  Present,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackagePlan {
  pub artifact: Artifact,
  pub change: PackageChange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileChange {
  Create,
  Update {
    #[serde(skip_serializing)]
    previous: String,
  },
  Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilePlan {
  pub path: PathBuf,
  pub content: String,
  pub content_hash: ContentHash,
  pub change: FileChange,
}

/// What applying an effect set would change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Plan {
  pub packages: Vec<PackagePlan>,
  pub files: Vec<FilePlan>,
}

impl Plan {
  pub fn change_count(&self) -> usize {
    let packages = self
      .packages
      .iter()
      .filter(|p| p.change == PackageChange::Add)
      .count();
    let files = self
      .files
      .iter()
      .filter(|f| f.change != FileChange::Unchanged)
      .count();
    packages + files
  }

  pub fn has_changes(&self) -> bool {
    self.change_count() > 0
  }
}

/// Compare `effects` with the current state of `host`.
pub fn plan<H: Host + ?Sized>(effects: &EffectSet, host: &H) -> Result<Plan, HostError> {
  let mut plan = Plan::default();

  for artifact in &effects.packages {
    let change = if host.is_provisioned(artifact)? {
      PackageChange::Present
    } else {
      PackageChange::Add
    };
    plan.packages.push(PackagePlan {
      artifact: artifact.clone(),
      change,
    });
  }

  for file in &effects.files {
    let change = match host.read_file(&file.path)? {
      None => FileChange::Create,
      Some(previous) if previous == file.content => FileChange::Unchanged,
      Some(previous) => FileChange::Update { previous },
    };
    plan.files.push(FilePlan {
      path: file.path.clone(),
      content: file.content.clone(),
      content_hash: hash_bytes(file.content.as_bytes()),
      change,
    });
  }

  debug!(changes = plan.change_count(), "computed plan");
  Ok(plan)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOptions {
  /// Compute the plan but change nothing.
  pub dry_run: bool,
}

/// Result of [`apply`].
#[derive(Debug, Clone, Serialize)]
pub struct ApplyReport {
  pub plan: Plan,
  pub packages_added: usize,
  pub files_written: usize,
  pub dry_run: bool,
}

/// Perform `effects` on `host`.
///
/// Missing packages are provisioned, present ones are left alone. Every file
/// effect is written, replacing any previous content.
pub fn apply<H: Host + ?Sized>(
  effects: &EffectSet,
  host: &mut H,
  options: &ApplyOptions,
) -> Result<ApplyReport, HostError> {
  let plan = plan(effects, &*host)?;

  let mut report = ApplyReport {
    plan,
    packages_added: 0,
    files_written: 0,
    dry_run: options.dry_run,
  };

  if options.dry_run {
    info!(changes = report.plan.change_count(), "dry run, nothing applied");
    return Ok(report);
  }

  for package in &report.plan.packages {
    if package.change == PackageChange::Add {
      host.provision(&package.artifact)?;
      report.packages_added += 1;
    }
  }

  for file in &report.plan.files {
    host.write_file(&file.path, &file.content)?;
    report.files_written += 1;
  }

  info!(
    packages_added = report.packages_added,
    files_written = report.files_written,
    "applied effects"
  );
  Ok(report)
}

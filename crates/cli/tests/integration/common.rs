//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Read fixture content.
pub fn fixture_content(name: &str) -> String {
  std::fs::read_to_string(fixture_path(name)).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Isolated test environment.
///
/// Each test gets its own temporary directory with isolated config and data paths.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Copy a fixture into the temp directory and return its path.
  pub fn fixture(&self, name: &str) -> PathBuf {
    let path = self.temp.path().join(name);
    std::fs::write(&path, fixture_content(name)).unwrap();
    path
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) -> PathBuf {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
  }

  /// User config root (`XDG_CONFIG_HOME`).
  pub fn config_root(&self) -> PathBuf {
    let p = self.temp.path().join("config");
    std::fs::create_dir_all(&p).unwrap();
    dunce::canonicalize(&p).unwrap_or(p)
  }

  /// Data path for the provisioning profile.
  pub fn data_path(&self) -> PathBuf {
    let p = self.temp.path().join("data");
    std::fs::create_dir_all(&p).unwrap();
    dunce::canonicalize(&p).unwrap_or(p)
  }

  /// The tool's rendered config file.
  pub fn tool_config(&self) -> PathBuf {
    self.config_root().join("git-series-manager").join("config.toml")
  }

  /// The provisioning profile written by apply.
  pub fn profile(&self) -> PathBuf {
    self.data_path().join("gsm-module").join("profile.json")
  }

  /// Get a pre-configured Command for the gsm-module binary.
  ///
  /// Paths are isolated through `XDG_CONFIG_HOME`/`XDG_DATA_HOME` (and
  /// `APPDATA`/`LOCALAPPDATA` on Windows). The platform is pinned so package
  /// resolution does not depend on the machine running the tests.
  pub fn cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("gsm-module");
    cmd.env("HOME", self.temp.path());
    cmd.env("XDG_CONFIG_HOME", self.config_root());
    cmd.env("XDG_DATA_HOME", self.data_path());
    cmd.env("APPDATA", self.config_root()); // For Windows
    cmd.env("LOCALAPPDATA", self.data_path()); // For Windows
    cmd.env_remove("RUST_LOG");
    cmd.arg("--platform").arg("x86_64-linux");
    cmd
  }
}

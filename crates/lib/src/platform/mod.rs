//! Host platform detection and well-known directories.
//!
//! The platform triple (e.g. `x86_64-linux`) is the lookup key used when
//! resolving the default package for the managed tool.

pub mod arch;
pub mod os;
pub mod paths;

use std::fmt;
use std::str::FromStr;

use arch::Arch;
use os::Os;

/// Platform identifier combining architecture and OS (e.g., "aarch64-darwin")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
  pub arch: Arch,
  pub os: Os,
}

/// Error returned when parsing a platform triple.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
  #[error("current platform ({arch}-{os}) is not supported")]
  Unsupported { arch: &'static str, os: &'static str },

  #[error("invalid platform triple '{0}', expected '<arch>-<os>'")]
  InvalidTriple(String),
}

impl Platform {
  /// Create a new platform identifier
  pub fn new(arch: Arch, os: Os) -> Self {
    Self { arch, os }
  }

  /// Detect the current platform at runtime
  ///
  /// Returns `None` if the OS or architecture is not supported
  pub fn current() -> Option<Self> {
    Some(Self {
      arch: Arch::current()?,
      os: Os::current()?,
    })
  }

  /// Like [`Platform::current`], but reports which part is unsupported.
  pub fn detect() -> Result<Self, PlatformError> {
    Self::current().ok_or(PlatformError::Unsupported {
      arch: std::env::consts::ARCH,
      os: std::env::consts::OS,
    })
  }

  /// Returns the platform triple string (e.g., "aarch64-darwin")
  pub fn triple(&self) -> String {
    format!("{}-{}", self.arch, self.os)
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.triple())
  }
}

impl FromStr for Platform {
  type Err = PlatformError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = || PlatformError::InvalidTriple(s.to_string());
    // Architectures contain underscores but never dashes.
    let (arch, os) = s.split_once('-').ok_or_else(invalid)?;
    Ok(Self {
      arch: arch.parse().map_err(|_| invalid())?,
      os: os.parse().map_err(|_| invalid())?,
    })
  }
}

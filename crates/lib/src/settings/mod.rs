//! The open-ended settings document passed through to the tool.
//!
//! No schema is enforced here beyond "must be representable as TOML". The
//! tool itself reads keys such as `sendmail_args`, `repo_url_base`,
//! `ci_url`, `editor`, `component` and `interdiff_base`, but those are its
//! conventions and are not checked.

pub mod convert;
mod types;

pub use types::*;

/// Errors producing or rendering a settings document.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
  /// A value has no counterpart in the settings model.
  #[error("{path}: {kind} values cannot be represented in settings")]
  Unrepresentable { path: String, kind: &'static str },

  #[error("failed to render settings as TOML: {0}")]
  Render(#[from] toml::ser::Error),

  #[error("failed to parse settings TOML: {0}")]
  Parse(#[from] toml::de::Error),
}

impl Settings {
  /// Render as a TOML document.
  ///
  /// The output contains exactly the keys of the document: no defaults,
  /// comments or headers are injected. An empty document renders as an
  /// empty string.
  pub fn to_toml_string(&self) -> Result<String, SettingsError> {
    let table = convert::to_toml_table(self.as_table());
    Ok(toml::to_string(&table)?)
  }

  /// Parse a TOML document back into settings.
  pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
    let table: toml::Table = toml::from_str(content)?;
    Ok(Self::from(convert::from_toml_table(table, "")?))
  }
}

//! The user-facing option surface: `programs.git-series-manager.*`.
//!
//! | Option     | Type                  | Default                     |
//! |------------|-----------------------|-----------------------------|
//! | `enable`   | boolean               | `false`                     |
//! | `package`  | string or table       | platform lookup of the tool |
//! | `settings` | table (any TOML)      | `{}`                        |
//!
//! Decoding plays the part of the host's type checker: every option is
//! checked structurally and errors name the full option path. The content of
//! `settings` is never inspected.

use crate::consts::{PROGRAMS_NAMESPACE, TOOL_NAME};
use crate::package::{PackageEntry, PackageRef};
use crate::settings::{Settings, Table, Value};

/// Errors decoding the option surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
  #[error("option '{option}' has type {found}, expected {expected}")]
  TypeMismatch {
    option: String,
    expected: &'static str,
    found: &'static str,
  },

  #[error("option '{option}' does not exist")]
  UnknownOption { option: String },

  #[error("option '{option}' is required")]
  MissingField { option: String },
}

/// Fully-defaulted options for the tool.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgramOptions {
  pub enable: bool,
  pub package: PackageRef,
  pub settings: Settings,
}

/// Full dotted path of an option, e.g. `programs.git-series-manager.enable`.
pub fn option_path(field: &str) -> String {
  if field.is_empty() {
    format!("{}.{}", PROGRAMS_NAMESPACE, TOOL_NAME)
  } else {
    format!("{}.{}.{}", PROGRAMS_NAMESPACE, TOOL_NAME, field)
  }
}

fn mismatch(option: String, expected: &'static str, found: &Value) -> OptionsError {
  OptionsError::TypeMismatch {
    option,
    expected,
    found: found.type_name(),
  }
}

impl ProgramOptions {
  /// Decode the value found at `programs.git-series-manager`.
  ///
  /// Fields that are absent keep their defaults.
  pub fn from_value(value: &Value) -> Result<Self, OptionsError> {
    let table = value.as_table().ok_or_else(|| mismatch(option_path(""), "table", value))?;

    let mut options = Self::default();
    for (key, value) in table {
      match key.as_str() {
        "enable" => {
          options.enable = value
            .as_bool()
            .ok_or_else(|| mismatch(option_path("enable"), "boolean", value))?;
        }
        "package" => options.package = decode_package(value)?,
        "settings" => {
          let settings = value
            .as_table()
            .ok_or_else(|| mismatch(option_path("settings"), "table", value))?;
          options.settings = Settings::from(settings.clone());
        }
        other => {
          return Err(OptionsError::UnknownOption {
            option: option_path(other),
          });
        }
      }
    }
    Ok(options)
  }
}

fn decode_package(value: &Value) -> Result<PackageRef, OptionsError> {
  match value {
    Value::String(attr) => Ok(PackageRef::Attr(attr.clone())),
    Value::Table(table) => Ok(PackageRef::Explicit(decode_package_entry(table)?)),
    other => Err(mismatch(option_path("package"), "string or table", other)),
  }
}

fn decode_package_entry(table: &Table) -> Result<PackageEntry, OptionsError> {
  let field = |name: &str| -> Result<Option<String>, OptionsError> {
    match table.get(name) {
      None => Ok(None),
      Some(Value::String(s)) => Ok(Some(s.clone())),
      Some(other) => Err(mismatch(option_path(&format!("package.{}", name)), "string", other)),
    }
  };
  let required = |name: &str| -> Result<String, OptionsError> {
    field(name)?.ok_or_else(|| OptionsError::MissingField {
      option: option_path(&format!("package.{}", name)),
    })
  };

  if let Some(unknown) = table
    .keys()
    .find(|k| !matches!(k.as_str(), "name" | "version" | "source"))
  {
    return Err(OptionsError::UnknownOption {
      option: option_path(&format!("package.{}", unknown)),
    });
  }

  Ok(PackageEntry {
    name: required("name")?,
    version: required("version")?,
    source: field("source")?,
  })
}

//! Host configuration evaluation.
//!
//! A host configuration is one or more files (layers), each a TOML or JSON
//! document. Layers are merged in order: later layers win, tables merge
//! recursively, arrays and scalars are replaced. The merged tree is then
//! decoded at `programs.git-series-manager`; everything else in it belongs to
//! other modules and is ignored.
//!
//! ```toml
//! [programs.git-series-manager]
//! enable = true
//!
//! [programs.git-series-manager.settings]
//! editor = "nvim"
//! repo_url_base = "https://git.example.com/proj/"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::consts::{PROGRAMS_NAMESPACE, TOOL_NAME};
use crate::options::{OptionsError, ProgramOptions};
use crate::settings::{SettingsError, Table, Value, convert};

/// Errors that can occur during config evaluation.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
  #[error("failed to read {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse {path}: {source}")]
  ParseToml {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error("failed to parse {path}: {source}")]
  ParseJson {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("{path}: unsupported config format, expected .toml or .json")]
  UnsupportedFormat { path: PathBuf },

  #[error("{path}: top-level value must be a table")]
  NotATable { path: PathBuf },

  #[error("{path}: {source}")]
  Convert {
    path: PathBuf,
    #[source]
    source: SettingsError,
  },

  #[error(transparent)]
  Options(#[from] OptionsError),
}

/// Format of a configuration layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerFormat {
  Toml,
  Json,
}

impl LayerFormat {
  /// Pick the format from the file extension.
  pub fn from_path(path: &Path) -> Option<Self> {
    match path.extension()?.to_str()? {
      "toml" => Some(Self::Toml),
      "json" => Some(Self::Json),
      _ => None,
    }
  }
}

/// Parse one layer. `origin` is only used in error messages.
pub fn parse_layer(content: &str, format: LayerFormat, origin: &Path) -> Result<Table, EvalError> {
  let value = match format {
    LayerFormat::Toml => {
      let table: toml::Table = toml::from_str(content).map_err(|source| EvalError::ParseToml {
        path: origin.to_path_buf(),
        source,
      })?;
      convert::from_toml(toml::Value::Table(table), "")
    }
    LayerFormat::Json => {
      let json: serde_json::Value = serde_json::from_str(content).map_err(|source| EvalError::ParseJson {
        path: origin.to_path_buf(),
        source,
      })?;
      if !json.is_object() {
        return Err(EvalError::NotATable {
          path: origin.to_path_buf(),
        });
      }
      convert::from_json(json, "")
    }
  }
  .map_err(|source| EvalError::Convert {
    path: origin.to_path_buf(),
    source,
  })?;

  match value {
    Value::Table(table) => Ok(table),
    _ => Err(EvalError::NotATable {
      path: origin.to_path_buf(),
    }),
  }
}

/// Read and parse one layer from disk.
pub fn load_layer(path: &Path) -> Result<Table, EvalError> {
  let format = LayerFormat::from_path(path).ok_or_else(|| EvalError::UnsupportedFormat {
    path: path.to_path_buf(),
  })?;
  let content = fs::read_to_string(path).map_err(|source| EvalError::Read {
    path: path.to_path_buf(),
    source,
  })?;
  debug!(path = %path.display(), ?format, "loaded config layer");
  parse_layer(&content, format, path)
}

/// Merge layers in order; later layers override earlier ones.
pub fn merge_layers(layers: impl IntoIterator<Item = Table>) -> Table {
  let mut merged = Value::Table(Table::new());
  for layer in layers {
    merged.merge(Value::Table(layer));
  }
  match merged {
    Value::Table(table) => table,
    // Merging a table into a table always yields a table.
    _ => Table::new(),
  }
}

/// Decode the tool's options from a merged host configuration tree.
pub fn extract_options(tree: &Table) -> Result<ProgramOptions, EvalError> {
  let Some(programs) = tree.get(PROGRAMS_NAMESPACE) else {
    return Ok(ProgramOptions::default());
  };
  let programs = programs.as_table().ok_or_else(|| OptionsError::TypeMismatch {
    option: PROGRAMS_NAMESPACE.to_string(),
    expected: "table",
    found: programs.type_name(),
  })?;
  match programs.get(TOOL_NAME) {
    Some(value) => Ok(ProgramOptions::from_value(value)?),
    None => Ok(ProgramOptions::default()),
  }
}

/// Evaluate the host configuration made of `paths`, in order.
///
/// # Example
/// ```ignore
/// use std::path::PathBuf;
/// use gsm_module_lib::eval::evaluate;
///
/// let options = evaluate(&[PathBuf::from("home.toml"), PathBuf::from("local.toml")])?;
/// println!("enabled: {}", options.enable);
/// ```
pub fn evaluate(paths: &[PathBuf]) -> Result<ProgramOptions, EvalError> {
  let layers = paths
    .iter()
    .map(|p| load_layer(p))
    .collect::<Result<Vec<_>, _>>()?;
  let tree = merge_layers(layers);
  let options = extract_options(&tree)?;
  info!(
    layers = paths.len(),
    enable = options.enable,
    settings = options.settings.len(),
    "evaluated host configuration"
  );
  Ok(options)
}

/// Evaluate a single in-memory TOML host configuration.
pub fn evaluate_str(content: &str) -> Result<ProgramOptions, EvalError> {
  let tree = parse_layer(content, LayerFormat::Toml, Path::new("<string>"))?;
  extract_options(&tree)
}

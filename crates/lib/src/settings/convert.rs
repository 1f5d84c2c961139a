//! Conversions between settings values and the TOML/JSON trees they are
//! parsed from or rendered to.
//!
//! Input conversions are fallible: JSON `null`, TOML datetimes and integers
//! that do not fit an `i64` have no place in the settings model. Errors carry
//! the dotted key path of the offending value.

use super::{SettingsError, Table, Value};

fn child_path(parent: &str, key: &str) -> String {
  if parent.is_empty() {
    key.to_string()
  } else {
    format!("{}.{}", parent, key)
  }
}

fn index_path(parent: &str, index: usize) -> String {
  format!("{}[{}]", parent, index)
}

/// Convert a parsed TOML value, reporting errors relative to `path`.
pub fn from_toml(value: toml::Value, path: &str) -> Result<Value, SettingsError> {
  Ok(match value {
    toml::Value::String(s) => Value::String(s),
    toml::Value::Integer(n) => Value::Integer(n),
    toml::Value::Float(n) => Value::Float(n),
    toml::Value::Boolean(b) => Value::Boolean(b),
    toml::Value::Datetime(_) => {
      return Err(SettingsError::Unrepresentable {
        path: path.to_string(),
        kind: "datetime",
      });
    }
    toml::Value::Array(items) => Value::Array(
      items
        .into_iter()
        .enumerate()
        .map(|(i, item)| from_toml(item, &index_path(path, i)))
        .collect::<Result<_, _>>()?,
    ),
    toml::Value::Table(table) => Value::Table(from_toml_table(table, path)?),
  })
}

pub fn from_toml_table(table: toml::Table, path: &str) -> Result<Table, SettingsError> {
  table
    .into_iter()
    .map(|(key, value)| {
      let converted = from_toml(value, &child_path(path, &key))?;
      Ok((key, converted))
    })
    .collect()
}

/// Convert a parsed JSON value, reporting errors relative to `path`.
pub fn from_json(value: serde_json::Value, path: &str) -> Result<Value, SettingsError> {
  Ok(match value {
    serde_json::Value::Null => {
      return Err(SettingsError::Unrepresentable {
        path: path.to_string(),
        kind: "null",
      });
    }
    serde_json::Value::Bool(b) => Value::Boolean(b),
    serde_json::Value::Number(n) => {
      if let Some(i) = n.as_i64() {
        Value::Integer(i)
      } else if n.is_u64() {
        return Err(SettingsError::Unrepresentable {
          path: path.to_string(),
          kind: "integer above i64::MAX",
        });
      } else {
        // Non-integral numbers are always representable as f64.
        Value::Float(n.as_f64().unwrap_or(f64::NAN))
      }
    }
    serde_json::Value::String(s) => Value::String(s),
    serde_json::Value::Array(items) => Value::Array(
      items
        .into_iter()
        .enumerate()
        .map(|(i, item)| from_json(item, &index_path(path, i)))
        .collect::<Result<_, _>>()?,
    ),
    serde_json::Value::Object(map) => Value::Table(
      map
        .into_iter()
        .map(|(key, value)| {
          let converted = from_json(value, &child_path(path, &key))?;
          Ok((key, converted))
        })
        .collect::<Result<_, SettingsError>>()?,
    ),
  })
}

/// Convert to a TOML value. Every settings value has a TOML counterpart.
pub fn to_toml(value: &Value) -> toml::Value {
  match value {
    Value::String(s) => toml::Value::String(s.clone()),
    Value::Integer(n) => toml::Value::Integer(*n),
    Value::Float(n) => toml::Value::Float(*n),
    Value::Boolean(b) => toml::Value::Boolean(*b),
    Value::Array(items) => toml::Value::Array(items.iter().map(to_toml).collect()),
    Value::Table(table) => toml::Value::Table(to_toml_table(table)),
  }
}

pub fn to_toml_table(table: &Table) -> toml::Table {
  table.iter().map(|(k, v)| (k.clone(), to_toml(v))).collect()
}

//! Settings document types.
//!
//! A [`Value`] is the tagged union of everything the tool's TOML file can
//! hold: strings, integers, floats, booleans, arrays and nested tables.
//! [`Settings`] is the top-level table handed to the tool.
//!
//! Tables are [`BTreeMap`]s, so keys are unique per level and rendering is
//! deterministic regardless of the order the user wrote them in.

use std::collections::BTreeMap;

use serde::Serialize;

/// A nested mapping level of a document.
pub type Table = BTreeMap<String, Value>;

/// A single document value.
///
/// # Example
///
/// ```toml
/// editor = "nvim"                       # String
/// sendmail_args = ["--to=a@b.com"]      # Array
///
/// [ci]                                  # Table
/// retries = 3                           # Integer
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
  String(String),
  Integer(i64),
  Float(f64),
  Boolean(bool),
  Array(Vec<Value>),
  Table(Table),
}

impl Value {
  /// Human readable name of the variant, used in type errors.
  pub fn type_name(&self) -> &'static str {
    match self {
      Value::String(_) => "string",
      Value::Integer(_) => "integer",
      Value::Float(_) => "float",
      Value::Boolean(_) => "boolean",
      Value::Array(_) => "array",
      Value::Table(_) => "table",
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Value::String(s) => Some(s),
      _ => None,
    }
  }

  pub fn as_bool(&self) -> Option<bool> {
    match self {
      Value::Boolean(b) => Some(*b),
      _ => None,
    }
  }

  pub fn as_table(&self) -> Option<&Table> {
    match self {
      Value::Table(t) => Some(t),
      _ => None,
    }
  }

  /// Merge `other` into `self`.
  ///
  /// Tables merge key by key, recursively. Anything else, arrays included,
  /// is replaced by `other`.
  pub fn merge(&mut self, other: Value) {
    match (self, other) {
      (Value::Table(base), Value::Table(other)) => {
        for (key, other_val) in other {
          match base.get_mut(&key) {
            Some(base_val) => base_val.merge(other_val),
            None => {
              base.insert(key, other_val);
            }
          }
        }
      }
      (base, other) => *base = other,
    }
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self {
    Value::String(s.to_string())
  }
}

impl From<String> for Value {
  fn from(s: String) -> Self {
    Value::String(s)
  }
}

impl From<i64> for Value {
  fn from(n: i64) -> Self {
    Value::Integer(n)
  }
}

impl From<f64> for Value {
  fn from(n: f64) -> Self {
    Value::Float(n)
  }
}

impl From<bool> for Value {
  fn from(b: bool) -> Self {
    Value::Boolean(b)
  }
}

impl<V: Into<Value>> From<Vec<V>> for Value {
  fn from(items: Vec<V>) -> Self {
    Value::Array(items.into_iter().map(Into::into).collect())
  }
}

impl From<Table> for Value {
  fn from(table: Table) -> Self {
    Value::Table(table)
  }
}

/// The settings document rendered into the tool's config file.
///
/// Defaults to an empty table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Settings(Table);

impl Settings {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, key: &str) -> Option<&Value> {
    self.0.get(key)
  }

  /// Insert a top-level key, returning the previous value if any.
  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
    self.0.insert(key.into(), value.into())
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn as_table(&self) -> &Table {
    &self.0
  }
}

impl From<Table> for Settings {
  fn from(table: Table) -> Self {
    Self(table)
  }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Settings {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
  }
}

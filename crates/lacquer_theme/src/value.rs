//! Open-ended theme values
//!
//! Themes are arbitrarily nested string-keyed mappings with no required
//! shape. [`Value`] is the runtime representation shared by themes, style
//! maps, and attribute payloads; containers sit behind `Arc` so the merge
//! utility can preserve and compare allocation identity.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// String-keyed map of values
pub type ValueMap = FxHashMap<String, Value>;

/// An open-ended, arbitrarily nested value
///
/// Containers (`List`, `Map`) are reference-counted: cloning is cheap and
/// two values can be compared for allocation identity with
/// [`Value::identity_eq`], which is what keeps deep-merge referentially
/// stable for memoizing consumers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
    List(Arc<Vec<Value>>),
    Map(Arc<ValueMap>),
}

impl Value {
    /// Empty map value
    pub fn empty_map() -> Value {
        Value::Map(Arc::new(ValueMap::default()))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for `Bool`, `Num`, and `Str`
    pub fn is_primitive(&self) -> bool {
        matches!(self, Value::Bool(_) | Value::Num(_) | Value::Str(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_num(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Truthiness: `Null`, `false`, `0`, `NaN`, and `""` are falsy;
    /// containers are always truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Num(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::List(_) | Value::Map(_) => true,
        }
    }

    /// Allocation-identity comparison.
    ///
    /// Containers compare by `Arc` pointer, primitives by value. This is
    /// the contract deep-merge uses to decide whether anything changed.
    pub fn identity_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Num(a), Value::Num(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => Arc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Value {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Value {
        Value::Num(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Value {
        Value::Num(value as f64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Value {
        Value::Num(value as f64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Value {
        Value::Num(value as f64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Value {
        Value::Num(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Value {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Value {
        Value::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Value {
        Value::List(Arc::new(value))
    }
}

impl From<ValueMap> for Value {
    fn from(value: ValueMap) -> Value {
        Value::Map(Arc::new(value))
    }
}

impl From<Theme> for Value {
    fn from(theme: Theme) -> Value {
        theme.root
    }
}

/// Errors from loading a theme document
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("failed to parse theme document: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("theme document root must be a table")]
    RootNotATable,
}

/// The globally shared, deeply-mergeable configuration object consumed by
/// style-resolution functions.
///
/// A theme is just a [`Value::Map`] root with dot-path accessors; consumers
/// decide its shape. Cloning is cheap (the root is reference-counted).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme {
    root: Value,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::new()
    }
}

impl Theme {
    /// Empty theme
    pub fn new() -> Theme {
        Theme {
            root: Value::empty_map(),
        }
    }

    /// Wrap a root value. Callers are expected to pass a `Value::Map`;
    /// anything else behaves as an empty theme for path lookups.
    pub fn from_value(root: Value) -> Theme {
        Theme { root }
    }

    /// Parse a TOML theme document
    pub fn from_toml_str(document: &str) -> Result<Theme, ThemeError> {
        let root: Value = toml::from_str(document)?;
        if root.as_map().is_none() {
            return Err(ThemeError::RootNotATable);
        }
        Ok(Theme { root })
    }

    /// Root value of the theme
    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.as_map().map_or(true, |map| map.is_empty())
    }

    /// Look up a value by dot-separated path (`"colors.primary"`)
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut current = &self.root;
        for segment in path.split('.') {
            current = current.as_map()?.get(segment)?;
        }
        Some(current)
    }

    /// String value at `path`
    pub fn str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// Numeric value at `path`
    pub fn num(&self, path: &str) -> Option<f64> {
        self.get(path).and_then(Value::as_num)
    }

    /// Boolean value at `path`
    pub fn bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(Value::as_bool)
    }
}

/// Build a [`Value`] literal.
///
/// Map and list values nest; every other value must be a single token
/// (literal) or a parenthesized expression:
///
/// ```ignore
/// let accent = value!({ color: "#007AFF", weight: 600, hidden: false });
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::Value::Null
    };
    ([ $($element:tt),* $(,)? ]) => {
        $crate::Value::List(::std::sync::Arc::new(vec![ $( $crate::value!($element) ),* ]))
    };
    ({ $($key:tt : $val:tt),* $(,)? }) => {{
        #[allow(unused_mut)]
        let mut map = $crate::ValueMap::default();
        $( map.insert($crate::value_key!($key).to_string(), $crate::value!($val)); )*
        $crate::Value::Map(::std::sync::Arc::new(map))
    }};
    ($other:expr) => {
        $crate::Value::from($other)
    };
}

/// Map key helper for [`value!`]: bare identifiers (including keywords such
/// as `type`) or string literals.
#[doc(hidden)]
#[macro_export]
macro_rules! value_key {
    ($key:literal) => {
        $key
    };
    ($key:tt) => {
        stringify!($key)
    };
}

/// Build a [`Theme`] literal.
///
/// ```ignore
/// let theme = theme! {
///     colors: { primary: "#007AFF", background: "#FFFFFF" },
///     spacing: { unit: 4 },
/// };
/// ```
#[macro_export]
macro_rules! theme {
    () => {
        $crate::Theme::new()
    };
    ($($tokens:tt)+) => {
        $crate::Theme::from_value($crate::value!({ $($tokens)+ }))
    };
}

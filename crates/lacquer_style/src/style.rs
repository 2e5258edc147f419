//! Style maps and the render-time style stack
//!
//! A [`Style`] is a flat map of property name to value; the engine neither
//! knows nor validates property names (it is not a style-sheet language).
//! Rules contribute styles in insertion order and the chain collapses with
//! later entries winning per property.

use lacquer_theme::{Value, ValueMap};
use smallvec::SmallVec;

/// A set of style properties
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    entries: ValueMap,
}

impl Style {
    pub fn new() -> Style {
        Style::default()
    }

    /// Adopt the entries of a `Value::Map` (anything else is empty).
    ///
    /// Handy for style functions that pull whole maps out of the theme:
    /// `Style::from_value(ctx.theme.get("button.base"))`.
    pub fn from_value(value: Option<&Value>) -> Style {
        match value.and_then(Value::as_map) {
            Some(map) => Style {
                entries: (*map).clone(),
            },
            None => Style::new(),
        }
    }

    /// Set a property (chainable)
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Style {
        self.entries.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &ValueMap {
        &self.entries
    }

    /// Overwrite with every property of `other`
    pub(crate) fn apply(&mut self, other: &Style) {
        for (name, value) in other.entries.iter() {
            self.entries.insert(name.clone(), value.clone());
        }
    }
}

impl From<ValueMap> for Style {
    fn from(entries: ValueMap) -> Style {
        Style { entries }
    }
}

/// Ordered style layers handed to the host, `[computed, direct]`.
///
/// Both layers are preserved so the host can keep them distinct (some
/// runtimes diff per layer); [`flatten`](Self::flatten) is the default
/// collapse, later layers winning per property.
#[derive(Clone, Debug, Default)]
pub struct StyleStack {
    layers: SmallVec<[Style; 2]>,
}

impl StyleStack {
    pub fn new() -> StyleStack {
        StyleStack::default()
    }

    pub fn push(&mut self, style: Style) {
        self.layers.push(style);
    }

    pub fn layers(&self) -> &[Style] {
        &self.layers
    }

    /// Collapse into one style, later layers winning per property
    pub fn flatten(&self) -> Style {
        let mut flat = Style::new();
        for layer in self.layers.iter() {
            flat.apply(layer);
        }
        flat
    }
}

/// Build a [`Style`] literal.
///
/// Same value grammar as `lacquer_theme::value!`: nested maps and lists,
/// single-token literals, or parenthesized expressions.
///
/// ```ignore
/// let base = style! { color: "#FFFFFF", padding: 12 };
/// ```
#[macro_export]
macro_rules! style {
    () => {
        $crate::Style::new()
    };
    ($($key:tt : $val:tt),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut style = $crate::Style::new();
        $( style = style.set($crate::value_key!($key), $crate::value!($val)); )*
        style
    }};
}

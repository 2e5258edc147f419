//! Attribute payloads for rules
//!
//! A rule contributes up to three things: named attribute overrides, style
//! properties (joining the same left-to-right overwrite chain as style
//! rules), and a ref redirection.

use lacquer_theme::{Value, ValueMap};

use crate::element::NodeRef;
use crate::style::Style;

/// Attribute overrides contributed by a `when`/`attrs` rule
#[derive(Clone, Debug, Default)]
pub struct Attrs {
    pub(crate) values: ValueMap,
    pub(crate) style: Option<Style>,
    pub(crate) node_ref: Option<NodeRef>,
}

impl Attrs {
    pub fn new() -> Attrs {
        Attrs::default()
    }

    /// Set a named attribute (chainable)
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Attrs {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Contribute style properties into the resolution's style chain
    pub fn style(mut self, style: Style) -> Attrs {
        self.style = Some(style);
        self
    }

    /// Redirect the mounted ref; across triggered rules the last one wins,
    /// and it replaces the externally forwarded ref
    pub fn node_ref(mut self, node_ref: NodeRef) -> Attrs {
        self.node_ref = Some(node_ref);
        self
    }

    pub fn values(&self) -> &ValueMap {
        &self.values
    }

    /// No attributes, no style, no ref: contributes nothing
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.style.is_none() && self.node_ref.is_none()
    }
}

impl From<Style> for Attrs {
    fn from(style: Style) -> Attrs {
        Attrs::new().style(style)
    }
}

//! Direct component props
//!
//! What a caller passes to a styled component at render time: named values
//! (read by conditions, style functions, and the hasher) plus the two
//! specially-routed channels, `style` and the forwarded ref.

use lacquer_theme::{Value, ValueMap};

use crate::element::NodeRef;
use crate::style::Style;

/// Props passed directly to a styled component at render time
#[derive(Clone, Debug, Default)]
pub struct Props {
    pub(crate) values: ValueMap,
    pub(crate) style: Option<Style>,
    pub(crate) node_ref: Option<NodeRef>,
}

impl Props {
    pub fn new() -> Props {
        Props::default()
    }

    /// Set a named prop (chainable)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Props {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Style passed directly by the caller; layered after the computed
    /// style so it wins visually while both are preserved
    pub fn with_style(mut self, style: Style) -> Props {
        self.style = Some(style);
        self
    }

    /// Forwarded ref for the mounted node
    pub fn with_node_ref(mut self, node_ref: NodeRef) -> Props {
        self.node_ref = Some(node_ref);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn values(&self) -> &ValueMap {
        &self.values
    }

    pub fn style(&self) -> Option<&Style> {
        self.style.as_ref()
    }

    pub fn node_ref(&self) -> Option<&NodeRef> {
        self.node_ref.as_ref()
    }
}

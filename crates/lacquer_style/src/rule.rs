//! Ordered styling rules
//!
//! Rules are immutable once pushed onto a builder; their insertion order
//! determines both style concatenation order and attribute-merge
//! precedence.

use std::sync::Arc;

use crate::attrs::Attrs;
use crate::condition::Condition;
use crate::context::ResolveContext;
use crate::style::Style;

/// Style payload: a literal or a function of the resolution context
#[derive(Clone)]
pub enum StyleSource {
    Value(Style),
    Fn(Arc<dyn Fn(&ResolveContext<'_>) -> Style + Send + Sync>),
}

impl StyleSource {
    pub(crate) fn resolve(&self, ctx: &ResolveContext<'_>) -> Style {
        match self {
            StyleSource::Value(style) => style.clone(),
            StyleSource::Fn(f) => f(ctx),
        }
    }
}

/// Attribute payload: a literal or a function of the resolution context
#[derive(Clone)]
pub enum AttrSource {
    Value(Attrs),
    Fn(Arc<dyn Fn(&ResolveContext<'_>) -> Attrs + Send + Sync>),
}

impl AttrSource {
    pub(crate) fn resolve(&self, ctx: &ResolveContext<'_>) -> Attrs {
        match self {
            AttrSource::Value(attrs) => attrs.clone(),
            AttrSource::Fn(f) => f(ctx),
        }
    }
}

/// One ordered unit of styling or attribute logic held by a builder
#[derive(Clone)]
pub enum Rule {
    /// Always contributes style
    Style(StyleSource),
    /// Contributes attributes (and possibly style) when the condition holds
    When(Condition, AttrSource),
    /// Unconditionally contributes attributes
    Attrs(Attrs),
}

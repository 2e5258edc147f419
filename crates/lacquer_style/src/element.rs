//! Host render boundary
//!
//! The engine never renders anything itself. It computes a [`RenderFrame`]
//! for a base [`Primitive`] and hands both to whatever [`RenderHost`] the
//! embedding framework provides. Re-rendering on theme changes is likewise
//! the host's job (see `lacquer_theme::ThemeBinding`).

use std::fmt;
use std::sync::{Arc, Mutex};

use lacquer_theme::ValueMap;

use crate::style::StyleStack;

/// Identifier of a mounted host node
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HostNodeId(pub u64);

/// Cloneable handle the host fills in at mount time.
///
/// Clones share one slot; [`NodeRef::same`] compares that shared identity,
/// which is how tests (and ref-forwarding call sites) tell which ref won.
#[derive(Clone, Default)]
pub struct NodeRef {
    slot: Arc<Mutex<Option<HostNodeId>>>,
}

impl NodeRef {
    pub fn new() -> NodeRef {
        NodeRef::default()
    }

    /// The mounted node, if the host has filled the slot
    pub fn get(&self) -> Option<HostNodeId> {
        *self.slot.lock().unwrap()
    }

    /// Record the mounted node (called by the host)
    pub fn set(&self, id: HostNodeId) {
        *self.slot.lock().unwrap() = Some(id);
    }

    /// Do both handles share one slot?
    pub fn same(a: &NodeRef, b: &NodeRef) -> bool {
        Arc::ptr_eq(&a.slot, &b.slot)
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeRef").field(&self.get()).finish()
    }
}

/// A pre-existing UI primitive the host runtime knows how to mount
pub trait Primitive: Send + Sync + 'static {
    /// Stable primitive name ("view", "text", ...)
    fn tag(&self) -> &str;
}

/// Minimal primitive identified by its tag alone
#[derive(Clone, Debug)]
pub struct TagPrimitive {
    tag: String,
}

impl Primitive for TagPrimitive {
    fn tag(&self) -> &str {
        &self.tag
    }
}

/// Shorthand for a [`TagPrimitive`]
pub fn primitive(tag: impl Into<String>) -> TagPrimitive {
    TagPrimitive { tag: tag.into() }
}

/// Everything the host needs to mount a styled primitive
#[derive(Clone, Debug, Default)]
pub struct RenderFrame {
    /// Merged attributes: rule-derived first, direct props overriding on
    /// key collision
    pub attrs: ValueMap,
    /// Style layers `[computed, direct]`; collapse with
    /// [`StyleStack::flatten`] unless the host has its own flattening
    pub style: StyleStack,
    /// Ref to fill at mount; a rule-supplied override beats the forwarded
    /// ref
    pub node_ref: Option<NodeRef>,
}

/// Host runtime capability: mount a primitive with a resolved frame
pub trait RenderHost {
    type Node;

    fn mount(&mut self, primitive: &dyn Primitive, frame: RenderFrame) -> Self::Node;
}

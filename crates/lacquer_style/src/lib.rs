//! Lacquer Style Engine
//!
//! Rule-based style resolution for pre-existing UI primitives: chainable
//! builders accumulate ordered style/condition/attribute rules, resolve
//! them against a per-render context (theme, props, platform), and cache
//! the merged result per theme revision.
//!
//! # Overview
//!
//! - **Builder**: [`styled`] starts a chain; `style` / `when` / `attrs`
//!   append rules; `extend` copies the chain; `build` freezes it into a
//!   renderable [`Styled`] wrapper
//! - **Conditions**: platform tags, `key:value` prop matches, truthy prop
//!   checks, and arbitrary predicates ([`Condition`])
//! - **Resolution**: strict insertion-order evaluation, later rules
//!   overriding earlier ones per key, memoized by a lossy context hash in
//!   a bounded LRU cache
//! - **Host boundary**: the engine computes a [`RenderFrame`]; mounting
//!   and re-rendering belong to the embedding runtime ([`RenderHost`],
//!   `lacquer_theme::ThemeBinding`)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lacquer_style::{primitive, style, styled, Attrs, Props};
//! use lacquer_theme::{set_theme, theme};
//!
//! set_theme(theme! { colors: { primary: "#007AFF" } });
//!
//! let button = styled(primitive("view"))
//!     .style(style! { padding: 12 })
//!     .style_with(|ctx| {
//!         style! { color: (ctx.theme.str("colors.primary").unwrap_or("#000")) }
//!     })
//!     .when("variant:primary", style! { fontWeight: 600 })
//!     .when("disabled", Attrs::new().set("aria-disabled", true))
//!     .build();
//!
//! let frame = button.frame(Props::new().with("variant", "primary"));
//! ```

pub mod attrs;
pub mod cache;
pub mod condition;
pub mod context;
pub mod element;
pub mod hash;
pub mod props;
pub mod rule;
pub mod style;
pub mod styled;

pub use attrs::Attrs;
pub use cache::DEFAULT_CACHE_CAPACITY;
pub use condition::{Condition, ConditionFn};
pub use context::ResolveContext;
pub use element::{
    primitive, HostNodeId, NodeRef, Primitive, RenderFrame, RenderHost, TagPrimitive,
};
pub use hash::{hash_context, is_cache_key_prop, CACHE_KEY_PROPS};
pub use props::Props;
pub use rule::{AttrSource, Rule, StyleSource};
pub use style::{Style, StyleStack};
pub use styled::{styled, styled_with, Resolved, Styled, StyleBuilder};

// Macro support: `style!` builds its values with the theme crate's value
// grammar.
#[doc(hidden)]
pub use lacquer_theme::{value, value_key};

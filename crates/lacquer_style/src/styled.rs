//! Chainable styling builder and resolution engine
//!
//! The entry point for attaching computed styles and conditional
//! attributes to a base primitive:
//!
//! ```ignore
//! use lacquer_style::{primitive, styled, style, Condition};
//!
//! let button = styled(primitive("view"))
//!     .style(style! { padding: 12 })
//!     .style_with(|ctx| style! { color: (ctx.theme.str("colors.primary").unwrap_or("#000")) })
//!     .when("disabled", Attrs::new().set("aria-disabled", true))
//!     .build();
//! ```
//!
//! `build()` freezes the rule list and creates the resolution cache; the
//! resulting [`Styled`] wrapper is the renderable component. Resolution
//! runs at most once per distinct context per theme revision; repeat
//! renders reuse the cached result verbatim.

use std::sync::Arc;

use lacquer_theme::{Platform, ThemeSnapshot, ThemeStore, ValueMap};
use smallvec::SmallVec;

use crate::attrs::Attrs;
use crate::cache::{ResolveCache, DEFAULT_CACHE_CAPACITY};
use crate::condition::Condition;
use crate::context::ResolveContext;
use crate::element::{NodeRef, Primitive, RenderFrame, RenderHost};
use crate::hash::hash_context;
use crate::props::Props;
use crate::rule::{AttrSource, Rule, StyleSource};
use crate::style::{Style, StyleStack};

/// Start a styling chain over a base primitive
pub fn styled<P: Primitive>(base: P) -> StyleBuilder<P> {
    StyleBuilder {
        base: Arc::new(base),
        rules: Vec::new(),
        cache_capacity: DEFAULT_CACHE_CAPACITY,
    }
}

/// Start a styling chain with an initial style rule
pub fn styled_with<P: Primitive>(base: P, style: impl Into<Style>) -> StyleBuilder<P> {
    styled(base).style(style.into())
}

/// Accumulates ordered styling rules for a base primitive.
///
/// Chain methods mutate in place and return the builder; [`extend`](Self::extend)
/// instead returns an independent copy of the accumulated rules.
pub struct StyleBuilder<P> {
    base: Arc<P>,
    rules: Vec<Rule>,
    cache_capacity: usize,
}

impl<P: Primitive> StyleBuilder<P> {
    /// Append a literal style rule
    pub fn style(mut self, style: impl Into<Style>) -> Self {
        self.rules.push(Rule::Style(StyleSource::Value(style.into())));
        self
    }

    /// Append a computed style rule
    pub fn style_with(
        mut self,
        f: impl Fn(&ResolveContext<'_>) -> Style + Send + Sync + 'static,
    ) -> Self {
        self.rules.push(Rule::Style(StyleSource::Fn(Arc::new(f))));
        self
    }

    /// Append a conditional attribute rule. The payload participates in
    /// the same left-to-right overwrite chain as every other rule.
    pub fn when(mut self, condition: impl Into<Condition>, attrs: impl Into<Attrs>) -> Self {
        self.rules
            .push(Rule::When(condition.into(), AttrSource::Value(attrs.into())));
        self
    }

    /// Append a conditional attribute rule with a computed payload
    pub fn when_with(
        mut self,
        condition: impl Into<Condition>,
        f: impl Fn(&ResolveContext<'_>) -> Attrs + Send + Sync + 'static,
    ) -> Self {
        self.rules
            .push(Rule::When(condition.into(), AttrSource::Fn(Arc::new(f))));
        self
    }

    /// Append an unconditional attribute rule
    pub fn attrs(mut self, attrs: impl Into<Attrs>) -> Self {
        self.rules.push(Rule::Attrs(attrs.into()));
        self
    }

    /// Override the resolution cache capacity (default 300 entries)
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Independent builder seeded with a copy of the current rule list;
    /// subsequent mutations of either builder do not affect the other
    pub fn extend(&self) -> StyleBuilder<P> {
        StyleBuilder {
            base: Arc::clone(&self.base),
            rules: self.rules.clone(),
            cache_capacity: self.cache_capacity,
        }
    }

    /// Freeze the rule list into a renderable wrapper.
    ///
    /// Clones of the returned [`Styled`] are independent wrapper instances
    /// sharing the same rule list and cache.
    pub fn build(self) -> Styled<P> {
        Styled {
            inner: Arc::new(StyledInner {
                base: self.base,
                rules: self.rules.into_boxed_slice(),
                cache: ResolveCache::new(self.cache_capacity),
                cache_capacity: self.cache_capacity,
            }),
        }
    }
}

struct StyledInner<P> {
    base: Arc<P>,
    rules: Box<[Rule]>,
    cache: ResolveCache,
    cache_capacity: usize,
}

/// Output of rule resolution, cached per context hash
#[derive(Clone, Debug)]
pub struct Resolved {
    /// Flattened style from every style rule (and triggered conditional
    /// style contributions), in insertion order
    pub style: Style,
    /// Accumulated attribute overrides, later rules winning per key
    pub attrs: ValueMap,
    /// Ref override from the last triggered rule that carried one
    pub node_ref: Option<NodeRef>,
}

/// A renderable styled component: a base primitive plus frozen rules and a
/// resolution cache
pub struct Styled<P> {
    inner: Arc<StyledInner<P>>,
}

impl<P> Clone for Styled<P> {
    fn clone(&self) -> Self {
        Styled {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: Primitive> Styled<P> {
    /// The base primitive this wrapper styles
    pub fn base(&self) -> &P {
        &self.inner.base
    }

    /// Reopen a builder seeded with a copy of this wrapper's rules
    /// (fresh cache)
    pub fn extend(&self) -> StyleBuilder<P> {
        StyleBuilder {
            base: Arc::clone(&self.inner.base),
            rules: self.inner.rules.to_vec(),
            cache_capacity: self.inner.cache_capacity,
        }
    }

    /// Resolve against the live theme and the current platform
    pub fn resolve(&self, props: &Props) -> Arc<Resolved> {
        let snapshot = ThemeStore::global().snapshot();
        self.resolve_with(&snapshot, props, Platform::current())
    }

    /// Resolve against an explicit theme snapshot and platform.
    ///
    /// Computation runs at most once per distinct context hash per theme
    /// revision; a hit returns the cached result verbatim.
    pub fn resolve_with(
        &self,
        snapshot: &ThemeSnapshot,
        props: &Props,
        platform: Platform,
    ) -> Arc<Resolved> {
        let ctx = ResolveContext::new(snapshot, props, platform);
        let key = hash_context(&ctx);
        if let Some(cached) = self.inner.cache.get(ctx.revision, &key) {
            tracing::trace!(key = %key, "resolution cache hit");
            return cached;
        }
        let resolved = Arc::new(self.run_rules(&ctx));
        self.inner.cache.insert(ctx.revision, key, Arc::clone(&resolved));
        resolved
    }

    fn run_rules(&self, ctx: &ResolveContext<'_>) -> Resolved {
        let mut style_chain: SmallVec<[Style; 4]> = SmallVec::new();
        let mut attrs = ValueMap::default();
        let mut node_ref = None;

        for rule in self.inner.rules.iter() {
            match rule {
                Rule::Style(source) => style_chain.push(source.resolve(ctx)),
                Rule::When(condition, source) => {
                    if condition.evaluate(ctx) {
                        apply_attrs(&source.resolve(ctx), &mut style_chain, &mut attrs, &mut node_ref);
                    }
                }
                Rule::Attrs(value) => {
                    apply_attrs(value, &mut style_chain, &mut attrs, &mut node_ref)
                }
            }
        }

        let mut style = Style::new();
        for layer in style_chain.iter() {
            style.apply(layer);
        }

        Resolved {
            style,
            attrs,
            node_ref,
        }
    }

    /// Final render frame for the given direct props, against the live
    /// theme and current platform.
    ///
    /// Rule-derived attributes are laid down first and direct props
    /// override them per key — except `style`, which is layered as
    /// `[computed, direct]`, and the forwarded ref, which a rule-supplied
    /// override replaces.
    pub fn frame(&self, props: Props) -> RenderFrame {
        let snapshot = ThemeStore::global().snapshot();
        self.frame_with(&snapshot, props, Platform::current())
    }

    /// [`frame`](Self::frame) against an explicit snapshot and platform
    pub fn frame_with(
        &self,
        snapshot: &ThemeSnapshot,
        props: Props,
        platform: Platform,
    ) -> RenderFrame {
        let resolved = self.resolve_with(snapshot, &props, platform);

        let mut attrs = resolved.attrs.clone();
        for (key, value) in props.values.iter() {
            attrs.insert(key.clone(), value.clone());
        }

        let mut style = StyleStack::new();
        style.push(resolved.style.clone());
        if let Some(direct) = props.style {
            style.push(direct);
        }

        let node_ref = resolved.node_ref.clone().or(props.node_ref);

        RenderFrame {
            attrs,
            style,
            node_ref,
        }
    }

    /// Mount through a host runtime
    pub fn mount_in<H: RenderHost>(&self, host: &mut H, props: Props) -> H::Node {
        let frame = self.frame(props);
        host.mount(self.inner.base.as_ref(), frame)
    }
}

fn apply_attrs(
    source: &Attrs,
    style_chain: &mut SmallVec<[Style; 4]>,
    attrs: &mut ValueMap,
    node_ref: &mut Option<NodeRef>,
) {
    if let Some(style) = &source.style {
        style_chain.push(style.clone());
    }
    for (key, value) in source.values.iter() {
        attrs.insert(key.clone(), value.clone());
    }
    if let Some(reference) = &source.node_ref {
        *node_ref = Some(reference.clone());
    }
}

//! Per-render resolution context
//!
//! Constructed fresh for every resolution and never stored beyond it; the
//! same triple feeds the hasher and every style/condition/attrs function.

use lacquer_theme::{Platform, Theme, ThemeSnapshot, Value};

use crate::props::Props;

/// The {theme, props, platform} triple passed to rule functions and the
/// hasher
#[derive(Clone, Copy, Debug)]
pub struct ResolveContext<'a> {
    pub theme: &'a Theme,
    /// Theme identity token (see `ThemeSnapshot::revision`)
    pub revision: u64,
    pub props: &'a Props,
    pub platform: Platform,
}

impl<'a> ResolveContext<'a> {
    pub fn new(snapshot: &'a ThemeSnapshot, props: &'a Props, platform: Platform) -> Self {
        ResolveContext {
            theme: snapshot.theme(),
            revision: snapshot.revision(),
            props,
            platform,
        }
    }

    /// Named prop lookup
    pub fn prop(&self, key: &str) -> Option<&'a Value> {
        self.props.get(key)
    }
}

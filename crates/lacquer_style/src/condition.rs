//! Condition expressions for conditional rules
//!
//! Conditions are decided at rule-construction time, not re-parsed per
//! resolution. String forms degrade silently: anything that is neither a
//! reserved platform tag nor a single `key:value` pair becomes a
//! truthiness check on the whole string as a prop name, which simply
//! evaluates false when no such prop exists.

use std::fmt;
use std::sync::Arc;

use lacquer_theme::{Platform, Value};

use crate::context::ResolveContext;

/// Predicate function form of a condition
pub type ConditionFn = Arc<dyn Fn(&ResolveContext<'_>) -> bool + Send + Sync>;

/// A condition attached to a `when` rule
#[derive(Clone)]
pub enum Condition {
    /// Constant
    Always(bool),
    /// True when rendering on the given platform
    Platform(Platform),
    /// True when the named prop is truthy
    Prop(String),
    /// True when the named prop is a *string* strictly equal to the value.
    /// Numeric and boolean props never coerce: `"count:3"` is false against
    /// a numeric `3`.
    PropEquals(String, String),
    /// Arbitrary predicate of the resolution context
    Predicate(ConditionFn),
}

impl Condition {
    /// Parse a condition string.
    ///
    /// Reserved platform tags select on platform; exactly one `:` splits
    /// into a strict `key:value` prop match; anything else is a truthy
    /// check on the whole string as a prop name.
    pub fn parse(expr: &str) -> Condition {
        if let Some(platform) = Platform::from_tag(expr) {
            return Condition::Platform(platform);
        }
        if expr.matches(':').count() == 1 {
            if let Some((key, value)) = expr.split_once(':') {
                return Condition::prop_equals(key, value);
            }
        }
        Condition::prop(expr)
    }

    /// Truthy-prop condition
    pub fn prop(key: impl Into<String>) -> Condition {
        let key = key.into();
        warn_non_cache_key(&key);
        Condition::Prop(key)
    }

    /// Strict string `key:value` prop match
    pub fn prop_equals(key: impl Into<String>, value: impl Into<String>) -> Condition {
        let key = key.into();
        warn_non_cache_key(&key);
        Condition::PropEquals(key, value.into())
    }

    /// Arbitrary predicate condition
    pub fn predicate(f: impl Fn(&ResolveContext<'_>) -> bool + Send + Sync + 'static) -> Condition {
        Condition::Predicate(Arc::new(f))
    }

    /// Evaluate against a resolution context. Never fails.
    pub fn evaluate(&self, ctx: &ResolveContext<'_>) -> bool {
        match self {
            Condition::Always(value) => *value,
            Condition::Platform(platform) => *platform == ctx.platform,
            Condition::Prop(key) => ctx.prop(key).is_some_and(Value::is_truthy),
            Condition::PropEquals(key, expected) => {
                matches!(ctx.prop(key), Some(Value::Str(actual)) if actual == expected)
            }
            Condition::Predicate(f) => f(ctx),
        }
    }
}

impl From<bool> for Condition {
    fn from(value: bool) -> Condition {
        Condition::Always(value)
    }
}

impl From<Platform> for Condition {
    fn from(platform: Platform) -> Condition {
        Condition::Platform(platform)
    }
}

impl From<&str> for Condition {
    fn from(expr: &str) -> Condition {
        Condition::parse(expr)
    }
}

impl From<String> for Condition {
    fn from(expr: String) -> Condition {
        Condition::parse(&expr)
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Always(value) => f.debug_tuple("Always").field(value).finish(),
            Condition::Platform(platform) => f.debug_tuple("Platform").field(platform).finish(),
            Condition::Prop(key) => f.debug_tuple("Prop").field(key).finish(),
            Condition::PropEquals(key, value) => {
                f.debug_tuple("PropEquals").field(key).field(value).finish()
            }
            Condition::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// A prop condition outside the cache-key allowlist is the documented
/// stale-cache sharp edge; surface it in debug builds only.
#[cfg(debug_assertions)]
fn warn_non_cache_key(key: &str) {
    if !crate::hash::is_cache_key_prop(key) {
        tracing::warn!(
            prop = key,
            "condition reads a prop outside the cache-key allowlist; cached results may go stale"
        );
    }
}

#[cfg(not(debug_assertions))]
fn warn_non_cache_key(_key: &str) {}

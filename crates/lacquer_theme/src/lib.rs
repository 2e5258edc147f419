//! Lacquer Theme Store
//!
//! Globally shared, deeply-mergeable theme state for the Lacquer styling
//! engine, with synchronous subscriber notification and no provider
//! wrapping the component tree.
//!
//! # Overview
//!
//! - **Values**: an open-ended nested value model ([`Value`], [`Theme`])
//!   with cheap clones and allocation-identity comparison
//! - **Deep merge**: [`merge`] preserves untouched subtrees' allocations,
//!   so no-op updates are invisible to memoizing consumers
//! - **Store**: one live theme per process, replaced wholesale on update,
//!   notifying subscribers synchronously
//! - **Reactive binding**: [`ThemeBinding`] adapts the store to a host
//!   render loop (dirty flag + wake callback)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lacquer_theme::{get_theme, set_theme, theme};
//!
//! set_theme(theme! {
//!     colors: { primary: "#007AFF" },
//! });
//!
//! let primary = get_theme().str("colors.primary");
//! ```
//!
//! Themes can also be loaded from TOML documents via
//! [`Theme::from_toml_str`].

pub mod merge;
pub mod platform;
pub mod reactive;
pub mod store;
pub mod value;

pub use merge::merge;
pub use platform::Platform;
pub use reactive::{use_theme, DirtyFlag, ThemeBinding, WakeCallback};
pub use store::{
    get_theme, set_theme, subscribe, update_theme, SubscriberId, Subscription, ThemeSnapshot,
    ThemeStore, ThemeUpdate,
};
pub use value::{Theme, ThemeError, Value, ValueMap};

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::{Mutex, MutexGuard, PoisonError};

    static SERIAL: Mutex<()> = Mutex::new(());

    /// Serializes tests that touch the global theme store.
    pub(crate) fn serial() -> MutexGuard<'static, ()> {
        SERIAL.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

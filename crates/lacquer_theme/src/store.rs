//! Global theme store
//!
//! Process-wide singleton holding the live theme snapshot. The snapshot is
//! replaced wholesale on every update (never mutated field-by-field), so a
//! reader always observes either the pre-update or the post-update theme,
//! never a partially merged intermediate. Subscribers are notified
//! synchronously, before `update` returns.

use std::sync::{Arc, Mutex, OnceLock, RwLock};

use slotmap::{new_key_type, SlotMap};

use crate::merge::merge;
use crate::value::{Theme, Value};

new_key_type! {
    /// Key identifying a registered theme listener
    pub struct SubscriberId;
}

type Listener = Arc<dyn Fn() + Send + Sync>;

/// Global theme store instance
static THEME_STORE: OnceLock<ThemeStore> = OnceLock::new();

/// Immutable view of the live theme plus its identity token.
///
/// `revision` stands in for object identity: it bumps only when an update
/// actually changed the theme, so anything keyed by it (resolution caches)
/// stays valid across no-op updates.
#[derive(Clone, Debug)]
pub struct ThemeSnapshot {
    theme: Theme,
    revision: u64,
}

impl ThemeSnapshot {
    /// Snapshot with an explicit revision, for headless resolution and tests
    pub fn new(theme: Theme, revision: u64) -> ThemeSnapshot {
        ThemeSnapshot { theme, revision }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// A pending theme update: a partial value, or a function of the previous
/// theme producing one (functional-update form).
pub enum ThemeUpdate {
    Partial(Value),
    Updater(Box<dyn FnOnce(&Theme) -> Value>),
}

impl From<Value> for ThemeUpdate {
    fn from(partial: Value) -> ThemeUpdate {
        ThemeUpdate::Partial(partial)
    }
}

impl From<Theme> for ThemeUpdate {
    fn from(theme: Theme) -> ThemeUpdate {
        ThemeUpdate::Partial(theme.into_value())
    }
}

/// Process-wide mutable theme state.
///
/// Lazily initialized to the empty theme on first access; lives for the
/// rest of the process.
pub struct ThemeStore {
    snapshot: RwLock<Arc<ThemeSnapshot>>,
    listeners: Mutex<SlotMap<SubscriberId, Listener>>,
}

impl ThemeStore {
    /// The global store
    pub fn global() -> &'static ThemeStore {
        THEME_STORE.get_or_init(|| ThemeStore {
            snapshot: RwLock::new(Arc::new(ThemeSnapshot {
                theme: Theme::new(),
                revision: 0,
            })),
            listeners: Mutex::new(SlotMap::with_key()),
        })
    }

    /// Current snapshot; O(1), no side effects
    pub fn snapshot(&self) -> Arc<ThemeSnapshot> {
        self.snapshot.read().unwrap().clone()
    }

    /// Current theme; O(1), no side effects
    pub fn theme(&self) -> Theme {
        self.snapshot.read().unwrap().theme.clone()
    }

    /// Register a listener invoked synchronously after every update.
    ///
    /// The returned guard unregisters on drop (or explicitly via
    /// [`Subscription::unsubscribe`]). Listener invocation order is
    /// unspecified.
    pub fn subscribe(&'static self, listener: impl Fn() + Send + Sync + 'static) -> Subscription {
        let id = self.listeners.lock().unwrap().insert(Arc::new(listener));
        Subscription {
            store: self,
            id: Some(id),
        }
    }

    /// Deep-merge an update into the live theme, then synchronously notify
    /// every registered listener. Returns the merged theme.
    ///
    /// An update that changes nothing keeps the current snapshot (and its
    /// revision); listeners are still notified. A functional update receives
    /// the previous theme as its argument and must derive the partial from
    /// it rather than re-entering the store.
    pub fn update(&self, update: impl Into<ThemeUpdate>) -> Theme {
        let update = update.into();
        let merged = {
            let mut current = self.snapshot.write().unwrap();
            let partial = match update {
                ThemeUpdate::Partial(value) => value,
                ThemeUpdate::Updater(updater) => updater(&current.theme),
            };
            let root = merge(current.theme.root(), &partial);
            if !root.identity_eq(current.theme.root()) {
                let next = ThemeSnapshot {
                    theme: Theme::from_value(root),
                    revision: current.revision + 1,
                };
                tracing::debug!(revision = next.revision, "theme updated");
                *current = Arc::new(next);
            }
            current.theme.clone()
        };
        self.notify();
        merged
    }

    fn notify(&self) {
        // Listeners are cloned out of the registry before invocation so a
        // listener may subscribe, unsubscribe, or update the theme without
        // deadlocking on the registry lock.
        let listeners: Vec<Listener> = self.listeners.lock().unwrap().values().cloned().collect();
        for listener in listeners {
            listener();
        }
    }

    fn unsubscribe(&self, id: SubscriberId) {
        self.listeners.lock().unwrap().remove(id);
    }

    #[cfg(test)]
    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }
}

/// Guard for a theme subscription; unregisters its listener when dropped
pub struct Subscription {
    store: &'static ThemeStore,
    id: Option<SubscriberId>,
}

impl Subscription {
    /// Unregister now instead of at drop
    pub fn unsubscribe(mut self) {
        self.remove();
    }

    fn remove(&mut self) {
        if let Some(id) = self.id.take() {
            self.store.unsubscribe(id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.remove();
    }
}

/// Non-reactive snapshot read of the live theme
pub fn get_theme() -> Theme {
    ThemeStore::global().theme()
}

/// Deep-merge `partial` into the live theme and notify subscribers.
/// Returns the merged theme.
pub fn set_theme(partial: impl Into<Value>) -> Theme {
    ThemeStore::global().update(ThemeUpdate::Partial(partial.into()))
}

/// Functional-update form of [`set_theme`]: the updater receives the
/// previous theme and returns a partial value to merge over it.
pub fn update_theme(updater: impl FnOnce(&Theme) -> Value + 'static) -> Theme {
    ThemeStore::global().update(ThemeUpdate::Updater(Box::new(updater)))
}

/// Register a listener on the global store
pub fn subscribe(listener: impl Fn() + Send + Sync + 'static) -> Subscription {
    ThemeStore::global().subscribe(listener)
}

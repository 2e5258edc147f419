//! Reactive theme binding
//!
//! The external-store adapter between the theme store and a rendering
//! runtime: subscribe on first read, mark dirty and wake the host on every
//! notification, unsubscribe when the consumer goes away. The host's render
//! loop consumes the dirty flag and re-reads the theme on its next pass.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::store::{self, Subscription, ThemeStore};
use crate::value::Theme;

/// Shared dirty flag for triggering re-renders
pub type DirtyFlag = Arc<AtomicBool>;

/// Wake callback invoked when the theme changes
pub type WakeCallback = Arc<dyn Fn() + Send + Sync>;

/// Binds a rendering consumer's re-render lifecycle to theme updates.
///
/// `read()` is safe to call any number of times per logical render: the
/// underlying subscription is created once and reused, which keeps the
/// binding correct under runtimes that double-invoke render logic for
/// consistency checking.
pub struct ThemeBinding {
    dirty: DirtyFlag,
    wake: Option<WakeCallback>,
    subscription: Mutex<Option<Subscription>>,
}

impl Default for ThemeBinding {
    fn default() -> Self {
        ThemeBinding::new()
    }
}

impl ThemeBinding {
    /// Binding with a dirty flag only; the host polls [`take_dirty`](Self::take_dirty)
    pub fn new() -> ThemeBinding {
        ThemeBinding {
            dirty: Arc::new(AtomicBool::new(false)),
            wake: None,
            subscription: Mutex::new(None),
        }
    }

    /// Binding that also invokes `wake` on every theme notification,
    /// letting the host schedule a re-render immediately
    pub fn with_wake(wake: impl Fn() + Send + Sync + 'static) -> ThemeBinding {
        ThemeBinding {
            dirty: Arc::new(AtomicBool::new(false)),
            wake: Some(Arc::new(wake)),
            subscription: Mutex::new(None),
        }
    }

    /// The dirty flag, for hosts that aggregate several bindings
    pub fn dirty_flag(&self) -> DirtyFlag {
        Arc::clone(&self.dirty)
    }

    /// Read the current theme, subscribing on first use (idempotent)
    pub fn read(&self) -> Theme {
        self.ensure_subscribed();
        store::get_theme()
    }

    /// Consume the dirty flag: true when a theme update arrived since the
    /// last call
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::SeqCst)
    }

    /// Drop the subscription early; `read` will re-subscribe if called again
    pub fn unmount(&self) {
        self.subscription.lock().unwrap().take();
    }

    fn ensure_subscribed(&self) {
        let mut subscription = self.subscription.lock().unwrap();
        if subscription.is_none() {
            let dirty = Arc::clone(&self.dirty);
            let wake = self.wake.clone();
            *subscription = Some(ThemeStore::global().subscribe(move || {
                dirty.store(true, Ordering::SeqCst);
                if let Some(wake) = &wake {
                    wake();
                }
            }));
        }
    }
}

/// Snapshot read for rendering consumers.
///
/// The read itself is not what triggers re-renders; pair it with a
/// [`ThemeBinding`] (or a store subscription) that drives the host's
/// render loop.
pub fn use_theme() -> Theme {
    store::get_theme()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::set_theme;
    use crate::test_util::serial;
    use crate::value;

    #[test]
    fn test_read_subscribes_once() {
        let _guard = serial();

        let before = ThemeStore::global().listener_count();
        let binding = ThemeBinding::new();

        binding.read();
        binding.read();
        binding.read();

        assert_eq!(ThemeStore::global().listener_count(), before + 1);
        drop(binding);
        assert_eq!(ThemeStore::global().listener_count(), before);
    }

    #[test]
    fn test_update_sets_dirty_and_wakes() {
        let _guard = serial();

        let woke = Arc::new(AtomicBool::new(false));
        let woke_flag = Arc::clone(&woke);
        let binding = ThemeBinding::with_wake(move || {
            woke_flag.store(true, Ordering::SeqCst);
        });

        binding.read();
        assert!(!binding.take_dirty());

        set_theme(value!({ reactive_dirty: { n: 1 } }));
        assert!(woke.load(Ordering::SeqCst));
        assert!(binding.take_dirty());
        // The flag is consumed.
        assert!(!binding.take_dirty());
    }

    #[test]
    fn test_unmounted_binding_stops_reacting() {
        let _guard = serial();

        let binding = ThemeBinding::new();
        binding.read();
        binding.unmount();

        set_theme(value!({ reactive_unmount: { n: 1 } }));
        assert!(!binding.take_dirty());
    }
}

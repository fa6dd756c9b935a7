//! Emitter<A>: a named-event, synchronous pub/sub registry.
//!
//! Each event name maps to an ordered sequence of listener entries. A key
//! only exists while its sequence is non-empty; removing the last entry
//! removes the key.
//!
//! `emit(event, ..)` copies that event's stored callables before calling any
//! of them. Whatever a listener does to the map during the round (removing a
//! later entry, adding one, clearing the event) takes effect from the next
//! `emit` onward. A `once` wrapper unregisters itself when it runs, so it is
//! gone from every later copy even if this round still holds it.
//!
//! A listener that panics aborts its round: the panic leaves `emit`, and
//! entries after it in the copy are not called.
//!
//! The map sits behind a `parking_lot::Mutex` that is only held for map
//! edits and copies, never across a listener call. Listeners can therefore
//! re-enter `on`, `once`, `off` and `emit` on the same emitter.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::EmitterConfig;
use crate::error::Result;

use super::listener::{Entry, Listener};
use super::once::OnceShot;

/// Event name → listeners, in registration order.
pub(crate) type ListenerMap<A> = HashMap<String, Vec<Entry<A>>>;

/// Remove the first entry of `event` matching `pred`, dropping the key when
/// its sequence empties.
///
/// The removed entry is handed back so the caller can drop it after
/// releasing the lock.
pub(crate) fn remove_first<A>(
    map: &mut ListenerMap<A>,
    event: &str,
    pred: impl Fn(&Entry<A>) -> bool,
) -> Option<Entry<A>> {
    let entries = map.get_mut(event)?;
    let pos = entries.iter().position(pred)?;
    let removed = entries.remove(pos);
    if entries.is_empty() {
        map.remove(event);
    }
    Some(removed)
}

/// Synchronous named-event emitter.
///
/// `A` is the payload handed to every listener by reference. Use a tuple or
/// struct when an event carries several values.
///
/// Every constructor allocates a fresh map; two emitters only share state
/// when one was obtained from the other via [`Emitter::share`].
pub struct Emitter<A> {
    listeners: Arc<Mutex<ListenerMap<A>>>,
    config: Arc<EmitterConfig>,
}

impl<A: 'static> Emitter<A> {
    /// Create a new, empty emitter.
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(Mutex::new(HashMap::new())),
            config: Arc::new(EmitterConfig::default()),
        }
    }

    /// Create a new, empty emitter with diagnostic settings.
    pub fn with_config(config: EmitterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            listeners: Arc::new(Mutex::new(HashMap::new())),
            config: Arc::new(config),
        })
    }

    /// A second handle onto the same listener map.
    ///
    /// Registrations made through either handle are visible through both.
    pub fn share(&self) -> Self {
        Self {
            listeners: Arc::clone(&self.listeners),
            config: Arc::clone(&self.config),
        }
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    // ------------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------------

    /// Append `listener` to `event`'s sequence.
    ///
    /// Registering the same listener twice produces two entries, both of
    /// which fire.
    pub fn on(&self, event: impl Into<String>, listener: &Listener<A>) -> &Self {
        self.insert(event.into(), Entry::plain(listener.clone()));
        self
    }

    /// Register a closure and return its handle for later `off()`.
    pub fn on_fn(
        &self,
        event: impl Into<String>,
        f: impl Fn(&A) + Send + Sync + 'static,
    ) -> Listener<A> {
        let listener = Listener::new(f);
        self.on(event, &listener);
        listener
    }

    /// Register `listener` to fire at most once.
    ///
    /// The stored callable is a wrapper that unregisters itself before
    /// delegating. `off(event, listener)` still finds it through the
    /// original reference.
    pub fn once(&self, event: impl Into<String>, listener: &Listener<A>) -> &Self {
        let event = event.into();
        let wrapper = Listener::from_handler(OnceShot::new(
            Arc::downgrade(&self.listeners),
            event.clone(),
            listener.clone(),
        ));
        self.insert(event, Entry::once(wrapper, listener.clone()));
        self
    }

    fn insert(&self, event: String, entry: Entry<A>) {
        let count = {
            let mut map = self.listeners.lock();
            let entries = map.entry(event.clone()).or_default();
            entries.push(entry);
            entries.len()
        };

        tracing::trace!(label = self.config.label(), event = %event, count, "listener registered");

        if let Some(threshold) = self.config.leak_warning_threshold {
            // `count` is at least 1 here, and `threshold` may be usize::MAX.
            if count - 1 == threshold {
                tracing::warn!(
                    label = self.config.label(),
                    event = %event,
                    count,
                    threshold,
                    "listener count exceeds leak warning threshold, possible listener leak"
                );
            }
        }
    }

    // ------------------------------------------------------------------------
    // Removal
    // ------------------------------------------------------------------------

    /// Remove the first entry of `event` whose callable or once-original is
    /// `listener`. Does nothing if there is no such entry.
    pub fn off(&self, event: &str, listener: &Listener<A>) -> &Self {
        let removed = {
            let mut map = self.listeners.lock();
            remove_first(&mut *map, event, |entry| entry.matches(listener))
        };
        if removed.is_some() {
            tracing::trace!(label = self.config.label(), event, "listener removed");
        }
        self
    }

    /// Remove every listener for `event`.
    pub fn off_event(&self, event: &str) -> &Self {
        let removed = self.listeners.lock().remove(event);
        if let Some(entries) = removed {
            tracing::trace!(
                label = self.config.label(),
                event,
                count = entries.len(),
                "event listeners removed"
            );
        }
        self
    }

    /// Remove every listener for every event.
    pub fn off_all(&self) -> &Self {
        // Taken out so entries drop after the lock is released.
        let cleared = std::mem::take(&mut *self.listeners.lock());
        tracing::trace!(
            label = self.config.label(),
            events = cleared.len(),
            "all listeners removed"
        );
        self
    }

    // ------------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------------

    /// Invoke every listener registered for `event`, in registration order.
    ///
    /// A snapshot of the sequence is taken before the first call, so changes
    /// made by listeners during this round only affect later rounds.
    pub fn emit(&self, event: &str, args: &A) -> &Self {
        // Callables only; once-originals stay behind in the map.
        let snapshot = self.listeners(event);
        if snapshot.is_empty() {
            return self;
        }

        tracing::trace!(
            label = self.config.label(),
            event,
            count = snapshot.len(),
            "emitting"
        );

        for listener in snapshot {
            listener.call(args);
        }
        self
    }

    // ------------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------------

    /// The stored callables for `event`, in order. Empty if none.
    ///
    /// For `once` registrations these are the wrappers, not the originals.
    pub fn listeners(&self, event: &str) -> Vec<Listener<A>> {
        self.listeners
            .lock()
            .get(event)
            .map(|entries| entries.iter().map(|e| e.callable.clone()).collect())
            .unwrap_or_default()
    }

    pub fn has_listeners(&self, event: &str) -> bool {
        self.listeners
            .lock()
            .get(event)
            .is_some_and(|entries| !entries.is_empty())
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.lock().get(event).map_or(0, Vec::len)
    }

    /// Names of all events that currently have listeners. Order unspecified.
    pub fn event_names(&self) -> Vec<String> {
        self.listeners.lock().keys().cloned().collect()
    }
}

impl<A: 'static> Default for Emitter<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for Emitter<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let map = self.listeners.lock();
        let mut counts: Vec<(&str, usize)> =
            map.iter().map(|(k, v)| (k.as_str(), v.len())).collect();
        counts.sort_unstable();
        f.debug_struct("Emitter")
            .field("label", &self.config.label)
            .field("listeners", &counts)
            .finish()
    }
}

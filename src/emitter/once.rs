//! The self-removing wrapper behind [`Emitter::once`](super::Emitter::once).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Weak;

use parking_lot::Mutex;

use super::listener::{Handler, Listener};
use super::registry::{remove_first, ListenerMap};

/// Removes its own entry from the registry, then delegates to `original`.
///
/// Holds the registry weakly: the map owns the wrapper, so a strong pointer
/// back would keep both alive forever.
pub(crate) struct OnceShot<A> {
    registry: Weak<Mutex<ListenerMap<A>>>,
    event: String,
    original: Listener<A>,
    fired: AtomicBool,
}

impl<A> OnceShot<A> {
    pub(crate) fn new(
        registry: Weak<Mutex<ListenerMap<A>>>,
        event: String,
        original: Listener<A>,
    ) -> Self {
        Self {
            registry,
            event,
            original,
            fired: AtomicBool::new(false),
        }
    }
}

impl<A> Handler<A> for OnceShot<A> {
    fn call(&self, args: &A) {
        // A nested emit of the same event can hand this wrapper out in more
        // than one snapshot. Only the first call gets through.
        if self.fired.swap(true, Ordering::AcqRel) {
            return;
        }

        // `self` lives inside the Arc stored as the entry's callable, so its
        // address is the entry's identity.
        let me = self as *const Self as *const ();
        if let Some(registry) = self.registry.upgrade() {
            let removed = {
                let mut map = registry.lock();
                remove_first(&mut *map, &self.event, |entry| entry.callable.addr() == me)
            };
            drop(removed);
        }

        // Lock released before delegating.
        self.original.call(args);
    }
}

//! Emittable: the emitter capability for host types.
//!
//! A host embeds an [`Emitter`] and implements [`Emittable::emitter`]; every
//! other method is provided and delegates to it, returning the host for
//! chaining.
//!
//! ```
//! use emittable::{Emittable, Emitter, Listener};
//!
//! struct Download {
//!     events: Emitter<u64>,
//! }
//!
//! impl Emittable<u64> for Download {
//!     fn emitter(&self) -> &Emitter<u64> {
//!         &self.events
//!     }
//! }
//!
//! let download = Download { events: Emitter::new() };
//! let progress = Listener::new(|bytes: &u64| assert!(*bytes > 0));
//! download.on("progress", &progress).emit("progress", &512);
//! assert!(download.has_listeners("progress"));
//! ```

use super::listener::Listener;
use super::registry::Emitter;

pub trait Emittable<A: 'static> {
    /// The registry backing this host.
    fn emitter(&self) -> &Emitter<A>;

    fn on(&self, event: impl Into<String>, listener: &Listener<A>) -> &Self {
        self.emitter().on(event, listener);
        self
    }

    fn on_fn(
        &self,
        event: impl Into<String>,
        f: impl Fn(&A) + Send + Sync + 'static,
    ) -> Listener<A> {
        self.emitter().on_fn(event, f)
    }

    fn once(&self, event: impl Into<String>, listener: &Listener<A>) -> &Self {
        self.emitter().once(event, listener);
        self
    }

    fn off(&self, event: &str, listener: &Listener<A>) -> &Self {
        self.emitter().off(event, listener);
        self
    }

    fn off_event(&self, event: &str) -> &Self {
        self.emitter().off_event(event);
        self
    }

    fn off_all(&self) -> &Self {
        self.emitter().off_all();
        self
    }

    fn emit(&self, event: &str, args: &A) -> &Self {
        self.emitter().emit(event, args);
        self
    }

    fn listeners(&self, event: &str) -> Vec<Listener<A>> {
        self.emitter().listeners(event)
    }

    fn has_listeners(&self, event: &str) -> bool {
        self.emitter().has_listeners(event)
    }

    fn listener_count(&self, event: &str) -> usize {
        self.emitter().listener_count(event)
    }

    fn event_names(&self) -> Vec<String> {
        self.emitter().event_names()
    }
}

impl<A: 'static> Emittable<A> for Emitter<A> {
    fn emitter(&self) -> &Emitter<A> {
        self
    }
}

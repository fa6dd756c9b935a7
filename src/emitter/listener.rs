//! Listener handles and the entries stored per event.
//!
//! A [`Listener`] is an `Arc<dyn Handler<A>>`. Cloning bumps the ref-count,
//! so snapshots are cheap and every clone keeps the identity of the original
//! allocation. Removal by reference compares those addresses.

use std::fmt;
use std::sync::Arc;

/// Anything that can be invoked with an emitted payload.
///
/// Closures get this through [`Listener::new`]; implement it directly for
/// listeners that carry their own state.
pub trait Handler<A>: Send + Sync {
    fn call(&self, args: &A);
}

/// Adapter from a closure to [`Handler`].
struct FnHandler<F>(F);

impl<A, F> Handler<A> for FnHandler<F>
where
    F: Fn(&A) + Send + Sync,
{
    fn call(&self, args: &A) {
        (self.0)(args)
    }
}

/// A shared, identity-carrying listener.
///
/// Two `Listener`s are "the same listener" iff one was cloned from the other.
/// Building two handles from identical closures yields two distinct
/// listeners.
pub struct Listener<A> {
    inner: Arc<dyn Handler<A>>,
}

impl<A> Listener<A> {
    /// Wrap a closure.
    pub fn new(f: impl Fn(&A) + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(FnHandler(f)),
        }
    }

    /// Wrap a custom [`Handler`] implementation.
    pub fn from_handler(handler: impl Handler<A> + 'static) -> Self {
        Self {
            inner: Arc::new(handler),
        }
    }

    /// Invoke the listener directly.
    pub fn call(&self, args: &A) {
        self.inner.call(args)
    }

    /// Identity comparison.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        a.addr() == b.addr()
    }

    /// Address of the shared handler. Only the data half of the fat pointer
    /// is compared; vtable addresses are not guaranteed unique.
    pub(crate) fn addr(&self) -> *const () {
        Arc::as_ptr(&self.inner) as *const ()
    }
}

impl<A> Clone for Listener<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A> fmt::Debug for Listener<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener").field(&self.addr()).finish()
    }
}

// ============================================================================
// Entry
// ============================================================================

/// One registration in an event's sequence.
///
/// `callable` is what `emit` invokes. For `once` registrations it is the
/// self-removing wrapper and `original` holds the caller's listener so that
/// `off(event, &original)` still finds it.
pub(crate) struct Entry<A> {
    pub(crate) callable: Listener<A>,
    pub(crate) original: Option<Listener<A>>,
}

impl<A> Entry<A> {
    pub(crate) fn plain(listener: Listener<A>) -> Self {
        Self {
            callable: listener,
            original: None,
        }
    }

    pub(crate) fn once(wrapper: Listener<A>, original: Listener<A>) -> Self {
        Self {
            callable: wrapper,
            original: Some(original),
        }
    }

    /// True if `listener` is either the stored callable or its original.
    pub(crate) fn matches(&self, listener: &Listener<A>) -> bool {
        Listener::ptr_eq(&self.callable, listener)
            || self
                .original
                .as_ref()
                .is_some_and(|o| Listener::ptr_eq(o, listener))
    }
}

//! Named-event emitter.
//!
//! # Modules
//!
//! - [`listener`]: [`Listener<A>`] handles and the [`Handler`] trait.
//! - [`registry`]: the [`Emitter<A>`] registry itself.
//! - [`emittable`]: the [`Emittable`] capability for host types.

pub mod emittable;
pub mod listener;
mod once;
pub mod registry;

pub use emittable::Emittable;
pub use listener::{Handler, Listener};
pub use registry::Emitter;

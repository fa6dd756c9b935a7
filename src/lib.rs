//! Synchronous publish/subscribe over named events.
//!
//! [`Emitter<A>`] maps event names to ordered listener sequences and
//! dispatches a snapshot of them on [`Emitter::emit`]. [`Emittable`] lets any
//! host type expose the same operations by delegating to an embedded emitter.

pub mod config;
pub mod emitter;
pub mod error;

pub use config::EmitterConfig;
pub use emitter::{Emittable, Emitter, Handler, Listener};
pub use error::{EmitterError, Result};

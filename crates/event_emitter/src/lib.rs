//! # Event Emitter
//!
//! A synchronous, in-process publish/subscribe primitive. Callers register
//! listeners against event keys and later emit a key, which invokes every
//! listener registered under it, in insertion order, on the calling thread.
//!
//! ## Core Features
//!
//! - **Generic keys and payloads**: `EventEmitter<K, A>` works with any hashable
//!   key type and any payload type `A` (tuples, structs, `str`, `()`)
//! - **Once-listeners**: registrations that fire at most one time and then
//!   remove themselves
//! - **Identity-based removal**: every registration gets a [`ListenerId`]
//!   that removes exactly that registration, whatever its key or once-state
//! - **Re-entrancy**: listeners may call back into the emitter (register,
//!   remove, clear, emit) while an emission is in progress
//! - **O(1) bookkeeping**: the live listener count is maintained, not computed
//!
//! ## Emission Semantics
//!
//! `emit` visits the registrations present under the key when the call starts:
//!
//! - a registration removed earlier in the same traversal is skipped
//! - a registration added during the traversal is deferred to the next `emit`
//! - a once-listener is unregistered just before it runs, so it never fires twice
//!
//! ## Threading
//!
//! The emitter is neither `Send` nor `Sync`. All operations are meant to be
//! driven from a single logical thread; applications that need cross-thread
//! access must serialize it themselves.
//!
//! ## Quick Start
//!
//! ```rust
//! use event_emitter::EventEmitter;
//!
//! let emitter: EventEmitter<&'static str, str> = EventEmitter::new();
//!
//! emitter
//!     .on("hello", |arg: &str| println!("Hello {arg}"))
//!     .once("buy", |arg: &str| println!("Buy {arg}"));
//!
//! emitter.emit("hello", "world");
//! emitter.emit("buy", "world");
//!
//! assert_eq!(emitter.count_listeners(), 1);
//!
//! let hello = emitter.listener("hello").unwrap();
//! assert!(emitter.remove(hello));
//! assert!(emitter.is_empty());
//! ```

pub mod emitter;
pub mod listener;
pub mod stats;


pub use emitter::EventEmitter;
pub use listener::{ListenerFn, ListenerId, Registration};
pub use stats::EmitterStats;

/// Crate version, exposed for diagnostics.
pub const EVENT_EMITTER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Statistics tracking for the emitter
use serde::{Deserialize, Serialize};

/// Counters describing the emitter's activity since construction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitterStats {
    /// Number of live registrations across all keys
    pub total_listeners: usize,
    /// `emit` calls that found at least one registration for their key
    pub events_emitted: u64,
    /// `emit` calls on a key with no registrations
    pub events_unhandled: u64,
    /// Total listener invocations
    pub listeners_invoked: u64,
    /// Once-listeners consumed by an emission
    pub once_fired: u64,
}

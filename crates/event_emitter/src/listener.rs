//! Listener identity and registration records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Callable type stored for every registration.
pub type ListenerFn<A> = dyn Fn(&A);

/// Identity token for a single registration.
///
/// Ids are handed out by the emitter that owns the registration, start at 1,
/// and are never reused by that emitter, so a stale id can never remove a
/// newer registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ListenerId(u64);

impl ListenerId {
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value of the id.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// A listener stored under an event key.
///
/// The once-flag lives in the record itself, so there is no side table to
/// keep in sync with the per-key sequences.
pub struct Registration<A: ?Sized> {
    id: ListenerId,
    once: bool,
    callback: Rc<ListenerFn<A>>,
}

impl<A: ?Sized> Registration<A> {
    pub(crate) fn new(id: ListenerId, once: bool, callback: Rc<ListenerFn<A>>) -> Self {
        Self { id, once, callback }
    }

    /// Identity of this registration.
    #[inline]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Whether this registration is removed after its first invocation.
    #[inline]
    pub fn is_once(&self) -> bool {
        self.once
    }

    pub(crate) fn invoke(&self, args: &A) {
        (self.callback)(args)
    }
}

// Manual impl: a derive would demand `A: Clone`.
impl<A: ?Sized> Clone for Registration<A> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            once: self.once,
            callback: Rc::clone(&self.callback),
        }
    }
}

impl<A: ?Sized> fmt::Debug for Registration<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("id", &self.id)
            .field("once", &self.once)
            .field("callback", &"[listener]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listener_id_display() {
        assert_eq!(ListenerId::from_raw(7).to_string(), "listener#7");
        assert_eq!(ListenerId::from_raw(7).as_u64(), 7);
    }

    #[test]
    fn test_listener_id_ordering() {
        assert!(ListenerId::from_raw(1) < ListenerId::from_raw(2));
    }

    #[test]
    fn test_registration_clone_shares_callback() {
        let callback: Rc<ListenerFn<i32>> = Rc::new(|_: &i32| {});
        let registration = Registration::new(ListenerId::from_raw(3), true, Rc::clone(&callback));
        let copy = registration.clone();

        assert_eq!(copy.id(), registration.id());
        assert!(copy.is_once());
        // local handle + registration + copy
        assert_eq!(Rc::strong_count(&callback), 3);
    }
}

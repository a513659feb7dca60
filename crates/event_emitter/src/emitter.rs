/// Core EventEmitter implementation
use crate::listener::{ListenerFn, ListenerId, Registration};
use crate::stats::EmitterStats;
use smallvec::SmallVec;
use std::borrow::Borrow;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;
use tracing::{debug, trace};

/// Registrations under one key, in insertion order. Most keys carry a
/// handful of listeners, so the first four live inline.
type Sequence<A> = SmallVec<[Registration<A>; 4]>;

struct Registry<K, A: ?Sized> {
    /// Ordered registrations per event key. Keys whose last registration is
    /// removed are dropped from the map.
    events: HashMap<K, Sequence<A>>,
    /// Reverse index from registration id to the key it lives under.
    owners: HashMap<ListenerId, K>,
}

/// Keyed, synchronous publish/subscribe emitter.
///
/// `K` is the event key type and `A` the payload every listener receives by
/// reference. Every method takes `&self`; state sits behind `RefCell`s that
/// are never borrowed while a listener runs, which lets listeners capture an
/// `Rc<EventEmitter<..>>` and call back into it.
///
/// The emitter is `!Send` and `!Sync`. Concurrent use from several threads
/// must be serialized by the embedding application.
pub struct EventEmitter<K, A: ?Sized> {
    registry: RefCell<Registry<K, A>>,
    /// Live registrations across all keys
    count: Cell<usize>,
    next_id: Cell<u64>,
    stats: Cell<EmitterStats>,
}

impl<K, A: ?Sized> EventEmitter<K, A> {
    /// Creates an emitter with no registrations.
    pub fn new() -> Self {
        Self {
            registry: RefCell::new(Registry {
                events: HashMap::new(),
                owners: HashMap::new(),
            }),
            count: Cell::new(0),
            next_id: Cell::new(1),
            stats: Cell::new(EmitterStats::default()),
        }
    }

    /// Number of live registrations across all keys. O(1).
    #[inline]
    pub fn count_listeners(&self) -> usize {
        self.count.get()
    }

    /// Returns `true` if no listener is registered under any key.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count.get() == 0
    }

    /// Snapshot of the emitter's activity counters.
    pub fn stats(&self) -> EmitterStats {
        EmitterStats {
            total_listeners: self.count.get(),
            ..self.stats.get()
        }
    }

    fn update_stats(&self, update: impl FnOnce(&mut EmitterStats)) {
        let mut stats = self.stats.get();
        update(&mut stats);
        self.stats.set(stats);
    }

    fn allocate_id(&self) -> ListenerId {
        let raw = self.next_id.get();
        self.next_id.set(raw + 1);
        ListenerId::from_raw(raw)
    }
}

impl<K, A> EventEmitter<K, A>
where
    K: Eq + Hash + Clone + Debug,
    A: ?Sized,
{
    /// Registers `listener` under `key` and returns the emitter for chaining.
    pub fn on(&self, key: impl Into<K>, listener: impl Fn(&A) + 'static) -> &Self {
        self.register(key.into(), false, Rc::new(listener));
        self
    }

    /// Registers a listener that fires at most once, then removes itself.
    /// Returns the emitter for chaining.
    pub fn once(&self, key: impl Into<K>, listener: impl Fn(&A) + 'static) -> &Self {
        self.register(key.into(), true, Rc::new(listener));
        self
    }

    /// Same as [`on`](Self::on), returning the new registration's id.
    pub fn subscribe(&self, key: impl Into<K>, listener: impl Fn(&A) + 'static) -> ListenerId {
        self.register(key.into(), false, Rc::new(listener))
    }

    /// Same as [`once`](Self::once), returning the new registration's id.
    pub fn subscribe_once(
        &self,
        key: impl Into<K>,
        listener: impl Fn(&A) + 'static,
    ) -> ListenerId {
        self.register(key.into(), true, Rc::new(listener))
    }

    fn register(&self, key: K, once: bool, callback: Rc<ListenerFn<A>>) -> ListenerId {
        let id = self.allocate_id();
        debug!(?key, %id, once, "Registered listener");

        let mut registry = self.registry.borrow_mut();
        registry.owners.insert(id, key.clone());
        registry
            .events
            .entry(key)
            .or_default()
            .push(Registration::new(id, once, callback));
        self.count.set(self.count.get() + 1);

        id
    }

    /// Invokes every listener registered under `key`, in insertion order,
    /// passing `args` to each. Returns how many listeners ran.
    ///
    /// The registrations present when the call starts are the ones visited.
    /// One removed before its turn (by an earlier listener of this traversal)
    /// is skipped; one added during the traversal waits for the next `emit`.
    /// Once-listeners are unregistered right before they run.
    pub fn emit<Q>(&self, key: &Q, args: &A) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let snapshot: Option<Sequence<A>> = self.registry.borrow().events.get(key).cloned();
        let Some(snapshot) = snapshot else {
            trace!(?key, "No listeners for event");
            self.update_stats(|stats| stats.events_unhandled += 1);
            return 0;
        };

        trace!(?key, listeners = snapshot.len(), "Emitting event");

        let mut invoked = 0;
        for registration in &snapshot {
            if registration.is_once() {
                // Claim the registration first so a re-entrant emit cannot fire it again.
                if self.unregister(registration.id()).is_none() {
                    continue;
                }
                self.update_stats(|stats| stats.once_fired += 1);
            } else if !self.contains(registration.id()) {
                continue;
            }

            registration.invoke(args);
            invoked += 1;
        }

        self.update_stats(|stats| {
            stats.events_emitted += 1;
            stats.listeners_invoked += invoked as u64;
        });

        invoked
    }

    /// Removes every registration under every key.
    pub fn off_all(&self) {
        let removed = {
            let mut registry = self.registry.borrow_mut();
            registry.owners.clear();
            std::mem::take(&mut registry.events)
        };
        let count = self.count.replace(0);

        debug!(removed = count, "Cleared all listeners");
        // Dropped outside the borrow: captured state may touch the emitter on drop.
        drop(removed);
    }

    /// Removes every registration under `key`. Returns how many were removed;
    /// zero if the key had none.
    pub fn off<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let removed = {
            let mut registry = self.registry.borrow_mut();
            let Some(sequence) = registry.events.remove(key) else {
                return 0;
            };
            for registration in &sequence {
                registry.owners.remove(&registration.id());
            }
            sequence
        };

        let count = removed.len();
        self.count.set(self.count.get() - count);
        debug!(?key, removed = count, "Cleared listeners for event");

        drop(removed);
        count
    }

    /// Removes the registration identified by `id`, wherever it lives.
    /// Returns `false` if no such registration is present.
    pub fn remove(&self, id: ListenerId) -> bool {
        match self.unregister(id) {
            Some(removed) => {
                debug!(%id, once = removed.is_once(), "Removed listener");
                true
            }
            None => false,
        }
    }

    /// Detaches `id` from both indexes and returns its record, keeping the
    /// count in step. The caller drops the record after the borrow ends.
    fn unregister(&self, id: ListenerId) -> Option<Registration<A>> {
        let mut registry = self.registry.borrow_mut();
        let key = registry.owners.remove(&id)?;

        let sequence = registry.events.get_mut(&key)?;
        let position = sequence.iter().position(|r| r.id() == id)?;
        let removed = sequence.remove(position);
        if sequence.is_empty() {
            registry.events.remove(&key);
        }

        self.count.set(self.count.get() - 1);
        Some(removed)
    }

    /// Ids registered under `key`, in emission order. Empty if none.
    pub fn listeners<Q>(&self, key: &Q) -> Vec<ListenerId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.registry
            .borrow()
            .events
            .get(key)
            .map(|sequence| sequence.iter().map(Registration::id).collect())
            .unwrap_or_default()
    }

    /// The oldest registration still present under `key`.
    pub fn listener<Q>(&self, key: &Q) -> Option<ListenerId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.registry
            .borrow()
            .events
            .get(key)
            .and_then(|sequence| sequence.first())
            .map(Registration::id)
    }

    /// Number of registrations under `key`.
    pub fn listener_count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.registry
            .borrow()
            .events
            .get(key)
            .map_or(0, |sequence| sequence.len())
    }

    pub fn has_listeners<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.listener_count(key) > 0
    }

    /// Returns `true` if `id` is currently registered.
    pub fn contains(&self, id: ListenerId) -> bool {
        self.registry.borrow().owners.contains_key(&id)
    }

    /// Once-flag of a live registration, or `None` if `id` is not registered.
    pub fn is_once(&self, id: ListenerId) -> Option<bool> {
        let registry = self.registry.borrow();
        let key = registry.owners.get(&id)?;
        registry
            .events
            .get(key)?
            .iter()
            .find(|r| r.id() == id)
            .map(Registration::is_once)
    }

    /// Keys that currently have at least one registration, in no particular order.
    pub fn event_keys(&self) -> Vec<K> {
        self.registry.borrow().events.keys().cloned().collect()
    }
}

impl<K, A: ?Sized> Default for EventEmitter<K, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, A: ?Sized> std::fmt::Debug for EventEmitter<K, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys = self
            .registry
            .try_borrow()
            .map(|registry| registry.events.len())
            .ok();
        f.debug_struct("EventEmitter")
            .field("keys", &keys)
            .field("listeners", &self.count.get())
            .field("stats", &self.stats.get())
            .finish()
    }
}

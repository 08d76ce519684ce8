//! Generation tokens and fenced state
//!
//! Every input change advances a generation. Async work captures the token
//! current when it started and may only write state while that token is still
//! current, so results of superseded queries are dropped instead of
//! overwriting newer ones.

use parking_lot::Mutex;
use tokio::sync::watch;

/// Monotonic input counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }

    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn is_current(self, current: Generation) -> bool {
        self == current
    }
}

/// Observable state guarded by a generation.
pub struct Fenced<T> {
    generation: Mutex<Generation>,
    tx: watch::Sender<T>,
}

impl<T> Fenced<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            generation: Mutex::new(Generation::default()),
            tx,
        }
    }

    pub fn generation(&self) -> Generation {
        *self.generation.lock()
    }

    /// Start a new generation, applying `update` under it. Returns the new token.
    pub fn advance(&self, update: impl FnOnce(&mut T)) -> Generation {
        let mut generation = self.generation.lock();
        *generation = generation.next();
        self.tx.send_modify(update);
        *generation
    }

    /// Start a new generation without touching the value or waking subscribers.
    pub fn fence(&self) -> Generation {
        let mut generation = self.generation.lock();
        *generation = generation.next();
        *generation
    }

    /// Apply `update` only if `token` is still current.
    pub fn commit(&self, token: Generation, update: impl FnOnce(&mut T)) -> bool {
        let generation = self.generation.lock();
        if !token.is_current(*generation) {
            return false;
        }
        self.tx.send_modify(update);
        true
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone> Fenced<T> {
    pub fn snapshot(&self) -> T {
        self.tx.borrow().clone()
    }
}

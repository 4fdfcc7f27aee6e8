//! Replay-latest, ordered multicast signal.
//!
//! DESIGN
//! ======
//! A `Broadcast` holds one slot of retained state plus an observer list.
//! Emitting stores the value and notifies observers synchronously. New
//! subscribers immediately receive the retained value (if any), then every
//! later emission.
//!
//! Emissions raised from inside an observer callback are queued and delivered
//! only after the in-progress emission has reached every observer, so all
//! subscribers see the same relative order. The retained value is updated at
//! emit time, before delivery, so `get` and `first` always return the newest
//! value even while older queued values are still being delivered. An observer
//! that subscribes mid-delivery receives the retained value and then only
//! values emitted after it joined.
//!
//! Handles are `Send + Sync` so they can be placed in Leptos context and
//! captured by reactive closures. Observers run with no lock held.

#[cfg(test)]
#[path = "broadcast_test.rs"]
mod broadcast_test;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Observer<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Registration<T> {
    id: u64,
    /// Sequence number of the retained value replayed on subscribe.
    since: u64,
    observer: Observer<T>,
}

struct Inner<T> {
    current: Option<T>,
    seq: u64,
    observers: Vec<Registration<T>>,
    next_id: u64,
    queue: VecDeque<(u64, T)>,
    delivering: bool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Multicast signal with a single retained value.
pub struct Broadcast<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for Broadcast<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T: Clone + Send + 'static> Default for Broadcast<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> Broadcast<T> {
    /// A signal with nothing retained; subscribers wait for the first emission.
    pub fn new() -> Self {
        Self::from_slot(None)
    }

    /// A signal whose retained value starts as `value`.
    pub fn with_value(value: T) -> Self {
        Self::from_slot(Some(value))
    }

    fn from_slot(current: Option<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                current,
                seq: 0,
                observers: Vec::new(),
                next_id: 0,
                queue: VecDeque::new(),
                delivering: false,
            })),
        }
    }

    /// Latest delivered value.
    pub fn get(&self) -> Option<T> {
        lock(&self.inner).current.clone()
    }

    /// Number of live subscriptions.
    pub fn observer_count(&self) -> usize {
        lock(&self.inner).observers.len()
    }

    /// Store `value` and deliver it to every current observer.
    pub fn emit(&self, value: T) {
        let mut inner = lock(&self.inner);
        inner.seq += 1;
        let seq = inner.seq;
        inner.current = Some(value.clone());
        inner.queue.push_back((seq, value));
        if inner.delivering {
            // The outer emit drains the queue once the current delivery ends.
            return;
        }
        inner.delivering = true;

        loop {
            let Some((seq, next)) = inner.queue.pop_front() else {
                break;
            };
            let observers: Vec<Observer<T>> = inner
                .observers
                .iter()
                .filter(|r| r.since < seq)
                .map(|r| Arc::clone(&r.observer))
                .collect();
            drop(inner);
            for observer in &observers {
                observer(&next);
            }
            inner = lock(&self.inner);
        }

        inner.delivering = false;
    }

    /// Register `observer`.
    ///
    /// The retained value, if any, is delivered before this returns. The
    /// observer stays registered until the returned handle is dropped or
    /// [`Subscription::unsubscribe`] is called.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let observer: Observer<T> = Arc::new(observer);
        let (id, replay) = {
            let mut inner = lock(&self.inner);
            let id = inner.next_id;
            inner.next_id += 1;
            let since = inner.seq;
            inner.observers.push(Registration { id, since, observer: Arc::clone(&observer) });
            (id, inner.current.clone())
        };

        if let Some(value) = replay {
            observer(&value);
        }

        let weak: Weak<Mutex<Inner<T>>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                lock(&inner).observers.retain(|r| r.id != id);
            }
        })
    }

    /// Resolve to the current value with a one-shot subscription.
    ///
    /// Subscribes, captures the replayed value, and unsubscribes before
    /// returning, so later emissions are never observed.
    pub fn first(&self) -> Option<T> {
        let captured: Arc<Mutex<Option<T>>> = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&captured);
        let subscription = self.subscribe(move |value: &T| {
            let mut slot = lock(&sink);
            if slot.is_none() {
                *slot = Some(value.clone());
            }
        });
        subscription.unsubscribe();
        lock(&captured).take()
    }
}

/// Handle that keeps an observer registered.
///
/// Dropping the handle unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    fn new<F>(release: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        Self { release: Some(Box::new(release)) }
    }

    /// Remove the observer now.
    pub fn unsubscribe(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }

    /// Keep the observer registered for the lifetime of the signal.
    pub fn detach(mut self) {
        self.release = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("active", &self.release.is_some()).finish()
    }
}

//! Explicit listener lifecycles.
//!
//! Anything that wants to hear about an external signal (player events, a
//! media preference flipping) acquires a [`Subscription`]. Dropping it, or
//! calling [`Subscription::unsubscribe`], releases the listener exactly once.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, PoisonError,
};

type Release = Box<dyn FnOnce() + Send + Sync>;

/// Handle for an active listener.
#[must_use = "dropping a Subscription releases its listener immediately"]
pub struct Subscription {
    release: Option<Release>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription with nothing to release.
    pub fn empty() -> Self {
        Self { release: None }
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

pub type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Registry<E> {
    next_id: AtomicU64,
    entries: Mutex<Vec<(u64, Listener<E>)>>,
}

/// A set of listeners for events of type `E`.
///
/// Cloning shares the same set.
pub struct Listeners<E> {
    inner: Arc<Registry<E>>,
}

impl<E> Clone for Listeners<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Registry {
                next_id: AtomicU64::new(0),
                entries: Mutex::new(Vec::new()),
            }),
        }
    }
}

impl<E: 'static> Listeners<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn(&E) + Send + Sync + 'static) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(listener)));

        let registry = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry
                    .entries
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    /// Calls every listener registered at the time of the call.
    ///
    /// The lock is not held while listeners run, so a listener may subscribe
    /// or unsubscribe without deadlocking.
    pub fn emit(&self, event: &E) {
        let snapshot: Vec<Listener<E>> = self
            .inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in snapshot {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A boolean platform signal such as `(prefers-reduced-motion: reduce)`.
pub trait PreferenceSource {
    fn matches(&self) -> bool;

    /// Registers for changes; the listener receives the new value.
    fn subscribe(&self, listener: Box<dyn Fn(bool) + Send + Sync>) -> Subscription;
}

/// A preference that never changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPreference(pub bool);

impl PreferenceSource for StaticPreference {
    fn matches(&self) -> bool {
        self.0
    }

    fn subscribe(&self, _listener: Box<dyn Fn(bool) + Send + Sync>) -> Subscription {
        Subscription::empty()
    }
}

/// A preference whose value is pushed in by the host.
#[derive(Clone, Default)]
pub struct ManualPreference {
    value: Arc<Mutex<bool>>,
    listeners: Listeners<bool>,
}

impl ManualPreference {
    pub fn new(initial: bool) -> Self {
        Self {
            value: Arc::new(Mutex::new(initial)),
            listeners: Listeners::new(),
        }
    }

    /// Updates the value, notifying listeners only when it changes.
    pub fn set(&self, value: bool) {
        {
            let mut current = self.value.lock().unwrap_or_else(PoisonError::into_inner);
            if *current == value {
                return;
            }
            *current = value;
        }
        self.listeners.emit(&value);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl PreferenceSource for ManualPreference {
    fn matches(&self) -> bool {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn subscribe(&self, listener: Box<dyn Fn(bool) + Send + Sync>) -> Subscription {
        self.listeners.subscribe(move |v: &bool| listener(*v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_release_runs_once() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let sub = Subscription::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        assert!(sub.is_active());
        sub.unsubscribe();
        assert_eq!(count.load(Ordering::SeqCst), 1);

        let c = Arc::clone(&count);
        {
            let _sub = Subscription::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_listeners_stop_after_drop() {
        let listeners = Listeners::<u32>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let s = Arc::clone(&seen);
        let sub = listeners.subscribe(move |v| s.lock().unwrap().push(*v));
        listeners.emit(&1);
        assert_eq!(listeners.len(), 1);
        drop(sub);
        listeners.emit(&2);

        assert!(listeners.is_empty());
        assert_eq!(*seen.lock().unwrap(), vec![1]);
    }

    #[test]
    fn test_subscription_outlives_registry() {
        let listeners = Listeners::<()>::new();
        let sub = listeners.subscribe(|_| {});
        drop(listeners);
        // releasing against a dropped registry is a no-op
        drop(sub);
    }

    #[test]
    fn test_manual_preference_notifies_on_change() {
        let pref = ManualPreference::new(false);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = Arc::clone(&seen);
        let sub = pref.subscribe(Box::new(move |v| s.lock().unwrap().push(v)));

        pref.set(false);
        pref.set(true);
        pref.set(true);
        assert!(pref.matches());
        assert_eq!(pref.listener_count(), 1);

        sub.unsubscribe();
        assert_eq!(pref.listener_count(), 0);
        pref.set(false);
        assert_eq!(*seen.lock().unwrap(), vec![true]);
    }

    #[test]
    fn test_static_preference() {
        let pref = StaticPreference(true);
        assert!(pref.matches());
        assert!(!pref.subscribe(Box::new(|_| {})).is_active());
    }
}

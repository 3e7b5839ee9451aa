use crate::storage::{LocaleStorage, StorageError};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use trilingo_shared::{Locale, Surface};

type Listener = Arc<dyn Fn(Locale) + Send + Sync>;

/// Identifies one registered consumer of a [`LocaleStore`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SubscriberId(u64);

/// A registered listener. `active` is cleared on unsubscribe so a dispatch
/// already in flight skips it.
struct Registration {
    id: SubscriberId,
    active: Arc<AtomicBool>,
    listener: Listener,
}

struct State {
    current: Locale,
    listeners: Vec<Registration>,
    next_id: u64,
}

struct Inner {
    surface: Surface,
    key: String,
    storage: Arc<dyn LocaleStorage>,
    state: Mutex<State>,
}

/// The current locale of one surface.
///
/// Cloning yields another handle to the same state. Construct one store per
/// surface with a distinct storage key; stores never observe each other.
#[derive(Clone)]
pub struct LocaleStore {
    inner: Arc<Inner>,
}

impl fmt::Debug for LocaleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("LocaleStore")
            .field("surface", &self.inner.surface)
            .field("key", &self.inner.key)
            .field("current", &state.current)
            .field("subscribers", &state.listeners.len())
            .finish()
    }
}

impl LocaleStore {
    /// Creates the store and loads the persisted locale under `key`.
    ///
    /// A missing or unsupported persisted value yields the default locale.
    pub fn new(surface: Surface, key: impl Into<String>, storage: Arc<dyn LocaleStorage>) -> Self {
        let key = key.into();
        let current = match storage.read(&key) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::debug!(
                    "Discarding unsupported persisted locale '{}' for key '{}'",
                    raw,
                    key
                );
                Locale::default()
            }),
            None => Locale::default(),
        };

        tracing::debug!("Initialized {} locale store at '{}'", surface, current);

        Self {
            inner: Arc::new(Inner {
                surface,
                key,
                storage,
                state: Mutex::new(State {
                    current,
                    listeners: Vec::new(),
                    next_id: 0,
                }),
            }),
        }
    }

    /// Creates the store using the surface's default storage key.
    pub fn for_surface(surface: Surface, storage: Arc<dyn LocaleStorage>) -> Self {
        Self::new(surface, surface.default_storage_key(), storage)
    }

    pub fn surface(&self) -> Surface {
        self.inner.surface
    }

    pub fn storage_key(&self) -> &str {
        &self.inner.key
    }

    pub fn get_locale(&self) -> Locale {
        self.inner.state.lock().current
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.state.lock().listeners.len()
    }

    /// Changes the locale, persists it and notifies every subscriber.
    ///
    /// Subscribers run synchronously in registration order, after the
    /// persisted write. If the write fails the new locale still applies for
    /// this session and subscribers are still notified; the error is returned
    /// afterwards.
    pub fn set_locale(&self, locale: Locale) -> Result<(), StorageError> {
        self.update(locale, None)
    }

    /// Registers `listener` until the returned [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(Locale) + Send + Sync + 'static,
    {
        let mut state = self.inner.state.lock();
        let id = SubscriberId(state.next_id);
        state.next_id += 1;
        state.listeners.push(Registration {
            id,
            active: Arc::new(AtomicBool::new(true)),
            listener: Arc::new(listener),
        });
        tracing::trace!("Subscribed {:?} to {} locale", id, self.inner.surface);

        Subscription {
            store: self.clone(),
            id,
        }
    }

    fn update(&self, locale: Locale, origin: Option<SubscriberId>) -> Result<(), StorageError> {
        let listeners: Vec<(Arc<AtomicBool>, Listener)> = {
            let mut state = self.inner.state.lock();
            state.current = locale;
            state
                .listeners
                .iter()
                .filter(|registration| Some(registration.id) != origin)
                .map(|registration| {
                    (
                        Arc::clone(&registration.active),
                        Arc::clone(&registration.listener),
                    )
                })
                .collect()
        };

        // The lock is released so storage backends may read the store back.
        let write_result = self.inner.storage.write(&self.inner.key, locale.code());
        if let Err(e) = &write_result {
            tracing::warn!(
                "Failed to persist {} locale '{}': {}",
                self.inner.surface,
                locale,
                e
            );
        }

        tracing::trace!(
            "Notifying {} subscriber(s) of {} locale '{}'",
            listeners.len(),
            self.inner.surface,
            locale
        );
        for (active, listener) in listeners {
            // A listener may unsubscribe others while this loop runs.
            if active.load(Ordering::Acquire) {
                listener(locale);
            }
        }

        write_result
    }

    fn unsubscribe(&self, id: SubscriberId) {
        self.inner.state.lock().listeners.retain(|registration| {
            if registration.id == id {
                registration.active.store(false, Ordering::Release);
                false
            } else {
                true
            }
        });
        tracing::trace!("Unsubscribed {:?} from {} locale", id, self.inner.surface);
    }
}

/// A live registration with a [`LocaleStore`].
///
/// The listener is removed when this guard is dropped, however the owning
/// consumer goes away.
#[must_use = "dropping a Subscription unregisters its listener immediately"]
pub struct Subscription {
    store: LocaleStore,
    id: SubscriberId,
}

impl Subscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    pub fn store(&self) -> &LocaleStore {
        &self.store
    }

    pub fn locale(&self) -> Locale {
        self.store.get_locale()
    }

    /// Changes the locale on behalf of this subscriber, notifying every other
    /// subscriber but not this one.
    pub fn set_locale(&self, locale: Locale) -> Result<(), StorageError> {
        self.store.update(locale, Some(self.id))
    }

    /// Unregisters now; same as dropping the guard.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.store.unsubscribe(self.id);
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("surface", &self.store.surface())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use parking_lot::Mutex;

    fn recorder() -> (Arc<Mutex<Vec<Locale>>>, impl Fn(Locale) + Send + Sync + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |locale| sink.lock().push(locale))
    }

    fn admin_store(storage: &MemoryStorage) -> LocaleStore {
        LocaleStore::for_surface(Surface::Admin, Arc::new(storage.clone()))
    }

    #[test]
    fn defaults_to_azerbaijani_without_persisted_value() {
        let store = admin_store(&MemoryStorage::new());
        assert_eq!(store.get_locale(), Locale::Az);
        assert_eq!(store.storage_key(), "admin_locale");
    }

    #[test]
    fn discards_unsupported_persisted_value() {
        let storage = MemoryStorage::new();
        storage.insert("admin_locale", "de");
        assert_eq!(admin_store(&storage).get_locale(), Locale::Az);
    }

    #[test]
    fn loads_persisted_value() {
        let storage = MemoryStorage::new();
        storage.insert("admin_locale", "en");
        assert_eq!(admin_store(&storage).get_locale(), Locale::En);
    }

    #[test]
    fn set_locale_round_trips_through_storage() {
        let storage = MemoryStorage::new();
        admin_store(&storage).set_locale(Locale::Ru).unwrap();

        assert_eq!(storage.get("admin_locale").as_deref(), Some("ru"));
        assert_eq!(admin_store(&storage).get_locale(), Locale::Ru);
    }

    #[test]
    fn subscriber_receives_exactly_one_notification() {
        let store = admin_store(&MemoryStorage::new());
        let (seen, listener) = recorder();
        let (unsubscribed_seen, unsubscribed_listener) = recorder();

        let _subscription = store.subscribe(listener);
        store.subscribe(unsubscribed_listener).unsubscribe();

        store.set_locale(Locale::En).unwrap();

        assert_eq!(*seen.lock(), vec![Locale::En]);
        assert!(unsubscribed_seen.lock().is_empty());
    }

    #[test]
    fn dropping_subscription_stops_notifications() {
        let store = admin_store(&MemoryStorage::new());
        let (seen, listener) = recorder();

        {
            let _mounted = store.subscribe(listener);
            assert_eq!(store.subscriber_count(), 1);
            store.set_locale(Locale::Ru).unwrap();
        }

        assert_eq!(store.subscriber_count(), 0);
        store.set_locale(Locale::En).unwrap();
        assert_eq!(*seen.lock(), vec![Locale::Ru]);
    }

    #[test]
    fn subscription_dropped_during_dispatch_is_not_notified() {
        let store = admin_store(&MemoryStorage::new());
        let (child_seen, child_listener) = recorder();
        let child: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let _parent = {
            let child = Arc::clone(&child);
            store.subscribe(move |_| {
                // Re-render unmounts the child.
                drop(child.lock().take());
            })
        };
        *child.lock() = Some(store.subscribe(child_listener));
        assert_eq!(store.subscriber_count(), 2);

        store.set_locale(Locale::Ru).unwrap();

        assert_eq!(store.subscriber_count(), 1);
        assert!(child_seen.lock().is_empty());
    }

    #[test]
    fn notifies_in_registration_order() {
        let store = admin_store(&MemoryStorage::new());
        let order = Arc::new(Mutex::new(Vec::new()));

        let subscriptions: Vec<Subscription> = (0..3)
            .map(|n| {
                let order = Arc::clone(&order);
                store.subscribe(move |_| order.lock().push(n))
            })
            .collect();

        store.set_locale(Locale::Ru).unwrap();
        assert_eq!(*order.lock(), vec![0, 1, 2]);
        drop(subscriptions);
    }

    #[test]
    fn listeners_observe_persisted_value_and_can_read_store() {
        let storage = MemoryStorage::new();
        let store = admin_store(&storage);
        let observed = Arc::new(Mutex::new(None));

        let _subscription = {
            let storage = storage.clone();
            let store = store.clone();
            let observed = Arc::clone(&observed);
            store.clone().subscribe(move |locale| {
                *observed.lock() = Some((locale, storage.get("admin_locale"), store.get_locale()));
            })
        };

        store.set_locale(Locale::En).unwrap();
        assert_eq!(
            *observed.lock(),
            Some((Locale::En, Some("en".to_string()), Locale::En))
        );
    }

    #[test]
    fn subscriber_initiated_change_skips_origin() {
        let store = admin_store(&MemoryStorage::new());
        let (origin_seen, origin_listener) = recorder();
        let (other_seen, other_listener) = recorder();

        let origin = store.subscribe(origin_listener);
        let _other = store.subscribe(other_listener);

        origin.set_locale(Locale::Ru).unwrap();

        assert!(origin_seen.lock().is_empty());
        assert_eq!(*other_seen.lock(), vec![Locale::Ru]);
        assert_eq!(origin.locale(), Locale::Ru);
    }

    #[test]
    fn setting_same_locale_still_notifies() {
        let store = admin_store(&MemoryStorage::new());
        let (seen, listener) = recorder();
        let _subscription = store.subscribe(listener);

        store.set_locale(Locale::Az).unwrap();
        assert_eq!(*seen.lock(), vec![Locale::Az]);
    }

    #[test]
    fn surfaces_are_isolated_over_shared_storage() {
        let storage = MemoryStorage::new();
        let shared: Arc<dyn LocaleStorage> = Arc::new(storage.clone());
        let admin = LocaleStore::for_surface(Surface::Admin, Arc::clone(&shared));
        let lms = LocaleStore::for_surface(Surface::Lms, shared);
        let (lms_seen, lms_listener) = recorder();
        let _lms_subscription = lms.subscribe(lms_listener);

        admin.set_locale(Locale::Ru).unwrap();

        assert_eq!(lms.get_locale(), Locale::Az);
        assert!(lms_seen.lock().is_empty());
        assert_eq!(storage.get("lms_locale"), None);
        assert_eq!(
            LocaleStore::for_surface(Surface::Lms, Arc::new(storage)).get_locale(),
            Locale::Az
        );
    }

    struct RejectingStorage;

    impl LocaleStorage for RejectingStorage {
        fn read(&self, _key: &str) -> Option<String> {
            None
        }

        fn write(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Rejected {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            })
        }
    }

    /// Storage that reads the store back while persisting.
    struct ReentrantStorage {
        inner: MemoryStorage,
        store: Mutex<Option<LocaleStore>>,
        seen_during_write: Mutex<Vec<Locale>>,
    }

    impl LocaleStorage for ReentrantStorage {
        fn read(&self, key: &str) -> Option<String> {
            self.inner.read(key)
        }

        fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if let Some(store) = self.store.lock().as_ref() {
                self.seen_during_write.lock().push(store.get_locale());
            }
            self.inner.write(key, value)
        }
    }

    #[test]
    fn storage_write_may_read_the_store() {
        let storage = Arc::new(ReentrantStorage {
            inner: MemoryStorage::new(),
            store: Mutex::new(None),
            seen_during_write: Mutex::new(Vec::new()),
        });
        let store = LocaleStore::for_surface(Surface::Admin, Arc::clone(&storage) as Arc<dyn LocaleStorage>);
        *storage.store.lock() = Some(store.clone());

        let observed = Arc::new(Mutex::new(None));
        let _subscription = {
            let storage = Arc::clone(&storage);
            let observed = Arc::clone(&observed);
            store.subscribe(move |_| *observed.lock() = storage.inner.get("admin_locale"))
        };

        store.set_locale(Locale::En).unwrap();

        assert_eq!(*storage.seen_during_write.lock(), vec![Locale::En]);
        assert_eq!(observed.lock().as_deref(), Some("en"));
        // Break the store -> storage -> store cycle.
        storage.store.lock().take();
    }

    #[test]
    fn failed_write_still_applies_and_notifies() {
        let store = LocaleStore::for_surface(Surface::Lms, Arc::new(RejectingStorage));
        let (seen, listener) = recorder();
        let _subscription = store.subscribe(listener);

        let err = store.set_locale(Locale::En).unwrap_err();

        assert_eq!(store.get_locale(), Locale::En);
        assert_eq!(*seen.lock(), vec![Locale::En]);
        insta::assert_snapshot!(
            err.to_string(),
            @"Locale storage rejected the write for key 'lms_locale': quota exceeded"
        );
    }
}

use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::connections::client::{AccountClient, ClientFactory, ConnectionIdentity};
use crate::storage::account::Account;

type ClientMap<C> = HashMap<ConnectionIdentity, Arc<C>>;

/// One client per connection identity, created on first request.
///
/// The map is append-only: entries are never replaced or removed, so an
/// `Arc` handed out once stays the instance for that identity for as long
/// as the cache lives. Cloning the cache clones the handle, not the map;
/// sessions that should not share clients must each build their own.
pub struct ClientCache<F: ClientFactory> {
    factory: Arc<F>,
    inner: Arc<Mutex<ClientMap<F::Client>>>,
}

impl<F: ClientFactory> Clone for ClientCache<F> {
    fn clone(&self) -> Self {
        Self {
            factory: Arc::clone(&self.factory),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F: ClientFactory + Default> Default for ClientCache<F> {
    fn default() -> Self {
        Self::new(F::default())
    }
}

impl<F: ClientFactory> ClientCache<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory: Arc::new(factory),
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn map(&self) -> MutexGuard<'_, ClientMap<F::Client>> {
        // Entries are immutable once inserted, so a poisoned map is still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the client for `identity`, building it on the first call.
    pub fn get(&self, identity: &ConnectionIdentity) -> Arc<F::Client> {
        let mut map = self.map();
        if let Some(client) = map.get(identity) {
            debug!("Client cache hit for {}", identity);
            return Arc::clone(client);
        }
        debug!("Client cache miss for {}; creating client", identity);
        let client = Arc::new(self.factory.make_client(identity));
        map.insert(identity.clone(), Arc::clone(&client));
        client
    }

    /// The cached client bound to `account`'s own auth namespace.
    pub fn client_for(&self, account: &Account) -> AccountClient<F::Client> {
        AccountClient::new(self.get(&account.identity()), account.namespace())
    }

    pub fn contains(&self, identity: &ConnectionIdentity) -> bool {
        self.map().contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct Counting {
        calls: Cell<usize>,
    }

    impl ClientFactory for Counting {
        type Client = ConnectionIdentity;

        fn make_client(&self, identity: &ConnectionIdentity) -> ConnectionIdentity {
            self.calls.set(self.calls.get() + 1);
            identity.clone()
        }
    }

    #[test]
    fn same_identity_same_instance_different_identity_different_instance() {
        let cache = ClientCache::new(Counting::default());
        let a = ConnectionIdentity::new("https://a.example.co", "k");
        let b = ConnectionIdentity::new("https://a.example.co", "other");

        let first = cache.get(&a);
        let again = cache.clone().get(&a);
        let other = cache.get(&b);

        assert!(Arc::ptr_eq(&first, &again));
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(cache.factory.calls.get(), 2);
        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&b));
    }
}

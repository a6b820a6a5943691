//! A deterministic **in‑process stand‑in** for a backend client factory.
//!
//! *  Every `make_client` call is counted, so tests can prove the cache
//!    built exactly one client per connection identity.
//! *  `FakeBackend::fetch_profile` lets tests hold a "request" open until
//!    they decide to complete it, which is how the stale‑result race is
//!    reproduced without a network.

use multi_account::{ClientFactory, ConnectionIdentity};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::oneshot;

pub struct FakeBackend {
    pub identity: ConnectionIdentity,
    /// 1 for the first client the factory built, 2 for the second, …
    pub serial: usize,
}

impl FakeBackend {
    /// Resolves once the test sends on `release`; echoes which backend answered.
    pub async fn fetch_profile(&self, release: oneshot::Receiver<()>) -> String {
        let _ = release.await;
        format!("profile from {}", self.identity.endpoint_url)
    }
}

#[derive(Clone, Default)]
pub struct FakeFactory {
    pub created: Arc<AtomicUsize>,
}

impl FakeFactory {
    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl ClientFactory for FakeFactory {
    type Client = FakeBackend;

    fn make_client(&self, identity: &ConnectionIdentity) -> FakeBackend {
        let serial = self.created.fetch_add(1, Ordering::SeqCst) + 1;
        FakeBackend {
            identity: identity.clone(),
            serial,
        }
    }
}

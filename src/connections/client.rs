use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use url::Url;

use super::errors::ConnectionError;

/// The `(endpoint, credential)` pair that decides client reuse.
///
/// Two accounts with the same identity talk to the same backend and share
/// one client instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionIdentity {
    pub endpoint_url: String,
    pub credential_key: String,
}

impl ConnectionIdentity {
    pub fn new(endpoint_url: impl Into<String>, credential_key: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            credential_key: credential_key.into(),
        }
    }
}

impl fmt::Display for ConnectionIdentity {
    /// Never prints the credential itself, only its length.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (key: {} chars)",
            self.endpoint_url,
            self.credential_key.chars().count()
        )
    }
}

/// Storage partition for authentication state, one per alias.
///
/// Accounts sharing a connection identity still get distinct namespaces,
/// so a login under one alias is never visible under another.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionNamespace(String);

impl SessionNamespace {
    pub fn for_alias(alias: &str) -> Self {
        Self(format!("auth-{alias}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds backend clients. Supplied by whoever owns the connection library.
///
/// Called at most once per identity by [`crate::core::client_cache::ClientCache`].
/// Construction must not fail; malformed endpoints or credentials surface
/// when the client is first used.
pub trait ClientFactory {
    type Client;

    fn make_client(&self, identity: &ConnectionIdentity) -> Self::Client;
}

/// The client handed to consumers for the active account: the shared,
/// cached instance plus the account's own auth namespace.
pub struct AccountClient<C> {
    shared: Arc<C>,
    namespace: SessionNamespace,
}

impl<C> AccountClient<C> {
    pub fn new(shared: Arc<C>, namespace: SessionNamespace) -> Self {
        Self { shared, namespace }
    }

    /// The cached instance. Compare with `Arc::ptr_eq` to detect reuse.
    pub fn shared(&self) -> &Arc<C> {
        &self.shared
    }

    pub fn namespace(&self) -> &SessionNamespace {
        &self.namespace
    }
}

impl<C> Clone for AccountClient<C> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            namespace: self.namespace.clone(),
        }
    }
}

impl<C> std::ops::Deref for AccountClient<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.shared
    }
}

impl<C> fmt::Debug for AccountClient<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountClient")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

/// A plain REST-style client description used by the CLI.
///
/// Holds the raw configuration and validates it lazily.
#[derive(Debug)]
pub struct EndpointClient {
    identity: ConnectionIdentity,
}

impl EndpointClient {
    pub fn identity(&self) -> &ConnectionIdentity {
        &self.identity
    }

    /// Parse the endpoint; this is the first point a bad config is reported.
    pub fn endpoint(&self) -> Result<Url, ConnectionError> {
        if self.identity.credential_key.trim().is_empty() {
            return Err(ConnectionError::MissingCredential(
                self.identity.endpoint_url.clone(),
            ));
        }
        let url = Url::parse(&self.identity.endpoint_url)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConnectionError::InvalidEndpoint(format!(
                "unsupported scheme '{}' in '{}'",
                other, self.identity.endpoint_url
            ))),
        }
    }
}

/// Factory for [`EndpointClient`].
#[derive(Debug, Default, Clone, Copy)]
pub struct EndpointFactory;

impl ClientFactory for EndpointFactory {
    type Client = EndpointClient;

    fn make_client(&self, identity: &ConnectionIdentity) -> EndpointClient {
        EndpointClient {
            identity: identity.clone(),
        }
    }
}

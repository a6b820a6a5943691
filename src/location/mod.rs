//! Reading and writing the account token in the navigable address.

pub mod address;
pub mod history;

use tokio::sync::broadcast;

pub use history::NavigationHistory;

/// Names used to find the account token in an address:
/// `?<query_param>=<alias>` and `/<path_marker>/<alias>/...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPattern {
    pub query_param: String,
    pub path_marker: String,
}

impl TokenPattern {
    pub fn new(query_param: impl Into<String>, path_marker: impl Into<String>) -> Self {
        Self {
            query_param: query_param.into(),
            path_marker: path_marker.into(),
        }
    }
}

/// The raw tokens found in the current address. Neither is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationTokens {
    pub path: Option<String>,
    pub query: Option<String>,
}

/// Source of navigational context for an account session.
pub trait LocationReader {
    fn tokens(&self) -> LocationTokens;

    /// Write `alias` into the current address in place.
    ///
    /// Must not add a history entry and must not notify subscribers.
    fn replace_account(&mut self, alias: &str);

    /// Fires (with no payload) whenever the address changes from outside,
    /// e.g. back/forward. Dropping the receiver unsubscribes.
    fn subscribe(&self) -> broadcast::Receiver<()>;
}

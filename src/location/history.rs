use log::debug;
use tokio::sync::broadcast;
use url::Url;

use super::{address, LocationReader, LocationTokens, TokenPattern};

/// Capacity of the change channel; a receiver that falls further behind
/// sees `Lagged`, which callers treat as "something changed".
const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// In-memory browser-style history: a list of addresses and a cursor.
///
/// `push` and `replace` are programmatic and stay silent; `back`, `forward`
/// and `go` model the user moving through history and notify subscribers.
pub struct NavigationHistory {
    entries: Vec<Url>,
    cursor: usize,
    pattern: TokenPattern,
    changed: broadcast::Sender<()>,
}

impl NavigationHistory {
    pub fn new(start: Url, pattern: TokenPattern) -> Self {
        let (changed, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            entries: vec![start],
            cursor: 0,
            pattern,
            changed,
        }
    }

    pub fn parse(start: &str, pattern: TokenPattern) -> Result<Self, url::ParseError> {
        Ok(Self::new(Url::parse(start)?, pattern))
    }

    pub fn current(&self) -> &Url {
        &self.entries[self.cursor]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Live receivers of change notifications.
    pub fn subscriber_count(&self) -> usize {
        self.changed.receiver_count()
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// New entry after the current one; forward entries are discarded.
    pub fn push(&mut self, url: Url) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(url);
        self.cursor += 1;
        debug!("History push -> {}", self.current());
    }

    /// Overwrite the current entry.
    pub fn replace(&mut self, url: Url) {
        self.entries[self.cursor] = url;
        debug!("History replace -> {}", self.current());
    }

    pub fn back(&mut self) -> bool {
        self.go(-1)
    }

    pub fn forward(&mut self) -> bool {
        self.go(1)
    }

    /// Move the cursor by `delta`. Out-of-range moves do nothing and
    /// return `false`; successful moves notify subscribers.
    pub fn go(&mut self, delta: isize) -> bool {
        let Some(target) = self.cursor.checked_add_signed(delta) else {
            return false;
        };
        if delta == 0 || target >= self.entries.len() {
            return false;
        }
        self.cursor = target;
        debug!("History moved to {} ({})", self.cursor, self.current());
        // No receivers is fine: nobody is listening yet.
        let _ = self.changed.send(());
        true
    }
}

impl LocationReader for NavigationHistory {
    fn tokens(&self) -> LocationTokens {
        address::tokens(self.current(), &self.pattern)
    }

    fn replace_account(&mut self, alias: &str) {
        let url = address::with_account(self.current(), &self.pattern, alias);
        self.replace(url);
    }

    fn subscribe(&self) -> broadcast::Receiver<()> {
        self.changed.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    fn history(start: &str) -> NavigationHistory {
        NavigationHistory::parse(start, TokenPattern::new("account", "account")).unwrap()
    }

    #[test]
    fn back_and_forward_notify_but_push_and_replace_do_not() {
        let mut h = history("https://a.co/?account=personal");
        let mut rx = h.subscribe();

        h.push(Url::parse("https://a.co/?account=work").unwrap());
        h.replace_account("client");
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
        assert_eq!(h.len(), 2);
        assert_eq!(h.tokens().query.as_deref(), Some("client"));

        assert!(h.back());
        assert_eq!(rx.try_recv(), Ok(()));
        assert_eq!(h.tokens().query.as_deref(), Some("personal"));

        assert!(!h.can_go_back());
        assert!(!h.back());
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));

        assert!(h.forward());
        assert_eq!(rx.try_recv(), Ok(()));
        assert_eq!(h.tokens().query.as_deref(), Some("client"));
        assert!(!h.can_go_forward());
    }

    #[test]
    fn push_drops_forward_entries() {
        let mut h = history("https://a.co/1");
        h.push(Url::parse("https://a.co/2").unwrap());
        h.push(Url::parse("https://a.co/3").unwrap());
        assert!(h.go(-2));
        assert!(!h.can_go_back());
        h.push(Url::parse("https://a.co/4").unwrap());
        assert_eq!(h.len(), 2);
        assert_eq!(h.current().path(), "/4");
        assert!(!h.forward());
        assert!(!h.go(0));
    }

    #[test]
    fn dropped_receivers_stop_counting() {
        let h = history("https://a.co/");
        assert_eq!(h.subscriber_count(), 0);
        let first = h.subscribe();
        let second = h.subscribe();
        assert_eq!(h.subscriber_count(), 2);
        drop(first);
        assert_eq!(h.subscriber_count(), 1);
        drop(second);
        assert_eq!(h.subscriber_count(), 0);
    }
}

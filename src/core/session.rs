use log::{debug, info, warn};
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};

use super::client_cache::ClientCache;
use super::errors::AccountError;
use super::generation::{GenerationCounter, LaunchTag};
use super::registry::AccountRegistry;
use super::resolver::{resolve, ResolutionRule};
use crate::connections::client::{AccountClient, ClientFactory};
use crate::location::LocationReader;
use crate::storage::account::Account;
use crate::storage::config::SessionConfig;

/// Where the session is in choosing an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Resolving,
    Resolved,
    Error,
}

/// Everything a screen needs from the session, borrowed in one go.
pub struct SessionView<'a, C> {
    pub client: Option<&'a AccountClient<C>>,
    pub current_account: Option<&'a Account>,
    pub accounts: &'a [Account],
    pub load_state: LoadState,
    pub last_error: Option<&'a AccountError>,
}

/// Owns the active-account state for one front end.
///
/// Transitions happen only inside [`initialize`](Self::initialize),
/// [`switch_account`](Self::switch_account) and
/// [`handle_navigation`](Self::handle_navigation), each of which runs to
/// completion. The session subscribes to the location's change
/// notifications once, on construction, and unsubscribes when dropped.
pub struct AccountSession<L: LocationReader, F: ClientFactory> {
    registry: AccountRegistry,
    default_account: Option<String>,
    location: L,
    cache: ClientCache<F>,
    navigation: broadcast::Receiver<()>,
    generation: GenerationCounter,
    current: Option<Account>,
    client: Option<AccountClient<F::Client>>,
    load_state: LoadState,
    last_error: Option<AccountError>,
    last_rule: Option<ResolutionRule>,
}

impl<L: LocationReader, F: ClientFactory> AccountSession<L, F> {
    /// Build a session and run the initial resolution.
    ///
    /// Check `load_state()` afterwards: an empty registry leaves the session
    /// in [`LoadState::Error`].
    pub fn new(
        registry: AccountRegistry,
        default_account: Option<String>,
        location: L,
        cache: ClientCache<F>,
    ) -> Self {
        let navigation = location.subscribe();
        let mut session = Self {
            registry,
            default_account,
            location,
            cache,
            navigation,
            generation: GenerationCounter::new(),
            current: None,
            client: None,
            load_state: LoadState::Resolving,
            last_error: None,
            last_rule: None,
        };
        session.initialize();
        session
    }

    /// Like [`new`](Self::new), validating the config's accounts first.
    /// Duplicate aliases are a configuration error and abort here.
    pub fn from_config(
        config: &SessionConfig,
        location: L,
        cache: ClientCache<F>,
    ) -> Result<Self, AccountError> {
        let registry = config.registry()?;
        Ok(Self::new(
            registry,
            config.default_account.clone(),
            location,
            cache,
        ))
    }

    /// Resolve the active account from the current address.
    pub fn initialize(&mut self) -> LoadState {
        self.load_state = LoadState::Resolving;
        let tokens = self.location.tokens();
        let outcome = resolve(
            &self.registry,
            tokens.path.as_deref(),
            tokens.query.as_deref(),
            self.default_account.as_deref(),
        )
        .map(|resolution| (resolution.account.clone(), resolution.rule));

        match outcome {
            Ok((account, rule)) => {
                self.activate(account, Some(rule));
            }
            Err(err) => {
                warn!("Account resolution failed: {}", err);
                self.generation.advance();
                self.current = None;
                self.client = None;
                self.last_rule = None;
                self.last_error = Some(err);
                self.load_state = LoadState::Error;
            }
        }
        self.load_state
    }

    /// Make `alias` the active account and record it in the address.
    ///
    /// An unknown alias leaves the current account untouched and is
    /// recorded as `last_error`.
    pub fn switch_account(&mut self, alias: &str) -> Result<(), AccountError> {
        let Some(account) = self.registry.get(alias).cloned() else {
            let err = AccountError::AccountNotFound(alias.to_owned());
            warn!("Switch rejected: {}", err);
            self.last_error = Some(err.clone());
            return Err(err);
        };

        info!(
            "Switching account {} -> '{}'",
            self.current
                .as_ref()
                .map_or_else(|| "<none>".to_owned(), |a| format!("'{}'", a.alias)),
            alias
        );
        self.location.replace_account(alias);
        self.activate(account, None);
        Ok(())
    }

    /// React to an external address change (back/forward).
    ///
    /// Re-resolves from scratch; transitions only if the outcome differs
    /// from the current account. Returns whether a transition happened.
    pub fn handle_navigation(&mut self) -> bool {
        let tokens = self.location.tokens();
        let target = resolve(
            &self.registry,
            tokens.path.as_deref(),
            tokens.query.as_deref(),
            self.default_account.as_deref(),
        )
        .map(|resolution| resolution.account.alias.clone());

        let unchanged = match (&target, self.current.as_ref()) {
            (Ok(alias), Some(current)) => *alias == current.alias,
            (Err(_), None) => true,
            _ => false,
        };
        if unchanged {
            debug!("Navigation leaves the active account as is ({:?})", target);
            return false;
        }

        info!("Navigation changed account; re-resolving");
        self.initialize();
        true
    }

    /// Handle every notification already queued, in order, without waiting.
    /// Returns how many were processed.
    pub fn poll_navigation(&mut self) -> usize {
        let mut handled = 0;
        loop {
            match self.navigation.try_recv() {
                Ok(()) | Err(TryRecvError::Lagged(_)) => {
                    handled += 1;
                    self.handle_navigation();
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        handled
    }

    /// Wait for the next notification and handle it. `None` once the
    /// location has gone away.
    pub async fn next_navigation(&mut self) -> Option<bool> {
        match self.navigation.recv().await {
            Ok(()) | Err(RecvError::Lagged(_)) => Some(self.handle_navigation()),
            Err(RecvError::Closed) => None,
        }
    }

    fn activate(&mut self, account: Account, rule: Option<ResolutionRule>) {
        let generation = self.generation.advance();
        self.client = Some(self.cache.client_for(&account));
        debug!(
            "Account '{}' active (generation {}, namespace {})",
            account.alias,
            generation,
            account.namespace()
        );
        self.current = Some(account);
        self.last_rule = rule;
        self.last_error = None;
        self.load_state = LoadState::Resolved;
    }

    /// Tag for async work started now; see [`LaunchTag::accept`].
    pub fn launch_tag(&self) -> Option<LaunchTag> {
        self.current
            .as_ref()
            .map(|account| self.generation.tag(account.alias.clone()))
    }

    pub fn generation(&self) -> u64 {
        self.generation.current()
    }

    pub fn current_account(&self) -> Option<&Account> {
        self.current.as_ref()
    }

    pub fn client(&self) -> Option<&AccountClient<F::Client>> {
        self.client.as_ref()
    }

    pub fn accounts(&self) -> &[Account] {
        self.registry.accounts()
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn last_error(&self) -> Option<&AccountError> {
        self.last_error.as_ref()
    }

    /// Rule that picked the current account; `None` after a direct switch.
    pub fn last_rule(&self) -> Option<ResolutionRule> {
        self.last_rule
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn location_mut(&mut self) -> &mut L {
        &mut self.location
    }

    /// Close the session and hand the location back, unsubscribed.
    pub fn into_location(self) -> L {
        debug!("Closing account session");
        let Self { location, .. } = self;
        location
    }

    pub fn cache(&self) -> &ClientCache<F> {
        &self.cache
    }

    pub fn view(&self) -> SessionView<'_, F::Client> {
        SessionView {
            client: self.client.as_ref(),
            current_account: self.current.as_ref(),
            accounts: self.registry.accounts(),
            load_state: self.load_state,
            last_error: self.last_error.as_ref(),
        }
    }
}

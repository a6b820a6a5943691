use serde::{Deserialize, Serialize};

use super::account::Account;
use crate::core::errors::AccountError;
use crate::core::registry::AccountRegistry;
use crate::location::TokenPattern;

pub const DEFAULT_QUERY_PARAM: &str = "account";
pub const DEFAULT_PATH_MARKER: &str = "account";

fn default_query_param() -> String {
    DEFAULT_QUERY_PARAM.to_owned()
}

fn default_path_marker() -> String {
    DEFAULT_PATH_MARKER.to_owned()
}

/// Everything a session needs to know up front.
///
/// Only `accounts` is required in JSON; the token names default to `account`
/// (`?account=work` and `/account/work/...`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_account: Option<String>,
    #[serde(default = "default_query_param")]
    pub query_param: String,
    #[serde(default = "default_path_marker")]
    pub path_marker: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            accounts: Vec::new(),
            default_account: None,
            query_param: default_query_param(),
            path_marker: default_path_marker(),
        }
    }
}

impl SessionConfig {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            accounts,
            ..Self::default()
        }
    }

    pub fn with_default_account(mut self, alias: impl Into<String>) -> Self {
        self.default_account = Some(alias.into());
        self
    }

    /// Validate the account list. Fails on duplicate aliases.
    pub fn registry(&self) -> Result<AccountRegistry, AccountError> {
        AccountRegistry::new(self.accounts.clone())
    }

    pub fn token_pattern(&self) -> TokenPattern {
        TokenPattern::new(self.query_param.clone(), self.path_marker.clone())
    }

    /// Insert or replace (by alias) keeping the original position.
    pub fn upsert(&mut self, account: Account) {
        match self.accounts.iter_mut().find(|a| a.alias == account.alias) {
            Some(existing) => *existing = account,
            None => self.accounts.push(account),
        }
    }

    /// `true` if an account was removed. A default pointing at it is cleared.
    pub fn remove(&mut self, alias: &str) -> bool {
        let before = self.accounts.len();
        self.accounts.retain(|a| a.alias != alias);
        if self.default_account.as_deref() == Some(alias) {
            self.default_account = None;
        }
        self.accounts.len() != before
    }
}

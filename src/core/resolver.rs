use log::debug;

use super::errors::AccountError;
use super::registry::AccountRegistry;
use crate::storage::account::Account;

/// Which rule picked the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionRule {
    Path,
    Query,
    Default,
    First,
}

/// Outcome of a successful [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub account: &'a Account,
    pub rule: ResolutionRule,
}

/// Pick the account to activate. First match wins:
///
/// 1. path token, if non-empty and registered
/// 2. query token, if non-empty and registered
/// 3. the configured default alias, if registered
/// 4. the first registered account
///
/// Only an empty registry yields [`AccountError::NoValidAccount`].
pub fn resolve<'a>(
    registry: &'a AccountRegistry,
    path_token: Option<&str>,
    query_token: Option<&str>,
    default_alias: Option<&str>,
) -> Result<Resolution<'a>, AccountError> {
    let resolution = if let Some(account) = lookup(registry, path_token) {
        Resolution { account, rule: ResolutionRule::Path }
    } else if let Some(account) = lookup(registry, query_token) {
        Resolution { account, rule: ResolutionRule::Query }
    } else if let Some(account) = lookup(registry, default_alias) {
        Resolution { account, rule: ResolutionRule::Default }
    } else if let Some(account) = registry.first() {
        Resolution { account, rule: ResolutionRule::First }
    } else {
        debug!(
            "Nothing to resolve (path={:?}, query={:?}, default={:?}): registry is empty",
            path_token, query_token, default_alias
        );
        return Err(AccountError::NoValidAccount);
    };

    debug!(
        "Resolved '{}' by {:?} rule (path={:?}, query={:?}, default={:?})",
        resolution.account.alias, resolution.rule, path_token, query_token, default_alias
    );
    Ok(resolution)
}

fn lookup<'a>(registry: &'a AccountRegistry, token: Option<&str>) -> Option<&'a Account> {
    token.filter(|t| !t.is_empty()).and_then(|t| registry.get(t))
}

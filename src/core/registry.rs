use std::collections::HashMap;

use super::errors::AccountError;
use crate::storage::account::Account;

/// Immutable, ordered set of configured accounts.
///
/// Insertion order is kept because the first account is the last-resort
/// fallback during resolution. Aliases are matched exactly (case-sensitive).
#[derive(Debug, Clone, Default)]
pub struct AccountRegistry {
    accounts: Vec<Account>,
    by_alias: HashMap<String, usize>,
}

impl AccountRegistry {
    pub fn new(accounts: Vec<Account>) -> Result<Self, AccountError> {
        let mut by_alias = HashMap::with_capacity(accounts.len());
        for (idx, account) in accounts.iter().enumerate() {
            if by_alias.insert(account.alias.clone(), idx).is_some() {
                return Err(AccountError::DuplicateAlias(account.alias.clone()));
            }
        }
        Ok(Self { accounts, by_alias })
    }

    pub fn get(&self, alias: &str) -> Option<&Account> {
        self.by_alias.get(alias).map(|&idx| &self.accounts[idx])
    }

    pub fn first(&self) -> Option<&Account> {
        self.accounts.first()
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(alias: &str) -> Account {
        Account::new(alias, format!("https://{alias}.example.co"), "key")
    }

    #[test]
    fn duplicate_alias_is_rejected() {
        let err = AccountRegistry::new(vec![account("work"), account("home"), account("work")])
            .unwrap_err();
        assert_eq!(err, AccountError::DuplicateAlias("work".into()));
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        let registry = AccountRegistry::new(vec![account("work"), account("Work")]).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("Work").map(|a| a.alias.as_str()), Some("Work"));
        assert!(registry.get("WORK").is_none());
        assert!(registry.get("wor").is_none());
    }

    #[test]
    fn order_is_preserved() {
        let registry =
            AccountRegistry::new(vec![account("c"), account("a"), account("b")]).unwrap();
        let aliases: Vec<_> = registry.accounts().iter().map(|a| a.alias.as_str()).collect();
        assert_eq!(aliases, ["c", "a", "b"]);
        assert_eq!(registry.first().map(|a| a.alias.as_str()), Some("c"));
    }

    #[test]
    fn empty_registry_is_valid() {
        let registry = AccountRegistry::new(Vec::new()).unwrap();
        assert!(registry.is_empty());
        assert!(registry.first().is_none());
    }
}

use std::fmt::{self, Display};

/// Errors produced while choosing or switching the active account.
///
/// Only `DuplicateAlias` is fatal (it means the configuration is broken);
/// the others are recorded on the session and the caller carries on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    DuplicateAlias(String),
    NoValidAccount,
    AccountNotFound(String),
}

impl Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountError::DuplicateAlias(alias) => {
                write!(f, "Duplicate account alias '{}'", alias)
            }
            AccountError::NoValidAccount => write!(f, "No valid account found"),
            AccountError::AccountNotFound(alias) => {
                write!(f, "Account with alias '{}' not found", alias)
            }
        }
    }
}

impl std::error::Error for AccountError {}

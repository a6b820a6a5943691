pub mod account;
pub mod config;
pub mod store;

pub use account::Account;
pub use config::SessionConfig;
pub use store::AccountStore;

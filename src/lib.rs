pub mod connections;
pub mod core;
pub mod location;
pub mod storage;
pub mod ui;
pub mod utils;

// re‑export ergonomic entry points
pub use connections::client::{AccountClient, ClientFactory, ConnectionIdentity, SessionNamespace};
pub use crate::core::client_cache::ClientCache;
pub use crate::core::errors::AccountError;
pub use crate::core::generation::LaunchTag;
pub use crate::core::registry::AccountRegistry;
pub use crate::core::resolver::{resolve, Resolution, ResolutionRule};
pub use crate::core::session::{AccountSession, LoadState, SessionView};
pub use location::{LocationReader, LocationTokens, NavigationHistory, TokenPattern};
pub use storage::{Account, AccountStore, SessionConfig};

pub mod client_cache;
pub mod errors;
pub mod generation;
pub mod registry;
pub mod resolver;
pub mod session;

// Re-export the modules here for easy import elsewhere.
pub use client_cache::*;
pub use errors::*;
pub use generation::*;
pub use registry::*;
pub use resolver::*;
pub use session::*;

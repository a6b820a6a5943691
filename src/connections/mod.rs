pub mod client;
pub mod errors;

// Re-export the modules here for easy import elsewhere.
pub use client::*;
pub use errors::*;

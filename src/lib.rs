pub mod app;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod recommend;
pub mod test_utils;

pub use error::{JmError, Result};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! # colgen Core
//!
//! Core types and error handling for colgen.
//!
//! This crate provides the foundational building blocks used throughout
//! the generator crates:
//!
//! - **Types**: `SchemaShape` (minimal vs. full schema) and `IdentifierPolicy`
//! - **Errors**: Unified error handling with `EngineError` and `EngineResult`
//!

pub mod error;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{EngineError, EngineResult};
pub use types::{IdentifierPolicy, SchemaShape};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

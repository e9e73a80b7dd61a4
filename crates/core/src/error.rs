//! Error types for colgen
//!
//! This module provides unified error handling for the generation engine:
//! identifier rejections, output-file errors and configuration errors.
//! Failures while applying a migration to a live database are reported by
//! the sync collaborator with their own error type and never pass through
//! `EngineError`.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for colgen
#[derive(Debug, Error)]
pub enum EngineError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// A normalized identifier was rejected by the strict identifier policy
    #[error("Invalid identifier '{identifier}' for collection '{collection}': {reason}")]
    InvalidIdentifier {
        collection: String,
        identifier: String,
        reason: String,
    },

    // ========================================================================
    // Output Errors
    // ========================================================================
    /// Output file already exists and overwriting is disabled
    #[error("Output file already exists: {0}")]
    OutputExists(PathBuf),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Directory creation failed
    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreate { path: PathBuf, message: String },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Missing required configuration
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),
}

impl EngineError {
    /// Create an invalid identifier error
    pub fn invalid_identifier(
        collection: impl Into<String>,
        identifier: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        EngineError::InvalidIdentifier {
            collection: collection.into(),
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias using EngineError
pub type EngineResult<T> = Result<T, EngineError>;

// ============================================================================
// Tests
// ============================================================================

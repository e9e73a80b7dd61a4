//! # colgen IR
//!
//! The collection model that every generator consumes.
//!
//! ## Core Concepts
//!
//! - **Collection**: a logical named entity (e.g. `Orders`) that becomes one
//!   table and one accessor class
//! - **Identifier**: the lowercase, underscore-separated form of a collection
//!   name, used as the SQL table name and inside derived SQL object names
//! - **CollectionSet**: the ordered input of one generation run
//! - **Manifest**: the JSON document the collection set is read from
//!

pub mod collection;
pub mod manifest;
pub mod naming;
pub mod validation;

pub use collection::{Collection, CollectionSet};
pub use manifest::{
    COLLECTIONS_KEY, DEFAULT_MANIFEST, collections_from_value, load_manifest, parse_manifest,
};
pub use naming::{
    DERIVED_AFFIXES, MAX_IDENTIFIER_LEN, MAX_TABLE_IDENTIFIER_LEN, is_code_symbol, is_sql_bareword,
    longest_derived_name, normalize,
};
pub use validation::{
    IssueKind, ValidationIssue, ValidationResult, identifier_problem, validate_collections,
};

// Re-export core types that are commonly used with the IR
pub use colgen_core::{EngineError, EngineResult, IdentifierPolicy, SchemaShape};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Prelude Module
// ============================================================================

/// Convenient re-exports for common usage
pub mod prelude {
    pub use crate::{
        Collection, CollectionSet, EngineError, EngineResult, IdentifierPolicy, SchemaShape,
        load_manifest, normalize, parse_manifest, validate_collections,
    };
}

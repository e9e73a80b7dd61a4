//! # Generation Context
//!
//! The `GenerationContext` holds everything the template modules need:
//! the generator configuration and the ordered collection set. It is built
//! once per run and shared by reference with every template function.
//!
//! [`CollectionInfo`] wraps a single collection and provides the naming
//! helpers for the two namespaces the generated documents use:
//!
//! - **SQL namespace**: the normalized identifier (`blog_posts`), used for
//!   table names and every SQL object derived from them
//! - **Code namespace**: the original display name (`BlogPosts`), used for
//!   classes, singletons and type references in the query surface
//!
//! The two are never mixed; the only place the identifier appears in the
//! query surface is the table-name string literal passed to a manager.

use chrono::SecondsFormat;
use colgen_core::SchemaShape;
use colgen_ir::{Collection, CollectionSet};

use crate::GeneratorConfig;

// ============================================================================
// GenerationContext
// ============================================================================

/// Context carrying all information needed for generation.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    /// Generator configuration (shape, flags, timestamp, ...)
    pub config: GeneratorConfig,

    /// Collections in input order
    collections: CollectionSet,
}

impl GenerationContext {
    /// Build a context from a collection set and generator config.
    pub fn new(collections: CollectionSet, config: GeneratorConfig) -> Self {
        Self {
            config,
            collections,
        }
    }

    /// Build with default generator config (convenience for tests).
    pub fn from_collections(collections: CollectionSet) -> Self {
        Self::new(collections, GeneratorConfig::default())
    }

    // ====================================================================
    // Collection accessors
    // ====================================================================

    /// The collection set in input order.
    pub fn collections(&self) -> &CollectionSet {
        &self.collections
    }

    /// Per-collection naming views, in input order.
    pub fn infos(&self) -> impl Iterator<Item = CollectionInfo<'_>> {
        self.collections.iter().map(CollectionInfo::new)
    }

    /// Number of collections.
    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }

    // ====================================================================
    // Config shortcuts
    // ====================================================================

    pub fn shape(&self) -> SchemaShape {
        self.config.shape
    }

    pub fn project_name(&self) -> &str {
        &self.config.project_name
    }

    pub fn include_utilities(&self) -> bool {
        self.config.include_utilities
    }

    /// ISO-8601 timestamp for document headers, if one is configured.
    pub fn generated_at(&self) -> Option<String> {
        self.config
            .generated_at
            .map(|at| at.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    /// Timestamp suffix for file names (`YYYYmmdd_HHMMSS`), if configured.
    pub fn file_stamp(&self) -> Option<String> {
        self.config
            .generated_at
            .map(|at| at.format("%Y%m%d_%H%M%S").to_string())
    }

    /// Migration file name, e.g. `supabase_migration_20261018_120000.sql`.
    pub fn migration_file_name(&self) -> String {
        let prefix = self.shape().migration_prefix();
        match self.file_stamp() {
            Some(stamp) => format!("{prefix}_migration_{stamp}.sql"),
            None => format!("{prefix}_migration.sql"),
        }
    }
}

// ============================================================================
// CollectionInfo
// ============================================================================

/// Naming view over one collection.
#[derive(Debug, Clone, Copy)]
pub struct CollectionInfo<'a> {
    collection: &'a Collection,
}

impl<'a> CollectionInfo<'a> {
    pub fn new(collection: &'a Collection) -> Self {
        Self { collection }
    }

    /// Original display name (code namespace).
    pub fn name(&self) -> &'a str {
        self.collection.name()
    }

    /// Normalized table identifier (SQL namespace).
    pub fn table_name(&self) -> String {
        self.collection.identifier()
    }

    /// Manager class name, e.g. `BlogPostsManager`.
    pub fn manager_class(&self) -> String {
        format!("{}Manager", self.name())
    }

    /// Key in the aggregate export, e.g. `blogposts`.
    pub fn export_key(&self) -> String {
        self.name().to_lowercase()
    }

    /// Singleton variable name, e.g. `blogpostsManager`.
    pub fn singleton_name(&self) -> String {
        format!("{}Manager", self.export_key())
    }

    /// Row type name imported from the generated types module.
    pub fn row_type(&self) -> &'a str {
        self.name()
    }

    /// Insert payload type name, e.g. `CreateBlogPosts`.
    pub fn create_type(&self) -> String {
        format!("Create{}", self.name())
    }

    /// Update payload type name, e.g. `UpdateBlogPosts`.
    pub fn update_type(&self) -> String {
        format!("Update{}", self.name())
    }
}

// ============================================================================
// Tests
// ============================================================================

//! # Migration Generation
//!
//! This module assembles the single SQL migration document for a run.
//!
//! ## Document Layout
//!
//! ```text
//! preamble            header, extensions, timezone, BEGIN
//! utilities           optional stored routines (search, stats, helpers)
//! collection tables   one block per collection, in input order
//! system tables       relationship table (+ audit log table, full shape)
//! trailer             grants, COMMIT
//! ```
//!
//! The order is fixed. Each per-collection block keeps a table together
//! with its trigger function, so no block depends on a later one.
//!
//! ## Shapes
//!
//! - `SchemaShape::Minimal`: plain tables, search vector, `updated_at`
//!   trigger, commented grants
//! - `SchemaShape::Full`: derived `title`/`slug`/`status` columns, unique
//!   slug, row-level security, audit-log function, audit table, grants

pub mod known_tables;
pub mod preamble;
pub mod system;
pub mod table;
pub mod utilities;

pub use known_tables::KNOWN_TABLES;
pub use system::relationship_block;
pub use table::schema_block;
pub use utilities::{SEARCH_ROUTINE, STATS_ROUTINE, utility_block};

use crate::GeneratedFile;
use crate::context::GenerationContext;

/// Banner placed before the per-collection blocks.
const COLLECTION_TABLES_BANNER: &str = r#"
-- =====================================================
-- COLLECTION TABLES
-- =====================================================
"#;

/// Banner placed before the relationship/system blocks.
const SYSTEM_TABLES_BANNER: &str = r#"
-- =====================================================
-- RELATIONSHIP TABLES
-- =====================================================
"#;

// ============================================================================
// MigrationSections
// ============================================================================

/// The rendered sections of one migration, before concatenation.
#[derive(Debug, Clone, Default)]
pub struct MigrationSections {
    pub preamble: String,
    pub utilities: Option<String>,
    pub per_collection: Vec<String>,
    pub relationships: String,
    pub trailer: String,
}

impl MigrationSections {
    /// Render every section for the collections in `ctx`.
    pub fn build(ctx: &GenerationContext) -> Self {
        let shape = ctx.shape();

        let per_collection = ctx
            .infos()
            .map(|info| {
                let table = info.table_name();
                tracing::debug!(collection = info.name(), table = %table, "rendering schema block");
                schema_block(&table, info.name(), shape)
            })
            .collect();

        Self {
            preamble: preamble::preamble(ctx),
            utilities: ctx.include_utilities().then(|| utility_block(shape)),
            per_collection,
            relationships: relationship_block(shape),
            trailer: preamble::trailer(ctx),
        }
    }
}

// ============================================================================
// Composition
// ============================================================================

/// Concatenate sections in their fixed order.
pub fn compose(sections: &MigrationSections) -> String {
    let capacity = sections.preamble.len()
        + sections.utilities.as_ref().map_or(0, String::len)
        + sections.per_collection.iter().map(|b| b.len() + 1).sum::<usize>()
        + sections.relationships.len()
        + sections.trailer.len()
        + COLLECTION_TABLES_BANNER.len()
        + SYSTEM_TABLES_BANNER.len();

    let mut out = String::with_capacity(capacity);

    out.push_str(&sections.preamble);

    if let Some(utilities) = &sections.utilities {
        out.push_str(utilities);
    }

    out.push_str(COLLECTION_TABLES_BANNER);
    for block in &sections.per_collection {
        out.push_str(block);
        out.push('\n');
    }

    out.push_str(SYSTEM_TABLES_BANNER);
    out.push_str(&sections.relationships);

    out.push_str(&sections.trailer);

    out
}

/// Render the complete migration document.
pub fn migration_document(ctx: &GenerationContext) -> String {
    compose(&MigrationSections::build(ctx))
}

/// Generate the migration file.
pub fn generate_migration(ctx: &GenerationContext) -> GeneratedFile {
    GeneratedFile::sql(ctx.migration_file_name(), migration_document(ctx))
}

// ============================================================================
// Tests
// ============================================================================

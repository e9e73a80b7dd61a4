//! # Generator Orchestrator
//!
//! The `Generator` is the top-level entry point for generation. It is built
//! with a [`CollectionSet`] and a [`GeneratorConfig`], validates the set
//! under the configured identifier policy, builds a [`GenerationContext`],
//! and delegates to the migration and query-surface generators to produce a
//! [`GeneratedProject`].
//!
//! ## Pipeline
//!
//! ```text
//! CollectionSet + GeneratorConfig
//!         │
//!         ▼
//!   validate_collections(policy)        strict errors stop here
//!         │
//!         ▼
//!   GenerationContext::new()
//!         │
//!         ├──► migrations::generate_migration()     → GeneratedFile (.sql)
//!         ├──► queries::generate_query_surface()    → GeneratedFile (.ts)
//!         │
//!         ▼
//!   GeneratedProject { files, warnings }
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use colgen_codegen::{Generator, GeneratorConfig};
//! use colgen_ir::CollectionSet;
//!
//! let set = CollectionSet::from_names(["Services", "Products"]);
//! let output = Generator::new(set, GeneratorConfig::default()).generate()?;
//!
//! println!("Generated {} files", output.file_count());
//! output.write_to_disk("/path/to/output", false)?;
//! ```

use colgen_core::EngineResult;
use colgen_ir::{CollectionSet, validate_collections};
use serde::Serialize;

use crate::context::GenerationContext;
use crate::migrations;
use crate::queries;
use crate::{FileType, GeneratedProject, GeneratorConfig};

/// Warning attached to runs over an empty collection set.
pub const EMPTY_SET_WARNING: &str =
    "No collections defined; the migration contains only the fixed sections";

// ============================================================================
// Generator
// ============================================================================

/// Top-level generator over one collection set.
///
/// Generation is pure: calling [`generate`](Generator::generate) twice with
/// the same inputs yields byte-identical documents.
#[derive(Debug, Clone)]
pub struct Generator {
    collections: CollectionSet,
    config: GeneratorConfig,
}

impl Generator {
    // ====================================================================
    // Construction
    // ====================================================================

    /// Create a generator for `collections` with the given configuration.
    pub fn new(collections: CollectionSet, config: GeneratorConfig) -> Self {
        Self {
            collections,
            config,
        }
    }

    /// Create a generator with default configuration.
    pub fn with_defaults(collections: CollectionSet) -> Self {
        Self::new(collections, GeneratorConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: GeneratorConfig) {
        self.config = config;
    }

    /// The collection set this generator was built with.
    pub fn collections(&self) -> &CollectionSet {
        &self.collections
    }

    // ====================================================================
    // Generation
    // ====================================================================

    /// Run the generation pipeline.
    ///
    /// # Steps
    ///
    /// 1. **Validate** the set. Under `IdentifierPolicy::Strict`, names that
    ///    normalize to unusable identifiers or symbols abort the run.
    ///    Everything else becomes a warning.
    /// 2. **Build** a [`GenerationContext`].
    /// 3. **Generate** the migration document.
    /// 4. **Generate** the query surface, unless disabled.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidIdentifier` for the first blocking
    /// finding under the strict policy. The template functions themselves
    /// cannot fail.
    pub fn generate(&self) -> EngineResult<GeneratedProject> {
        // ── 1. Validate ──────────────────────────────────────────────────
        let findings = validate_collections(&self.collections, self.config.identifier_policy)
            .into_result()?;

        let mut warnings: Vec<String> = findings.iter().map(ToString::to_string).collect();
        for warning in &warnings {
            tracing::warn!("{}", warning);
        }

        if self.collections.is_empty() {
            tracing::warn!("{}", EMPTY_SET_WARNING);
            warnings.push(EMPTY_SET_WARNING.to_string());
        }

        // ── 2. Build context ─────────────────────────────────────────────
        let ctx = GenerationContext::new(self.collections.clone(), self.config.clone());

        // ── 3. Assemble output ───────────────────────────────────────────
        let mut output = GeneratedProject::new(ctx.project_name(), ctx.collection_count());

        output.add_file(migrations::generate_migration(&ctx));

        if self.config.generate_queries {
            output.add_file(queries::generate_query_surface(&ctx));
        }

        for warning in warnings {
            output.add_warning(warning);
        }

        tracing::info!(
            files = output.file_count(),
            warnings = output.warnings.len(),
            collections = ctx.collection_count(),
            shape = %ctx.shape(),
            "generation complete",
        );

        Ok(output)
    }

    // ====================================================================
    // Convenience: generate and write to disk
    // ====================================================================

    /// Generate and write all files to the configured output directory.
    ///
    /// # Errors
    ///
    /// Returns an error if generation fails, if a target file exists and
    /// `overwrite` is off, or if any file cannot be written.
    pub fn generate_and_write(&self) -> EngineResult<GeneratedProject> {
        let output = self.generate()?;
        output.write_to_disk(&self.config.output_dir, self.config.overwrite)?;
        tracing::info!(
            output_dir = %self.config.output_dir.display(),
            files = output.file_count(),
            "files written to disk",
        );
        Ok(output)
    }
}

// ============================================================================
// Standalone convenience function
// ============================================================================

/// Generate from a collection set using default configuration.
pub fn generate(collections: &CollectionSet) -> EngineResult<GeneratedProject> {
    Generator::with_defaults(collections.clone()).generate()
}

// ============================================================================
// GenerationSummary
// ============================================================================

/// A summary of a completed generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationSummary {
    pub project_name: String,
    pub collections: usize,
    pub total_files: usize,
    pub sql_files: usize,
    pub typescript_files: usize,
    pub warning_count: usize,
    pub total_bytes: usize,
}

impl GenerationSummary {
    /// Build a summary from a generated project.
    pub fn from_project(project: &GeneratedProject) -> Self {
        Self {
            project_name: project.name.clone(),
            collections: project.collection_count,
            total_files: project.file_count(),
            sql_files: project.files_by_type(FileType::Sql).len(),
            typescript_files: project.files_by_type(FileType::TypeScript).len(),
            warning_count: project.warnings.len(),
            total_bytes: project.files.iter().map(|f| f.content.len()).sum(),
        }
    }

    /// Whether the run had nothing to generate.
    pub fn is_empty(&self) -> bool {
        self.collections == 0
    }

    /// Format the summary as a human-readable string.
    pub fn display(&self) -> String {
        let mut out = String::with_capacity(512);

        out.push_str("╔══════════════════════════════════════════════════╗\n");
        out.push_str("║         Generation Complete                      ║\n");
        out.push_str("╠══════════════════════════════════════════════════╣\n");
        out.push_str(&format!("║  Project:     {:<35}║\n", self.project_name));
        out.push_str(&format!("║  Collections: {:<35}║\n", self.collections));
        out.push_str(&format!("║  Total Files: {:<35}║\n", self.total_files));
        out.push_str(&format!("║    SQL:       {:<35}║\n", self.sql_files));
        out.push_str(&format!("║    TS:        {:<35}║\n", self.typescript_files));
        out.push_str(&format!("║  Warnings:    {:<35}║\n", self.warning_count));

        let size_str = if self.total_bytes < 1024 {
            format!("{} B", self.total_bytes)
        } else if self.total_bytes < 1024 * 1024 {
            format!("{:.1} KB", self.total_bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", self.total_bytes as f64 / (1024.0 * 1024.0))
        };
        out.push_str(&format!("║  Total Size:  {:<35}║\n", size_str));
        out.push_str("╚══════════════════════════════════════════════════╝\n");

        out
    }
}

impl std::fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Produce a [`GenerationSummary`] from a [`GeneratedProject`].
pub fn summarize(project: &GeneratedProject) -> GenerationSummary {
    GenerationSummary::from_project(project)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use colgen_core::{EngineError, IdentifierPolicy, SchemaShape};
    use tempfile::TempDir;

    fn services_and_products() -> CollectionSet {
        CollectionSet::from_names(["Services", "Products"])
    }

    // ── Construction ─────────────────────────────────────────────────────

    #[test]
    fn test_generator_new() {
        let generator = Generator::with_defaults(services_and_products());
        assert_eq!(generator.collections().len(), 2);
        assert!(generator.config().generate_queries);
    }

    #[test]
    fn test_generator_set_config() {
        let mut generator = Generator::with_defaults(CollectionSet::new());
        generator.set_config(GeneratorConfig::new().without_queries());
        assert!(!generator.config().generate_queries);
    }

    // ── Generation ───────────────────────────────────────────────────────

    #[test]
    fn test_generate_both_documents() {
        let output = Generator::with_defaults(services_and_products())
            .generate()
            .unwrap();

        assert_eq!(output.file_count(), 2);
        assert!(!output.has_warnings());

        let sql = &output.migration().unwrap().content;
        assert!(sql.contains("public.services ("));
        assert!(sql.contains("public.products ("));

        let ts = &output.query_surface().unwrap().content;
        assert!(ts.contains("services: servicesManager,"));
        assert!(ts.contains("products: productsManager,"));
    }

    #[test]
    fn test_generate_without_queries() {
        let output = Generator::new(
            services_and_products(),
            GeneratorConfig::new().without_queries(),
        )
        .generate()
        .unwrap();

        assert_eq!(output.file_count(), 1);
        assert!(output.query_surface().is_none());
    }

    #[test]
    fn test_generate_empty_set() {
        for shape in SchemaShape::all() {
            let output = Generator::new(CollectionSet::new(), GeneratorConfig::new().with_shape(*shape))
                .generate()
                .unwrap();

            assert!(output.is_empty());
            assert_eq!(output.file_count(), 2);
            assert!(output.warnings.iter().any(|w| w == EMPTY_SET_WARNING));

            let sql = &output.migration().unwrap().content;
            assert!(sql.contains("-- Collections: 0"));
            assert!(sql.trim_end().ends_with("COMMIT;"));
        }
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = generate(&services_and_products()).unwrap();
        let b = generate(&services_and_products()).unwrap();

        for (x, y) in a.files.iter().zip(&b.files) {
            assert_eq!(x.path, y.path);
            assert_eq!(x.content, y.content);
        }
    }

    #[test]
    fn test_permissive_policy_warns_on_degenerate_names() {
        let set = CollectionSet::from_names(["Blog Posts", "Orders"]);
        let output = generate(&set).unwrap();

        assert!(output.has_warnings());
        assert!(output.migration().unwrap().content.contains("-- Table: blog posts (Blog Posts)"));
    }

    #[test]
    fn test_strict_policy_rejects_degenerate_names() {
        let set = CollectionSet::from_names(["Orders", "Blog-Posts"]);
        let err = Generator::new(
            set,
            GeneratorConfig::new().with_identifier_policy(IdentifierPolicy::Strict),
        )
        .generate()
        .unwrap_err();

        assert!(matches!(err, EngineError::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_duplicates_are_warnings_even_when_strict() {
        let set = CollectionSet::from_names(["Orders", "Orders"]);
        let output = Generator::new(
            set,
            GeneratorConfig::new().with_identifier_policy(IdentifierPolicy::Strict),
        )
        .generate()
        .unwrap();

        assert!(output.has_warnings());
    }

    #[test]
    fn test_generate_and_write() {
        let dir = TempDir::new().unwrap();
        let config = GeneratorConfig::new().with_output_dir(dir.path());
        let generator = Generator::new(services_and_products(), config);

        generator.generate_and_write().unwrap();
        assert!(dir.path().join("supabase_migration.sql").exists());
        assert!(dir.path().join("supabase-queries.ts").exists());

        // second run refuses to clobber
        let err = generator.generate_and_write().unwrap_err();
        assert!(matches!(err, EngineError::OutputExists(_)));
    }

    #[test]
    fn test_refused_timestamped_run_writes_nothing() {
        use chrono::TimeZone;

        let dir = TempDir::new().unwrap();
        let first = chrono::Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
        let second = chrono::Utc.with_ymd_and_hms(2026, 10, 18, 9, 5, 0).unwrap();

        let config = GeneratorConfig::new().with_output_dir(dir.path());
        Generator::new(services_and_products(), config.clone().with_timestamp(first))
            .generate_and_write()
            .unwrap();

        // the migration name differs, but the query surface already exists
        let err = Generator::new(services_and_products(), config.with_timestamp(second))
            .generate_and_write()
            .unwrap_err();
        match err {
            EngineError::OutputExists(path) => {
                assert_eq!(path, dir.path().join("supabase-queries.ts"));
            }
            other => panic!("unexpected {other:?}"),
        }

        let mut names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec!["supabase-queries.ts", "supabase_migration_20261018_090000.sql"]
        );
    }

    // ── Summary ──────────────────────────────────────────────────────────

    #[test]
    fn test_summary() {
        let output = generate(&services_and_products()).unwrap();
        let summary = summarize(&output);

        assert_eq!(summary.collections, 2);
        assert_eq!(summary.total_files, 2);
        assert_eq!(summary.sql_files, 1);
        assert_eq!(summary.typescript_files, 1);
        assert!(summary.total_bytes > 0);
        assert!(!summary.is_empty());

        let text = summary.to_string();
        assert!(text.contains("Generation Complete"));
        assert!(text.contains("Collections: 2"));
    }
}

//! # colgen Codegen
//!
//! Generation engine for colgen.
//!
//! This crate turns an ordered [`CollectionSet`] into two text documents
//! that must agree with each other on every table and routine name:
//!
//! - **Migration**: PostgreSQL DDL with one block per collection plus the
//!   fixed preamble, utility routines, relationship/system tables and trailer
//! - **Query surface**: a TypeScript module with a generic Supabase
//!   collection manager, one specialised manager per collection and an
//!   aggregate export
//!
//! Both are pure text construction. Writing them to disk is a separate step
//! ([`GeneratedProject::write_to_disk`]).
//!

// ============================================================================
// Modules
// ============================================================================

pub mod context;
pub mod generator;
pub mod migrations;
pub mod queries;

// ============================================================================
// Re-exports
// ============================================================================

pub use context::{CollectionInfo, GenerationContext};
pub use generator::{GenerationSummary, Generator, generate, summarize};

use chrono::{DateTime, Utc};
use colgen_core::{EngineError, EngineResult, IdentifierPolicy, SchemaShape};
use colgen_ir::CollectionSet;
use std::path::{Path, PathBuf};

// ============================================================================
// GeneratorConfig
// ============================================================================

/// Configuration for the generator
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Project label used in document headers
    pub project_name: String,

    /// Output directory for generated files
    pub output_dir: PathBuf,

    /// Schema richness
    pub shape: SchemaShape,

    /// Whether to emit the utility routines section
    pub include_utilities: bool,

    /// Whether to emit the TypeScript query surface
    pub generate_queries: bool,

    /// How identifiers outside `[a-z0-9_]` are handled
    pub identifier_policy: IdentifierPolicy,

    /// Timestamp embedded in headers and file names; `None` keeps output
    /// byte-identical across runs
    pub generated_at: Option<DateTime<Utc>>,

    /// Whether to overwrite existing files
    pub overwrite: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            project_name: "app".to_string(),
            output_dir: PathBuf::from("."),
            shape: SchemaShape::default(),
            include_utilities: true,
            generate_queries: true,
            identifier_policy: IdentifierPolicy::default(),
            generated_at: None,
            overwrite: false,
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the project label
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = name.into();
        self
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the schema shape
    pub fn with_shape(mut self, shape: SchemaShape) -> Self {
        self.shape = shape;
        self
    }

    /// Set the identifier policy
    pub fn with_identifier_policy(mut self, policy: IdentifierPolicy) -> Self {
        self.identifier_policy = policy;
        self
    }

    /// Embed a generation timestamp
    pub fn with_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Disable the utility routines section
    pub fn without_utilities(mut self) -> Self {
        self.include_utilities = false;
        self
    }

    /// Disable query-surface generation
    pub fn without_queries(mut self) -> Self {
        self.generate_queries = false;
        self
    }

    /// Allow overwriting existing files
    pub fn allow_overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }
}

// ============================================================================
// GeneratedFile
// ============================================================================

/// Represents a single generated file
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    /// Relative path from output directory
    pub path: PathBuf,

    /// File content
    pub content: String,

    /// File type for categorization
    pub file_type: FileType,
}

impl GeneratedFile {
    /// Create a new generated file
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>, file_type: FileType) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            file_type,
        }
    }

    /// Create a SQL migration file
    pub fn sql(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::new(path, content, FileType::Sql)
    }

    /// Create a TypeScript source file
    pub fn typescript(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::new(path, content, FileType::TypeScript)
    }

    /// Get the file extension
    pub fn extension(&self) -> &str {
        self.file_type.extension()
    }
}

/// Type of generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Sql,
    TypeScript,
}

impl FileType {
    /// Get the file extension for this type
    pub fn extension(&self) -> &str {
        match self {
            FileType::Sql => "sql",
            FileType::TypeScript => "ts",
        }
    }
}

// ============================================================================
// GeneratedProject
// ============================================================================

/// Everything one generation run produced
#[derive(Debug, Clone, Default)]
pub struct GeneratedProject {
    /// Project label
    pub name: String,

    /// Number of collections the run was given
    pub collection_count: usize,

    /// All generated files
    pub files: Vec<GeneratedFile>,

    /// Warnings raised during generation
    pub warnings: Vec<String>,
}

impl GeneratedProject {
    /// Create a new, empty output
    pub fn new(name: impl Into<String>, collection_count: usize) -> Self {
        Self {
            name: name.into(),
            collection_count,
            files: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add a file
    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Get the number of files
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Whether the run had no collections to process
    pub fn is_empty(&self) -> bool {
        self.collection_count == 0
    }

    /// Get files by type
    pub fn files_by_type(&self, file_type: FileType) -> Vec<&GeneratedFile> {
        self.files
            .iter()
            .filter(|f| f.file_type == file_type)
            .collect()
    }

    /// The migration document, if one was generated
    pub fn migration(&self) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.file_type == FileType::Sql)
    }

    /// The query-surface document, if one was generated
    pub fn query_surface(&self) -> Option<&GeneratedFile> {
        self.files
            .iter()
            .find(|f| f.file_type == FileType::TypeScript)
    }

    /// Write all files under `base_dir`, returning the paths written.
    ///
    /// Existing files are only replaced when `overwrite` is set. Without it,
    /// every target is checked before anything is written, so a refused run
    /// leaves the directory untouched.
    pub fn write_to_disk(
        &self,
        base_dir: impl AsRef<Path>,
        overwrite: bool,
    ) -> EngineResult<Vec<PathBuf>> {
        let base_dir = base_dir.as_ref();
        let targets: Vec<PathBuf> = self.files.iter().map(|f| base_dir.join(&f.path)).collect();

        if !overwrite {
            if let Some(existing) = targets.iter().find(|p| p.exists()) {
                return Err(EngineError::OutputExists(existing.clone()));
            }
        }

        let mut written = Vec::with_capacity(self.files.len());

        for (file, full_path) in self.files.iter().zip(targets) {
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| EngineError::DirectoryCreate {
                    path: parent.to_path_buf(),
                    message: e.to_string(),
                })?;
            }

            std::fs::write(&full_path, &file.content).map_err(|e| EngineError::FileWrite {
                path: full_path.clone(),
                message: e.to_string(),
            })?;

            tracing::debug!(path = %full_path.display(), bytes = file.content.len(), "wrote file");
            written.push(full_path);
        }

        Ok(written)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generator_config_default() {
        let config = GeneratorConfig::default();
        assert_eq!(config.shape, SchemaShape::Full);
        assert!(config.include_utilities);
        assert!(config.generate_queries);
        assert!(config.generated_at.is_none());
        assert!(!config.overwrite);
    }

    #[test]
    fn test_generator_config_builder() {
        let config = GeneratorConfig::new()
            .with_output_dir("/tmp/output")
            .with_shape(SchemaShape::Minimal)
            .with_identifier_policy(IdentifierPolicy::Strict)
            .without_utilities()
            .without_queries()
            .allow_overwrite();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/output"));
        assert_eq!(config.shape, SchemaShape::Minimal);
        assert!(config.identifier_policy.is_strict());
        assert!(!config.include_utilities);
        assert!(!config.generate_queries);
        assert!(config.overwrite);
    }

    #[test]
    fn test_generated_file() {
        let file = GeneratedFile::sql("schema_migration.sql", "COMMIT;");
        assert_eq!(file.extension(), "sql");
        assert_eq!(file.file_type, FileType::Sql);

        let file = GeneratedFile::typescript("supabase-queries.ts", "export {}");
        assert_eq!(file.extension(), "ts");
    }

    #[test]
    fn test_generated_project_lookup() {
        let mut project = GeneratedProject::new("test", 0);
        project.add_file(GeneratedFile::sql("a.sql", "COMMIT;"));
        project.add_file(GeneratedFile::typescript("b.ts", "export {}"));

        assert!(project.is_empty());
        assert_eq!(project.file_count(), 2);
        assert_eq!(project.files_by_type(FileType::Sql).len(), 1);
        assert_eq!(project.migration().unwrap().content, "COMMIT;");
        assert_eq!(project.query_surface().unwrap().content, "export {}");
    }

    #[test]
    fn test_write_to_disk_creates_directories() {
        let dir = TempDir::new().unwrap();
        let mut project = GeneratedProject::new("test", 1);
        project.add_file(GeneratedFile::sql("migrations/m.sql", "COMMIT;\n"));

        let written = project.write_to_disk(dir.path(), false).unwrap();
        assert_eq!(written, vec![dir.path().join("migrations/m.sql")]);
        assert_eq!(std::fs::read_to_string(&written[0]).unwrap(), "COMMIT;\n");
    }

    #[test]
    fn test_write_to_disk_refuses_to_clobber() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("m.sql"), "old").unwrap();

        let mut project = GeneratedProject::new("test", 1);
        project.add_file(GeneratedFile::sql("m.sql", "new"));

        let err = project.write_to_disk(dir.path(), false).unwrap_err();
        assert!(matches!(err, EngineError::OutputExists(_)));
        assert_eq!(std::fs::read_to_string(dir.path().join("m.sql")).unwrap(), "old");

        project.write_to_disk(dir.path(), true).unwrap();
        assert_eq!(std::fs::read_to_string(dir.path().join("m.sql")).unwrap(), "new");
    }

    #[test]
    fn test_standalone_generate_function() {
        let set = CollectionSet::from_names(["Services"]);
        let output = generate(&set).unwrap();
        assert_eq!(output.collection_count, 1);
        assert_eq!(output.file_count(), 2);
    }
}

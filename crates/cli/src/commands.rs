//! Command implementations.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use chrono::{DateTime, Utc};
use colgen_codegen::{FileType, GenerationSummary, Generator, GeneratorConfig, summarize};
use colgen_core::IdentifierPolicy;
use colgen_ir::{DEFAULT_MANIFEST, identifier_problem, load_manifest, normalize as normalize_name};
use colored::Colorize;
use serde::Serialize;

use crate::GenerateArgs;
use crate::config::{FileConfig, GeneratorSection};
use crate::sync::{SyncOutcome, sync_with_database};

// ============================================================================
// Option resolution
// ============================================================================

/// Manifest location and generator config after merging file and flags.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub manifest: PathBuf,
    pub config: GeneratorConfig,
}

/// Merge `colgen.toml` values with command-line flags. Flags win.
pub fn resolve(args: &GenerateArgs, file: &GeneratorSection, now: DateTime<Utc>) -> Resolved {
    let manifest = args
        .input
        .clone()
        .or_else(|| file.manifest.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST));

    let mut config = GeneratorConfig::new();

    if let Some(name) = args.project.clone().or_else(|| file.project_name.clone()) {
        config = config.with_project_name(name);
    }
    if let Some(dir) = args.out_dir.clone().or_else(|| file.output_dir.clone()) {
        config = config.with_output_dir(dir);
    }
    if let Some(shape) = args.shape.or(file.shape) {
        config = config.with_shape(shape);
    }

    let policy = if args.strict {
        IdentifierPolicy::Strict
    } else {
        file.identifier_policy.unwrap_or_default()
    };
    config = config.with_identifier_policy(policy);

    if args.no_utilities || file.include_utilities == Some(false) {
        config = config.without_utilities();
    }
    if args.no_queries || file.generate_queries == Some(false) {
        config = config.without_queries();
    }
    if args.overwrite || file.overwrite == Some(true) {
        config = config.allow_overwrite();
    }
    if !args.no_timestamp && file.timestamp != Some(false) {
        config = config.with_timestamp(now);
    }

    Resolved { manifest, config }
}

// ============================================================================
// generate
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateReport {
    manifest: PathBuf,
    summary: GenerationSummary,
    files: Vec<PathBuf>,
    warnings: Vec<String>,
    sync: Option<SyncReport>,
}

#[derive(Debug, Serialize)]
struct SyncReport {
    applied: bool,
    hint: Option<String>,
}

impl From<&SyncOutcome> for SyncReport {
    fn from(outcome: &SyncOutcome) -> Self {
        match outcome {
            SyncOutcome::Applied { .. } => Self {
                applied: true,
                hint: None,
            },
            SyncOutcome::Skipped { hint } => Self {
                applied: false,
                hint: Some(hint.clone()),
            },
        }
    }
}

pub async fn generate(args: GenerateArgs, quiet: bool) -> anyhow::Result<()> {
    let file = FileConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    let Resolved { manifest, config } = resolve(&args, &file.generator, Utc::now());

    tracing::debug!(
        manifest = %manifest.display(),
        shape = %config.shape,
        policy = %config.identifier_policy,
        "resolved generate options",
    );

    let collections = load_manifest(&manifest);
    let output = Generator::new(collections, config.clone())
        .generate()
        .context("generation failed")?;
    let summary = summarize(&output);

    if summary.is_empty() {
        if args.json {
            let report = GenerateReport {
                manifest,
                summary,
                files: Vec::new(),
                warnings: output.warnings,
                sync: None,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!(
                "{} no collections found in {}; nothing to generate",
                "warning:".yellow().bold(),
                manifest.display()
            );
        }
        return Ok(());
    }

    let written = output
        .write_to_disk(&config.output_dir, config.overwrite)
        .context("failed to write generated files")?;

    let sync = if args.sync {
        let migration = output
            .migration()
            .map(|f| config.output_dir.join(&f.path))
            .context("no migration was generated")?;
        Some(sync_with_database(args.database_url.as_deref(), &migration).await?)
    } else {
        None
    };

    if args.json {
        let report = GenerateReport {
            manifest,
            summary,
            files: written,
            warnings: output.warnings,
            sync: sync.as_ref().map(SyncReport::from),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for warning in &output.warnings {
        println!("{} {}", "warning:".yellow().bold(), warning);
    }

    if !quiet {
        print!("{summary}");
    }

    for (path, file) in written.iter().zip(&output.files) {
        let label = match file.file_type {
            FileType::Sql => "migration",
            FileType::TypeScript => "queries",
        };
        println!("{:>10} {}", label.green().bold(), path.display());
    }

    match &sync {
        Some(outcome) => print_sync(outcome),
        None if !quiet => print_next_steps(&written, &output.files),
        None => {}
    }

    Ok(())
}

fn print_next_steps(written: &[PathBuf], files: &[colgen_codegen::GeneratedFile]) {
    println!();
    println!("{}", "Next steps:".bold());
    if let Some((path, _)) = written
        .iter()
        .zip(files)
        .find(|(_, f)| f.file_type == FileType::Sql)
    {
        println!("  1. Review {}", path.display());
        println!("  2. Apply it: colgen sync {}", path.display());
    }
    if let Some((path, _)) = written
        .iter()
        .zip(files)
        .find(|(_, f)| f.file_type == FileType::TypeScript)
    {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("supabase-queries");
        println!("  3. Import managers: import {{ collectionManagers }} from './{stem}'");
    }
}

fn print_sync(outcome: &SyncOutcome) {
    match outcome {
        SyncOutcome::Applied { .. } => {
            println!("{:>10} migration applied", "synced".green().bold());
        }
        SyncOutcome::Skipped { hint } => {
            println!("{:>10} {}", "skipped".yellow().bold(), hint);
        }
    }
}

// ============================================================================
// normalize
// ============================================================================

/// One name with its table identifier and, if unusable, the reason.
#[derive(Debug, Serialize)]
pub struct NormalizedName<'a> {
    pub name: &'a str,
    pub identifier: String,
    pub problem: Option<String>,
}

/// Normalize each name and check the identifier it produces.
pub fn normalized_rows(names: &[String]) -> Vec<NormalizedName<'_>> {
    names
        .iter()
        .map(|name| {
            let identifier = normalize_name(name);
            let problem = identifier_problem(&identifier);
            NormalizedName {
                name,
                identifier,
                problem,
            }
        })
        .collect()
}

pub fn normalize(names: &[String], json: bool) -> anyhow::Result<()> {
    let rows = normalized_rows(names);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let width = rows.iter().map(|r| r.name.chars().count()).max().unwrap_or(0);
    for row in &rows {
        let pad = width - row.name.chars().count();
        print!("{}{} -> {}", row.name, " ".repeat(pad), row.identifier);
        match &row.problem {
            Some(problem) => println!("  {}", problem.yellow()),
            None => println!(),
        }
    }

    Ok(())
}

// ============================================================================
// sync
// ============================================================================

pub async fn sync(file: &Path, database_url: Option<&str>) -> anyhow::Result<()> {
    if !file.is_file() {
        bail!("migration file '{}' not found", file.display());
    }

    let outcome = sync_with_database(database_url, file)
        .await
        .with_context(|| format!("failed to apply {}", file.display()))?;
    print_sync(&outcome);

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use colgen_core::SchemaShape;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_resolve_defaults() {
        let r = resolve(&GenerateArgs::default(), &GeneratorSection::default(), now());

        assert_eq!(r.manifest, PathBuf::from(DEFAULT_MANIFEST));
        assert_eq!(r.config.shape, SchemaShape::Full);
        assert_eq!(r.config.identifier_policy, IdentifierPolicy::Permissive);
        assert_eq!(r.config.generated_at, Some(now()));
        assert!(r.config.include_utilities);
        assert!(r.config.generate_queries);
        assert!(!r.config.overwrite);
    }

    #[test]
    fn test_resolve_file_values() {
        let file = GeneratorSection {
            project_name: Some("Shop".into()),
            manifest: Some("types/info.json".into()),
            shape: Some(SchemaShape::Minimal),
            identifier_policy: Some(IdentifierPolicy::Strict),
            include_utilities: Some(false),
            timestamp: Some(false),
            ..Default::default()
        };
        let r = resolve(&GenerateArgs::default(), &file, now());

        assert_eq!(r.manifest, PathBuf::from("types/info.json"));
        assert_eq!(r.config.project_name, "Shop");
        assert_eq!(r.config.shape, SchemaShape::Minimal);
        assert!(r.config.identifier_policy.is_strict());
        assert!(!r.config.include_utilities);
        assert!(r.config.generated_at.is_none());
    }

    #[test]
    fn test_flags_override_file() {
        let file = GeneratorSection {
            manifest: Some("from-file.json".into()),
            shape: Some(SchemaShape::Minimal),
            output_dir: Some("file-out".into()),
            ..Default::default()
        };
        let args = GenerateArgs {
            input: Some("from-flag.json".into()),
            shape: Some(SchemaShape::Full),
            out_dir: Some("flag-out".into()),
            no_timestamp: true,
            no_queries: true,
            ..Default::default()
        };
        let r = resolve(&args, &file, now());

        assert_eq!(r.manifest, PathBuf::from("from-flag.json"));
        assert_eq!(r.config.shape, SchemaShape::Full);
        assert_eq!(r.config.output_dir, PathBuf::from("flag-out"));
        assert!(r.config.generated_at.is_none());
        assert!(!r.config.generate_queries);
    }

    #[test]
    fn test_normalized_rows() {
        let names = vec!["BlogPosts".to_string(), "Blog Posts".to_string(), "FAQ".to_string()];
        let rows = normalized_rows(&names);
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].name, "BlogPosts");
        assert_eq!(rows[0].identifier, "blog_posts");
        assert_eq!(rows[0].problem, None);

        assert_eq!(rows[1].name, "Blog Posts");
        assert_eq!(rows[1].identifier, "blog posts");
        let problem = rows[1].problem.as_deref().unwrap();
        assert!(problem.contains("not a SQL bareword"), "{problem}");

        assert_eq!(rows[2].identifier, "faq");
        assert_eq!(rows[2].problem, None);

        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(json[0]["identifier"], "blog_posts");
        assert!(json[0]["problem"].is_null());
        assert!(json[1]["problem"].is_string());
    }

    #[tokio::test]
    async fn test_sync_missing_file() {
        let err = sync(Path::new("definitely/not/here.sql"), None).await.unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}

//! Applying a generated migration to a live database.
//!
//! The migration is handed to `psql` as a file argument. No shell is
//! involved, so the URL and path are passed through verbatim. Without a
//! database URL nothing is run and the caller gets a manual-apply hint.

use std::path::Path;
use std::process::Stdio;

use thiserror::Error;

/// Client binary used to apply migrations.
pub const PSQL: &str = "psql";

/// Errors from applying a migration.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The client binary could not be started.
    #[error("failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The client ran and reported failure.
    #[error("'{program}' exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
}

/// Result of a sync attempt that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No database URL was configured.
    Skipped { hint: String },
    /// The migration was applied.
    Applied { output: String },
}

impl SyncOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, SyncOutcome::Applied { .. })
    }
}

/// Apply `migration` to the database at `database_url` with `psql`.
pub async fn sync_with_database(
    database_url: Option<&str>,
    migration: &Path,
) -> Result<SyncOutcome, SyncError> {
    sync_with_program(PSQL, database_url, migration).await
}

/// Apply `migration` with an arbitrary psql-compatible `program`.
pub async fn sync_with_program(
    program: &str,
    database_url: Option<&str>,
    migration: &Path,
) -> Result<SyncOutcome, SyncError> {
    let Some(url) = database_url.filter(|u| !u.trim().is_empty()) else {
        tracing::info!(migration = %migration.display(), "no database URL, skipping sync");
        return Ok(SyncOutcome::Skipped {
            hint: manual_hint(migration),
        });
    };

    tracing::info!(program, migration = %migration.display(), "applying migration");

    let output = tokio::process::Command::new(program)
        .arg(url)
        .args(["-v", "ON_ERROR_STOP=1", "-f"])
        .arg(migration)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|source| SyncError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(SyncError::Failed {
            program: program.to_string(),
            status: output.status.to_string(),
            stderr,
        });
    }

    Ok(SyncOutcome::Applied {
        output: String::from_utf8_lossy(&output.stdout).to_string(),
    })
}

fn manual_hint(migration: &Path) -> String {
    format!(
        "DATABASE_URL is not set. Apply the migration manually with `{PSQL} \"$DATABASE_URL\" -f {}` or paste it into the Supabase SQL editor.",
        migration.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_missing_url_skips() {
        let file = PathBuf::from("supabase_migration.sql");

        for url in [None, Some(""), Some("   ")] {
            let outcome = sync_with_database(url, &file).await.unwrap();
            match outcome {
                SyncOutcome::Skipped { hint } => {
                    assert!(hint.contains("supabase_migration.sql"));
                    assert!(hint.contains("DATABASE_URL"));
                }
                other => panic!("expected skip, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let err = sync_with_program(
            "colgen-no-such-psql-binary",
            Some("postgres://localhost/db"),
            Path::new("m.sql"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, SyncError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_failure() {
        let err = sync_with_program("false", Some("postgres://localhost/db"), Path::new("m.sql"))
            .await
            .unwrap_err();

        assert!(matches!(err, SyncError::Failed { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_zero_exit_is_applied() {
        let outcome = sync_with_program("true", Some("postgres://localhost/db"), Path::new("m.sql"))
            .await
            .unwrap();

        assert!(outcome.is_applied());
    }
}

//! Core types shared by the IR, the generators and the CLI.

use serde::{Deserialize, Serialize};

// ============================================================================
// Schema Shape
// ============================================================================

/// Richness of the generated schema.
///
/// `Minimal` emits plain tables with search vectors and an `updated_at`
/// trigger. `Full` adds derived scalar columns, a unique slug, row-level
/// security policies, an audit-log function and the audit/system tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SchemaShape {
    Minimal,
    #[default]
    Full,
}

impl SchemaShape {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SchemaShape::Minimal => "minimal",
            SchemaShape::Full => "full",
        }
    }

    /// Prefix used for the migration file name
    pub fn migration_prefix(&self) -> &'static str {
        match self {
            SchemaShape::Minimal => "schema",
            SchemaShape::Full => "supabase",
        }
    }

    /// Whether this shape emits Supabase-specific constructs (RLS, `auth.*`)
    pub fn is_full(&self) -> bool {
        matches!(self, SchemaShape::Full)
    }

    /// Get all shapes
    pub fn all() -> &'static [SchemaShape] {
        &[SchemaShape::Minimal, SchemaShape::Full]
    }
}

impl std::fmt::Display for SchemaShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for SchemaShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimal" | "simple" => Ok(SchemaShape::Minimal),
            "full" | "supabase" => Ok(SchemaShape::Full),
            other => Err(format!("unknown schema shape '{other}'")),
        }
    }
}

// ============================================================================
// Identifier Policy
// ============================================================================

/// How the generator treats identifiers that are not plain SQL barewords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierPolicy {
    /// Interpolate every identifier as-is and only warn about degenerate ones.
    #[default]
    Permissive,
    /// Reject identifiers outside `[a-z0-9_]` before any template runs.
    Strict,
}

impl IdentifierPolicy {
    pub fn is_strict(&self) -> bool {
        matches!(self, IdentifierPolicy::Strict)
    }
}

impl std::fmt::Display for IdentifierPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentifierPolicy::Permissive => write!(f, "permissive"),
            IdentifierPolicy::Strict => write!(f, "strict"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_schema_shape_default_is_full() {
        assert_eq!(SchemaShape::default(), SchemaShape::Full);
        assert!(SchemaShape::Full.is_full());
        assert!(!SchemaShape::Minimal.is_full());
    }

    #[test]
    fn test_schema_shape_from_str() {
        assert_eq!("minimal".parse::<SchemaShape>(), Ok(SchemaShape::Minimal));
        assert_eq!("Simple".parse::<SchemaShape>(), Ok(SchemaShape::Minimal));
        assert_eq!("FULL".parse::<SchemaShape>(), Ok(SchemaShape::Full));
        assert!("rich".parse::<SchemaShape>().is_err());
    }

    #[test]
    fn test_schema_shape_serde_lowercase() {
        let json = serde_json::to_string(&SchemaShape::Minimal).unwrap();
        assert_eq!(json, "\"minimal\"");
        let back: SchemaShape = serde_json::from_str("\"full\"").unwrap();
        assert_eq!(back, SchemaShape::Full);
    }

    #[test]
    fn test_migration_prefix() {
        assert_eq!(SchemaShape::Minimal.migration_prefix(), "schema");
        assert_eq!(SchemaShape::Full.migration_prefix(), "supabase");
    }

    #[test]
    fn test_identifier_policy_default() {
        assert_eq!(IdentifierPolicy::default(), IdentifierPolicy::Permissive);
        assert!(IdentifierPolicy::Strict.is_strict());
        assert_eq!(IdentifierPolicy::Strict.to_string(), "strict");
    }
}

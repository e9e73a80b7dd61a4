//! Identifier validation
//!
//! Templates interpolate identifiers verbatim and never validate. This
//! module is the optional pre-pass that runs before them: it inspects every
//! collection in a set and reports names whose table identifier is not a
//! plain SQL bareword or leaves no room for the index and trigger names
//! built from it, whose display name cannot be used as a TypeScript
//! symbol, or that repeat another collection.
//!
//! Under [`IdentifierPolicy::Permissive`] every finding is a warning and
//! generation proceeds with the degenerate names as-is. Under
//! [`IdentifierPolicy::Strict`] identifier and symbol findings become
//! errors. Duplicates and collisions are always warnings.

use colgen_core::{EngineError, EngineResult, IdentifierPolicy};

use crate::collection::CollectionSet;
use crate::naming::{
    MAX_IDENTIFIER_LEN, MAX_TABLE_IDENTIFIER_LEN, is_code_symbol, is_sql_bareword,
    longest_derived_name, normalize,
};

// ============================================================================
// ValidationIssue
// ============================================================================

/// What a validation finding is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// Normalized identifier is not usable as an unquoted table name
    SqlIdentifier,
    /// Display name is not usable in generated accessor symbols
    CodeSymbol,
    /// Same name appears more than once
    Duplicate,
    /// Distinct names share one identifier
    Collision,
}

/// A single finding about one collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    pub collection: String,
    pub identifier: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(
        kind: IssueKind,
        collection: &str,
        identifier: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            collection: collection.to_string(),
            identifier: identifier.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Collection '{}': {}", self.collection, self.message)
    }
}

// ============================================================================
// ValidationResult
// ============================================================================

/// Result of validating a collection set
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// Findings that block generation
    pub errors: Vec<ValidationIssue>,

    /// Non-fatal findings
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Convert into an `EngineResult`, surfacing the first error.
    pub fn into_result(self) -> EngineResult<Vec<ValidationIssue>> {
        match self.errors.into_iter().next() {
            Some(issue) => Err(EngineError::invalid_identifier(
                issue.collection,
                issue.identifier,
                issue.message,
            )),
            None => Ok(self.warnings),
        }
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Why `identifier` is not a usable table name, or `None` if it is.
pub fn identifier_problem(identifier: &str) -> Option<String> {
    if identifier.is_empty() {
        return Some("normalizes to an empty identifier".to_string());
    }
    if identifier.len() > MAX_TABLE_IDENTIFIER_LEN {
        return Some(format!(
            "identifier '{}' is longer than {} bytes; derived name '{}' exceeds {} bytes and would be truncated",
            identifier,
            MAX_TABLE_IDENTIFIER_LEN,
            longest_derived_name(identifier),
            MAX_IDENTIFIER_LEN
        ));
    }
    if !is_sql_bareword(identifier) {
        return Some(format!(
            "identifier '{}' is not a SQL bareword ([a-z_][a-z0-9_]*)",
            identifier
        ));
    }
    None
}

/// Validate every collection in `set` under `policy`.
pub fn validate_collections(set: &CollectionSet, policy: IdentifierPolicy) -> ValidationResult {
    let mut result = ValidationResult::default();

    let mut push = |issue: ValidationIssue| {
        let blocking = policy.is_strict()
            && matches!(issue.kind, IssueKind::SqlIdentifier | IssueKind::CodeSymbol);
        if blocking {
            result.errors.push(issue);
        } else {
            result.warnings.push(issue);
        }
    };

    for collection in set {
        let identifier = collection.identifier();

        if let Some(problem) = identifier_problem(&identifier) {
            push(ValidationIssue::new(
                IssueKind::SqlIdentifier,
                collection.name(),
                &identifier,
                problem,
            ));
        }

        if !is_code_symbol(collection.name()) {
            push(ValidationIssue::new(
                IssueKind::CodeSymbol,
                collection.name(),
                &identifier,
                "name is not a valid accessor symbol",
            ));
        }
    }

    for name in set.duplicate_names() {
        let identifier = normalize(name);
        push(ValidationIssue::new(
            IssueKind::Duplicate,
            name,
            &identifier,
            "appears more than once; duplicate blocks will be generated",
        ));
    }

    for (a, b, identifier) in set.identifier_collisions() {
        push(ValidationIssue::new(
            IssueKind::Collision,
            a,
            &identifier,
            format!("shares identifier '{}' with '{}'", identifier, b),
        ));
    }

    result
}

// ============================================================================
// Tests
// ============================================================================

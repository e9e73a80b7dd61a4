//! Relationship and system tables.
//!
//! These blocks do not depend on the collection set. Any two records in any
//! two collections can be linked through `collection_relationships`; the
//! unique constraint over (source collection, source id, target collection,
//! target id, relationship type) prevents duplicate links.

use colgen_core::SchemaShape;

/// Name of the generic many-to-many table.
pub const RELATIONSHIPS_TABLE: &str = "collection_relationships";

/// Name of the audit table the full shape's audit functions write to.
pub const AUDIT_TABLE: &str = "audit_logs";

/// Render the relationship/system section.
pub fn relationship_block(shape: SchemaShape) -> String {
    match shape {
        SchemaShape::Minimal => MINIMAL_RELATIONSHIPS.to_string(),
        SchemaShape::Full => {
            let mut out = String::with_capacity(FULL_RELATIONSHIPS.len() + FULL_AUDIT_LOGS.len());
            out.push_str(FULL_RELATIONSHIPS);
            out.push_str(FULL_AUDIT_LOGS);
            out
        }
    }
}

const MINIMAL_RELATIONSHIPS: &str = r#"
-- Table: collection_relationships
CREATE TABLE IF NOT EXISTS collection_relationships (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    from_collection VARCHAR(100) NOT NULL,
    from_id UUID NOT NULL,
    to_collection VARCHAR(100) NOT NULL,
    to_id UUID NOT NULL,
    relationship_type VARCHAR(50) NOT NULL DEFAULT 'related',
    metadata JSONB DEFAULT '{}'::jsonb,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    UNIQUE(from_collection, from_id, to_collection, to_id, relationship_type)
);

-- Indexes for relationships
CREATE INDEX IF NOT EXISTS idx_relationships_from ON collection_relationships(from_collection, from_id);
CREATE INDEX IF NOT EXISTS idx_relationships_to ON collection_relationships(to_collection, to_id);
CREATE INDEX IF NOT EXISTS idx_relationships_type ON collection_relationships(relationship_type);
"#;

const FULL_RELATIONSHIPS: &str = r#"
-- =====================================================
-- SYSTEM TABLES FOR RELATIONSHIPS AND MANAGEMENT
-- =====================================================

CREATE TABLE IF NOT EXISTS public.collection_relationships (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    from_collection TEXT NOT NULL,
    from_id UUID NOT NULL,
    to_collection TEXT NOT NULL,
    to_id UUID NOT NULL,
    relationship_type TEXT NOT NULL DEFAULT 'related',
    relationship_data JSONB DEFAULT '{}'::jsonb,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    created_by UUID REFERENCES auth.users(id),

    UNIQUE(from_collection, from_id, to_collection, to_id, relationship_type)
);

CREATE INDEX IF NOT EXISTS idx_relationships_from ON public.collection_relationships(from_collection, from_id);
CREATE INDEX IF NOT EXISTS idx_relationships_to ON public.collection_relationships(to_collection, to_id);
CREATE INDEX IF NOT EXISTS idx_relationships_type ON public.collection_relationships(relationship_type);
CREATE INDEX IF NOT EXISTS idx_relationships_data ON public.collection_relationships USING gin(relationship_data);

ALTER TABLE public.collection_relationships ENABLE ROW LEVEL SECURITY;

CREATE POLICY "Allow authenticated users to manage relationships" ON public.collection_relationships
    FOR ALL USING (auth.role() = 'authenticated');
"#;

const FULL_AUDIT_LOGS: &str = r#"
-- =====================================================
-- AUDIT LOGS TABLE
-- =====================================================

CREATE TABLE IF NOT EXISTS public.audit_logs (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    table_name TEXT NOT NULL,
    record_id UUID NOT NULL,
    operation TEXT NOT NULL CHECK (operation IN ('INSERT', 'UPDATE', 'DELETE')),
    old_data JSONB,
    new_data JSONB,
    user_id UUID REFERENCES auth.users(id),
    ip_address INET,
    user_agent TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_audit_logs_table_record ON public.audit_logs(table_name, record_id);
CREATE INDEX IF NOT EXISTS idx_audit_logs_user ON public.audit_logs(user_id);
CREATE INDEX IF NOT EXISTS idx_audit_logs_created_at ON public.audit_logs(created_at DESC);

ALTER TABLE public.audit_logs ENABLE ROW LEVEL SECURITY;

CREATE POLICY "Allow users to read their own audit logs" ON public.audit_logs
    FOR SELECT USING (user_id = auth.uid());

CREATE POLICY "Allow admins to read all audit logs" ON public.audit_logs
    FOR SELECT USING (
        EXISTS (
            SELECT 1 FROM public.users
            WHERE id = auth.uid()
            AND (data->>'role' = 'admin' OR data->>'role' = 'super_admin')
        )
    );
"#;

#[cfg(test)]
mod tests {
    use super::*;

    const UNIQUE_TUPLE: &str =
        "UNIQUE(from_collection, from_id, to_collection, to_id, relationship_type)";

    #[test]
    fn test_both_shapes_have_unique_relationship_tuple() {
        for shape in SchemaShape::all() {
            let block = relationship_block(*shape);
            assert_eq!(block.matches(UNIQUE_TUPLE).count(), 1, "{shape}");
            assert!(block.contains(RELATIONSHIPS_TABLE));
        }
    }

    #[test]
    fn test_minimal_has_no_audit_table() {
        let block = relationship_block(SchemaShape::Minimal);
        assert!(!block.contains(AUDIT_TABLE));
        assert!(!block.contains("auth."));
    }

    #[test]
    fn test_full_has_audit_table_and_policies() {
        let block = relationship_block(SchemaShape::Full);
        assert!(block.contains("CREATE TABLE IF NOT EXISTS public.audit_logs ("));
        assert!(block.contains("ALTER TABLE public.collection_relationships ENABLE ROW LEVEL SECURITY;"));
        assert!(block.contains("ALTER TABLE public.audit_logs ENABLE ROW LEVEL SECURITY;"));
        assert!(block.contains("idx_relationships_data"));
    }
}

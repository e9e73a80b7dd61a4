//! Per-collection schema blocks.
//!
//! Every SQL object name in a block is derived from the one `table`
//! identifier passed in: the table itself, its check and unique constraints,
//! every `idx_{table}_*` index, the trigger functions and the triggers. The
//! original collection name only appears in the leading comment.
//!
//! Identifiers are interpolated verbatim. Validation, when wanted, happens
//! before this module is called.

use colgen_core::SchemaShape;

/// Render the schema block for one collection.
pub fn schema_block(table: &str, collection_name: &str, shape: SchemaShape) -> String {
    match shape {
        SchemaShape::Minimal => minimal_block(table, collection_name),
        SchemaShape::Full => full_block(table, collection_name),
    }
}

fn minimal_block(table: &str, collection_name: &str) -> String {
    format!(
        r#"
-- Table: {table} ({collection_name})
CREATE TABLE IF NOT EXISTS {table} (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    -- JSON field for flexible data storage
    data JSONB NOT NULL DEFAULT '{{}}'::jsonb,

    -- Search optimization
    search_vector TSVECTOR GENERATED ALWAYS AS (
        to_tsvector('english', COALESCE(data->>'title', '') || ' ' ||
                               COALESCE(data->>'name', '') || ' ' ||
                               COALESCE(data->>'description', '') || ' ' ||
                               COALESCE(data->>'content', ''))
    ) STORED,

    CONSTRAINT {table}_data_check CHECK (jsonb_typeof(data) = 'object')
);

-- Indexes for {table}
CREATE INDEX IF NOT EXISTS idx_{table}_created_at ON {table}(created_at);
CREATE INDEX IF NOT EXISTS idx_{table}_updated_at ON {table}(updated_at);
CREATE INDEX IF NOT EXISTS idx_{table}_search ON {table} USING gin(search_vector);
CREATE INDEX IF NOT EXISTS idx_{table}_data_gin ON {table} USING gin(data);

-- Update trigger for updated_at
CREATE OR REPLACE FUNCTION update_{table}_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = NOW();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

DROP TRIGGER IF EXISTS trigger_{table}_updated_at ON {table};
CREATE TRIGGER trigger_{table}_updated_at
    BEFORE UPDATE ON {table}
    FOR EACH ROW
    EXECUTE FUNCTION update_{table}_updated_at();
"#
    )
}

fn full_block(table: &str, collection_name: &str) -> String {
    format!(
        r#"
-- =====================================================
-- Table: {table} ({collection_name})
-- =====================================================

CREATE TABLE IF NOT EXISTS public.{table} (
    -- Primary key with UUID
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),

    -- Timestamps with timezone
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    -- Flexible JSONB document
    data JSONB NOT NULL DEFAULT '{{}}'::jsonb,

    -- Scalar columns derived from data for indexing
    title TEXT GENERATED ALWAYS AS (data->>'title') STORED,
    slug TEXT GENERATED ALWAYS AS (data->>'slug') STORED,
    status TEXT GENERATED ALWAYS AS (COALESCE(data->>'status', 'draft')) STORED,

    -- Full-text search vector
    search_vector TSVECTOR GENERATED ALWAYS AS (
        setweight(to_tsvector('english', COALESCE(data->>'title', '')), 'A') ||
        setweight(to_tsvector('english', COALESCE(data->>'name', '')), 'A') ||
        setweight(to_tsvector('english', COALESCE(data->>'description', '')), 'B') ||
        setweight(to_tsvector('english', COALESCE(data->>'content', '')), 'C') ||
        setweight(to_tsvector('english', COALESCE(data->>'tags', '')), 'D')
    ) STORED,

    CONSTRAINT {table}_data_check CHECK (jsonb_typeof(data) = 'object'),
    CONSTRAINT {table}_slug_unique UNIQUE (slug) DEFERRABLE INITIALLY DEFERRED
);

-- =====================================================
-- Indexes for {table}
-- =====================================================

CREATE INDEX IF NOT EXISTS idx_{table}_created_at ON public.{table}(created_at DESC);
CREATE INDEX IF NOT EXISTS idx_{table}_updated_at ON public.{table}(updated_at DESC);
CREATE INDEX IF NOT EXISTS idx_{table}_status ON public.{table}(status) WHERE status IS NOT NULL;
CREATE INDEX IF NOT EXISTS idx_{table}_slug ON public.{table}(slug) WHERE slug IS NOT NULL;

CREATE INDEX IF NOT EXISTS idx_{table}_data_gin ON public.{table} USING gin(data);
CREATE INDEX IF NOT EXISTS idx_{table}_data_title ON public.{table} USING btree((data->>'title'));
CREATE INDEX IF NOT EXISTS idx_{table}_data_status ON public.{table} USING btree((data->>'status'));

CREATE INDEX IF NOT EXISTS idx_{table}_search ON public.{table} USING gin(search_vector);

-- =====================================================
-- RLS Policies for {table}
-- =====================================================

ALTER TABLE public.{table} ENABLE ROW LEVEL SECURITY;

CREATE POLICY "Allow authenticated users full access" ON public.{table}
    FOR ALL USING (auth.role() = 'authenticated');

CREATE POLICY "Allow public read access" ON public.{table}
    FOR SELECT USING (
        data->>'status' = 'published' OR
        data->>'visibility' = 'public'
    );

-- =====================================================
-- Triggers for {table}
-- =====================================================

CREATE OR REPLACE FUNCTION update_{table}_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = NOW();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

DROP TRIGGER IF EXISTS trigger_{table}_updated_at ON public.{table};
CREATE TRIGGER trigger_{table}_updated_at
    BEFORE UPDATE ON public.{table}
    FOR EACH ROW
    EXECUTE FUNCTION update_{table}_updated_at();

-- Audit logging
CREATE OR REPLACE FUNCTION {table}_audit_log()
RETURNS TRIGGER AS $$
BEGIN
    INSERT INTO public.audit_logs (
        table_name,
        record_id,
        operation,
        old_data,
        new_data,
        user_id,
        created_at
    ) VALUES (
        '{table}',
        COALESCE(NEW.id, OLD.id),
        TG_OP,
        CASE WHEN TG_OP = 'DELETE' THEN to_jsonb(OLD) ELSE NULL END,
        CASE WHEN TG_OP != 'DELETE' THEN to_jsonb(NEW) ELSE NULL END,
        auth.uid(),
        NOW()
    );
    RETURN COALESCE(NEW, OLD);
END;
$$ LANGUAGE plpgsql;

-- Optional audit trigger (uncomment to enable)
-- DROP TRIGGER IF EXISTS trigger_{table}_audit ON public.{table};
-- CREATE TRIGGER trigger_{table}_audit
--     AFTER INSERT OR UPDATE OR DELETE ON public.{table}
--     FOR EACH ROW
--     EXECUTE FUNCTION {table}_audit_log();
"#
    )
}

// ============================================================================
// Tests
// ============================================================================

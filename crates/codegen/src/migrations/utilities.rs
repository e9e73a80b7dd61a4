//! Stored utility routines.
//!
//! Both shapes define the same two routines the query surface calls,
//! with identical names, argument names and result columns:
//!
//! - [`SEARCH_ROUTINE`] `(search_term, collection_filter, limit_results)`
//! - [`STATS_ROUTINE`] `()`
//!
//! The full shape additionally defines a role-based access check that its
//! search routine consults per table. The table list both routines iterate
//! is [`KNOWN_TABLES`], not the collection set of the run.

use colgen_core::SchemaShape;

use super::known_tables::{CUSTOMER_READABLE_TABLES, KNOWN_TABLES, sql_text_list};

/// Cross-collection full-text search routine.
pub const SEARCH_ROUTINE: &str = "search_collections";

/// Per-collection statistics routine.
pub const STATS_ROUTINE: &str = "get_collection_stats";

/// Access check consulted by the full-shape search routine.
pub const ACCESS_ROUTINE: &str = "user_can_access_collection";

const ARRAY_INDENT: &str = "        ";
const ARRAY_WIDTH: usize = 96;

/// Render the utility routines section.
pub fn utility_block(shape: SchemaShape) -> String {
    let tables = sql_text_list(KNOWN_TABLES, ARRAY_INDENT, ARRAY_WIDTH);

    let mut out = String::with_capacity(8192);
    out.push_str(
        r#"
-- =====================================================
-- UTILITY FUNCTIONS
-- =====================================================
"#,
    );

    match shape {
        SchemaShape::Minimal => {
            out.push_str(MINIMAL_JSONB_HELPER);
            out.push_str(&minimal_search(&tables));
            out.push_str(&stats(&tables, ""));
        }
        SchemaShape::Full => {
            out.push_str(FULL_JSONB_HELPER);
            out.push_str(&access_check());
            out.push_str(&full_search(&tables));
            out.push_str(&stats(&tables, "public."));
        }
    }

    out
}

const MINIMAL_JSONB_HELPER: &str = r#"
-- Safely read a JSONB text field with a default
CREATE OR REPLACE FUNCTION safe_jsonb_get(data JSONB, key TEXT, default_val TEXT DEFAULT NULL)
RETURNS TEXT AS $$
BEGIN
    RETURN COALESCE(data->>key, default_val);
END;
$$ LANGUAGE plpgsql IMMUTABLE;
"#;

const FULL_JSONB_HELPER: &str = r#"
-- Safely extract a JSONB text field with a default
CREATE OR REPLACE FUNCTION safe_jsonb_extract(data JSONB, key TEXT, default_val TEXT DEFAULT NULL)
RETURNS TEXT AS $$
BEGIN
    RETURN COALESCE(data->>key, default_val);
END;
$$ LANGUAGE plpgsql IMMUTABLE;
"#;

/// Columns returned by the search routine in both shapes.
const SEARCH_RESULT_COLUMNS: &str = r#"RETURNS TABLE(
    collection_name TEXT,
    id UUID,
    title TEXT,
    slug TEXT,
    excerpt TEXT,
    rank REAL,
    data JSONB
)"#;

fn access_check() -> String {
    let readable = sql_text_list(CUSTOMER_READABLE_TABLES, "", usize::MAX);
    let readable = readable.trim_end();

    format!(
        r#"
-- Whether the current user may perform `operation` on a collection
CREATE OR REPLACE FUNCTION {ACCESS_ROUTINE}(
    collection_name TEXT,
    operation TEXT DEFAULT 'read'
)
RETURNS BOOLEAN AS $$
DECLARE
    user_role TEXT;
BEGIN
    SELECT data->>'role' INTO user_role
    FROM public.users
    WHERE id = auth.uid();

    IF user_role IN ('admin', 'super_admin') THEN
        RETURN TRUE;
    END IF;

    IF user_role = 'staff' AND operation = 'read' THEN
        RETURN TRUE;
    END IF;

    IF user_role = 'customer' AND operation = 'read' THEN
        RETURN collection_name IN ({readable});
    END IF;

    RETURN FALSE;
END;
$$ LANGUAGE plpgsql SECURITY DEFINER;
"#
    )
}

fn minimal_search(tables: &str) -> String {
    format!(
        r#"
-- Full-text search across the known collections
CREATE OR REPLACE FUNCTION {SEARCH_ROUTINE}(
    search_term TEXT,
    collection_filter TEXT[] DEFAULT NULL,
    limit_results INTEGER DEFAULT 50
)
{SEARCH_RESULT_COLUMNS} AS $$
DECLARE
    table_name TEXT;
    query TEXT;
    collections TEXT[] := ARRAY[
{tables}    ];
BEGIN
    FOR table_name IN SELECT unnest(collections) LOOP
        IF collection_filter IS NULL OR table_name = ANY(collection_filter) THEN
            query := format('
                SELECT %L::TEXT AS collection_name,
                       id,
                       COALESCE(safe_jsonb_get(data, ''title''), safe_jsonb_get(data, ''name''), ''Untitled'') AS title,
                       safe_jsonb_get(data, ''slug'') AS slug,
                       ts_headline(''english'', COALESCE(safe_jsonb_get(data, ''description''), safe_jsonb_get(data, ''content''), ''''), plainto_tsquery(%L)) AS excerpt,
                       ts_rank(search_vector, plainto_tsquery(%L)) AS rank,
                       data
                FROM %I
                WHERE search_vector @@ plainto_tsquery(%L)
                ORDER BY rank DESC
                LIMIT %s
            ', table_name, search_term, search_term, table_name, search_term, limit_results);

            BEGIN
                RETURN QUERY EXECUTE query;
            EXCEPTION
                WHEN undefined_table THEN
                    -- Known table not created yet
                    CONTINUE;
            END;
        END IF;
    END LOOP;
END;
$$ LANGUAGE plpgsql;
"#
    )
}

fn full_search(tables: &str) -> String {
    format!(
        r#"
-- Full-text search across the known collections, honouring access rules
CREATE OR REPLACE FUNCTION {SEARCH_ROUTINE}(
    search_term TEXT,
    collection_filter TEXT[] DEFAULT NULL,
    limit_results INTEGER DEFAULT 50
)
{SEARCH_RESULT_COLUMNS} AS $$
DECLARE
    table_name TEXT;
    query TEXT := '';
    collections TEXT[] := ARRAY[
{tables}    ];
BEGIN
    FOR table_name IN SELECT unnest(collections) LOOP
        IF collection_filter IS NOT NULL AND NOT (table_name = ANY(collection_filter)) THEN
            CONTINUE;
        END IF;

        IF to_regclass('public.' || table_name) IS NULL THEN
            CONTINUE;
        END IF;

        IF query != '' THEN
            query := query || ' UNION ALL ';
        END IF;

        query := query || format('
            SELECT %L::TEXT AS collection_name,
                   t.id,
                   COALESCE(t.title, t.data->>''name'', ''Untitled'') AS title,
                   t.slug,
                   LEFT(COALESCE(t.data->>''description'', t.data->>''content'', ''''), 200) AS excerpt,
                   ts_rank_cd(t.search_vector, plainto_tsquery(%L)) AS rank,
                   t.data
            FROM public.%I t
            WHERE t.search_vector @@ plainto_tsquery(%L)
              AND {ACCESS_ROUTINE}(%L, ''read'')
        ', table_name, search_term, table_name, search_term, table_name);
    END LOOP;

    IF query != '' THEN
        query := query || format(' ORDER BY rank DESC LIMIT %s', limit_results);
        RETURN QUERY EXECUTE query;
    END IF;
END;
$$ LANGUAGE plpgsql SECURITY DEFINER;
"#
    )
}

fn stats(tables: &str, schema: &str) -> String {
    let security = if schema.is_empty() {
        ""
    } else {
        " SECURITY DEFINER"
    };

    format!(
        r#"
-- Record counts, average document size and last update per known collection
CREATE OR REPLACE FUNCTION {STATS_ROUTINE}()
RETURNS TABLE(
    collection_name TEXT,
    record_count BIGINT,
    avg_data_size NUMERIC,
    last_updated TIMESTAMPTZ
) AS $$
DECLARE
    table_name TEXT;
    query TEXT;
    collections TEXT[] := ARRAY[
{tables}    ];
BEGIN
    FOR table_name IN SELECT unnest(collections) LOOP
        query := format('
            SELECT %L::TEXT AS collection_name,
                   COUNT(*) AS record_count,
                   AVG(octet_length(data::text)) AS avg_data_size,
                   MAX(updated_at) AS last_updated
            FROM {schema}%I
        ', table_name, table_name);

        BEGIN
            RETURN QUERY EXECUTE query;
        EXCEPTION
            WHEN undefined_table THEN
                RETURN QUERY SELECT table_name, 0::BIGINT, 0::NUMERIC, NULL::TIMESTAMPTZ;
        END;
    END LOOP;
END;
$$ LANGUAGE plpgsql{security};
"#
    )
}

// ============================================================================
// Tests
// ============================================================================

//! Fixed document preamble and trailer.

use crate::context::GenerationContext;

/// Header comment, extension declarations, timezone and transaction start.
pub fn preamble(ctx: &GenerationContext) -> String {
    let shape = ctx.shape();
    let mut out = String::with_capacity(512);

    out.push_str("-- =====================================================\n");
    if shape.is_full() {
        out.push_str(&format!(
            "-- SUPABASE MIGRATION: {} Collections Schema\n",
            ctx.project_name()
        ));
    } else {
        out.push_str(&format!(
            "-- {} Collections Schema Migration\n",
            ctx.project_name()
        ));
    }
    if let Some(at) = ctx.generated_at() {
        out.push_str(&format!("-- Generated at: {at}\n"));
    }
    out.push_str(&format!("-- Shape: {shape}\n"));
    out.push_str(&format!("-- Collections: {}\n", ctx.collection_count()));
    out.push_str("-- =====================================================\n\n");

    out.push_str("-- Enable required extensions\n");
    out.push_str("CREATE EXTENSION IF NOT EXISTS \"uuid-ossp\";\n");
    out.push_str("CREATE EXTENSION IF NOT EXISTS \"pg_trgm\";\n");
    if shape.is_full() {
        out.push_str("CREATE EXTENSION IF NOT EXISTS \"btree_gin\";\n");
    }
    out.push('\n');

    out.push_str("-- Set timezone\n");
    out.push_str("SET timezone = 'UTC';\n\n");

    out.push_str("BEGIN;\n");

    out
}

/// Permission grants and the commit marker.
pub fn trailer(ctx: &GenerationContext) -> String {
    if ctx.shape().is_full() {
        FULL_TRAILER.to_string()
    } else {
        MINIMAL_TRAILER.to_string()
    }
}

const MINIMAL_TRAILER: &str = r#"
-- Final Setup
-- ============

-- Grant permissions (adjust as needed)
-- GRANT SELECT, INSERT, UPDATE, DELETE ON ALL TABLES IN SCHEMA public TO your_app_user;
-- GRANT USAGE, SELECT ON ALL SEQUENCES IN SCHEMA public TO your_app_user;

COMMIT;
"#;

const FULL_TRAILER: &str = r#"
-- =====================================================
-- FINAL SETUP
-- =====================================================

-- Grant necessary permissions to authenticated users
GRANT USAGE ON SCHEMA public TO authenticated;
GRANT ALL ON ALL TABLES IN SCHEMA public TO authenticated;
GRANT ALL ON ALL SEQUENCES IN SCHEMA public TO authenticated;
GRANT ALL ON ALL FUNCTIONS IN SCHEMA public TO authenticated;

-- Grant read permissions to anon users for public data
GRANT SELECT ON ALL TABLES IN SCHEMA public TO anon;

COMMIT;
"#;

//! Table lists used by the stored utility routines.
//!
//! `search_collections` and `get_collection_stats` iterate [`KNOWN_TABLES`],
//! a maintained list that is independent of the collection set passed to a
//! run. A table in the list that does not exist is skipped (minimal shape)
//! or reported with zero stats; a generated table missing from the list is
//! simply not searched. Changes to the list are deliberate edits here, not
//! something derived from input.

/// Tables the search and statistics routines know about.
pub const KNOWN_TABLES: &[&str] = &[
    "commerce",
    "coupons",
    "gift_cards",
    "invoices",
    "orders",
    "payment_methods",
    "products",
    "promotions",
    "returns",
    "shipping_methods",
    "blog_posts",
    "content",
    "faq",
    "gallery",
    "media",
    "media_folders",
    "navigation",
    "navigation_menus",
    "pages_main",
    "pages",
    "redirects_main",
    "redirects",
    "seosettings",
    "tags",
    "appointments_main",
    "cancellations",
    "chatbot",
    "chat_conversations",
    "chat_messages",
    "contacts",
    "customer_notes",
    "customers_main",
    "customers",
    "customer_tags",
    "email_campaigns",
    "loyalty_program",
    "reviews",
    "subscriptions",
    "testimonials",
    "clock_records",
    "commissions",
    "staff_roles",
    "staff_schedules",
    "stylists",
    "time_off_requests",
    "appointments",
    "audit_logs",
    "business_documentation",
    "chatbot_logs",
    "documentation",
    "documentation_templates",
    "documentation_workflows",
    "editor_plugins",
    "editor_templates",
    "editor_themes",
    "email_logs",
    "events",
    "event_tracking",
    "feature_flags",
    "integrations",
    "inventory",
    "locations",
    "maintenance_requests",
    "notifications",
    "page_views",
    "push_notifications",
    "recurring_appointments",
    "resources",
    "roles_permissions",
    "service_packages",
    "services",
    "settings",
    "site_sections",
    "tenants",
    "transactions",
    "users",
    "wait_list",
    "webhook_logs",
];

/// Tables customers may read through `user_can_access_collection`.
pub const CUSTOMER_READABLE_TABLES: &[&str] = &["services", "products", "blog_posts", "gallery"];

/// Render a list of table names as the body of a SQL `ARRAY[...]` literal,
/// wrapped so no line exceeds `width` columns after `indent`.
pub fn sql_text_list(tables: &[&str], indent: &str, width: usize) -> String {
    let mut out = String::new();
    let mut line = String::new();

    for (i, table) in tables.iter().enumerate() {
        let item = if i + 1 == tables.len() {
            format!("'{table}'")
        } else {
            format!("'{table}',")
        };

        if !line.is_empty() && indent.len() + line.len() + 1 + item.len() > width {
            out.push_str(indent);
            out.push_str(&line);
            out.push('\n');
            line.clear();
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&item);
    }

    if !line.is_empty() {
        out.push_str(indent);
        out.push_str(&line);
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_known_tables_are_unique_barewords() {
        let unique: HashSet<_> = KNOWN_TABLES.iter().collect();
        assert_eq!(unique.len(), KNOWN_TABLES.len());
        assert!(KNOWN_TABLES.iter().all(|t| colgen_ir::is_sql_bareword(t)));
    }

    #[test]
    fn test_customer_tables_are_known() {
        assert!(
            CUSTOMER_READABLE_TABLES
                .iter()
                .all(|t| KNOWN_TABLES.contains(t))
        );
    }

    #[test]
    fn test_sql_text_list_wraps() {
        let rendered = sql_text_list(&["alpha", "beta", "gamma"], "    ", 22);
        assert_eq!(rendered, "    'alpha', 'beta',\n    'gamma'\n");
    }

    #[test]
    fn test_sql_text_list_lists_every_table_once() {
        let rendered = sql_text_list(KNOWN_TABLES, "        ", 96);
        for table in KNOWN_TABLES {
            assert_eq!(rendered.matches(&format!("'{table}'")).count(), 1, "{table}");
        }
        assert!(rendered.lines().all(|l| l.len() <= 96));
        assert!(!rendered.trim_end().ends_with(','));
    }

    #[test]
    fn test_sql_text_list_empty() {
        assert_eq!(sql_text_list(&[], "  ", 80), "");
    }
}

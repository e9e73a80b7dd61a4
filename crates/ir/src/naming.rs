//! Name normalization
//!
//! Collection names arrive in whatever casing the upstream type generator
//! used (conventionally PascalCase). Tables, indexes, constraints and
//! trigger functions are named after the *normalized identifier*, which is
//! derived here and nowhere else.
//!
//! The rule is deliberately simple: an underscore goes between an ASCII
//! lowercase letter or digit and a following ASCII uppercase letter, then
//! the whole string is lowercased. Runs of capitals are never split, so
//! `HTTPServer` becomes `httpserver` and `SEOSettings` becomes
//! `seosettings`. Existing databases depend on these names, so the
//! behaviour must not be "improved".

/// Longest identifier PostgreSQL keeps without truncation.
pub const MAX_IDENTIFIER_LEN: usize = 63;

/// Prefix and suffix of every object name the migration derives from a
/// table identifier (indexes, constraints, trigger functions, triggers).
pub const DERIVED_AFFIXES: &[(&str, &str)] = &[
    ("idx_", "_created_at"),
    ("idx_", "_updated_at"),
    ("idx_", "_status"),
    ("idx_", "_slug"),
    ("idx_", "_data_gin"),
    ("idx_", "_data_title"),
    ("idx_", "_data_status"),
    ("idx_", "_search"),
    ("", "_data_check"),
    ("", "_slug_unique"),
    ("", "_audit_log"),
    ("update_", "_updated_at"),
    ("trigger_", "_updated_at"),
    ("trigger_", "_audit"),
];

const fn longest_affix() -> (usize, usize) {
    let mut longest = 0;
    let mut index = 0;
    let mut i = 0;
    while i < DERIVED_AFFIXES.len() {
        let len = DERIVED_AFFIXES[i].0.len() + DERIVED_AFFIXES[i].1.len();
        if len > longest {
            longest = len;
            index = i;
        }
        i += 1;
    }
    (index, longest)
}

/// Longest table identifier whose derived names all stay within
/// [`MAX_IDENTIFIER_LEN`].
pub const MAX_TABLE_IDENTIFIER_LEN: usize = MAX_IDENTIFIER_LEN - longest_affix().1;

/// The longest object name derived from `identifier`.
pub fn longest_derived_name(identifier: &str) -> String {
    let (prefix, suffix) = DERIVED_AFFIXES[longest_affix().0];
    format!("{prefix}{identifier}{suffix}")
}

/// Map a collection name to its canonical lowercase identifier.
///
/// Total and pure: every input, including the empty string, has an output.
///
/// ```
/// use colgen_ir::normalize;
///
/// assert_eq!(normalize("BlogPosts"), "blog_posts");
/// assert_eq!(normalize("FAQ"), "faq");
/// assert_eq!(normalize("chatBotLogs"), "chat_bot_logs");
/// ```
pub fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + name.len() / 4);
    let mut prev: Option<char> = None;

    for ch in name.chars() {
        if ch.is_ascii_uppercase()
            && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit())
        {
            out.push('_');
        }
        out.push(ch);
        prev = Some(ch);
    }

    out.to_lowercase()
}

/// Whether `ident` can be used unquoted as a PostgreSQL table name.
pub fn is_sql_bareword(ident: &str) -> bool {
    let mut bytes = ident.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_lowercase() || b == b'_' => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}

/// Whether `name` is usable as a symbol fragment in generated TypeScript.
pub fn is_code_symbol(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_table_identifier_limit_leaves_room_for_derived_names() {
        assert_eq!(MAX_TABLE_IDENTIFIER_LEN, 44);

        let id = "a".repeat(MAX_TABLE_IDENTIFIER_LEN);
        let longest = longest_derived_name(&id);
        assert_eq!(longest, format!("trigger_{id}_updated_at"));
        assert_eq!(longest.len(), MAX_IDENTIFIER_LEN);

        for (prefix, suffix) in DERIVED_AFFIXES {
            assert!(prefix.len() + id.len() + suffix.len() <= MAX_IDENTIFIER_LEN);
        }
    }

    #[test]
    fn test_normalize_pascal_case() {
        assert_eq!(normalize("BlogPosts"), "blog_posts");
        assert_eq!(normalize("GiftCards"), "gift_cards");
        assert_eq!(normalize("Services"), "services");
    }

    #[test]
    fn test_normalize_camel_case() {
        assert_eq!(normalize("chatBotLogs"), "chat_bot_logs");
    }

    #[test]
    fn test_normalize_keeps_capital_runs_together() {
        assert_eq!(normalize("FAQ"), "faq");
        assert_eq!(normalize("HTTPServer"), "httpserver");
        assert_eq!(normalize("SEOSettings"), "seosettings");
        assert_eq!(normalize("MyHTTPServer"), "my_httpserver");
    }

    #[test]
    fn test_normalize_digits_split_before_capitals() {
        assert_eq!(normalize("Page2Views"), "page2_views");
        assert_eq!(normalize("V2API"), "v2_api");
        assert_eq!(normalize("2Fa"), "2_fa");
    }

    #[test]
    fn test_normalize_passes_other_characters_through() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("already_snake"), "already_snake");
        assert_eq!(normalize("Blog Posts"), "blog posts");
        assert_eq!(normalize("Blog-Posts"), "blog-posts");
        assert_eq!(normalize("_Private"), "_private");
        assert_eq!(normalize("!!!"), "!!!");
    }

    #[test]
    fn test_normalize_non_ascii_only_lowercases() {
        assert_eq!(normalize("éCole"), "école");
        assert_eq!(normalize("ÜberCafé"), "über_café");
    }

    #[test]
    fn test_is_sql_bareword() {
        assert!(is_sql_bareword("blog_posts"));
        assert!(is_sql_bareword("_tmp"));
        assert!(is_sql_bareword("page2_views"));
        assert!(!is_sql_bareword(""));
        assert!(!is_sql_bareword("2_fa"));
        assert!(!is_sql_bareword("blog posts"));
        assert!(!is_sql_bareword("blog-posts"));
        assert!(!is_sql_bareword("BlogPosts"));
    }

    #[test]
    fn test_is_code_symbol() {
        assert!(is_code_symbol("BlogPosts"));
        assert!(is_code_symbol("$store"));
        assert!(!is_code_symbol(""));
        assert!(!is_code_symbol("Blog Posts"));
        assert!(!is_code_symbol("2Fa"));
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(name in "[A-Za-z0-9_ -]{0,32}") {
            let once = normalize(&name);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn prop_normalize_has_no_ascii_capitals(name in "[A-Za-z0-9_]{0,32}") {
            prop_assert!(!normalize(&name).bytes().any(|b| b.is_ascii_uppercase()));
        }

        #[test]
        fn prop_alphanumeric_names_become_barewords(name in "[A-Za-z][A-Za-z0-9]{0,30}") {
            prop_assert!(is_sql_bareword(&normalize(&name)));
        }

        #[test]
        fn prop_normalize_only_adds_underscores(name in "[A-Za-z0-9]{0,32}") {
            let out = normalize(&name);
            prop_assert_eq!(out.replace('_', ""), name.to_lowercase());
        }
    }
}

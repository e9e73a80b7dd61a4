//! # Query Surface Generation
//!
//! Emits one TypeScript module (`supabase-queries.ts`) exposing typed data
//! access over the tables the migration creates.
//!
//! ## Generated Structure
//!
//! ```text
//! header + imports + client setup
//! SupabaseCollectionManager<T>        generic CRUD, list, search
//! {Name}Manager extends ...<{Name}>   one per collection, bound to '{table}'
//! collectionManagers                  aggregate export, lowercase keys
//! searchAllCollections / getCollectionStats / batch{Create,Update,Delete}
//! ```
//!
//! Code symbols come from the original collection name. The normalized
//! identifier only appears as the table-name string literal.

pub mod collection;
pub mod exports;
pub mod manager;

use crate::GeneratedFile;
use crate::context::GenerationContext;

/// File name of the query surface.
pub const QUERY_SURFACE_FILE: &str = "supabase-queries.ts";

/// Render the complete query-surface module.
pub fn query_surface(ctx: &GenerationContext) -> String {
    let mut out = String::with_capacity(8192 + ctx.collection_count() * 1024);

    out.push_str(&manager::header(ctx));
    out.push_str(&manager::imports(ctx));
    out.push_str(manager::CLIENT_SETUP);
    out.push_str(&manager::generic_manager());

    out.push_str(collection::SECTION_BANNER);
    for info in ctx.infos() {
        out.push_str(&collection::collection_manager(&info));
    }

    out.push_str(&exports::aggregate_export(ctx));
    out.push_str(&exports::free_functions());

    out
}

/// Generate the query-surface file.
pub fn generate_query_surface(ctx: &GenerationContext) -> GeneratedFile {
    GeneratedFile::typescript(QUERY_SURFACE_FILE, query_surface(ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeneratorConfig;
    use colgen_ir::CollectionSet;

    fn surface(names: &[&str]) -> String {
        query_surface(&GenerationContext::new(
            CollectionSet::from_names(names.iter().copied()),
            GeneratorConfig::new().with_project_name("ModernMen"),
        ))
    }

    #[test]
    fn test_section_order() {
        let ts = surface(&["Services", "Products"]);

        let import = ts.find("import { createClient").unwrap();
        let generic = ts.find("export class SupabaseCollectionManager<").unwrap();
        let services = ts.find("export class ServicesManager").unwrap();
        let products = ts.find("export class ProductsManager").unwrap();
        let aggregate = ts.find("export const collectionManagers").unwrap();
        let batch = ts.find("export async function batchDelete").unwrap();

        assert!(import < generic);
        assert!(generic < services);
        assert!(services < products);
        assert!(products < aggregate);
        assert!(aggregate < batch);
    }

    #[test]
    fn test_services_and_products() {
        let ts = surface(&["Services", "Products"]);

        assert!(ts.contains("super(client, 'services')"));
        assert!(ts.contains("super(client, 'products')"));
        assert!(ts.contains("export const servicesManager = new ServicesManager()"));
        assert!(ts.contains("export const productsManager = new ProductsManager()"));
        assert!(ts.contains(
            "export const collectionManagers = {\n  services: servicesManager,\n  products: productsManager,\n}"
        ));
    }

    #[test]
    fn test_namespaces_never_mix() {
        let ts = surface(&["BlogPosts"]);

        assert!(ts.contains("export class BlogPostsManager extends SupabaseCollectionManager<BlogPosts>"));
        assert!(ts.contains("super(client, 'blog_posts')"));
        assert!(ts.contains("blogposts: blogpostsManager,"));
        assert!(!ts.contains("blog_postsManager"));
        assert!(!ts.contains("Blog_Posts"));
        // the identifier is only ever a string literal
        assert_eq!(
            ts.matches("blog_posts").count(),
            ts.matches("'blog_posts'").count()
        );
    }

    #[test]
    fn test_empty_set() {
        let ts = surface(&[]);

        assert!(ts.contains("export class SupabaseCollectionManager<"));
        assert!(ts.contains("export const collectionManagers = {\n}"));
        assert!(!ts.contains("./generated-types"));
        assert!(!ts.contains("extends SupabaseCollectionManager"));
    }

    #[test]
    fn test_file() {
        let file = generate_query_surface(&GenerationContext::from_collections(
            CollectionSet::from_names(["FAQ"]),
        ));
        assert_eq!(file.path.to_string_lossy(), QUERY_SURFACE_FILE);
        assert_eq!(file.extension(), "ts");
        assert!(file.content.contains("export const faqManager = new FAQManager()"));
    }
}

//! Per-collection manager subclasses.

use crate::context::CollectionInfo;

pub const SECTION_BANNER: &str = r#"
// =====================================================
// COLLECTION-SPECIFIC MANAGERS
// =====================================================
"#;

/// Render the specialised manager and its singleton for one collection.
pub fn collection_manager(info: &CollectionInfo<'_>) -> String {
    let name = info.name();
    let class = info.manager_class();
    let singleton = info.singleton_name();
    let table = info.table_name();

    format!(
        r#"
export class {class} extends SupabaseCollectionManager<{name}> {{
  constructor(client: SupabaseClientType = supabase) {{
    super(client, '{table}')
  }}

  async findPublished(): Promise<{name}[]> {{
    return this.findByStatus('published')
  }}

  async findByStatus(status: string): Promise<{name}[]> {{
    const {{ data, error }} = await this.client
      .from(this.tableName)
      .select('*')
      .eq('status', status)
      .order('created_at', {{ ascending: false }})

    if (error) throw error
    return (data as {name}[]) || []
  }}
}}

export const {singleton} = new {class}()
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use colgen_ir::Collection;

    #[test]
    fn test_manager_binds_normalized_table() {
        let c = Collection::new("GiftCards");
        let text = collection_manager(&CollectionInfo::new(&c));

        assert!(text.contains("export class GiftCardsManager extends SupabaseCollectionManager<GiftCards> {"));
        assert!(text.contains("super(client, 'gift_cards')"));
        assert!(text.contains("Promise<GiftCards[]>"));
        assert!(text.contains("export const giftcardsManager = new GiftCardsManager()"));
    }

    #[test]
    fn test_status_queries() {
        let c = Collection::new("Services");
        let text = collection_manager(&CollectionInfo::new(&c));

        assert!(text.contains("async findPublished()"));
        assert!(text.contains("this.findByStatus('published')"));
        assert!(text.contains(".eq('status', status)"));
        assert!(text.contains(".order('created_at', { ascending: false })"));
    }
}

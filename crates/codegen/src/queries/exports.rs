//! Aggregate export and free functions.

use crate::context::GenerationContext;
use crate::migrations::{SEARCH_ROUTINE, STATS_ROUTINE};

/// `collectionManagers`: lowercase collection name to singleton, input order.
pub fn aggregate_export(ctx: &GenerationContext) -> String {
    let mut out = String::with_capacity(256 + ctx.collection_count() * 48);

    out.push_str(
        r#"

// =====================================================
// CONVENIENCE EXPORTS
// =====================================================

export const collectionManagers = {
"#,
    );
    for info in ctx.infos() {
        out.push_str(&format!(
            "  {}: {},\n",
            info.export_key(),
            info.singleton_name()
        ));
    }
    out.push_str("}\n");

    out
}

/// Cross-collection search, statistics and batch operations.
pub fn free_functions() -> String {
    format!(
        r#"
// Search across collections; `collections` narrows the table list
export async function searchAllCollections(
  searchTerm: string,
  collections?: string[],
  limit = 50
): Promise<Array<{{
  collection_name: string
  id: string
  title: string
  slug: string
  excerpt: string
  rank: number
  data: any
}}>> {{
  const {{ data, error }} = await supabase
    .rpc('{SEARCH_ROUTINE}', {{
      search_term: searchTerm,
      collection_filter: collections || null,
      limit_results: limit
    }})

  if (error) throw error
  return data || []
}}

export async function getCollectionStats(): Promise<Array<{{
  collection_name: string
  record_count: number
  avg_data_size: number
  last_updated: string
}}>> {{
  const {{ data, error }} = await supabase
    .rpc('{STATS_ROUTINE}')

  if (error) throw error
  return data || []
}}

// Batch operations against a named table
export async function batchCreate<T>(
  tableName: string,
  records: Array<Omit<T, 'id' | 'created_at' | 'updated_at'>>
): Promise<T[]> {{
  const {{ data, error }} = await supabase
    .from(tableName)
    .insert(records.map(record => ({{ data: record }})))
    .select()

  if (error) throw error
  return (data as T[]) || []
}}

export async function batchUpdate<T>(
  tableName: string,
  updates: Array<{{ id: string; data: Partial<T> }}>
): Promise<T[]> {{
  const results: T[] = []

  for (const update of updates) {{
    const {{ data, error }} = await supabase
      .from(tableName)
      .update({{ data: update.data }})
      .eq('id', update.id)
      .select()
      .single()

    if (error) throw error
    if (data) results.push(data as T)
  }}

  return results
}}

export async function batchDelete(
  tableName: string,
  ids: string[]
): Promise<boolean> {{
  const {{ error }} = await supabase
    .from(tableName)
    .delete()
    .in('id', ids)

  if (error) throw error
  return true
}}
"#
    )
}

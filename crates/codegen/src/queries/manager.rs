//! Module header, imports, client setup and the generic manager class.

use crate::context::GenerationContext;
use crate::migrations::SEARCH_ROUTINE;

/// Header comment for the module.
pub fn header(ctx: &GenerationContext) -> String {
    let mut out = String::with_capacity(256);
    out.push_str("// =====================================================\n");
    out.push_str(&format!(
        "// SUPABASE QUERIES: {} Collections\n",
        ctx.project_name()
    ));
    if let Some(at) = ctx.generated_at() {
        out.push_str(&format!("// Generated at: {at}\n"));
    }
    out.push_str(&format!("// Collections: {}\n", ctx.collection_count()));
    out.push_str("// =====================================================\n\n");
    out
}

/// Client and type imports.
///
/// The generated-types import lists the row, create and update types of
/// every collection; it is left out entirely when there are none.
pub fn imports(ctx: &GenerationContext) -> String {
    let mut out = String::with_capacity(512);
    out.push_str("import { createClient, SupabaseClient } from '@supabase/supabase-js'\n");
    out.push_str("import { Database } from './database.types'\n");

    if ctx.collection_count() > 0 {
        let rows: Vec<&str> = ctx.infos().map(|i| i.row_type()).collect();
        let creates: Vec<String> = ctx.infos().map(|i| i.create_type()).collect();
        let updates: Vec<String> = ctx.infos().map(|i| i.update_type()).collect();

        out.push_str("\n// Import generated types\n");
        out.push_str("import {\n");
        out.push_str(&format!("  {},\n", rows.join(", ")));
        out.push_str(&format!("  {},\n", creates.join(", ")));
        out.push_str(&format!("  {}\n", updates.join(", ")));
        out.push_str("} from './generated-types'\n");
    }

    out.push_str("\ntype SupabaseClientType = SupabaseClient<Database>\n");
    out
}

pub const CLIENT_SETUP: &str = r#"
// =====================================================
// SUPABASE CLIENT SETUP
// =====================================================

const supabaseUrl = process.env.NEXT_PUBLIC_SUPABASE_URL!
const supabaseKey = process.env.NEXT_PUBLIC_SUPABASE_ANON_KEY!

export const supabase = createClient<Database>(supabaseUrl, supabaseKey)
"#;

/// The generic, table-parameterised manager.
///
/// Members are `protected` so the per-collection subclasses can reach the
/// client and table name.
pub fn generic_manager() -> String {
    format!(
        r#"
// =====================================================
// GENERIC COLLECTION OPERATIONS
// =====================================================

export class SupabaseCollectionManager<T extends Record<string, any>> {{
  constructor(
    protected client: SupabaseClientType,
    protected tableName: string
  ) {{}}

  async create(data: Omit<T, 'id' | 'created_at' | 'updated_at'>): Promise<T | null> {{
    const {{ data: result, error }} = await this.client
      .from(this.tableName)
      .insert({{ data }})
      .select()
      .single()

    if (error) throw error
    return result as T
  }}

  async findById(id: string): Promise<T | null> {{
    const {{ data, error }} = await this.client
      .from(this.tableName)
      .select('*')
      .eq('id', id)
      .single()

    if (error) throw error
    return data as T
  }}

  async findBySlug(slug: string): Promise<T | null> {{
    const {{ data, error }} = await this.client
      .from(this.tableName)
      .select('*')
      .eq('slug', slug)
      .single()

    if (error) throw error
    return data as T
  }}

  async findMany({{
    page = 1,
    limit = 50,
    orderBy = 'created_at',
    orderDirection = 'desc',
    filters = {{}}
  }}: {{
    page?: number
    limit?: number
    orderBy?: string
    orderDirection?: 'asc' | 'desc'
    filters?: Record<string, any>
  }} = {{}}): Promise<{{ data: T[], count: number }}> {{
    let query = this.client
      .from(this.tableName)
      .select('*', {{ count: 'exact' }})

    // Arrays match by membership, strings containing '%' by pattern, anything else by equality
    Object.entries(filters).forEach(([key, value]) => {{
      if (value !== undefined && value !== null) {{
        if (Array.isArray(value)) {{
          query = query.in(key, value)
        }} else if (typeof value === 'string' && value.includes('%')) {{
          query = query.like(key, value)
        }} else {{
          query = query.eq(key, value)
        }}
      }}
    }})

    const from = (page - 1) * limit
    const to = from + limit - 1

    const {{ data, error, count }} = await query
      .order(orderBy, {{ ascending: orderDirection === 'asc' }})
      .range(from, to)

    if (error) throw error

    return {{
      data: (data as T[]) || [],
      count: count || 0
    }}
  }}

  async update(id: string, updates: Partial<T>): Promise<T | null> {{
    const {{ data, error }} = await this.client
      .from(this.tableName)
      .update({{ data: updates }})
      .eq('id', id)
      .select()
      .single()

    if (error) throw error
    return data as T
  }}

  async delete(id: string): Promise<boolean> {{
    const {{ error }} = await this.client
      .from(this.tableName)
      .delete()
      .eq('id', id)

    if (error) throw error
    return true
  }}

  async search(searchTerm: string, limit = 20): Promise<T[]> {{
    const {{ data, error }} = await this.client
      .rpc('{SEARCH_ROUTINE}', {{
        search_term: searchTerm,
        collection_filter: [this.tableName],
        limit_results: limit
      }})

    if (error) throw error
    return (data || []).map((item: any) => item.data as T)
  }}
}}
"#
    )
}

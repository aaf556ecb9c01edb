//! Example composing a filtered listing query from clause fragments.
//!
//! Run with:
//!   cargo run --example compose -p sqlfrag
//!
//! With SQL debug events:
//!   RUST_LOG=sqlfrag.sql=debug cargo run --example compose -p sqlfrag --features tracing

use sqlfrag::prelude::*;

#[derive(Debug)]
struct Filters {
    status: Option<String>,
    roles_any_of: Vec<String>,
    tag_ids: Vec<i64>,
    include_deleted: bool,
    newest_first: bool,
}

/// `column IN (:label_in_0, ...)` with every value bound.
fn column_in(column: &str, label: &str, values: Vec<Arg>) -> FragResult<Fragment> {
    let mut list = clause(ClauseKind::LIST | ClauseKind::IN, label);
    let list = list.try_call(values)?;
    let sql = format!("{column} {}", list.sql);
    Ok(Fragment::new(sql, list.bindings))
}

fn build_list_users(filters: &Filters) -> FragResult<Fragment> {
    let mut select = clause(ClauseKind::SELECT, "");
    let mut filter = clause(ClauseKind::WHERE, "=");
    let mut order = clause(ClauseKind::ORDER_BY, "");

    let mut conditions = Assoc::new();
    if let Some(status) = &filters.status {
        conditions.insert("status", status.as_str());
    }
    if !filters.include_deleted {
        conditions.push("deleted_at IS NULL");
    }
    let mut where_args = args![conditions];

    if !filters.roles_any_of.is_empty() {
        let roles = filters
            .roles_any_of
            .iter()
            .map(|r| Arg::from(r.as_str()))
            .collect();
        where_args.push(column_in("role", "role", roles)?.into());
    }

    if !filters.tag_ids.is_empty() {
        let tags = filters.tag_ids.iter().map(|&id| Arg::from(id)).collect();
        where_args.push(column_in("tag_id", "tag", tags)?.into());
    }

    let direction = if filters.newest_first { "DESC" } else { "ASC" };

    Ok(statement![
        select.try_call(args![assoc!["id", "name", "display_name" => "username"]])?,
        "FROM users",
        filter.try_call(where_args)?,
        order.try_call(args![assoc! { "created_at" => direction }])?,
    ])
}

fn main() -> FragResult<()> {
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let filters = Filters {
        status: Some("active".to_string()),
        roles_any_of: vec!["admin".to_string(), "owner".to_string()],
        tag_ids: vec![3, 4],
        include_deleted: false,
        newest_first: true,
    };

    let query = build_list_users(&filters)?;
    println!("SQL:      {}", query.sql);
    println!("Bindings: {}", query.bindings.to_json()?);
    Ok(())
}

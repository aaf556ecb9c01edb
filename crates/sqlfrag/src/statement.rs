//! Statement assembly.
//!
//! Joins keyword strings and rendered fragments with single spaces and merges
//! their bindings. Empty parts contribute neither text nor a separator.
//!
//! ```ignore
//! use sqlfrag::{args, assoc, clause, statement, ClauseKind};
//!
//! let mut select = clause(ClauseKind::SELECT, "");
//! let mut filter = clause(ClauseKind::WHERE, "=");
//!
//! let q = statement![
//!     select.call(args!["id", "email"]),
//!     "FROM users",
//!     filter.call(args![assoc! { "status" => "active" }]),
//! ];
//! assert_eq!(q.sql, "SELECT id, email FROM users WHERE `status` = :status");
//! ```

use crate::config::ClauseConfig;
use crate::fragment::Fragment;
use crate::trace;
use crate::value::Bindings;

/// One input of a [`Statement`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Part {
    #[default]
    Empty,
    Raw(String),
    Fragment(Fragment),
}

impl Part {
    pub fn is_empty(&self) -> bool {
        match self {
            Part::Empty => true,
            Part::Raw(sql) => sql.is_empty(),
            Part::Fragment(f) => f.is_empty(),
        }
    }
}

impl From<&str> for Part {
    fn from(sql: &str) -> Self {
        Part::Raw(sql.to_string())
    }
}

impl From<String> for Part {
    fn from(sql: String) -> Self {
        Part::Raw(sql)
    }
}

impl From<Fragment> for Part {
    fn from(fragment: Fragment) -> Self {
        Part::Fragment(fragment)
    }
}

impl From<(String, Bindings)> for Part {
    fn from(pair: (String, Bindings)) -> Self {
        Part::Fragment(pair.into())
    }
}

impl<T: Into<Part>> From<Option<T>> for Part {
    fn from(part: Option<T>) -> Self {
        part.map_or(Part::Empty, Into::into)
    }
}

/// Accumulates statement parts in order.
#[derive(Debug, Clone, Default)]
pub struct Statement {
    parts: Vec<String>,
    bindings: Bindings,
    config: ClauseConfig,
}

impl Statement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ClauseConfig) -> Self {
        self.config = config;
        self
    }

    /// Append a part. Empty parts are skipped.
    pub fn push(&mut self, part: impl Into<Part>) -> &mut Self {
        match part.into() {
            Part::Empty => {}
            Part::Raw(sql) => {
                if !sql.is_empty() {
                    self.parts.push(sql);
                }
            }
            Part::Fragment(fragment) => {
                if !fragment.is_empty() {
                    self.bindings.merge(&fragment.bindings);
                    self.parts.push(fragment.sql);
                }
            }
        }
        self
    }

    /// Append a part only when `cond` holds.
    pub fn push_if(&mut self, cond: bool, part: impl Into<Part>) -> &mut Self {
        if cond {
            self.push(part);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn to_sql(&self) -> String {
        self.parts.join(" ")
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Render the statement assembled so far.
    pub fn finish(&self) -> Fragment {
        let fragment = Fragment::new(self.to_sql(), self.bindings.clone());
        trace::rendered(
            "statement",
            None,
            &self.config,
            &fragment.sql,
            &fragment.bindings,
        );
        fragment
    }
}

impl<P: Into<Part>> Extend<P> for Statement {
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        for part in iter {
            self.push(part);
        }
    }
}

/// Assemble `parts` into one statement.
pub fn statement<I, P>(parts: I) -> Fragment
where
    I: IntoIterator<Item = P>,
    P: Into<Part>,
{
    let mut st = Statement::new();
    st.extend(parts);
    st.finish()
}

/// Assemble heterogeneous parts (strings, fragments, options) into one statement.
#[macro_export]
macro_rules! statement {
    ($($part:expr),* $(,)?) => {{
        let mut st = $crate::Statement::new();
        $(st.push($crate::Part::from($part));)*
        st.finish()
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_with_single_spaces() {
        let q = statement(["SELECT *", "FROM t"]);
        assert_eq!(q, Fragment::raw("SELECT * FROM t"));
    }

    #[test]
    fn skips_empty_parts() {
        let q = crate::statement![
            "SELECT *",
            "",
            None::<Fragment>,
            Fragment::default(),
            "FROM t",
        ];
        assert_eq!(q.sql, "SELECT * FROM t");
        assert!(q.bindings.is_empty());
    }

    #[test]
    fn merges_bindings_last_write_wins() {
        let a = Fragment::new("WHERE `id` = :id", Bindings::from([("id", 1)]));
        let b = Fragment::new("AND `id` = :id", Bindings::from([("id", 2)]));
        let q = crate::statement!["SELECT *", a, b];
        assert_eq!(q.sql, "SELECT * WHERE `id` = :id AND `id` = :id");
        assert_eq!(q.bindings, Bindings::from([("id", 2)]));
    }

    #[test]
    fn empty_fragment_drops_its_bindings() {
        let f = Fragment::new("", Bindings::from([("x", 1)]));
        let q = crate::statement!["SELECT 1", f];
        assert_eq!(q, Fragment::raw("SELECT 1"));
    }

    #[test]
    fn push_if_and_tuple_parts() {
        let by_id = ("WHERE `id` = :id".to_string(), Bindings::from([("id", 9)]));
        let mut st = Statement::new();
        st.push("DELETE FROM t")
            .push_if(false, "WHERE 1=0")
            .push(by_id);
        assert_eq!(st.to_sql(), "DELETE FROM t WHERE `id` = :id");
        assert_eq!(st.bindings().get("id"), Some(&9.into()));
    }

    #[test]
    fn nothing_assembles_to_empty() {
        let st = Statement::new();
        assert!(st.is_empty());
        assert_eq!(st.finish(), Fragment::default());
    }
}

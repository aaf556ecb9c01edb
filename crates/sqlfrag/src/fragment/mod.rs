//! Clause fragment builders.
//!
//! [`clause`] is the factory: given a [`ClauseKind`] and a glue token it
//! returns a stateful builder. Every call appends to the builder's
//! accumulator and returns the cumulative [`Fragment`] rendered so far.
//!
//! ```ignore
//! use sqlfrag::{args, assoc, clause, ClauseKind};
//!
//! let mut or = clause(ClauseKind::OR, "=");
//! let mut and = clause(ClauseKind::AND, "=");
//!
//! let f = and.call(args![
//!     assoc! { "status" => "active" },
//!     or.call(args!["a = 'x'", "b = 'y'"]),
//!     "id = 1",
//! ]);
//! assert_eq!(f.sql, "(`status` = :status AND (a = 'x' OR b = 'y') AND id = 1)");
//! assert_eq!(f.bindings.get("status"), Some(&"active".into()));
//! ```
//!
//! A builder is one session: create a new one for an independent fragment.
//! Builders take `&mut self` and are not meant to be shared.

mod builder;
mod list;


pub use builder::FragmentBuilder;
pub use list::ListBuilder;

use crate::arg::Arg;
use crate::config::ClauseConfig;
use crate::error::FragResult;
use crate::kind::ClauseKind;
use crate::value::Bindings;
use serde::Serialize;

/// Rendered SQL text plus the bindings it introduced.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Fragment {
    pub sql: String,
    pub bindings: Bindings,
}

impl Fragment {
    pub fn new(sql: impl Into<String>, bindings: Bindings) -> Self {
        Self {
            sql: sql.into(),
            bindings,
        }
    }

    /// A fragment without bindings.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::new(sql, Bindings::new())
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    pub fn into_parts(self) -> (String, Bindings) {
        (self.sql, self.bindings)
    }
}

impl From<Fragment> for (String, Bindings) {
    fn from(fragment: Fragment) -> Self {
        fragment.into_parts()
    }
}

impl From<(String, Bindings)> for Fragment {
    fn from((sql, bindings): (String, Bindings)) -> Self {
        Self { sql, bindings }
    }
}

/// Parts and bindings accumulated by a builder across calls.
#[derive(Debug, Clone, Default)]
pub(crate) struct Accumulator {
    pub(crate) parts: Vec<String>,
    pub(crate) bindings: Bindings,
    pub(crate) calls: usize,
}

/// A builder returned by [`clause`]: a list builder when the kind carries
/// the `LIST` modifier, a fragment builder otherwise.
#[derive(Debug, Clone)]
pub enum Clause {
    Fragment(FragmentBuilder),
    List(ListBuilder),
}

impl Clause {
    pub fn kind(&self) -> ClauseKind {
        match self {
            Clause::Fragment(b) => b.kind(),
            Clause::List(b) => b.kind(),
        }
    }

    pub fn with_config(self, config: ClauseConfig) -> Self {
        match self {
            Clause::Fragment(b) => Clause::Fragment(b.with_config(config)),
            Clause::List(b) => Clause::List(b.with_config(config)),
        }
    }

    /// Append `args` and render (permissive).
    pub fn call(&mut self, args: Vec<Arg>) -> Fragment {
        match self {
            Clause::Fragment(b) => b.call(args),
            Clause::List(b) => b.call(args),
        }
    }

    /// Validate `args`, then append and render.
    pub fn try_call(&mut self, args: Vec<Arg>) -> FragResult<Fragment> {
        match self {
            Clause::Fragment(b) => b.try_call(args),
            Clause::List(b) => b.try_call(args),
        }
    }
}

/// Create a builder for `kind`.
///
/// `glue` is the operator placed between a key and its placeholder for
/// predicate kinds; for list kinds it is the placeholder label.
pub fn clause(kind: ClauseKind, glue: &str) -> Clause {
    if kind.list {
        Clause::List(ListBuilder::new(kind, glue))
    } else {
        Clause::Fragment(FragmentBuilder::new(kind, glue))
    }
}

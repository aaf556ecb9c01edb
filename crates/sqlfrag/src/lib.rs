//! # sqlfrag
//!
//! Composable SQL clause fragments with named-parameter bindings.
//!
//! ## Features
//!
//! - **One factory**: [`clause`] turns a [`ClauseKind`] and a glue token into a builder
//! - **Named placeholders**: map entries bind as `:name`, identifiers are backtick-quoted
//! - **Nesting**: a builder's output is a valid argument to another builder
//! - **Accumulating builders**: repeated calls append to the same fragment
//! - **Permissive by default**: `call` never fails; `try_call` validates first
//!
//! ## Example
//!
//! ```ignore
//! use sqlfrag::{args, assoc, clause, statement, ClauseKind, Fragment};
//!
//! let mut select = clause(ClauseKind::SELECT, "");
//! let mut filter = clause(ClauseKind::WHERE, "=");
//! let mut any_of = clause(ClauseKind::OR, "");
//! let mut tags = clause(ClauseKind::LIST | ClauseKind::IN, "tag");
//! let mut order = clause(ClauseKind::ORDER_BY, "");
//!
//! let tag_in = tags.call(args![3, 4]);
//! let tag_in = Fragment::new(format!("tag_id {}", tag_in.sql), tag_in.bindings);
//! let q = statement![
//!     select.call(args!["id", "username"]),
//!     "FROM client",
//!     filter.call(args![
//!         assoc! { "status" => "active" },
//!         any_of.call(args![tag_in, "tag_id IS NULL"]),
//!     ]),
//!     order.call(args![assoc! { "created_at" => "DESC" }]),
//! ];
//! // SELECT id, username FROM client
//! //   WHERE `status` = :status AND (tag_id IN (:tag_in_0, :tag_in_1) OR tag_id IS NULL)
//! //   ORDER BY `created_at` DESC
//! ```

pub mod arg;
pub mod config;
pub mod error;
pub mod fragment;
pub mod ident;
pub mod kind;
pub mod prelude;
pub mod statement;
pub mod value;

mod trace;

pub use arg::{Arg, Assoc, Key};
pub use config::ClauseConfig;
pub use error::{FragError, FragResult};
pub use fragment::{Clause, Fragment, FragmentBuilder, ListBuilder, clause};
pub use kind::{Category, ClauseKind, Template};
pub use statement::{Part, Statement, statement};
pub use value::{Bindings, Value};

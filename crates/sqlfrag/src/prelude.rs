//! Convenient imports for typical `sqlfrag` usage.
//!
//! ```ignore
//! use sqlfrag::prelude::*;
//! ```

pub use crate::{
    Arg, Assoc, Bindings, Clause, ClauseConfig, ClauseKind, FragError, FragResult, Fragment,
    Statement, Value, args, assoc, clause, statement,
};

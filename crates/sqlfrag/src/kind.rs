//! Clause kinds and the clause template registry.
//!
//! A [`ClauseKind`] is one optional [`Category`] (what the fragment is) plus a
//! set of modifier flags (how it joins or binds). Kinds combine with `|`:
//!
//! ```ignore
//! use sqlfrag::ClauseKind;
//!
//! let where_or = ClauseKind::WHERE | ClauseKind::OR;
//! let in_list = ClauseKind::LIST | ClauseKind::IN;
//! ```
//!
//! Each kind maps to a [`Template`] (prefix, delimiter, suffix) in a
//! process-wide table that is built once and never mutated.

use std::collections::HashMap;
use std::fmt;
use std::ops::BitOr;
use std::sync::OnceLock;

/// What a fragment renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Select,
    Where,
    Set,
    Values,
    OrderBy,
    GroupBy,
}

impl Category {
    pub fn keyword(self) -> &'static str {
        match self {
            Category::Select => "SELECT",
            Category::Where => "WHERE",
            Category::Set => "SET",
            Category::Values => "VALUES",
            Category::OrderBy => "ORDER BY",
            Category::GroupBy => "GROUP BY",
        }
    }
}

/// Category plus modifier flags selecting the rendering rules of a builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClauseKind {
    pub category: Option<Category>,
    /// Parenthesized AND group.
    pub and: bool,
    /// OR-joined group.
    pub or: bool,
    /// `IN (...)` instead of `VALUES (...)` for placeholder lists.
    pub in_list: bool,
    /// Flat placeholder list with auto-named bindings.
    pub list: bool,
    /// Single-use builder.
    pub single: bool,
}

impl ClauseKind {
    /// No category, no modifiers.
    pub const NONE: Self = Self {
        category: None,
        and: false,
        or: false,
        in_list: false,
        list: false,
        single: false,
    };

    pub const SELECT: Self = Self::category(Category::Select);
    pub const WHERE: Self = Self::category(Category::Where);
    pub const SET: Self = Self::category(Category::Set);
    pub const VALUES: Self = Self::category(Category::Values);
    pub const ORDER_BY: Self = Self::category(Category::OrderBy);
    pub const GROUP_BY: Self = Self::category(Category::GroupBy);

    pub const AND: Self = Self {
        and: true,
        ..Self::NONE
    };
    pub const OR: Self = Self {
        or: true,
        ..Self::NONE
    };
    pub const IN: Self = Self {
        in_list: true,
        ..Self::NONE
    };
    pub const LIST: Self = Self {
        list: true,
        ..Self::NONE
    };
    pub const SINGLE: Self = Self {
        single: true,
        ..Self::NONE
    };

    /// `VALUES` rendered as a placeholder list.
    pub const VALUES_LIST: Self = Self {
        category: Some(Category::Values),
        list: true,
        ..Self::NONE
    };

    pub const fn category(category: Category) -> Self {
        Self {
            category: Some(category),
            ..Self::NONE
        }
    }

    /// Union of flags; `self`'s category wins when both carry one.
    pub const fn with(self, other: Self) -> Self {
        Self {
            category: match self.category {
                Some(c) => Some(c),
                None => other.category,
            },
            and: self.and || other.and,
            or: self.or || other.or,
            in_list: self.in_list || other.in_list,
            list: self.list || other.list,
            single: self.single || other.single,
        }
    }

    pub fn is(self, category: Category) -> bool {
        self.category == Some(category)
    }

    /// Predicate kinds render named map entries as `` `key` glue :key ``.
    pub fn is_predicate(self) -> bool {
        self.and || self.or || self.is(Category::Where)
    }

    /// The kind used for template lookup: the single-use marker is ignored.
    fn lookup_key(self) -> Self {
        Self {
            single: false,
            ..self
        }
    }
}

impl BitOr for ClauseKind {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.with(rhs)
    }
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = Vec::new();
        if let Some(c) = self.category {
            names.push(c.keyword());
        }
        for (set, name) in [
            (self.and, "AND"),
            (self.or, "OR"),
            (self.in_list, "IN"),
            (self.list, "LIST"),
            (self.single, "SINGLE"),
        ] {
            if set {
                names.push(name);
            }
        }
        if names.is_empty() {
            f.write_str("NONE")
        } else {
            f.write_str(&names.join(" | "))
        }
    }
}

/// `(prefix, delimiter, suffix)` wrapped around the joined parts of a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub prefix: &'static str,
    pub delimiter: &'static str,
    pub suffix: &'static str,
}

impl Template {
    /// Template for kinds without a registry entry.
    pub const DEFAULT: Template = Template::new("", " ", "");

    pub const fn new(prefix: &'static str, delimiter: &'static str, suffix: &'static str) -> Self {
        Self {
            prefix,
            delimiter,
            suffix,
        }
    }

    pub fn render(&self, parts: &[String]) -> String {
        let mut out = String::with_capacity(
            self.prefix.len()
                + self.suffix.len()
                + parts.iter().map(String::len).sum::<usize>()
                + self.delimiter.len() * parts.len().saturating_sub(1),
        );
        out.push_str(self.prefix);
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                out.push_str(self.delimiter);
            }
            out.push_str(part);
        }
        out.push_str(self.suffix);
        out
    }
}

fn registry() -> &'static HashMap<ClauseKind, Template> {
    static REGISTRY: OnceLock<HashMap<ClauseKind, Template>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        HashMap::from([
            (ClauseKind::SELECT, Template::new("SELECT ", ", ", "")),
            (ClauseKind::WHERE, Template::new("WHERE ", " AND ", "")),
            (
                ClauseKind::WHERE | ClauseKind::OR,
                Template::new("WHERE ", " OR ", ""),
            ),
            (ClauseKind::AND, Template::new("(", " AND ", ")")),
            (ClauseKind::OR, Template::new("(", " OR ", ")")),
            (ClauseKind::VALUES, Template::new("VALUES (", ",", ")")),
            (ClauseKind::SET, Template::new("SET ", ",", "")),
            (ClauseKind::ORDER_BY, Template::new("ORDER BY ", ",", "")),
            (ClauseKind::GROUP_BY, Template::new("GROUP BY ", ",", "")),
        ])
    })
}

/// Look up the template for `kind`, falling back to [`Template::DEFAULT`].
pub fn template(kind: ClauseKind) -> Template {
    registry()
        .get(&kind.lookup_key())
        .copied()
        .unwrap_or(Template::DEFAULT)
}

/// Whether `kind` has its own registry entry.
pub fn is_registered(kind: ClauseKind) -> bool {
    registry().contains_key(&kind.lookup_key())
}

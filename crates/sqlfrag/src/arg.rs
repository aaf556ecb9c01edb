//! Builder call arguments.
//!
//! A builder call takes a list of [`Arg`]s. Each argument is one of:
//! - [`Arg::Raw`]: trusted SQL text appended verbatim
//! - [`Arg::Value`]: a scalar (only meaningful to list builders)
//! - [`Arg::Assoc`]: an ordered key → value map rendered per clause kind
//! - [`Arg::Fragment`]: the output of another builder, nested as one part
//!
//! The [`args!`](crate::args) and [`assoc!`](crate::assoc) macros build them:
//!
//! ```ignore
//! use sqlfrag::{args, assoc};
//!
//! let a = args!["id = 1", assoc! { "status" => "active" }];
//! let cols = assoc!["id", "COUNT(*)", "username" => "email"];
//! ```

use crate::fragment::Fragment;
use crate::value::Value;
use std::fmt;

/// Key of an [`Assoc`] entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Positional entry; its value is used as-is.
    Index(usize),
    /// Named entry (column, alias or placeholder name).
    Name(String),
}

impl Key {
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(name),
            Key::Index(_) => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{i}"),
            Key::Name(name) => f.write_str(name),
        }
    }
}

/// Ordered map of positional and named entries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Assoc {
    entries: Vec<(Key, Value)>,
    next_index: usize,
}

impl Assoc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional entry with the next free index.
    pub fn push(&mut self, value: impl Into<Value>) -> &mut Self {
        let index = self.next_index;
        self.entries.push((Key::Index(index), value.into()));
        self.next_index = index + 1;
        self
    }

    /// Set a named entry; an existing name keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self
            .entries
            .iter()
            .position(|(k, _)| k.as_name() == Some(name.as_str()))
        {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((Key::Name(name), value)),
        }
        self
    }

    /// Chainable form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Chainable form of [`push`](Self::push).
    pub fn item(mut self, value: impl Into<Value>) -> Self {
        self.push(value);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

impl<K, V> FromIterator<(K, V)> for Assoc
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut assoc = Assoc::new();
        for (k, v) in iter {
            assoc.insert(k, v);
        }
        assoc
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Assoc
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// One argument of a builder call.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Raw(String),
    Value(Value),
    Assoc(Assoc),
    Fragment(Fragment),
}

impl Arg {
    /// Short name of the argument shape, used in error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            Arg::Raw(_) => "raw",
            Arg::Value(_) => "value",
            Arg::Assoc(_) => "map",
            Arg::Fragment(_) => "fragment",
        }
    }
}

impl From<&str> for Arg {
    fn from(sql: &str) -> Self {
        Arg::Raw(sql.to_string())
    }
}

impl From<String> for Arg {
    fn from(sql: String) -> Self {
        Arg::Raw(sql)
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Value(value)
    }
}

macro_rules! impl_arg_from_scalar {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Arg {
                fn from(v: $t) -> Self {
                    Arg::Value(Value::from(v))
                }
            }
        )*
    };
}

impl_arg_from_scalar!(i32, i64, u32, f64, bool);

impl From<Assoc> for Arg {
    fn from(map: Assoc) -> Self {
        Arg::Assoc(map)
    }
}

impl From<Fragment> for Arg {
    fn from(fragment: Fragment) -> Self {
        Arg::Fragment(fragment)
    }
}

/// Build a `Vec<Arg>` from heterogeneous expressions.
///
/// ```ignore
/// let a = sqlfrag::args!["id = 1", or.call(sqlfrag::args!["a = 1", "b = 2"])];
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Arg::from($arg)),+]
    };
}

/// Build an [`Assoc`] from `value` (positional) and `"name" => value` entries.
///
/// ```ignore
/// let cols = sqlfrag::assoc!["id", "COUNT(*)", "username" => "email"];
/// let cond = sqlfrag::assoc! { "id" => 1, "username" => "test" };
/// ```
#[macro_export]
macro_rules! assoc {
    () => {
        $crate::Assoc::new()
    };
    ($($tt:tt)+) => {{
        let mut map = $crate::Assoc::new();
        $crate::__assoc_entries!(map; $($tt)+);
        map
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __assoc_entries {
    ($map:ident;) => {};
    ($map:ident; $key:expr => $value:expr $(, $($rest:tt)*)?) => {
        $map.insert($key, $value);
        $crate::__assoc_entries!($map; $($($rest)*)?);
    };
    ($map:ident; $value:expr $(, $($rest:tt)*)?) => {
        $map.push($value);
        $crate::__assoc_entries!($map; $($($rest)*)?);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_indices_continue() {
        let map = crate::assoc!["id", "name", "username" => "email", "COUNT(*)"];
        let keys: Vec<String> = map.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["0", "1", "username", "2"]);
    }

    #[test]
    fn named_insert_replaces_in_place() {
        let map = Assoc::new().with("a", 1).with("b", 2).with("a", 3);
        let keys: Vec<String> = map.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(map.iter().next().map(|(_, v)| v), Some(&Value::Int(3)));
    }

    #[test]
    fn from_array_keeps_order() {
        let map = Assoc::from([("created_at", "asc"), ("updated_at", "DESC")]);
        assert_eq!(map.len(), 2);
        let first = map.iter().next().map(|(k, _)| k.clone());
        assert_eq!(first, Some(Key::Name("created_at".into())));
    }

    #[test]
    fn args_macro_converts_each_shape() {
        let a = crate::args!["id = 1", 5, Assoc::new(), Fragment::default()];
        let shapes: Vec<&str> = a.iter().map(Arg::shape).collect();
        assert_eq!(shapes, vec!["raw", "value", "map", "fragment"]);
        assert!(crate::args![].is_empty());
    }
}

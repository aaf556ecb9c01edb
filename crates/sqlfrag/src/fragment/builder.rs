//! Stateful fragment builder for SELECT/WHERE/SET/VALUES/ORDER BY/GROUP BY
//! and parenthesized AND/OR groups.

use super::{Accumulator, Fragment};
use crate::arg::{Arg, Assoc, Key};
use crate::config::ClauseConfig;
use crate::error::{FragError, FragResult};
use crate::ident;
use crate::kind::{self, Category, ClauseKind, Template};
use crate::trace;
use crate::value::{Bindings, Value};

/// How map entries render for a kind. Checked in declaration order, so a
/// kind matching several rules takes the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryRule {
    /// `value` or `` value AS `key` ``
    Select,
    /// raw `value` or `` `key` glue :key ``
    Predicate,
    /// `` `key` ASC|DESC ``
    OrderBy,
    /// `` `key` ``
    GroupBy,
    /// `:key`
    Placeholder,
    /// `` `key` = :key ``
    Set,
    /// `key glue value`, unquoted and unbound
    Concat,
}

impl EntryRule {
    fn for_kind(kind: ClauseKind) -> Self {
        if kind.is(Category::Select) {
            EntryRule::Select
        } else if kind.is_predicate() {
            EntryRule::Predicate
        } else if kind.is(Category::OrderBy) {
            EntryRule::OrderBy
        } else if kind.is(Category::GroupBy) {
            EntryRule::GroupBy
        } else if kind.list || kind.is(Category::Values) {
            EntryRule::Placeholder
        } else if kind.is(Category::Set) {
            EntryRule::Set
        } else {
            EntryRule::Concat
        }
    }

    /// Whether a named entry is bound under its key.
    fn binds(self) -> bool {
        matches!(
            self,
            EntryRule::Predicate | EntryRule::Placeholder | EntryRule::Set
        )
    }

    /// Whether the key of an entry is rendered as an identifier or placeholder
    /// name. Positional keys of select and predicate entries are not.
    fn uses_key(self, key: &Key) -> bool {
        match self {
            EntryRule::Select | EntryRule::Predicate => matches!(key, Key::Name(_)),
            EntryRule::Concat => false,
            _ => true,
        }
    }
}

/// Accumulating builder returned by [`clause`](super::clause) for non-list kinds.
///
/// Each [`call`](Self::call) appends parts and bindings and returns the
/// cumulative render: `prefix + parts.join(delimiter) + suffix`.
#[derive(Debug, Clone)]
pub struct FragmentBuilder {
    kind: ClauseKind,
    glue: String,
    template: Template,
    rule: EntryRule,
    config: ClauseConfig,
    acc: Accumulator,
}

impl FragmentBuilder {
    pub fn new(kind: ClauseKind, glue: &str) -> Self {
        Self {
            kind,
            glue: glue.to_string(),
            template: kind::template(kind),
            rule: EntryRule::for_kind(kind),
            config: ClauseConfig::default(),
            acc: Accumulator::default(),
        }
    }

    pub fn with_config(mut self, config: ClauseConfig) -> Self {
        self.config = config;
        self
    }

    pub fn kind(&self) -> ClauseKind {
        self.kind
    }

    pub fn glue(&self) -> &str {
        &self.glue
    }

    /// Number of parts accumulated so far.
    pub fn part_count(&self) -> usize {
        self.acc.parts.len()
    }

    /// The cumulative fragment, without appending anything.
    pub fn render(&self) -> Fragment {
        Fragment {
            sql: self.template.render(&self.acc.parts),
            bindings: self.acc.bindings.clone(),
        }
    }

    /// Append `args` and return the cumulative fragment.
    ///
    /// - raw strings are appended verbatim
    /// - nested fragments are appended as one part, their bindings merged
    /// - a map argument renders the entries of the call's *first* argument
    ///   when that is a map, and nothing otherwise
    /// - scalar values are ignored
    pub fn call(&mut self, args: Vec<Arg>) -> Fragment {
        self.acc.calls += 1;
        if self.kind.single && self.acc.calls > 1 {
            trace::reused(self.kind, &self.config, self.acc.calls);
        }

        let first_map = match args.first() {
            Some(Arg::Assoc(map)) => Some(map),
            _ => None,
        };

        for arg in &args {
            match arg {
                Arg::Raw(sql) => self.acc.parts.push(sql.clone()),
                Arg::Fragment(nested) => {
                    self.acc.parts.push(nested.sql.clone());
                    self.acc.bindings.merge(&nested.bindings);
                }
                Arg::Assoc(_) => {
                    if let Some(map) = first_map {
                        self.push_entries(map);
                    }
                }
                Arg::Value(_) => {}
            }
        }

        let fragment = self.render();
        trace::rendered(
            "clause",
            Some(self.kind),
            &self.config,
            &fragment.sql,
            &fragment.bindings,
        );
        fragment
    }

    /// Strict form of [`call`](Self::call).
    ///
    /// Rejects calls `call` would render lossily or ambiguously. On error the
    /// builder is left unchanged; on success the result equals `call`'s.
    pub fn try_call(&mut self, args: Vec<Arg>) -> FragResult<Fragment> {
        self.validate(&args)?;
        Ok(self.call(args))
    }

    fn validate(&self, args: &[Arg]) -> FragResult<()> {
        if self.kind.single && self.acc.calls > 0 {
            return Err(FragError::Reused(self.kind));
        }
        if !kind::is_registered(self.kind) {
            return Err(FragError::UnregisteredKind(self.kind));
        }

        let maps = args.iter().filter(|a| matches!(a, Arg::Assoc(_))).count();
        if maps > 1 {
            return Err(FragError::MultipleMaps(maps));
        }
        if maps == 1 && !matches!(args.first(), Some(Arg::Assoc(_))) {
            return Err(FragError::MapNotFirst);
        }

        let mut incoming = Bindings::new();
        for arg in args {
            match arg {
                Arg::Raw(_) => {}
                Arg::Value(_) => return Err(FragError::unsupported(self.kind, arg.shape())),
                Arg::Fragment(nested) => {
                    check_fresh(&self.acc.bindings, &incoming, nested.bindings.names())?;
                    incoming.merge(&nested.bindings);
                }
                Arg::Assoc(map) => {
                    for (key, value) in map.iter() {
                        if !self.rule.uses_key(key) {
                            continue;
                        }
                        let name = key.to_string();
                        ident::validate(&name)?;
                        if self.rule.binds() {
                            check_fresh(&self.acc.bindings, &incoming, [name.as_str()])?;
                            incoming.insert(name, value.clone());
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn push_entries(&mut self, map: &Assoc) {
        for (key, value) in map.iter() {
            let part = self.render_entry(key, value);
            self.acc.parts.push(part);
        }
    }

    fn render_entry(&mut self, key: &Key, value: &Value) -> String {
        match (self.rule, key) {
            (EntryRule::Select, Key::Index(_)) => value.to_sql_text(),
            (EntryRule::Select, Key::Name(alias)) => {
                format!("{} AS {}", value, ident::quote(alias))
            }
            (EntryRule::Predicate, Key::Index(_)) => value.to_sql_text(),
            (EntryRule::Predicate, Key::Name(name)) => {
                self.acc.bindings.insert(name.clone(), value.clone());
                format!("{} {} :{}", ident::quote(name), self.glue, name)
            }
            (EntryRule::OrderBy, _) => {
                let direction = match value.as_str() {
                    Some(dir) if dir.eq_ignore_ascii_case("DESC") => "DESC",
                    _ => "ASC",
                };
                format!("{} {}", ident::quote(&key.to_string()), direction)
            }
            (EntryRule::GroupBy, _) => ident::quote(&key.to_string()),
            (EntryRule::Placeholder, _) => {
                let name = key.to_string();
                let part = format!(":{name}");
                self.acc.bindings.insert(name, value.clone());
                part
            }
            (EntryRule::Set, _) => {
                let name = key.to_string();
                let part = format!("{} = :{}", ident::quote(&name), name);
                self.acc.bindings.insert(name, value.clone());
                part
            }
            (EntryRule::Concat, _) => format!("{}{}{}", key, self.glue, value),
        }
    }
}

fn check_fresh<'a>(
    existing: &Bindings,
    incoming: &Bindings,
    names: impl IntoIterator<Item = &'a str>,
) -> FragResult<()> {
    for name in names {
        if existing.contains(name) || incoming.contains(name) {
            return Err(FragError::PlaceholderCollision(name.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_order_follows_kind_precedence() {
        for (kind, rule) in [
            (ClauseKind::SELECT | ClauseKind::AND, EntryRule::Select),
            (ClauseKind::SET | ClauseKind::AND, EntryRule::Predicate),
            (ClauseKind::OR, EntryRule::Predicate),
            (ClauseKind::ORDER_BY, EntryRule::OrderBy),
            (ClauseKind::GROUP_BY, EntryRule::GroupBy),
            (ClauseKind::VALUES, EntryRule::Placeholder),
            (ClauseKind::SET, EntryRule::Set),
            (ClauseKind::NONE, EntryRule::Concat),
        ] {
            assert_eq!(EntryRule::for_kind(kind), rule, "{kind}");
        }
    }

    #[test]
    fn render_without_call_is_empty_template() {
        let b = FragmentBuilder::new(ClauseKind::WHERE, "=");
        assert_eq!(b.render(), Fragment::raw("WHERE "));
        assert_eq!(b.part_count(), 0);
    }
}

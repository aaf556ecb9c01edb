use super::{Accumulator, Fragment};
use crate::arg::Arg;
use crate::config::ClauseConfig;
use crate::error::{FragError, FragResult};
use crate::ident;
use crate::kind::ClauseKind;
use crate::trace;
use crate::value::Value;

/// Placeholder-list builder for `IN (...)` and `VALUES (...)`.
///
/// Every accepted argument becomes `:{label}_in_{i}` (0-based per call).
/// The SQL covers the current call only while bindings accumulate, so a
/// second call reuses `_in_0`, `_in_1`, ... and overwrites earlier values.
/// Use one builder per list.
#[derive(Debug, Clone)]
pub struct ListBuilder {
    kind: ClauseKind,
    label: String,
    config: ClauseConfig,
    acc: Accumulator,
}

impl ListBuilder {
    pub fn new(kind: ClauseKind, label: &str) -> Self {
        Self {
            kind,
            label: label.to_string(),
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

    pub fn label(&self) -> &str {
        &self.label
    }

    fn keyword(&self) -> &'static str {
        if self.kind.in_list { "IN" } else { "VALUES" }
    }

    fn placeholder_name(&self, index: usize) -> String {
        format!("{}_in_{}", self.label, index)
    }

    /// Bind each raw string or scalar argument and render the placeholder list.
    ///
    /// Map and fragment arguments are skipped and take no index.
    pub fn call(&mut self, args: Vec<Arg>) -> Fragment {
        self.acc.calls += 1;
        if self.kind.single && self.acc.calls > 1 {
            trace::reused(self.kind, &self.config, self.acc.calls);
        }

        let mut placeholders = Vec::with_capacity(args.len());
        for value in args.into_iter().filter_map(list_value) {
            let name = self.placeholder_name(placeholders.len());
            placeholders.push(format!(":{name}"));
            self.acc.bindings.insert(name, value);
        }

        let sql = format!("{} ({})", self.keyword(), placeholders.join(", "));
        trace::rendered(
            "list",
            Some(self.kind),
            &self.config,
            &sql,
            &self.acc.bindings,
        );
        Fragment {
            sql,
            bindings: self.acc.bindings.clone(),
        }
    }

    /// Strict form of [`call`](Self::call): rejects map and fragment
    /// arguments, reuse of a single-use builder, a label that does not form
    /// a valid placeholder name, and placeholder names already bound by an
    /// earlier call.
    pub fn try_call(&mut self, args: Vec<Arg>) -> FragResult<Fragment> {
        if self.kind.single && self.acc.calls > 0 {
            return Err(FragError::Reused(self.kind));
        }
        if let Some(arg) = args
            .iter()
            .find(|a| matches!(a, Arg::Assoc(_) | Arg::Fragment(_)))
        {
            return Err(FragError::unsupported(self.kind, arg.shape()));
        }
        if !args.is_empty() {
            ident::validate(&self.placeholder_name(0))?;
        }
        for index in 0..args.len() {
            let name = self.placeholder_name(index);
            if self.acc.bindings.contains(&name) {
                return Err(FragError::PlaceholderCollision(name));
            }
        }
        Ok(self.call(args))
    }
}

fn list_value(arg: Arg) -> Option<Value> {
    match arg {
        Arg::Raw(s) => Some(Value::Text(s)),
        Arg::Value(v) => Some(v),
        Arg::Assoc(_) | Arg::Fragment(_) => None,
    }
}

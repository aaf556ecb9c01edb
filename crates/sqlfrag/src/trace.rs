//! `tracing` events for rendered SQL (feature `tracing`).

use crate::config::ClauseConfig;
use crate::kind::ClauseKind;
use crate::value::Bindings;

/// Emit the SQL a builder or statement just rendered.
#[cfg(feature = "tracing")]
pub(crate) fn rendered(
    source: &str,
    kind: Option<ClauseKind>,
    config: &ClauseConfig,
    sql: &str,
    bindings: &Bindings,
) {
    let tag = config.tag.as_deref().unwrap_or("-");
    let kind = kind.map(|k| k.to_string());
    tracing::debug!(
        target: "sqlfrag.sql",
        source,
        kind = kind.as_deref().unwrap_or("-"),
        tag,
        binding_count = bindings.len(),
        sql = %config.truncate(sql),
    );
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn rendered(_: &str, _: Option<ClauseKind>, _: &ClauseConfig, _: &str, _: &Bindings) {}

/// Warn that a single-use builder was called again.
#[cfg(feature = "tracing")]
pub(crate) fn reused(kind: ClauseKind, config: &ClauseConfig, calls: usize) {
    tracing::warn!(
        target: "sqlfrag.sql",
        kind = %kind,
        tag = config.tag.as_deref().unwrap_or("-"),
        calls,
        "single-use builder called again",
    );
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn reused(_: ClauseKind, _: &ClauseConfig, _: usize) {}

use crate::error::{FragError, FragResult};
use serde::Deserialize;

/// Diagnostic settings for builders and statements.
///
/// Configuration never changes what is rendered; it only shapes the
/// `tracing` events emitted when the `tracing` feature is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClauseConfig {
    /// Label attached to emitted events.
    pub tag: Option<String>,
    /// Truncate logged SQL to this many bytes. `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for ClauseConfig {
    fn default() -> Self {
        Self {
            tag: None,
            max_sql_length: Some(200),
        }
    }
}

impl ClauseConfig {
    /// Create a configuration with defaults (no tag, 200-byte truncation).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document such as `{"tag": "users", "max_sql_length": 80}`.
    ///
    /// Missing fields keep their defaults.
    pub fn from_json_str(raw: &str) -> FragResult<Self> {
        serde_json::from_str(raw)
            .map_err(|e| FragError::config(e.to_string()))
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    /// `sql` shortened to the configured length on a char boundary.
    pub fn truncate<'a>(&self, sql: &'a str) -> &'a str {
        match self.max_sql_length {
            Some(max) if sql.len() > max => {
                let mut end = max;
                while end > 0 && !sql.is_char_boundary(end) {
                    end -= 1;
                }
                &sql[..end]
            }
            _ => sql,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClauseConfig::new();
        assert_eq!(config.tag, None);
        assert_eq!(config.max_sql_length, Some(200));
    }

    #[test]
    fn parses_partial_json() {
        let config = ClauseConfig::from_json_str(r#"{"tag": "users"}"#).unwrap();
        assert_eq!(config, ClauseConfig::new().with_tag("users"));

        let raw = r#"{"max_sql_length": null}"#;
        let config = ClauseConfig::from_json_str(raw).unwrap();
        assert_eq!(config.max_sql_length, None);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = ClauseConfig::from_json_str("{tag:").unwrap_err();
        assert!(matches!(err, FragError::Config(_)));
    }

    #[test]
    fn truncates_on_char_boundary() {
        let config = ClauseConfig::new().with_max_sql_length(4);
        assert_eq!(config.truncate("SELECT"), "SELE");
        assert_eq!(config.truncate("ab"), "ab");
        // 'é' is two bytes starting at index 3
        assert_eq!(config.truncate("abcé"), "abc");
        assert_eq!(
            ClauseConfig::new().no_truncate().truncate("SELECT"),
            "SELECT"
        );
    }
}

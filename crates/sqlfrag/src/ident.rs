//! Backtick identifier quoting for map keys.
//!
//! Rendering quotes keys verbatim: `` `key` ``. Nothing is escaped, the caller
//! owns the keys. [`validate`] is the check strict rendering applies first:
//! a key must match `[A-Za-z_][A-Za-z0-9_$]*`.

use crate::error::{FragError, FragResult};

/// Wrap `name` in backticks.
pub fn quote(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    write_quoted(name, &mut out);
    out
}

pub(crate) fn write_quoted(name: &str, out: &mut String) {
    out.push('`');
    out.push_str(name);
    out.push('`');
}

/// Check that `name` is a plain identifier safe to quote and use as a placeholder name.
pub fn validate(name: &str) -> FragResult<()> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(FragError::InvalidIdentifier(name.to_string()));
    };
    if !(first == '_' || first.is_ascii_alphabetic()) {
        return Err(FragError::InvalidIdentifier(name.to_string()));
    }
    if !chars.all(|c| c == '_' || c == '$' || c.is_ascii_alphanumeric()) {
        return Err(FragError::InvalidIdentifier(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_simple() {
        assert_eq!(quote("users"), "`users`");
    }

    #[test]
    fn quote_is_verbatim() {
        assert_eq!(quote("a`b"), "`a`b`");
    }

    #[test]
    fn accepts_plain_names() {
        assert!(validate("id").is_ok());
        assert!(validate("_created_at").is_ok());
        assert!(validate("my_var$1").is_ok());
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(
            validate(""),
            Err(FragError::InvalidIdentifier(String::new()))
        );
    }

    #[test]
    fn rejects_start_digit() {
        assert!(validate("1table").is_err());
    }

    #[test]
    fn rejects_space_dot_and_backtick() {
        assert!(validate("my table").is_err());
        assert!(validate("schema.table").is_err());
        assert!(validate("a`b").is_err());
    }
}

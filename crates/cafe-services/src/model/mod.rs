//! Plain data structures shared by the services, the stores and the RPC surface.
//!
//! Each row type implements [`Record`](record_actor::Record) in its owning service's
//! `entity` module.

pub mod menu_item;
pub mod order;
pub mod user;

pub use menu_item::*;
pub use order::*;
pub use user::*;

/// A required field was empty. Raised by the record hooks and by the database's
/// `CHECK` constraints alike.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0} is required")]
pub struct MissingField(pub &'static str);

/// Returns `Err(MissingField(field))` when `value` is blank.
///
/// Blank means made only of ASCII space, tab, newline, carriage return, vertical tab and
/// form feed: the same set the `*_required` constraints reject with `[^ \t\n\r\f\v]`.
pub(crate) fn require(field: &'static str, value: &str) -> Result<(), MissingField> {
    if value
        .chars()
        .all(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C'))
    {
        return Err(MissingField(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_rejects_control_whitespace() {
        for blank in ["", " ", "\t", "\r\n", " \x0B\x0C "] {
            assert_eq!(require("name", blank), Err(MissingField("name")), "{blank:?}");
        }
    }

    #[test]
    fn test_require_accepts_visible_text() {
        assert_eq!(require("name", " Tea\t"), Ok(()));
        // Outside the ASCII set the database constraint checks, so not blank
        assert_eq!(require("name", "\u{a0}"), Ok(()));
    }
}

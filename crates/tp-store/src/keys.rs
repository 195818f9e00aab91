//! Warp point key and target validation.
//!
//! Valid keys:
//! - Must be non-empty
//! - Must not start with `;`, `#` or `[` (the store's comment markers)
//! - Must not contain `=` (the store's key/target separator)
//! - Must not contain whitespace or non-printable characters
//! - Must not collide with a reserved word (a command name or alias)
//!
//! Valid targets must not contain line breaks.

use std::collections::BTreeSet;

use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};

use crate::codec::COMMENT_PREFIXES;
use crate::error::{Result, StoreError};

/// Command names and aliases of the `teleport` CLI.
pub const DEFAULT_RESERVED: &[&str] = &[
    "add", "a", "remove", "rm", "list", "ls", "warp", "w", "prune", "help",
];

/// Set of identifiers that cannot be used as warp point keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReservedWords {
    words: BTreeSet<String>,
}

impl ReservedWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// An empty set; only the character rules apply.
    pub fn none() -> Self {
        Self {
            words: BTreeSet::new(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

impl Default for ReservedWords {
    fn default() -> Self {
        Self::new(DEFAULT_RESERVED.iter().copied())
    }
}

/// Validate a warp point key, returning `Ok(())` if it may be stored.
///
/// # Examples
///
/// ```
/// use tp_store::keys::{validate_key, ReservedWords};
///
/// let reserved = ReservedWords::default();
/// assert!(validate_key("proj", &reserved).is_ok());
/// assert!(validate_key("list", &reserved).is_err());
/// assert!(validate_key("a=b", &reserved).is_err());
/// ```
pub fn validate_key(key: &str, reserved: &ReservedWords) -> Result<()> {
    let invalid = |reason: String| StoreError::InvalidKey {
        key: key.to_string(),
        reason,
    };

    if key.is_empty() {
        return Err(invalid("key must not be empty".into()));
    }
    if reserved.contains(key) {
        return Err(invalid("collides with a command name".into()));
    }
    if key.starts_with(COMMENT_PREFIXES) {
        return Err(invalid("must not start with ';', '#' or '['".into()));
    }
    if key.contains('=') {
        return Err(invalid("must not contain '='".into()));
    }
    for ch in key.chars() {
        if ch.is_whitespace() {
            return Err(invalid(format!("contains whitespace: {ch:?}")));
        }
        if !is_printable(ch) {
            return Err(invalid(format!("contains non-printable character: {ch:?}")));
        }
    }
    Ok(())
}

/// Letters, marks, numbers, punctuation and symbols. Separators and the
/// `Other` group (control, format, surrogate, private use, unassigned) are not.
fn is_printable(ch: char) -> bool {
    !matches!(
        ch.general_category_group(),
        GeneralCategoryGroup::Separator | GeneralCategoryGroup::Other
    )
}

/// Validate a warp point target, returning `Ok(())` if it fits on one line.
pub fn validate_target(target: &str) -> Result<()> {
    if let Some(ch) = target.chars().find(|&c| matches!(c, '\n' | '\r')) {
        return Err(StoreError::InvalidTarget {
            target: target.to_string(),
            reason: format!("contains line break: {ch:?}"),
        });
    }
    Ok(())
}

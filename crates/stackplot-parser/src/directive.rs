//! Directive text parser.
//!
//! Directive text is a block of `key = value` lines. Every line containing
//! `=` is split on its first `=`: the key is trimmed and lower-cased, the
//! value trimmed. Lines without `=` are ignored.
//!
//! There is no comment syntax. A line such as `#xlim = 10,80` registers the
//! key `#xlim`, which no option ever reads, so it is inert rather than
//! skipped.

use indexmap::IndexMap;
use log::trace;
use winnow::{
    Parser as _,
    combinator::separated_pair,
    error::ModalResult,
    token::{rest, take_till},
};

/// Flat map of lower-cased directive keys to raw values.
///
/// Later duplicates overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveSet {
    entries: IndexMap<String, String>,
}

impl DirectiveSet {
    /// Returns the raw value for `key`, if the key was given.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns true if a line registered `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the value of a positional key such as `name3`.
    ///
    /// `index` is the 1-based load order of a series or pattern.
    pub fn indexed(&self, prefix: &str, index: usize) -> Option<&str> {
        self.get(&format!("{prefix}{index}"))
    }

    /// Inserts or overwrites a directive. The key is normalized like a parsed one.
    pub fn insert(&mut self, key: &str, value: &str) {
        self.entries
            .insert(key.trim().to_lowercase(), value.trim().to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over directives in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Splits a line on its first `=`.
fn key_value<'s>(input: &mut &'s str) -> ModalResult<(&'s str, &'s str)> {
    separated_pair(take_till(0.., '='), '=', rest).parse_next(input)
}

/// Parses directive text into a [`DirectiveSet`].
///
/// # Examples
///
/// ```
/// use stackplot_parser::parse_directives;
///
/// let set = parse_directives("Offset = 1.5\nlegend=on\n#xlim = 10,80\njust text");
/// assert_eq!(set.get("offset"), Some("1.5"));
/// assert_eq!(set.get("#xlim"), Some("10,80"));
/// assert_eq!(set.get("xlim"), None);
/// assert_eq!(set.len(), 3);
/// ```
pub fn parse_directives(text: &str) -> DirectiveSet {
    let mut set = DirectiveSet::default();
    for line in text.lines() {
        if let Ok((key, value)) = key_value.parse(line) {
            set.insert(key, value);
        }
    }
    trace!(directives_count = set.len(); "Directives parsed");
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_first_equals() {
        let set = parse_directives("title = a = b");
        assert_eq!(set.get("title"), Some("a = b"));
    }

    #[test]
    fn test_keys_lowercased_values_trimmed() {
        let set = parse_directives("  XLabel   =   2θ (°)   ");
        assert_eq!(set.get("xlabel"), Some("2θ (°)"));
    }

    #[test]
    fn test_lines_without_equals_ignored() {
        let set = parse_directives("--- Ticks ---\n\n\nlegend = on\n");
        assert_eq!(set.len(), 1);
        assert!(set.contains("legend"));
    }

    #[test]
    fn test_comment_lines_register_hash_keys() {
        let set = parse_directives("#xlim = 10,80\n# Left, Right, Top, Bottom");
        assert!(set.contains("#xlim"));
        assert!(!set.contains("xlim"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_later_duplicates_overwrite() {
        let set = parse_directives("offset = 1\nOFFSET = 3");
        assert_eq!(set.get("offset"), Some("3"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_empty_value_and_key() {
        let set = parse_directives("title =\n= orphan");
        assert_eq!(set.get("title"), Some(""));
        assert_eq!(set.get(""), Some("orphan"));
    }

    #[test]
    fn test_indexed_lookup() {
        let set = parse_directives("name1 = first\nrefcolor2 = red");
        assert_eq!(set.indexed("name", 1), Some("first"));
        assert_eq!(set.indexed("refcolor", 2), Some("red"));
        assert_eq!(set.indexed("name", 2), None);
    }

    #[test]
    fn test_windows_line_endings() {
        let set = parse_directives("offset = 1\r\nlegend = off\r\n");
        assert_eq!(set.get("offset"), Some("1"));
        assert_eq!(set.get("legend"), Some("off"));
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    /// Every stored key is trimmed and lower-cased, and every value trimmed.
    fn check_entries_are_normalized(text: &str) -> Result<(), TestCaseError> {
        let set = parse_directives(text);
        for (key, value) in set.iter() {
            prop_assert_eq!(key, key.trim().to_lowercase());
            prop_assert_eq!(value, value.trim());
        }
        prop_assert!(set.len() <= text.lines().count());
        Ok(())
    }

    /// The last line for a key decides its value.
    fn check_last_duplicate_wins(first: &str, second: &str) -> Result<(), TestCaseError> {
        let set = parse_directives(&format!("offset = {first}\nOFFSET = {second}"));
        prop_assert_eq!(set.len(), 1);
        prop_assert_eq!(set.get("offset"), Some(second.trim()));
        Ok(())
    }

    proptest! {
        #[test]
        fn entries_are_normalized(text in "[a-zA-Z0-9 =#,.\n\t]{0,200}") {
            check_entries_are_normalized(&text)?;
        }

        #[test]
        fn last_duplicate_wins(first in "[a-z0-9.,]{0,10}", second in "[a-z0-9.,]{0,10}") {
            check_last_duplicate_wins(&first, &second)?;
        }
    }
}

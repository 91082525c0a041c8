//! Subset tags and the subset-list attribute grammar.
//!
//! Every catalog entry is labeled with one or more subset tags (`"lsl"`,
//! `"ossl"`, ...) naming the library flavors it belongs to. Visibility
//! decisions are always a set-overlap test between an entry's tags and a
//! configured tag set.

use std::fmt;

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

/// Reserved tag selecting every entity regardless of its own tags.
/// A catalog whose desired subsets contain this tag is forced into
/// accumulate-duplicates mode.
pub const ALL_SUBSETS: &str = "all";

/// Check a single tag against the pattern `[A-Za-z][A-Za-z0-9_-]*`.
pub fn is_valid_tag(tag: &str) -> bool {
    let mut chars = tag.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Parse a comma-separated subset list.
///
/// Items may carry surrounding whitespace. Items that do not match the tag
/// pattern (including empty items) contribute nothing; an empty or
/// whitespace-only input yields an empty list. Returned order is input order.
pub fn parse_subset_list(text: &str) -> Vec<SmolStr> {
    text.split(',')
        .map(str::trim)
        .filter(|item| is_valid_tag(item))
        .map(SmolStr::new)
        .collect()
}

/// An unordered set of subset tags.
///
/// Mutations report whether they changed the set through their return values;
/// there is no change-notification side channel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: FxHashSet<SmolStr>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from the subset-list grammar. Invalid items are dropped.
    pub fn parse(text: &str) -> Self {
        parse_subset_list(text).into_iter().collect()
    }

    /// Add a tag. Returns false if it was already present.
    pub fn add(&mut self, tag: impl Into<SmolStr>) -> bool {
        self.tags.insert(tag.into())
    }

    /// Remove a tag. Returns false if it was not present.
    pub fn remove(&mut self, tag: &str) -> bool {
        self.tags.remove(tag)
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    /// Replace the contents of the set.
    pub fn set_all<I, T>(&mut self, tags: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<SmolStr>,
    {
        self.tags.clear();
        self.tags.extend(tags.into_iter().map(Into::into));
    }

    /// True iff the intersection with `other` is non-empty.
    pub fn overlaps(&self, other: &TagSet) -> bool {
        // Probe with the smaller side.
        let (small, large) = if self.tags.len() <= other.tags.len() {
            (&self.tags, &other.tags)
        } else {
            (&other.tags, &self.tags)
        };
        small.iter().any(|tag| large.contains(tag))
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterate the tags in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &SmolStr> {
        self.tags.iter()
    }
}

impl<T: Into<SmolStr>> FromIterator<T> for TagSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for TagSet {
    /// Comma-separated rendering, sorted for determinism.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&str> = self.tags.iter().map(SmolStr::as_str).collect();
        tags.sort_unstable();
        f.write_str(&tags.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(" foo, bar-2 ,  baz_3", &["foo", "bar-2", "baz_3"])]
    #[case("", &[])]
    #[case("   ", &[])]
    #[case("1bad", &[])]
    #[case("lsl", &["lsl"])]
    #[case("lsl,,ossl", &["lsl", "ossl"])]
    #[case("-dash", &[])]
    #[case("a-1_B", &["a-1_B"])]
    fn test_subset_list_grammar(#[case] input: &str, #[case] expected: &[&str]) {
        let parsed = parse_subset_list(input);
        let expected: Vec<SmolStr> = expected.iter().map(|s| SmolStr::new(s)).collect();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_add_remove_report_change() {
        let mut tags = TagSet::new();
        assert!(tags.add("lsl"));
        assert!(!tags.add("lsl"));
        assert!(tags.remove("lsl"));
        assert!(!tags.remove("lsl"));
    }

    #[test]
    fn test_overlaps() {
        let lsl: TagSet = ["lsl"].into_iter().collect();
        let ossl: TagSet = ["ossl"].into_iter().collect();
        let both: TagSet = ["lsl", "ossl"].into_iter().collect();
        assert!(!lsl.overlaps(&ossl));
        assert!(lsl.overlaps(&both));
        assert!(both.overlaps(&ossl));
        assert!(!lsl.overlaps(&TagSet::new()));
    }

    #[test]
    fn test_set_all_replaces() {
        let mut tags: TagSet = ["lsl"].into_iter().collect();
        tags.set_all(["ossl", "aa"]);
        assert!(!tags.contains("lsl"));
        assert!(tags.contains("ossl"));
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_display_sorted() {
        let tags: TagSet = ["ossl", "lsl"].into_iter().collect();
        assert_eq!(tags.to_string(), "lsl,ossl");
    }
}

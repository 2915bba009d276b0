//! Per-segment description list kept in step with the route.

use crate::diff::{DiffKind, PointDiff};
use serde::{Deserialize, Serialize};

/// Ordered descriptions; entry `i` belongs to the `desc_<i>` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Annotations(Vec<String>);

impl Annotations {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_vec(values: Vec<String>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Description at `index`, empty when none was entered.
    pub fn get(&self, index: usize) -> &str {
        self.0.get(index).map(String::as_str).unwrap_or("")
    }

    /// Overwrite the description at `index`, growing the list if needed.
    pub fn set(&mut self, index: usize, text: impl Into<String>) {
        if index >= self.0.len() {
            self.0.resize(index + 1, String::new());
        }
        self.0[index] = text.into();
    }

    /// True if any description has visible text.
    pub fn has_text(&self) -> bool {
        self.0.iter().any(|d| !d.trim().is_empty())
    }

    /// Apply a snapshot diff, then fit the list to `segment_count` entries.
    ///
    /// Insertions splice a blank entry, deletions drop one entry. Unchanged
    /// and ambiguous diffs leave the existing entries where they are. Entries
    /// past the last segment are dropped, so text of a vanished row never
    /// comes back on a later append.
    pub fn apply(&mut self, diff: PointDiff, segment_count: usize) {
        match (diff.kind, diff.index) {
            (DiffKind::Inserted, Some(index)) => {
                let at = index.min(self.0.len());
                self.0.insert(at, String::new());
            }
            (DiffKind::Deleted, Some(index)) if index < self.0.len() => {
                self.0.remove(index);
            }
            _ => {}
        }
        self.0.resize(segment_count, String::new());
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotations(values: &[&str]) -> Annotations {
        Annotations::from_vec(values.iter().map(|v| v.to_string()).collect())
    }

    #[test]
    fn insertion_splices_blank_entry() {
        let mut a = annotations(&["harbour", "buoy", "cape", ""]);
        a.apply(PointDiff::inserted(2), 5);
        assert_eq!(a.as_slice(), &["harbour", "buoy", "", "cape", ""]);
    }

    #[test]
    fn insertion_past_end_appends() {
        let mut a = annotations(&["harbour"]);
        a.apply(PointDiff::inserted(4), 3);
        assert_eq!(a.as_slice(), &["harbour", "", ""]);
    }

    #[test]
    fn deletion_removes_entry() {
        let mut a = annotations(&["harbour", "buoy", "cape"]);
        a.apply(PointDiff::deleted(Some(0)), 2);
        assert_eq!(a.as_slice(), &["buoy", "cape"]);
    }

    #[test]
    fn deletion_without_index_only_truncates() {
        let mut a = annotations(&["harbour", "buoy", "cape"]);
        a.apply(PointDiff::deleted(None), 2);
        assert_eq!(a.as_slice(), &["harbour", "buoy"]);
    }

    #[test]
    fn ambiguous_keeps_visible_entries() {
        let mut a = annotations(&["harbour", "buoy"]);
        a.apply(PointDiff::AMBIGUOUS, 5);
        assert_eq!(a.as_slice(), &["harbour", "buoy", "", "", ""]);
    }

    #[test]
    fn vanished_row_text_is_not_revived() {
        // 4 points, 3 segments; the first vertex is dropped, then one appended
        let mut a = annotations(&["a", "b", "c"]);
        a.apply(PointDiff::deleted(None), 2);
        assert_eq!(a.as_slice(), &["a", "b"]);
        a.apply(PointDiff::inserted(3), 3);
        assert_eq!(a.as_slice(), &["a", "b", ""]);
    }

    #[test]
    fn set_grows_list() {
        let mut a = Annotations::new();
        a.set(2, "Harbor entrance");
        assert_eq!(a.get(2), "Harbor entrance");
        assert_eq!(a.get(0), "");
        assert_eq!(a.get(10), "");
        assert!(a.has_text());
    }
}

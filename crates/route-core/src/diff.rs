//! Single-point insertion/deletion detection between route snapshots.
//!
//! The drawing surface only reports the full coordinate list after every
//! change. Comparing it with the previous snapshot tells where one vertex was
//! added or removed so descriptions can stay with their points.
//!
//! Reported indices keep the map editor's historical offsets: an insertion is
//! reported one past the first diverging vertex, a deletion one before it.
//! Description alignment in saved routes depends on exactly these offsets.

use crate::models::Point;
use serde::{Deserialize, Serialize};

/// Drawing-surface jitter tolerance per axis, in projected units.
pub const POINT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Inserted,
    Deleted,
    Unchanged,
    /// More than one vertex added or removed in a single change
    Ambiguous,
}

/// Outcome of comparing two snapshots.
///
/// `index` is set for insertions and for deletions past the first vertex.
/// A deletion whose divergence is at the very first vertex carries no index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointDiff {
    pub kind: DiffKind,
    pub index: Option<usize>,
}

impl PointDiff {
    pub const UNCHANGED: PointDiff = PointDiff {
        kind: DiffKind::Unchanged,
        index: None,
    };

    pub const AMBIGUOUS: PointDiff = PointDiff {
        kind: DiffKind::Ambiguous,
        index: None,
    };

    pub fn inserted(index: usize) -> Self {
        Self {
            kind: DiffKind::Inserted,
            index: Some(index),
        }
    }

    pub fn deleted(index: Option<usize>) -> Self {
        Self {
            kind: DiffKind::Deleted,
            index,
        }
    }
}

/// Compare `previous` against `current` and infer a single-vertex edit.
pub fn diff_points(previous: &[Point], current: &[Point]) -> PointDiff {
    if current.len() == previous.len() {
        return PointDiff::UNCHANGED;
    }

    if current.len() == previous.len() + 1 {
        return match first_divergence(previous, current) {
            Some(i) => PointDiff::inserted(i + 1),
            None => PointDiff::inserted(previous.len()),
        };
    }

    if current.len() + 1 == previous.len() {
        return match first_divergence(previous, current) {
            Some(i) => PointDiff::deleted(i.checked_sub(1)),
            None => PointDiff::deleted(previous.len().checked_sub(1)),
        };
    }

    PointDiff::AMBIGUOUS
}

/// First index of `previous` whose counterpart in `current` is missing or moved.
fn first_divergence(previous: &[Point], current: &[Point]) -> Option<usize> {
    previous.iter().enumerate().position(|(i, prev)| {
        current
            .get(i)
            .map_or(true, |cur| !cur.approx_eq(prev, POINT_TOLERANCE))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn insertion_in_the_middle_lands_after_divergence() {
        let previous = [p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0)];
        let current = [p(0.0, 0.0), p(1.0, 1.0), p(1.5, 1.5), p(2.0, 2.0)];
        // First divergence is index 2; the reported slot is one past it.
        assert_eq!(diff_points(&previous, &current), PointDiff::inserted(3));
    }

    #[test]
    fn appended_point_is_inserted_at_end() {
        let previous = [p(0.0, 0.0), p(1.0, 1.0)];
        let current = [p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0)];
        assert_eq!(diff_points(&previous, &current), PointDiff::inserted(2));
    }

    #[test]
    fn first_point_of_new_route() {
        assert_eq!(diff_points(&[], &[p(3.0, 4.0)]), PointDiff::inserted(0));
    }

    #[test]
    fn deletion_in_the_middle_lands_before_divergence() {
        let previous = [p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0)];
        let current = [p(0.0, 0.0), p(2.0, 2.0)];
        assert_eq!(diff_points(&previous, &current), PointDiff::deleted(Some(0)));
    }

    #[test]
    fn deleting_last_point() {
        let previous = [p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0)];
        let current = [p(0.0, 0.0), p(1.0, 1.0)];
        assert_eq!(diff_points(&previous, &current), PointDiff::deleted(Some(1)));
    }

    #[test]
    fn deleting_first_point_has_no_index() {
        let previous = [p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0)];
        let current = [p(1.0, 1.0), p(2.0, 2.0)];
        assert_eq!(diff_points(&previous, &current), PointDiff::deleted(None));
    }

    #[test]
    fn equal_length_is_unchanged_even_when_points_move() {
        let previous = [p(0.0, 0.0), p(1.0, 1.0)];
        let current = [p(5.0, 5.0), p(9.0, -1.0)];
        assert_eq!(diff_points(&previous, &current), PointDiff::UNCHANGED);
    }

    #[test]
    fn multi_point_changes_are_ambiguous() {
        let previous = [p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0)];
        let grown = [p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0), p(3.0, 3.0), p(4.0, 4.0)];
        assert_eq!(diff_points(&previous, &grown).kind, DiffKind::Ambiguous);
        assert_eq!(diff_points(&previous, &[p(0.0, 0.0)]).kind, DiffKind::Ambiguous);
        assert_eq!(diff_points(&[], &grown).kind, DiffKind::Ambiguous);
    }

    #[test]
    fn jitter_below_tolerance_is_not_a_divergence() {
        let previous = [p(0.0, 0.0), p(1.0, 1.0)];
        let current = [p(0.0 + 5e-7, 0.0), p(1.0, 1.0 - 5e-7), p(2.0, 2.0)];
        assert_eq!(diff_points(&previous, &current), PointDiff::inserted(2));
    }
}

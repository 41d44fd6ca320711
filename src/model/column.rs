//! Page columns.

use super::FragmentId;
use serde::{Deserialize, Serialize};

/// A detected column: a horizontal band of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Column index (0 = leftmost)
    pub index: usize,

    /// Left boundary (inclusive)
    pub min_x: f32,

    /// Right boundary (exclusive, except at the page edge)
    pub max_x: f32,

    /// Fragments whose center falls in the band
    pub fragment_ids: Vec<FragmentId>,
}

impl Column {
    /// Check if an X coordinate falls within this column.
    pub fn contains(&self, x: f32) -> bool {
        x >= self.min_x && (x < self.max_x || (self.max_x >= 1.0 && x <= self.max_x))
    }

    /// Distance from an X coordinate to the band, 0 inside it.
    pub fn distance_to(&self, x: f32) -> f32 {
        if self.contains(x) {
            0.0
        } else if x < self.min_x {
            self.min_x - x
        } else {
            x - self.max_x
        }
    }

    /// Width of the band.
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }
}

/// Find the column for an X coordinate, falling back to the nearest band
/// when the coordinate lies between bands.
///
/// Returns `None` only when `columns` is empty.
pub fn column_index_for(columns: &[Column], x: f32) -> Option<usize> {
    if let Some(column) = columns.iter().find(|c| c.contains(x)) {
        return Some(column.index);
    }

    columns
        .iter()
        .min_by(|a, b| a.distance_to(x).total_cmp(&b.distance_to(x)))
        .map(|c| c.index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(index: usize, min_x: f32, max_x: f32) -> Column {
        Column {
            index,
            min_x,
            max_x,
            fragment_ids: Vec::new(),
        }
    }

    #[test]
    fn test_column_contains() {
        let col = column(0, 0.0, 0.5);
        assert!(col.contains(0.0));
        assert!(col.contains(0.25));
        assert!(!col.contains(0.5));

        let last = column(1, 0.5, 1.0);
        assert!(last.contains(0.5));
        assert!(last.contains(1.0));
        assert!(!last.contains(1.01));
    }

    #[test]
    fn test_column_index_nearest_fallback() {
        let columns = vec![column(0, 0.0, 0.3), column(1, 0.6, 1.0)];
        assert_eq!(column_index_for(&columns, 0.1), Some(0));
        assert_eq!(column_index_for(&columns, 0.8), Some(1));
        assert_eq!(column_index_for(&columns, 0.35), Some(0));
        assert_eq!(column_index_for(&columns, 0.55), Some(1));
        assert_eq!(column_index_for(&[], 0.5), None);
    }
}

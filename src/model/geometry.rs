//! Normalized bounding box geometry.
//!
//! Coordinates live in the unit square with the origin at the bottom-left
//! corner and y increasing upward, so the "top" of a box is its `max_y`.

use serde::{Deserialize, Serialize};

/// Slack used when comparing box edges for containment.
pub const EDGE_EPSILON: f32 = 1e-6;

/// An axis-aligned box in normalized page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x: f32,
    /// Bottom edge
    pub y: f32,
    /// Width (never negative)
    pub width: f32,
    /// Height (never negative)
    pub height: f32,
}

impl BoundingBox {
    /// Create a box from its bottom-left corner and extents.
    ///
    /// Negative extents are clamped to zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use unocr::BoundingBox;
    ///
    /// let bbox = BoundingBox::new(0.1, 0.2, 0.3, 0.05);
    /// assert!((bbox.max_x() - 0.4).abs() < 1e-6);
    /// assert!((bbox.max_y() - 0.25).abs() < 1e-6);
    /// ```
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Create a box from its edges. Swapped edges are reordered.
    pub fn from_edges(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        let (min_x, max_x) = if min_x <= max_x {
            (min_x, max_x)
        } else {
            (max_x, min_x)
        };
        let (min_y, max_y) = if min_y <= max_y {
            (min_y, max_y)
        } else {
            (max_y, min_y)
        };
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Left edge.
    pub fn min_x(&self) -> f32 {
        self.x
    }

    /// Right edge.
    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn min_y(&self) -> f32 {
        self.y
    }

    /// Top edge.
    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    /// Horizontal center.
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Vertical center.
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Area of the box.
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Smallest box containing both boxes.
    ///
    /// # Examples
    ///
    /// ```
    /// use unocr::BoundingBox;
    ///
    /// let a = BoundingBox::new(0.0, 0.0, 0.1, 0.1);
    /// let b = BoundingBox::new(0.5, 0.5, 0.1, 0.1);
    /// let u = a.union(&b);
    /// assert!(u.contains(&a) && u.contains(&b));
    /// ```
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox::from_edges(
            self.min_x().min(other.min_x()),
            self.min_y().min(other.min_y()),
            self.max_x().max(other.max_x()),
            self.max_y().max(other.max_y()),
        )
    }

    /// Union of every box in the iterator, or `None` when it is empty.
    pub fn union_all<'a, I>(boxes: I) -> Option<BoundingBox>
    where
        I: IntoIterator<Item = &'a BoundingBox>,
    {
        boxes
            .into_iter()
            .fold(None, |acc: Option<BoundingBox>, b| match acc {
                Some(acc) => Some(acc.union(b)),
                None => Some(*b),
            })
    }

    /// Check whether the interiors of the two boxes overlap.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x() < other.max_x()
            && other.min_x() < self.max_x()
            && self.min_y() < other.max_y()
            && other.min_y() < self.max_y()
    }

    /// Check whether `other` lies entirely inside this box (edges included).
    ///
    /// Edges are compared with [`EDGE_EPSILON`] slack, since a union rebuilt
    /// from edges can lose the last bit of an edge.
    pub fn contains(&self, other: &BoundingBox) -> bool {
        other.min_x() >= self.min_x() - EDGE_EPSILON
            && other.max_x() <= self.max_x() + EDGE_EPSILON
            && other.min_y() >= self.min_y() - EDGE_EPSILON
            && other.max_y() <= self.max_y() + EDGE_EPSILON
    }

    /// Gap between the vertical ranges, 0 when they overlap.
    pub fn vertical_distance(&self, other: &BoundingBox) -> f32 {
        range_distance(self.min_y(), self.max_y(), other.min_y(), other.max_y())
    }

    /// Gap between the horizontal ranges, 0 when they overlap.
    pub fn horizontal_distance(&self, other: &BoundingBox) -> f32 {
        range_distance(self.min_x(), self.max_x(), other.min_x(), other.max_x())
    }

    /// Check whether the x ranges overlap by more than
    /// `(1 - tolerance) * min(width_a, width_b)`.
    pub fn is_horizontally_aligned(&self, other: &BoundingBox, tolerance: f32) -> bool {
        ranges_aligned(
            self.min_x(),
            self.max_x(),
            other.min_x(),
            other.max_x(),
            tolerance,
        )
    }

    /// Check whether the y ranges overlap by more than
    /// `(1 - tolerance) * min(height_a, height_b)`.
    pub fn is_vertically_aligned(&self, other: &BoundingBox, tolerance: f32) -> bool {
        ranges_aligned(
            self.min_y(),
            self.max_y(),
            other.min_y(),
            other.max_y(),
            tolerance,
        )
    }
}

fn range_distance(a_min: f32, a_max: f32, b_min: f32, b_max: f32) -> f32 {
    if a_max < b_min {
        b_min - a_max
    } else if b_max < a_min {
        a_min - b_max
    } else {
        0.0
    }
}

fn ranges_aligned(a_min: f32, a_max: f32, b_min: f32, b_max: f32, tolerance: f32) -> bool {
    let overlap = a_max.min(b_max) - a_min.max(b_min);
    let shortest = (a_max - a_min).min(b_max - b_min);

    // Zero-extent ranges can only touch
    if shortest <= 0.0 {
        return overlap >= 0.0;
    }

    overlap > (1.0 - tolerance) * shortest
}

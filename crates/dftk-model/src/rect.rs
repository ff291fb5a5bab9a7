//! Box geometry in CRF form coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A box on the form. Edges past the `i32` range saturate at its limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.left.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.top.saturating_add(self.height)
    }

    pub fn top_left(&self) -> (i32, i32) {
        (self.left, self.top)
    }

    pub fn bottom_right(&self) -> (i32, i32) {
        (self.right(), self.bottom())
    }

    /// True when `other` continues this box to the right on the same row.
    ///
    /// A gap or overlap of one unit is tolerated to absorb scan jitter, but
    /// `other` must extend past this box's right edge.
    pub fn is_adjacent_horizontal(&self, other: &Rect) -> bool {
        let right = self.right();
        self.top == other.top
            && self.height == other.height
            && right >= other.left.saturating_sub(1)
            && right < other.right()
    }

    /// Split into `n` boxes of equal width; the last box takes the remainder.
    pub fn split_horizontal(&self, n: usize) -> Vec<Rect> {
        if n < 1 {
            return Vec::new();
        }
        let count = i32::try_from(n).unwrap_or(i32::MAX);
        let width = self.width / count;
        let remainder = self.width - width * count;
        let mut boxes = Vec::with_capacity(n);
        let mut left = self.left;
        for _ in 1..n {
            boxes.push(Rect::new(left, self.top, width, self.height));
            left = left.saturating_add(width);
        }
        boxes.push(Rect::new(
            left,
            self.top,
            width.saturating_add(remainder),
            self.height,
        ));
        boxes
    }

    /// Smallest box covering both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(
            left,
            top,
            right.saturating_sub(left),
            bottom.saturating_sub(top),
        )
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{},{},{})",
            self.left, self.top, self.width, self.height
        )
    }
}

/// Union of all boxes, or `None` when there are none.
pub fn bounding_box(rects: &[Rect]) -> Option<Rect> {
    let (first, rest) = rects.split_first()?;
    Some(rest.iter().fold(*first, |acc, rect| acc.union(rect)))
}

/// Normalize raw field boxes from the setup file.
///
/// Runs of horizontally adjacent boxes are merged and then split back into
/// the same number of equally wide boxes, so hand-digitized coordinates with
/// uneven widths come out evenly spaced over the same total span.
pub fn normalize_boxes(raw: &[Rect]) -> Vec<Rect> {
    let mut boxes = Vec::with_capacity(raw.len());
    let mut current: Option<(Rect, usize)> = None;
    for rect in raw {
        current = match current {
            None => Some((*rect, 1)),
            Some((mut merged, count)) if merged.is_adjacent_horizontal(rect) => {
                merged.width = rect.right().saturating_sub(merged.left);
                Some((merged, count + 1))
            }
            Some((merged, count)) => {
                boxes.extend(merged.split_horizontal(count));
                Some((*rect, 1))
            }
        };
    }
    if let Some((merged, count)) = current {
        boxes.extend(merged.split_horizontal(count));
    }
    boxes
}

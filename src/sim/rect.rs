//! Axis-aligned rectangle geometry
//!
//! Screen space: origin top-left, x grows right, y grows down. Edges are
//! half-open, so a rectangle covers `[left, right) x [top, bottom)`.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in integer pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: IVec2,
    /// Width and height (both positive)
    pub size: IVec2,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            size: IVec2::new(w, h),
        }
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.size.y
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.y
    }

    /// Overlap test on both axes. Rectangles that only share an edge do not
    /// intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10, 20, 30, 40);
        assert_eq!(r.left(), 10);
        assert_eq!(r.right(), 40);
        assert_eq!(r.top(), 20);
        assert_eq!(r.bottom(), 60);
    }

    #[test]
    fn test_intersects_overlap() {
        let player = Rect::new(215, 640, 50, 20);
        let block = Rect::new(220, 645, 30, 30);
        assert!(player.intersects(&block));
        assert!(block.intersects(&player));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        // Shares a's right edge
        assert!(!a.intersects(&Rect::new(10, 0, 10, 10)));
        // Shares a's bottom edge
        assert!(!a.intersects(&Rect::new(0, 10, 10, 10)));
        // One pixel of overlap
        assert!(a.intersects(&Rect::new(9, 9, 10, 10)));
    }

    #[test]
    fn test_contained_rect_intersects() {
        let outer = Rect::new(0, 0, 100, 100);
        let inner = Rect::new(40, 40, 5, 5);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }
}

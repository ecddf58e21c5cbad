use serde::{Deserialize, Serialize};

/// Axis-aligned pixel rectangle: a detector bounding box or a sampling ROI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a region from edge coordinates (`right`/`bottom` exclusive).
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.width as i64 * self.height as i64
        }
    }

    /// Moves the origin inside the frame and trims width/height so the
    /// region does not extend past the right and bottom edges.
    ///
    /// The extent is kept relative to the original origin's size, so a box
    /// starting left of the frame keeps its full width after the shift.
    pub fn clamp_to(&self, frame_width: u32, frame_height: u32) -> Region {
        let x = self.x.max(0);
        let y = self.y.max(0);
        let width = self.width.min(frame_width as i32 - x);
        let height = self.height.min(frame_height as i32 - y);
        Region::new(x, y, width, height)
    }

    /// Intersection with the frame rectangle.
    pub fn intersect_frame(&self, frame_width: u32, frame_height: u32) -> Region {
        let left = self.x.max(0);
        let top = self.y.max(0);
        let right = self.right().min(frame_width as i32);
        let bottom = self.bottom().min(frame_height as i32);
        Region::from_edges(left, top, right, bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_from_edges() {
        let r = Region::from_edges(10, 20, 110, 60);
        assert_eq!(r, Region::new(10, 20, 100, 40));
        assert_eq!(r.right(), 110);
        assert_eq!(r.bottom(), 60);
    }

    #[rstest]
    #[case::normal(Region::new(0, 0, 10, 10), false)]
    #[case::zero_width(Region::new(0, 0, 0, 10), true)]
    #[case::zero_height(Region::new(0, 0, 10, 0), true)]
    #[case::negative(Region::new(5, 5, -3, 10), true)]
    fn test_is_empty(#[case] region: Region, #[case] expected: bool) {
        assert_eq!(region.is_empty(), expected);
    }

    #[test]
    fn test_area() {
        assert_eq!(Region::new(0, 0, 10, 20).area(), 200);
        assert_eq!(Region::new(0, 0, -10, 20).area(), 0);
    }

    #[test]
    fn test_clamp_inside_frame_is_identity() {
        let r = Region::new(10, 10, 50, 50);
        assert_eq!(r.clamp_to(640, 480), r);
    }

    #[test]
    fn test_clamp_negative_origin_keeps_size() {
        let r = Region::new(-20, -5, 100, 40);
        assert_eq!(r.clamp_to(640, 480), Region::new(0, 0, 100, 40));
    }

    #[test]
    fn test_clamp_trims_right_and_bottom() {
        let r = Region::new(600, 450, 100, 100);
        assert_eq!(r.clamp_to(640, 480), Region::new(600, 450, 40, 30));
    }

    #[test]
    fn test_clamp_outside_frame_is_empty() {
        let r = Region::new(700, 10, 50, 50);
        assert!(r.clamp_to(640, 480).is_empty());
    }

    #[test]
    fn test_intersect_frame() {
        let r = Region::new(-20, 460, 100, 40);
        assert_eq!(r.intersect_frame(640, 480), Region::new(0, 460, 80, 20));
    }
}

use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Face bounding boxes in pixel coordinates, most confident first.
///
/// Only the first box is sampled for the pulse signal; an empty list is a
/// detection miss for this frame. `&mut self` lets backends keep tracking
/// state between frames.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>>;
}

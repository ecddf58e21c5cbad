use crate::shared::constants::FOREHEAD_HEIGHT_RATIO;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Top band of a face box, clamped to the frame. `None` if nothing is left.
pub fn forehead_roi(face: &Region, frame_width: u32, frame_height: u32) -> Option<Region> {
    let height = (face.height as f64 * FOREHEAD_HEIGHT_RATIO) as i32;
    let roi = Region::new(face.x, face.y, face.width, height).clamp_to(frame_width, frame_height);
    (!roi.is_empty()).then_some(roi)
}

/// Mean skin colour over the forehead of `face`, plus the sampled region.
pub fn sample_forehead(frame: &Frame, face: &Region) -> Option<(Region, [f64; 3])> {
    let roi = forehead_roi(face, frame.width(), frame.height())?;
    frame.mean_rgb(&roi).map(|rgb| (roi, rgb))
}

//! Shoulder-line geometry for the respiration signal.
//!
//! Breathing moves the shoulders up and down; the vertical pixel position of
//! their midpoint is the raw respiration sample. Pixel coordinates truncate
//! toward zero, like the detector overlays they are drawn with.

use crate::detection::domain::pose_landmarker::PoseLandmarks;
use crate::shared::constants::{RESPIRATION_BOX_HEIGHT, RESPIRATION_BOX_PADDING};
use crate::shared::error::VitalsError;
use crate::shared::region::Region;

/// Vertical pixel position of the shoulder midpoint.
pub fn shoulder_y(pose: &PoseLandmarks, frame_height: u32) -> Result<i32, VitalsError> {
    let (left, right) = pose.shoulders()?;
    Ok((((left.y + right.y) / 2.0) * frame_height as f64) as i32)
}

/// Thin band across the shoulders, centred on [`shoulder_y`], for display.
///
/// Spans the shoulders horizontally with 10% of their distance as padding on
/// each side, clamped to the frame.
pub fn shoulder_overlay(
    pose: &PoseLandmarks,
    frame_width: u32,
    frame_height: u32,
) -> Result<Region, VitalsError> {
    let (left, right) = pose.shoulders()?;
    let y = shoulder_y(pose, frame_height)?;
    let w = frame_width as f64;
    let x_min = (left.x.min(right.x) * w) as i32;
    let x_max = (left.x.max(right.x) * w) as i32;
    let padding = ((x_max - x_min) as f64 * RESPIRATION_BOX_PADDING) as i32;

    let top = y - RESPIRATION_BOX_HEIGHT / 2;
    let bottom = top + RESPIRATION_BOX_HEIGHT;
    Ok(Region::from_edges(
        (x_min - padding).max(0),
        top.max(0),
        (x_max + padding).min(frame_width as i32),
        bottom.min(frame_height as i32),
    ))
}

/// Size and offset of the initial breathing ROI around the shoulder centre.
///
/// `x_size`/`y_size` are half-extents; the default box sits 30 px above the
/// shoulder line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoiShape {
    pub x_size: i32,
    pub y_size: i32,
    pub shift_x: i32,
    pub shift_y: i32,
}

impl Default for RoiShape {
    fn default() -> Self {
        Self {
            x_size: 100,
            y_size: 30,
            shift_x: 0,
            shift_y: -30,
        }
    }
}

/// Box around the shifted shoulder centre, clamped to the frame.
pub fn initial_roi(
    pose: &PoseLandmarks,
    frame_width: u32,
    frame_height: u32,
    shape: &RoiShape,
) -> Result<Region, VitalsError> {
    let (left, right) = pose.shoulders()?;
    let center_x = (((left.x + right.x) / 2.0) * frame_width as f64) as i32 + shape.shift_x;
    let center_y = (((left.y + right.y) / 2.0) * frame_height as f64) as i32 + shape.shift_y;

    let left_x = (center_x - shape.x_size).max(0);
    let right_x = (center_x + shape.x_size).min(frame_width as i32);
    let top_y = (center_y - shape.y_size).max(0);
    let bottom_y = (center_y + shape.y_size).min(frame_height as i32);

    let roi = Region::from_edges(left_x, top_y, right_x, bottom_y);
    if roi.is_empty() {
        return Err(VitalsError::InvalidRoi {
            left: left_x,
            top: top_y,
            right: right_x,
            bottom: bottom_y,
        });
    }
    Ok(roi)
}

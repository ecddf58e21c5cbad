//! Body pose landmarks in normalized image coordinates.

use crate::shared::constants::{LEFT_SHOULDER, RIGHT_SHOULDER};
use crate::shared::error::VitalsError;
use crate::shared::frame::Frame;

/// One landmark; `x` and `y` are fractions of frame width and height.
///
/// Detectors may report points slightly outside `[0, 1]` for body parts
/// near the frame edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Landmarks of a single detected person, indexed by the 33-point
/// BlazePose topology.
#[derive(Clone, Debug, PartialEq)]
pub struct PoseLandmarks {
    points: Vec<Landmark>,
}

impl PoseLandmarks {
    pub fn new(points: Vec<Landmark>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Landmark] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<Landmark> {
        self.points.get(index).copied()
    }

    /// Left and right shoulder, in that order.
    pub fn shoulders(&self) -> Result<(Landmark, Landmark), VitalsError> {
        match (self.get(LEFT_SHOULDER), self.get(RIGHT_SHOULDER)) {
            (Some(left), Some(right)) => Ok((left, right)),
            _ => Err(VitalsError::MissingLandmarks {
                found: self.points.len(),
                required: RIGHT_SHOULDER + 1,
            }),
        }
    }
}

/// Domain interface for pose estimation.
///
/// Returns the first detected person, or `None` when nobody is visible.
pub trait PoseLandmarker: Send {
    fn detect(
        &mut self,
        frame: &Frame,
    ) -> Result<Option<PoseLandmarks>, Box<dyn std::error::Error>>;
}

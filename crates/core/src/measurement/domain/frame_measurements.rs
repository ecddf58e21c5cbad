use serde::{Deserialize, Serialize};

/// Raw samples extracted from one frame. A `None` field is a detection miss.
///
/// This is also the line format of recorded traces:
/// `{"rgb":[r,g,b],"shoulder_y":y}` with either field null or absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameMeasurements {
    #[serde(default)]
    pub rgb: Option<[f64; 3]>,
    #[serde(default)]
    pub shoulder_y: Option<f64>,
}

impl FrameMeasurements {
    pub fn new(rgb: Option<[f64; 3]>, shoulder_y: Option<f64>) -> Self {
        Self { rgb, shoulder_y }
    }

    pub fn is_empty(&self) -> bool {
        self.rgb.is_none() && self.shoulder_y.is_none()
    }
}

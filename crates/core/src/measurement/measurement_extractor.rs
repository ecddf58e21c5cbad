use crate::detection::domain::face_detector::FaceDetector;
use crate::detection::domain::pose_landmarker::PoseLandmarker;
use crate::measurement::domain::forehead_roi::sample_forehead;
use crate::measurement::domain::frame_measurements::FrameMeasurements;
use crate::measurement::domain::shoulder_roi::{
    initial_roi, shoulder_overlay, shoulder_y, RoiShape,
};
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Regions sampled on a frame, for drawing on top of the preview.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RoiOverlays {
    pub forehead: Option<Region>,
    pub shoulders: Option<Region>,
    pub breathing: Option<Region>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Extraction {
    pub measurements: FrameMeasurements,
    pub overlays: RoiOverlays,
}

/// Turns a frame into raw samples via the face and pose detectors.
///
/// Detector errors propagate; a detector that finds nothing (or a pose
/// without shoulders) only leaves the matching field empty.
pub struct MeasurementExtractor {
    face_detector: Box<dyn FaceDetector>,
    pose_landmarker: Box<dyn PoseLandmarker>,
    roi_shape: RoiShape,
}

impl MeasurementExtractor {
    pub fn new(
        face_detector: Box<dyn FaceDetector>,
        pose_landmarker: Box<dyn PoseLandmarker>,
    ) -> Self {
        Self {
            face_detector,
            pose_landmarker,
            roi_shape: RoiShape::default(),
        }
    }

    pub fn with_roi_shape(mut self, shape: RoiShape) -> Self {
        self.roi_shape = shape;
        self
    }

    pub fn extract(&mut self, frame: &Frame) -> Result<Extraction, Box<dyn std::error::Error>> {
        let mut extraction = Extraction::default();

        let faces = self.face_detector.detect(frame)?;
        if let Some((roi, rgb)) = faces.first().and_then(|face| sample_forehead(frame, face)) {
            extraction.measurements.rgb = Some(rgb);
            extraction.overlays.forehead = Some(roi);
        }

        if let Some(pose) = self.pose_landmarker.detect(frame)? {
            let (width, height) = (frame.width(), frame.height());
            match shoulder_y(&pose, height) {
                Ok(y) => {
                    extraction.measurements.shoulder_y = Some(f64::from(y));
                    extraction.overlays.shoulders = shoulder_overlay(&pose, width, height).ok();
                    extraction.overlays.breathing =
                        match initial_roi(&pose, width, height, &self.roi_shape) {
                            Ok(roi) => Some(roi),
                            Err(e) => {
                                log::debug!("Frame {}: {e}", frame.index());
                                None
                            }
                        };
                }
                Err(e) => log::debug!("Frame {}: {e}", frame.index()),
            }
        }

        Ok(extraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::pose_landmarker::{Landmark, PoseLandmarks};
    use crate::shared::constants::{LEFT_SHOULDER, RIGHT_SHOULDER};

    // --- Stubs ---

    struct StubFaceDetector {
        faces: Vec<Region>,
    }

    impl FaceDetector for StubFaceDetector {
        fn detect(&mut self, _frame: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
            Ok(self.faces.clone())
        }
    }

    struct StubPoseLandmarker {
        pose: Option<PoseLandmarks>,
    }

    impl PoseLandmarker for StubPoseLandmarker {
        fn detect(
            &mut self,
            _frame: &Frame,
        ) -> Result<Option<PoseLandmarks>, Box<dyn std::error::Error>> {
            Ok(self.pose.clone())
        }
    }

    struct FailingFaceDetector;

    impl FaceDetector for FailingFaceDetector {
        fn detect(&mut self, _frame: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
            Err("model not loaded".into())
        }
    }

    // --- Helpers ---

    fn gray_frame() -> Frame {
        Frame::new(vec![100u8; 640 * 480 * 3], 640, 480, 7)
    }

    fn standing_pose() -> PoseLandmarks {
        let mut points = vec![Landmark::new(0.5, 0.2); 33];
        points[LEFT_SHOULDER] = Landmark::new(0.6, 0.5);
        points[RIGHT_SHOULDER] = Landmark::new(0.4, 0.5);
        PoseLandmarks::new(points)
    }

    fn extractor(faces: Vec<Region>, pose: Option<PoseLandmarks>) -> MeasurementExtractor {
        MeasurementExtractor::new(
            Box::new(StubFaceDetector { faces }),
            Box::new(StubPoseLandmarker { pose }),
        )
    }

    // --- Tests ---

    #[test]
    fn test_extracts_both_signals() {
        let mut ex = extractor(vec![Region::new(200, 100, 100, 120)], Some(standing_pose()));
        let result = ex.extract(&gray_frame()).unwrap();

        assert_eq!(result.measurements.rgb, Some([100.0, 100.0, 100.0]));
        assert_eq!(result.measurements.shoulder_y, Some(240.0));
        assert_eq!(result.overlays.forehead, Some(Region::new(200, 100, 100, 48)));
        assert!(result.overlays.shoulders.is_some());
        assert!(result.overlays.breathing.is_some());
    }

    #[test]
    fn test_uses_first_face_only() {
        let faces = vec![Region::new(10, 10, 50, 50), Region::new(300, 300, 50, 50)];
        let mut ex = extractor(faces, None);
        let result = ex.extract(&gray_frame()).unwrap();
        assert_eq!(result.overlays.forehead, Some(Region::new(10, 10, 50, 20)));
    }

    #[test]
    fn test_misses_leave_fields_empty() {
        let mut ex = extractor(vec![], None);
        let result = ex.extract(&gray_frame()).unwrap();
        assert!(result.measurements.is_empty());
        assert_eq!(result.overlays, RoiOverlays::default());
    }

    #[test]
    fn test_pose_without_shoulders_is_a_miss() {
        let short = PoseLandmarks::new(vec![Landmark::new(0.5, 0.5); 10]);
        let mut ex = extractor(vec![], Some(short));
        let result = ex.extract(&gray_frame()).unwrap();
        assert!(result.measurements.shoulder_y.is_none());
        assert!(result.overlays.shoulders.is_none());
    }

    #[test]
    fn test_bad_roi_shape_keeps_sample() {
        let shape = RoiShape {
            shift_y: -1000,
            ..RoiShape::default()
        };
        let mut ex = extractor(vec![], Some(standing_pose())).with_roi_shape(shape);
        let result = ex.extract(&gray_frame()).unwrap();
        assert_eq!(result.measurements.shoulder_y, Some(240.0));
        assert!(result.overlays.breathing.is_none());
    }

    #[test]
    fn test_detector_error_propagates() {
        let mut ex = MeasurementExtractor::new(
            Box::new(FailingFaceDetector),
            Box::new(StubPoseLandmarker { pose: None }),
        );
        let err = ex.extract(&gray_frame()).unwrap_err();
        assert_eq!(err.to_string(), "model not loaded");
    }
}

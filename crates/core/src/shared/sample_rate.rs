use crate::shared::constants::DEFAULT_FPS;
use crate::shared::error::VitalsError;

/// Frames per second of the measurement stream. Always positive and finite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleRate(f64);

impl SampleRate {
    pub fn new(fps: f64) -> Result<Self, VitalsError> {
        if fps.is_finite() && fps > 0.0 {
            Ok(Self(fps))
        } else {
            Err(VitalsError::InvalidSampleRate(fps))
        }
    }

    /// Accepts whatever the camera reported, substituting 30 fps for
    /// zero, negative or non-finite values.
    pub fn from_reported(fps: f64) -> Self {
        Self::new(fps).unwrap_or_else(|_| {
            log::warn!("Reported FPS is {fps}, falling back to {DEFAULT_FPS}");
            Self(DEFAULT_FPS)
        })
    }

    pub fn fps(&self) -> f64 {
        self.0
    }

    /// Samples needed to cover `seconds`, rounded up.
    pub fn window_len(&self, seconds: f64) -> usize {
        (self.0 * seconds).ceil() as usize
    }

    /// Moving-average width: half a second of samples.
    pub fn smoothing_window(&self) -> usize {
        (self.0 / 2.0).round() as usize
    }

    pub fn peak_distance(&self, divisor: f64) -> f64 {
        self.0 / divisor
    }
}

impl Default for SampleRate {
    fn default() -> Self {
        Self(DEFAULT_FPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_new_accepts_positive() {
        let rate = SampleRate::new(25.0).unwrap();
        assert_relative_eq!(rate.fps(), 25.0);
    }

    #[rstest]
    #[case::zero(0.0)]
    #[case::negative(-30.0)]
    #[case::nan(f64::NAN)]
    #[case::infinite(f64::INFINITY)]
    fn test_new_rejects_invalid(#[case] fps: f64) {
        assert!(matches!(
            SampleRate::new(fps),
            Err(VitalsError::InvalidSampleRate(_))
        ));
    }

    #[rstest]
    #[case::zero(0.0)]
    #[case::negative(-5.0)]
    #[case::nan(f64::NAN)]
    fn test_from_reported_falls_back(#[case] fps: f64) {
        assert_relative_eq!(SampleRate::from_reported(fps).fps(), DEFAULT_FPS);
    }

    #[test]
    fn test_from_reported_keeps_valid() {
        assert_relative_eq!(SampleRate::from_reported(60.0).fps(), 60.0);
    }

    #[rstest]
    #[case(30.0, 300)]
    #[case(29.97, 300)]
    #[case(24.0, 240)]
    #[case(15.5, 155)]
    fn test_window_len_rounds_up(#[case] fps: f64, #[case] expected: usize) {
        let rate = SampleRate::new(fps).unwrap();
        assert_eq!(rate.window_len(10.0), expected);
    }

    #[rstest]
    #[case(30.0, 15)]
    #[case(25.0, 13)]
    #[case(29.97, 15)]
    #[case(1.0, 1)]
    fn test_smoothing_window(#[case] fps: f64, #[case] expected: usize) {
        let rate = SampleRate::new(fps).unwrap();
        assert_eq!(rate.smoothing_window(), expected);
    }

    #[test]
    fn test_peak_distance() {
        let rate = SampleRate::new(30.0).unwrap();
        assert_relative_eq!(rate.peak_distance(3.0), 10.0);
        assert_relative_eq!(rate.peak_distance(0.5), 60.0);
    }
}

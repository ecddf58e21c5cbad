/// Frame rate used when the camera reports zero or garbage.
pub const DEFAULT_FPS: f64 = 30.0;

/// Length of one non-overlapping processing window.
pub const WINDOW_SECONDS: f64 = 10.0;
/// Longest window a config may ask for.
pub const MAX_WINDOW_SECONDS: f64 = 600.0;

/// Added to norms and standard deviations before dividing.
pub const EPSILON: f64 = 1e-6;

pub const DEFAULT_FILTER_ORDER: usize = 5;

/// Pulse band in Hz (45-180 BPM).
pub const HEART_BAND_HZ: (f64, f64) = (0.75, 3.0);
/// Breathing band in Hz (6-30 breaths/min).
pub const RESPIRATION_BAND_HZ: (f64, f64) = (0.1, 0.5);

/// Minimum peak spacing is `fps / divisor` samples: 1/3 s for pulse.
pub const HEART_PEAK_DIVISOR: f64 = 3.0;
/// 2 s between breaths, i.e. at most 30 breaths/min.
pub const RESPIRATION_PEAK_DIVISOR: f64 = 0.5;

/// Normalized cutoffs outside (0, 1) are clamped into this range.
pub const MIN_NORMALIZED_CUTOFF: f64 = 0.01;
pub const MAX_NORMALIZED_CUTOFF: f64 = 0.99;

/// Forehead ROI takes the top 40% of the face box.
pub const FOREHEAD_HEIGHT_RATIO: f64 = 0.4;

/// Pose landmark indices (BlazePose topology).
pub const LEFT_SHOULDER: usize = 11;
pub const RIGHT_SHOULDER: usize = 12;

pub const RESPIRATION_BOX_HEIGHT: i32 = 20;
pub const RESPIRATION_BOX_PADDING: f64 = 0.1;

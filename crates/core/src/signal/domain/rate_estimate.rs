use std::fmt;

use serde::{Deserialize, Serialize};

use crate::signal::domain::peak_detector::find_peaks;

/// Events per minute, or `Undefined` when a window has fewer than two peaks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RateEstimate {
    Undefined,
    Bpm(f64),
}

impl RateEstimate {
    pub fn bpm(&self) -> Option<f64> {
        match self {
            RateEstimate::Undefined => None,
            RateEstimate::Bpm(v) => Some(*v),
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, RateEstimate::Bpm(_))
    }
}

impl fmt::Display for RateEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateEstimate::Undefined => write!(f, "--"),
            RateEstimate::Bpm(v) => write!(f, "{v:.2}"),
        }
    }
}

/// Rate from the mean spacing of peak indices.
pub fn rate_from_peaks(peaks: &[usize], fps: f64) -> RateEstimate {
    if peaks.len() < 2 || fps.is_nan() || fps <= 0.0 {
        return RateEstimate::Undefined;
    }
    let span = (peaks[peaks.len() - 1] - peaks[0]) as f64;
    let mean_interval_s = span / (peaks.len() - 1) as f64 / fps;
    if mean_interval_s <= 0.0 {
        return RateEstimate::Undefined;
    }
    RateEstimate::Bpm(60.0 / mean_interval_s)
}

/// Picks peaks at least `min_distance` samples apart and converts their
/// spacing to a per-minute rate. Returns the peaks alongside for overlays.
pub fn estimate_rate(waveform: &[f64], fps: f64, min_distance: f64) -> (RateEstimate, Vec<usize>) {
    let peaks = find_peaks(waveform, min_distance);
    let rate = rate_from_peaks(&peaks, fps);
    log::debug!("{} peaks, rate {rate}", peaks.len());
    (rate, peaks)
}

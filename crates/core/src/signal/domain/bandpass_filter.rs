use crate::shared::constants::{DEFAULT_FILTER_ORDER, MAX_NORMALIZED_CUTOFF, MIN_NORMALIZED_CUTOFF};
use crate::signal::domain::butterworth::{FilterError, SosFilter};

/// Bandpass configuration: cutoffs in Hz, sample rate in Hz, filter order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterSpec {
    pub low_hz: f64,
    pub high_hz: f64,
    pub sample_rate: f64,
    pub order: usize,
}

impl FilterSpec {
    pub fn new(low_hz: f64, high_hz: f64, sample_rate: f64) -> Self {
        Self {
            low_hz,
            high_hz,
            sample_rate,
            order: DEFAULT_FILTER_ORDER,
        }
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Cutoffs divided by Nyquist (`sample_rate / 2`).
    pub fn normalized(&self) -> (f64, f64) {
        let nyquist = 0.5 * self.sample_rate;
        (self.low_hz / nyquist, self.high_hz / nyquist)
    }

    /// Normalized band the filter is designed for, or `None` if the
    /// configuration cannot describe a bandpass.
    ///
    /// Cutoffs outside (0, 1) are clamped into [0.01, 0.99]; a band that
    /// collapses before or after clamping is rejected.
    pub fn design_band(&self) -> Option<(f64, f64)> {
        let (low, high) = self.normalized();
        if low >= high || low.is_nan() || high.is_nan() {
            log::warn!(
                "Invalid bandpass parameters (low={} Hz, high={} Hz), returning original signal",
                self.low_hz,
                self.high_hz
            );
            return None;
        }
        let in_range = |v: f64| v > 0.0 && v < 1.0;
        if in_range(low) && in_range(high) {
            return Some((low, high));
        }

        log::warn!(
            "Normalized cutoffs out of range (0, 1): low={low}, high={high}; clamping to \
             ({MIN_NORMALIZED_CUTOFF}, {MAX_NORMALIZED_CUTOFF})"
        );
        let low = low.clamp(MIN_NORMALIZED_CUTOFF, MAX_NORMALIZED_CUTOFF);
        let high = high.clamp(MIN_NORMALIZED_CUTOFF, MAX_NORMALIZED_CUTOFF);
        if low >= high {
            log::warn!("Clamping collapsed the band, returning original signal");
            return None;
        }
        Some((low, high))
    }
}

/// Zero-phase Butterworth bandpass.
///
/// Fails open: an invalid band or any design/application error returns the
/// input unchanged. On success the output has the input's length.
pub fn bandpass_filter(signal: &[f64], spec: &FilterSpec) -> Vec<f64> {
    let Some((low, high)) = spec.design_band() else {
        return signal.to_vec();
    };
    match try_filter(signal, spec.order, low, high) {
        Ok(filtered) => filtered,
        Err(e) => {
            log::warn!("Error applying bandpass filter: {e}. Returning original signal");
            signal.to_vec()
        }
    }
}

fn try_filter(signal: &[f64], order: usize, low: f64, high: f64) -> Result<Vec<f64>, FilterError> {
    SosFilter::butterworth_bandpass(order, low, high)?.filtfilt(signal)
}

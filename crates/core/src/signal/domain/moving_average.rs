/// Simple moving average with valid-convolution semantics (no padding).
///
/// Returns `len - window + 1` samples. A zero window, or one longer than
/// the signal, returns the input unchanged.
pub fn moving_average(signal: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || window > signal.len() {
        return signal.to_vec();
    }
    signal
        .windows(window)
        .map(|w| w.iter().sum::<f64>() / window as f64)
        .collect()
}

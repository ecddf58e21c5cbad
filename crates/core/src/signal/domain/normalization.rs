use crate::shared::constants::EPSILON;

/// Population mean, `None` for an empty signal.
pub fn mean(signal: &[f64]) -> Option<f64> {
    if signal.is_empty() {
        None
    } else {
        Some(signal.iter().sum::<f64>() / signal.len() as f64)
    }
}

/// Population standard deviation (ddof = 0), `None` for an empty signal.
pub fn std_dev(signal: &[f64]) -> Option<f64> {
    let m = mean(signal)?;
    let variance = signal.iter().map(|v| (v - m).powi(2)).sum::<f64>() / signal.len() as f64;
    Some(variance.sqrt())
}

/// Zero-mean, unit-variance rescaling: `(x - mean) / (std + 1e-6)`.
///
/// An empty signal stays empty; a flat one maps to all zeros.
pub fn z_normalize(signal: &[f64]) -> Vec<f64> {
    let (Some(m), Some(s)) = (mean(signal), std_dev(signal)) else {
        return Vec::new();
    };
    signal.iter().map(|v| (v - m) / (s + EPSILON)).collect()
}

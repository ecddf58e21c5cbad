//! Local-maximum peak picking with a minimum spacing constraint.
//!
//! Semantics are pinned so rate estimates are reproducible:
//! - a peak is a sample strictly higher than its left neighbour and followed
//!   (after an optional flat run) by a strictly lower sample;
//! - flat-topped peaks are reported at the midpoint of the plateau, rounded
//!   down;
//! - the first and last samples are never peaks;
//! - with a minimum distance `d`, peaks are visited tallest first and every
//!   remaining peak closer than `ceil(d)` samples is discarded; equal heights
//!   are visited in index order, so the earlier one survives.

/// Indices of all local maxima, in ascending order.
pub fn local_maxima(signal: &[f64]) -> Vec<usize> {
    let n = signal.len();
    let mut peaks = Vec::new();
    if n < 3 {
        return peaks;
    }

    let mut i = 1;
    while i < n - 1 {
        if signal[i - 1] < signal[i] {
            let mut ahead = i + 1;
            while ahead < n - 1 && signal[ahead] == signal[i] {
                ahead += 1;
            }
            if signal[ahead] < signal[i] {
                peaks.push((i + ahead - 1) / 2);
                i = ahead;
            }
        }
        i += 1;
    }
    peaks
}

/// Peaks at least `min_distance` samples apart (see module docs).
///
/// A distance below 1 disables the spacing filter.
pub fn find_peaks(signal: &[f64], min_distance: f64) -> Vec<usize> {
    let peaks = local_maxima(signal);
    let distance = min_distance.ceil();
    if distance.is_nan() || distance <= 1.0 || peaks.len() < 2 {
        return peaks;
    }
    let distance = distance as usize;

    let mut by_height: Vec<usize> = (0..peaks.len()).collect();
    by_height.sort_by(|&a, &b| signal[peaks[b]].total_cmp(&signal[peaks[a]]).then(a.cmp(&b)));

    let mut keep = vec![true; peaks.len()];
    for &j in &by_height {
        if !keep[j] {
            continue;
        }
        for k in (0..j).rev() {
            if peaks[j] - peaks[k] >= distance {
                break;
            }
            keep[k] = false;
        }
        for k in j + 1..peaks.len() {
            if peaks[k] - peaks[j] >= distance {
                break;
            }
            keep[k] = false;
        }
    }

    peaks
        .into_iter()
        .zip(keep)
        .filter_map(|(p, kept)| kept.then_some(p))
        .collect()
}

//! Digital Butterworth bandpass design and zero-phase application.
//!
//! Design follows the classic analog route: prototype poles on the unit
//! semicircle, lowpass-to-bandpass transform, then bilinear transform with
//! frequency pre-warping. The result is kept as second-order sections rather
//! than one high-degree polynomial, which stays stable for narrow low bands
//! such as 0.1-0.5 Hz at 30 fps.

use std::f64::consts::PI;

use rustfft::num_complex::Complex;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    #[error("filter order must be at least 1")]
    ZeroOrder,
    #[error("normalized band [{low}, {high}] must satisfy 0 < low < high < 1")]
    InvalidBand { low: f64, high: f64 },
    #[error("designed filter is unstable (pole radius {0})")]
    Unstable(f64),
    #[error("signal of {len} samples is too short, need more than {padlen}")]
    SignalTooShort { len: usize, padlen: usize },
    #[error("filter output is not finite")]
    NonFinite,
}

/// Imaginary parts below this are treated as real poles when pairing.
const REAL_POLE_TOLERANCE: f64 = 1e-12;

/// One biquad: `b = [b0, b1, b2]`, `a = [1, a1, a2]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Biquad {
    pub b: [f64; 3],
    pub a: [f64; 3],
}

impl Biquad {
    /// DC gain `H(1)`.
    fn dc_gain(&self) -> f64 {
        self.b.iter().sum::<f64>() / self.a.iter().sum::<f64>()
    }

    /// Transposed direct form II state for a unit step in steady state.
    fn step_state(&self) -> [f64; 2] {
        let gain = self.dc_gain();
        let z2 = self.b[2] - self.a[2] * gain;
        let z1 = self.b[1] - self.a[1] * gain + z2;
        [z1, z2]
    }

    fn run(&self, signal: &mut [f64], mut state: [f64; 2]) {
        for x in signal.iter_mut() {
            let input = *x;
            let out = self.b[0] * input + state[0];
            state[0] = self.b[1] * input - self.a[1] * out + state[1];
            state[1] = self.b[2] * input - self.a[2] * out;
            *x = out;
        }
    }
}

/// Cascade of biquads with the overall gain folded into the first section.
#[derive(Clone, Debug, PartialEq)]
pub struct SosFilter {
    sections: Vec<Biquad>,
    order: usize,
}

impl SosFilter {
    /// Designs an `order`-th order Butterworth bandpass.
    ///
    /// `low` and `high` are normalized to Nyquist. The digital filter has
    /// `2 * order` poles, grouped into `order` sections.
    pub fn butterworth_bandpass(order: usize, low: f64, high: f64) -> Result<Self, FilterError> {
        if order == 0 {
            return Err(FilterError::ZeroOrder);
        }
        if !(low > 0.0 && low < high && high < 1.0) {
            return Err(FilterError::InvalidBand { low, high });
        }

        // Bilinear transform constant for a normalized sample rate of 2.
        let fs2 = 4.0;
        let warped_low = fs2 * (PI * low / 2.0).tan();
        let warped_high = fs2 * (PI * high / 2.0).tan();
        let bandwidth = warped_high - warped_low;
        let center_sq = warped_low * warped_high;

        let mut analog_poles = Vec::with_capacity(2 * order);
        for m in (0..order).map(|k| 2 * k as i64 - order as i64 + 1) {
            let angle = PI * m as f64 / (2 * order) as f64;
            let prototype = -Complex::from_polar(1.0, angle);
            let lowpass = prototype * (bandwidth / 2.0);
            let offset = (lowpass * lowpass - center_sq).sqrt();
            analog_poles.push(lowpass + offset);
            analog_poles.push(lowpass - offset);
        }

        // `order` analog zeros at s = 0 contribute fs2^order to the gain.
        let denominator: Complex<f64> = analog_poles.iter().map(|p| fs2 - *p).product();
        let gain = bandwidth.powi(order as i32) * (fs2.powi(order as i32) / denominator).re;

        let digital_poles: Vec<Complex<f64>> = analog_poles
            .iter()
            .map(|p| (fs2 + *p) / (fs2 - *p))
            .collect();

        let max_radius = digital_poles.iter().map(|p| p.norm()).fold(0.0, f64::max);
        if !max_radius.is_finite() || max_radius >= 1.0 {
            return Err(FilterError::Unstable(max_radius));
        }

        let mut sections = pair_poles(&digital_poles);
        if let Some(first) = sections.first_mut() {
            for coeff in first.b.iter_mut() {
                *coeff *= gain;
            }
        }
        Ok(Self { sections, order })
    }

    pub fn sections(&self) -> &[Biquad] {
        &self.sections
    }

    /// Edge samples mirrored at each end before filtering.
    pub fn padlen(&self) -> usize {
        3 * (2 * self.order + 1)
    }

    /// Single forward pass from rest.
    #[cfg(test)]
    fn filter(&self, signal: &[f64]) -> Vec<f64> {
        let mut out = signal.to_vec();
        for section in &self.sections {
            section.run(&mut out, [0.0, 0.0]);
        }
        out
    }

    /// Forward-backward filtering with odd extension and steady-state
    /// initial conditions. Output length equals input length.
    pub fn filtfilt(&self, signal: &[f64]) -> Result<Vec<f64>, FilterError> {
        let n = signal.len();
        let padlen = self.padlen();
        if n <= padlen {
            return Err(FilterError::SignalTooShort { len: n, padlen });
        }

        let first = signal[0];
        let last = signal[n - 1];
        let mut extended = Vec::with_capacity(n + 2 * padlen);
        extended.extend((1..=padlen).rev().map(|i| 2.0 * first - signal[i]));
        extended.extend_from_slice(signal);
        extended.extend((1..=padlen).map(|i| 2.0 * last - signal[n - 1 - i]));

        self.run_from_steady_state(&mut extended);
        extended.reverse();
        self.run_from_steady_state(&mut extended);
        extended.reverse();

        let out = extended[padlen..padlen + n].to_vec();
        if out.iter().all(|v| v.is_finite()) {
            Ok(out)
        } else {
            Err(FilterError::NonFinite)
        }
    }

    /// Each section starts as if the first sample had been its input forever,
    /// scaled by the DC gain of the sections before it.
    fn run_from_steady_state(&self, signal: &mut [f64]) {
        let Some(&x0) = signal.first() else {
            return;
        };
        let mut scale = x0;
        for section in &self.sections {
            let [z1, z2] = section.step_state();
            section.run(signal, [z1 * scale, z2 * scale]);
            scale *= section.dc_gain();
        }
    }
}

/// Groups conjugate pole pairs (and leftover real poles two at a time) into
/// bandpass biquads with zeros at z = 1 and z = -1.
///
/// Sections are ordered by pole radius so the sharpest resonances run last.
fn pair_poles(poles: &[Complex<f64>]) -> Vec<Biquad> {
    let mut ranked: Vec<(f64, [f64; 3])> = poles
        .iter()
        .filter(|p| p.im > REAL_POLE_TOLERANCE)
        .map(|p| (p.norm(), [1.0, -2.0 * p.re, p.norm_sqr()]))
        .collect();

    let mut reals: Vec<f64> = poles
        .iter()
        .filter(|p| p.im.abs() <= REAL_POLE_TOLERANCE)
        .map(|p| p.re)
        .collect();
    reals.sort_by(f64::total_cmp);
    for pair in reals.chunks(2) {
        let (p, q) = (pair[0], pair.get(1).copied().unwrap_or(0.0));
        ranked.push((p.abs().max(q.abs()), [1.0, -(p + q), p * q]));
    }

    ranked.sort_by(|x, y| x.0.total_cmp(&y.0));
    ranked
        .into_iter()
        .map(|(_, a)| Biquad {
            b: [1.0, 0.0, -1.0],
            a,
        })
        .collect()
}

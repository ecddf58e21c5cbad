//! Plane-Orthogonal-to-Skin pulse extraction.
//!
//! Each RGB sample is divided by its L2 norm, which removes the common
//! intensity factor (illumination). The pulse lives in the residual
//! chrominance, recovered by projecting onto two axes scaled by
//! `std(r) / std(g)` and `std(r) / std(b)` over the window.

use ndarray::{Array1, Array2, ArrayView2, Axis};

use crate::shared::constants::EPSILON;

/// Projects a 3xN matrix (rows R, G, B; columns frames) to a pulse signal.
///
/// Output length equals N. Stateless: each call sees only its window.
/// A channel with zero variance makes alpha or beta large but finite.
/// Input without exactly three rows projects to an empty signal.
pub fn pos_project(rgb: ArrayView2<'_, f64>) -> Array1<f64> {
    if rgb.nrows() != 3 || rgb.ncols() == 0 {
        return Array1::zeros(0);
    }

    let norms = rgb.map_axis(Axis(0), |column| column.dot(&column).sqrt() + EPSILON);
    let normalized = &rgb / &norms.insert_axis(Axis(0));

    let r = normalized.row(0);
    let g = normalized.row(1);
    let b = normalized.row(2);

    let std_r = r.std(0.0);
    let alpha = std_r / (g.std(0.0) + EPSILON);
    let beta = std_r / (b.std(0.0) + EPSILON);

    let s = &r * alpha + &g;
    let p = &r * beta + &b;
    s - p
}

/// Convenience wrapper over per-frame `[r, g, b]` triplets.
pub fn pos_project_samples(samples: &[[f64; 3]]) -> Vec<f64> {
    let rgb = Array2::from_shape_fn((3, samples.len()), |(channel, t)| samples[t][channel]);
    pos_project(rgb.view()).to_vec()
}

use ndarray::{Array1, ArrayView1};

pub struct StatsHelper;

impl StatsHelper {
    /// Smallest value of the series; `None` when empty.
    pub fn min(samples: ArrayView1<f64>) -> Option<f64> {
        samples.iter().copied().reduce(f64::min)
    }

    /// Shift the series so its minimum becomes exactly 0.0.
    ///
    /// Only an offset is applied, so pairwise differences (and with them every
    /// width and area relationship) are preserved.
    pub fn normalize(samples: ArrayView1<f64>) -> Array1<f64> {
        match Self::min(samples) {
            Some(min) => samples.mapv(|value| value - min),
            None => Array1::zeros(0),
        }
    }
}

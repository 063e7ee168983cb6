//! Conversion of the cube samples to `int16`.
//!
//! Policy: truncate toward zero, saturate at the `i16` range, NaN becomes 0.
//! This is exactly Rust's `f64 as i16`.

use ndarray::parallel::prelude::*;
use ndarray::{Array3, Zip};

pub fn saturating_i16(value: f64) -> i16 {
    value as i16
}

/// Cast every sample on the global rayon pool.
pub fn cast_to_i16(data: &Array3<f64>) -> Array3<i16> {
    Zip::from(data).par_map_collect(|&v| saturating_i16(v))
}

/// Samples that do not survive the cast unchanged.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LossReport {
    pub saturated: usize,
    pub fractional: usize,
    pub nan: usize,
}

impl LossReport {
    pub fn is_lossless(&self) -> bool {
        self.saturated == 0 && self.fractional == 0 && self.nan == 0
    }
}

pub fn count_lossy(data: &Array3<f64>) -> LossReport {
    data.par_iter()
        .map(|&v| {
            if v.is_nan() {
                LossReport {
                    nan: 1,
                    ..Default::default()
                }
            } else if v < i16::MIN as f64 || v > i16::MAX as f64 {
                LossReport {
                    saturated: 1,
                    ..Default::default()
                }
            } else if v.fract() != 0.0 {
                LossReport {
                    fractional: 1,
                    ..Default::default()
                }
            } else {
                LossReport::default()
            }
        })
        .reduce(LossReport::default, |a, b| LossReport {
            saturated: a.saturated + b.saturated,
            fractional: a.fractional + b.fractional,
            nan: a.nan + b.nan,
        })
}

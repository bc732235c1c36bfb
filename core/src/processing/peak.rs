use crate::math::integrate::{integrate, IntegrationMethod};
use crate::prelude::{ChromaError, ChromaResult};
use ndarray::{s, ArrayView1};
use serde::Serialize;
use std::ops::RangeInclusive;

/// A resolved peak referencing the inclusive sample range
/// `[left_boundary_index, right_boundary_index]` of its run's series.
///
/// The elution volume is integrated once, at construction, over that range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Peak {
    apex_index: usize,
    apex_time: f64,
    apex_value: f64,
    left_boundary_index: usize,
    right_boundary_index: usize,
    left_boundary_time: f64,
    right_boundary_time: f64,
    area: f64,
}

impl Peak {
    pub fn new(
        apex_index: usize,
        left_boundary_index: usize,
        right_boundary_index: usize,
        times: ArrayView1<f64>,
        values: ArrayView1<f64>,
        method: IntegrationMethod,
    ) -> ChromaResult<Self> {
        if times.len() != values.len() {
            return Err(ChromaError::InvalidPeak(format!(
                "{} sample times but {} values",
                times.len(),
                values.len()
            )));
        }
        if !(left_boundary_index <= apex_index && apex_index <= right_boundary_index) {
            return Err(ChromaError::InvalidPeak(format!(
                "apex {} outside boundaries [{}, {}]",
                apex_index, left_boundary_index, right_boundary_index
            )));
        }
        if right_boundary_index >= values.len() {
            return Err(ChromaError::InvalidPeak(format!(
                "boundary {} beyond series of {} samples",
                right_boundary_index,
                values.len()
            )));
        }

        let area = integrate(
            method,
            times.slice(s![left_boundary_index..=right_boundary_index]),
            values.slice(s![left_boundary_index..=right_boundary_index]),
        )?;

        Ok(Self {
            apex_index,
            apex_time: times[apex_index],
            apex_value: values[apex_index],
            left_boundary_index,
            right_boundary_index,
            left_boundary_time: times[left_boundary_index],
            right_boundary_time: times[right_boundary_index],
            area,
        })
    }

    pub fn apex_index(&self) -> usize {
        self.apex_index
    }

    pub fn apex_time(&self) -> f64 {
        self.apex_time
    }

    pub fn apex_value(&self) -> f64 {
        self.apex_value
    }

    pub fn left_boundary_index(&self) -> usize {
        self.left_boundary_index
    }

    pub fn right_boundary_index(&self) -> usize {
        self.right_boundary_index
    }

    pub fn left_boundary_time(&self) -> f64 {
        self.left_boundary_time
    }

    pub fn right_boundary_time(&self) -> f64 {
        self.right_boundary_time
    }

    /// Elution volume: the integral of the value curve over the window.
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Width in samples.
    pub fn width(&self) -> usize {
        self.right_boundary_index - self.left_boundary_index
    }

    pub fn range(&self) -> RangeInclusive<usize> {
        self.left_boundary_index..=self.right_boundary_index
    }

    /// The `(time, value)` sample window of this peak within the series it
    /// was built from.
    pub fn window<'a>(
        &self,
        times: ArrayView1<'a, f64>,
        values: ArrayView1<'a, f64>,
    ) -> (ArrayView1<'a, f64>, ArrayView1<'a, f64>) {
        let (left, right) = (self.left_boundary_index, self.right_boundary_index);
        (
            times.slice_move(s![left..=right]),
            values.slice_move(s![left..=right]),
        )
    }

    /// Re-integrate the window with any rule.
    pub fn integrate<'a>(
        &self,
        times: ArrayView1<'a, f64>,
        values: ArrayView1<'a, f64>,
        method: IntegrationMethod,
    ) -> ChromaResult<f64> {
        let (x, y) = self.window(times, values);
        integrate(method, x, y)
    }
}

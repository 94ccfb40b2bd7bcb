//! Step-indexed series storage.
//!
//! Every reservoir mass, flux and isotope ratio is a [`Timeseries`]: one value
//! per step on a uniform time grid, allocated once for the full horizon and
//! filled strictly in increasing step order.

use crate::errors::{ModelError, ModelResult};
use ndarray::Array1;
use num::Float;
use serde::{Deserialize, Serialize};

/// Type of the floating-point values carried by every series.
pub type FloatValue = f64;

/// Model time in Myr.
pub type Time = f64;

/// A series of values on the uniform step grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeseries<T> {
    values: Array1<T>,
}

impl<T> Timeseries<T>
where
    T: Float,
{
    /// Build a series from precomputed values.
    pub fn from_values(values: Array1<T>) -> Self {
        Self { values }
    }

    /// A series of `n` zeros.
    pub fn zeros(n: usize) -> Self {
        Self {
            values: Array1::from_elem(n, T::zero()),
        }
    }

    /// A series holding `value` at every step.
    pub fn constant(value: T, n: usize) -> Self {
        Self {
            values: Array1::from_elem(n, value),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `step`. Panics if `step` is beyond the horizon.
    pub fn get(&self, step: usize) -> T {
        self.values[step]
    }

    pub fn set(&mut self, step: usize, value: T) {
        self.values[step] = value;
    }

    /// The step-0 seed value.
    pub fn first(&self) -> T {
        self.values[0]
    }

    pub fn last(&self) -> T {
        self.values[self.values.len() - 1]
    }

    pub fn values(&self) -> &Array1<T> {
        &self.values
    }

    /// The value `lag` steps before `step`.
    ///
    /// Before the delayed pathway has any history (`step < lag`) this returns
    /// the step-0 seed, which is the series' pre-onset steady value. A `step`
    /// beyond the horizon is a [`ModelError::DelayIndex`] error, never a wrap
    /// or a silent clamp.
    pub fn delayed(&self, step: usize, lag: usize) -> ModelResult<T> {
        if step >= self.values.len() {
            return Err(ModelError::DelayIndex {
                step,
                lag,
                len: self.values.len(),
            });
        }
        if step < lag {
            return Ok(self.values[0]);
        }
        Ok(self.values[step - lag])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_delayed_reads_the_lagged_value() {
        let ts = Timeseries::from_values(array![10.0, 11.0, 12.0, 13.0]);
        assert_eq!(ts.delayed(3, 2).unwrap(), 11.0);
        assert_eq!(ts.delayed(2, 0).unwrap(), 12.0);
    }

    #[test]
    fn test_delayed_falls_back_to_the_seed_before_history() {
        let ts = Timeseries::from_values(array![10.0, 11.0, 12.0, 13.0]);
        // step < lag: no material from the delayed pathway exists yet
        assert_eq!(ts.delayed(1, 2).unwrap(), 10.0);
        assert_eq!(ts.delayed(0, 350).unwrap(), 10.0);
    }

    #[test]
    fn test_delayed_rejects_steps_beyond_the_horizon() {
        let ts: Timeseries<FloatValue> = Timeseries::zeros(4);
        let err = ts.delayed(4, 1).unwrap_err();
        assert_eq!(
            err,
            ModelError::DelayIndex {
                step: 4,
                lag: 1,
                len: 4
            }
        );
    }

    #[test]
    fn test_constant_series() {
        let ts = Timeseries::constant(-5.0, 3);
        assert_eq!(ts.len(), 3);
        assert_eq!(ts.first(), -5.0);
        assert_eq!(ts.last(), -5.0);
    }

    #[test]
    fn test_set_then_get() {
        let mut ts: Timeseries<FloatValue> = Timeseries::zeros(3);
        ts.set(1, 2.5);
        assert_eq!(ts.get(1), 2.5);
        assert_eq!(ts.get(2), 0.0);
    }
}

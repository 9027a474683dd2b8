use std::fmt;

use thiserror::Error;

use crate::vector::Vector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoundaryError {
    #[error("boundary is undefined: weight w{0} is zero")]
    UndefinedEquation(usize),

    #[error("expected 3 weights, got {0}")]
    WrongDimension(usize),
}

/// A line `dependent = slope * independent + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub slope: f64,
    pub intercept: f64,
}

impl Line {
    pub fn at(&self, independent: f64) -> f64 {
        self.slope * independent + self.intercept
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} x + {:.2}", self.slope, self.intercept)
    }
}

/// The set of points where `w0 + w1·x1 + w2·x2 = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionBoundary {
    w0: f64,
    w1: f64,
    w2: f64,
}

impl DecisionBoundary {
    pub fn from_weights(weights: &Vector) -> Result<Self, BoundaryError> {
        match *weights.as_slice() {
            [w0, w1, w2] => Ok(Self { w0, w1, w2 }),
            _ => Err(BoundaryError::WrongDimension(weights.len())),
        }
    }

    /// `x2 = -(w1 / w2)·x1 - w0 / w2`
    pub fn solve_for_x2(&self) -> Result<Line, BoundaryError> {
        Self::solve(self.w0, self.w1, self.w2, 2)
    }

    /// `x1 = -(w2 / w1)·x2 - w0 / w1`
    pub fn solve_for_x1(&self) -> Result<Line, BoundaryError> {
        Self::solve(self.w0, self.w2, self.w1, 1)
    }

    #[allow(clippy::float_cmp)]
    fn solve(bias: f64, other: f64, divisor: f64, index: usize) -> Result<Line, BoundaryError> {
        if divisor == 0.0 {
            return Err(BoundaryError::UndefinedEquation(index));
        }

        Ok(Line {
            slope: -other / divisor,
            intercept: -bias / divisor,
        })
    }
}

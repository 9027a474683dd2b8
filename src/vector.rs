use std::fmt;

use ndarray::Array1;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VectorError {
    #[error("vectors must have equal dimension, got {left} and {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("index {index} is out of bounds for a vector of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// A fixed-length vector of reals.
///
/// The length is set on construction and never changes; elements may be
/// reassigned through [`Vector::set`]. Every arithmetic operation returns a
/// new vector and leaves its operands untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    elements: Array1<f64>,
}

impl Vector {
    pub fn new(elements: impl Into<Vec<f64>>) -> Self {
        Self {
            elements: Array1::from(elements.into()),
        }
    }

    pub fn zeros(len: usize) -> Self {
        Self {
            elements: Array1::zeros(len),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        // Array1 built from a Vec or via zeros is always contiguous.
        self.elements.as_slice().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.elements.iter()
    }

    pub fn get(&self, index: usize) -> Result<f64, VectorError> {
        self.elements
            .get(index)
            .copied()
            .ok_or(VectorError::IndexOutOfBounds {
                index,
                len: self.len(),
            })
    }

    pub fn set(&mut self, index: usize, value: f64) -> Result<(), VectorError> {
        let len = self.len();
        let element = self
            .elements
            .get_mut(index)
            .ok_or(VectorError::IndexOutOfBounds { index, len })?;
        *element = value;
        Ok(())
    }

    /// Inner product `Σ aᵢ·bᵢ`.
    pub fn dot(&self, other: &Self) -> Result<f64, VectorError> {
        self.check_dimension(other)?;
        Ok(self.elements.dot(&other.elements))
    }

    pub fn add(&self, other: &Self) -> Result<Self, VectorError> {
        self.check_dimension(other)?;
        Ok(Self {
            elements: &self.elements + &other.elements,
        })
    }

    pub fn subtract(&self, other: &Self) -> Result<Self, VectorError> {
        self.check_dimension(other)?;
        Ok(Self {
            elements: &self.elements - &other.elements,
        })
    }

    pub fn negate(&self) -> Self {
        Self {
            elements: self.elements.mapv(|value| -value),
        }
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self {
            elements: &self.elements * factor,
        }
    }

    fn check_dimension(&self, other: &Self) -> Result<(), VectorError> {
        if self.len() == other.len() {
            Ok(())
        } else {
            Err(VectorError::DimensionMismatch {
                left: self.len(),
                right: other.len(),
            })
        }
    }
}

impl From<Vec<f64>> for Vector {
    fn from(elements: Vec<f64>) -> Self {
        Self::new(elements)
    }
}

impl<const N: usize> From<[f64; N]> for Vector {
    fn from(elements: [f64; N]) -> Self {
        Self::new(elements.to_vec())
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (index, value) in self.elements.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn dot_product() {
        let a = Vector::from([1.0, 2.0, 3.0]);
        let b = Vector::from([4.0, 5.0, 6.0]);

        assert_relative_eq!(a.dot(&b).unwrap(), 32.0);
    }

    #[test]
    fn mismatched_dimensions_are_rejected() {
        let a = Vector::from([1.0, 2.0, 3.0]);
        let b = Vector::from([1.0, 2.0]);
        let expected = VectorError::DimensionMismatch { left: 3, right: 2 };

        assert_eq!(a.dot(&b), Err(expected));
        assert_eq!(a.add(&b), Err(expected));
        assert_eq!(a.subtract(&b), Err(expected));
        assert_eq!(
            b.add(&a),
            Err(VectorError::DimensionMismatch { left: 2, right: 3 })
        );
    }

    #[test]
    fn elementwise_arithmetic() {
        let a = Vector::from([1.0, -2.0, 3.5]);
        let b = Vector::from([0.5, 2.0, -1.0]);

        assert_eq!(a.add(&b).unwrap(), Vector::from([1.5, 0.0, 2.5]));
        assert_eq!(a.subtract(&b).unwrap(), Vector::from([0.5, -4.0, 4.5]));
        assert_eq!(a.negate(), Vector::from([-1.0, 2.0, -3.5]));
        assert_eq!(a.scale(2.0), Vector::from([2.0, -4.0, 7.0]));
    }

    #[test]
    fn indexed_access_is_bounds_checked() {
        let mut v = Vector::zeros(3);

        v.set(2, 7.0).unwrap();
        assert_relative_eq!(v.get(2).unwrap(), 7.0);
        assert_eq!(
            v.get(3),
            Err(VectorError::IndexOutOfBounds { index: 3, len: 3 })
        );
        assert_eq!(
            v.set(5, 1.0),
            Err(VectorError::IndexOutOfBounds { index: 5, len: 3 })
        );
        assert_eq!(v.len(), 3);
    }

    #[test]
    fn display_is_bracketed() {
        assert_eq!(Vector::from([1.0, 2.5, -3.0]).to_string(), "[1, 2.5, -3]");
        assert_eq!(Vector::zeros(0).to_string(), "[]");
    }

    fn vector_pair() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
        (1usize..8).prop_flat_map(|len| {
            (
                prop::collection::vec(-1e3f64..1e3, len),
                prop::collection::vec(-1e3f64..1e3, len),
            )
        })
    }

    proptest! {
        #[test]
        fn operations_leave_operands_untouched((a, b) in vector_pair(), factor in -10f64..10.0) {
            let left = Vector::new(a.clone());
            let right = Vector::new(b.clone());

            let sum = left.add(&right).unwrap();
            let difference = left.subtract(&right).unwrap();
            let scaled = left.scale(factor);
            let negated = left.negate();

            prop_assert_eq!(left.as_slice(), a.as_slice());
            prop_assert_eq!(right.as_slice(), b.as_slice());

            prop_assert_eq!(left.add(&right).unwrap(), sum);
            prop_assert_eq!(left.subtract(&right).unwrap(), difference);
            prop_assert_eq!(left.scale(factor), scaled);
            prop_assert_eq!(left.negate(), negated);
        }

        #[test]
        fn dot_is_symmetric((a, b) in vector_pair()) {
            let left = Vector::new(a);
            let right = Vector::new(b);

            prop_assert_eq!(left.dot(&right).unwrap(), right.dot(&left).unwrap());
        }
    }
}

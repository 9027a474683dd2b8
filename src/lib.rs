//! Binary linear classification with the online perceptron rule.
//!
//! Training examples are `[1, x1, x2]` feature vectors with a 0/1 label; the
//! leading 1 folds the bias into the weight vector. Training either converges
//! to a separating weight vector or stops at an iteration cap, and only a
//! converged model can classify new points.

pub mod boundary;
pub mod config;
pub mod parse;
pub mod perceptron;
pub mod plot;
pub mod report;
pub mod vector;

pub use boundary::{BoundaryError, DecisionBoundary, Line};
pub use config::{Config, ConfigError};
pub use perceptron::{
    activate, classify_point, Label, ModelState, Perceptron, PerceptronError, TrainingExample,
    TrainingOutcome,
};
pub use vector::{Vector, VectorError};

use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::vector::{Vector, VectorError};

/// Feature dimension including the leading bias term: `[1, x1, x2]`.
pub const DIMENSIONS: usize = 3;

pub const DEFAULT_LEARNING_RATE: f64 = 0.01;
pub const DEFAULT_MAX_ITERATIONS: usize = 5_000_000;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PerceptronError {
    #[error("learning rate must lie strictly between 0 and 1, got {0}")]
    InvalidLearningRate(f64),

    #[error("maximum iterations must be greater than 0")]
    InvalidMaxIterations,

    #[error("training data has not been supplied")]
    MissingData,

    #[error("no converged model is available for classification")]
    ModelNotReady,

    #[error(transparent)]
    Vector(#[from] VectorError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Negative,
    Positive,
}

impl Label {
    pub fn value(self) -> f64 {
        match self {
            Label::Negative => 0.0,
            Label::Positive => 1.0,
        }
    }
}

impl TryFrom<f64> for Label {
    type Error = f64;

    #[allow(clippy::float_cmp)]
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value == 0.0 {
            Ok(Label::Negative)
        } else if value == 1.0 {
            Ok(Label::Positive)
        } else {
            Err(value)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingExample {
    pub features: Vector,
    pub label: Label,
}

impl TrainingExample {
    /// Builds the example `([1, x1, x2], label)`.
    pub fn new(x1: f64, x2: f64, label: Label) -> Self {
        Self {
            features: augment(x1, x2),
            label,
        }
    }

    pub fn from_features(features: Vector, label: Label) -> Self {
        Self { features, label }
    }
}

/// Heaviside step: `z == 0` maps to [`Label::Negative`].
pub fn activate(z: f64) -> Label {
    if z > 0.0 {
        Label::Positive
    } else {
        Label::Negative
    }
}

pub fn validate_learning_rate(rate: f64) -> Result<f64, PerceptronError> {
    if rate > 0.0 && rate < 1.0 {
        Ok(rate)
    } else {
        Err(PerceptronError::InvalidLearningRate(rate))
    }
}

pub fn validate_max_iterations(max_iterations: usize) -> Result<usize, PerceptronError> {
    if max_iterations > 0 {
        Ok(max_iterations)
    } else {
        Err(PerceptronError::InvalidMaxIterations)
    }
}

/// Labels `(x1, x2)` against an explicit weight vector.
pub fn classify_point(weights: &Vector, x1: f64, x2: f64) -> Result<Label, PerceptronError> {
    Ok(activate(augment(x1, x2).dot(weights)?))
}

fn augment(x1: f64, x2: f64) -> Vector {
    Vector::from([1.0, x1, x2])
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModelState {
    Untrained,
    Converged(Vector),
    NotConverged,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrainingOutcome {
    Converged { weights: Vector, iterations: usize },
    NotConverged { iterations: usize },
}

impl TrainingOutcome {
    pub fn iterations(&self) -> usize {
        match self {
            TrainingOutcome::Converged { iterations, .. }
            | TrainingOutcome::NotConverged { iterations } => *iterations,
        }
    }

    pub fn weights(&self) -> Option<&Vector> {
        match self {
            TrainingOutcome::Converged { weights, .. } => Some(weights),
            TrainingOutcome::NotConverged { .. } => None,
        }
    }
}

/// Online perceptron over `[1, x1, x2]` features.
///
/// Weights are updated after every misclassified example, but convergence
/// is only decided once a full pass over the training set has finished with
/// no misclassifications. The iteration counter therefore counts passes,
/// not updates.
#[derive(Debug, Clone)]
pub struct Perceptron {
    learning_rate: f64,
    max_iterations: usize,
    iterations: usize,
    state: ModelState,
}

impl Default for Perceptron {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            iterations: 0,
            state: ModelState::Untrained,
        }
    }
}

impl Perceptron {
    pub fn new(learning_rate: f64, max_iterations: usize) -> Result<Self, PerceptronError> {
        Ok(Self {
            learning_rate: validate_learning_rate(learning_rate)?,
            max_iterations: validate_max_iterations(max_iterations)?,
            ..Self::default()
        })
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Passes made over the training set by the last call to [`Perceptron::train`].
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn state(&self) -> &ModelState {
        &self.state
    }

    pub fn weights(&self) -> Option<&Vector> {
        match &self.state {
            ModelState::Converged(weights) => Some(weights),
            ModelState::Untrained | ModelState::NotConverged => None,
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self.state, ModelState::Converged(_))
    }

    pub fn set_learning_rate(&mut self, rate: f64) -> Result<(), PerceptronError> {
        match validate_learning_rate(rate) {
            Ok(rate) => {
                self.learning_rate = rate;
                Ok(())
            }
            Err(err) => {
                warn!(rate, kept = self.learning_rate, "rejected learning rate");
                Err(err)
            }
        }
    }

    pub fn set_max_iterations(&mut self, max_iterations: usize) -> Result<(), PerceptronError> {
        match validate_max_iterations(max_iterations) {
            Ok(max_iterations) => {
                self.max_iterations = max_iterations;
                Ok(())
            }
            Err(err) => {
                warn!(kept = self.max_iterations, "rejected maximum iterations");
                Err(err)
            }
        }
    }

    pub fn train(
        &mut self,
        examples: &[TrainingExample],
    ) -> Result<TrainingOutcome, PerceptronError> {
        if examples.is_empty() {
            return Err(PerceptronError::MissingData);
        }
        if let Some(example) = examples
            .iter()
            .find(|example| example.features.len() != DIMENSIONS)
        {
            return Err(VectorError::DimensionMismatch {
                left: example.features.len(),
                right: DIMENSIONS,
            }
            .into());
        }

        debug!(
            examples = examples.len(),
            learning_rate = self.learning_rate,
            max_iterations = self.max_iterations,
            "training perceptron"
        );

        self.state = ModelState::Untrained;
        self.iterations = 0;
        let mut weights = Vector::zeros(DIMENSIONS);

        let misclassified = loop {
            self.iterations += 1;
            let mut misclassified = 0usize;

            for example in examples {
                let predicted = activate(example.features.dot(&weights)?);

                if predicted != example.label {
                    let step = self.learning_rate * (example.label.value() - predicted.value());
                    weights = weights.add(&example.features.scale(step))?;
                    misclassified += 1;
                }
            }

            trace!(iteration = self.iterations, misclassified, "completed pass");

            if misclassified == 0 || self.iterations >= self.max_iterations {
                break misclassified;
            }
        };

        if misclassified == 0 {
            info!(iterations = self.iterations, %weights, "perceptron converged");
            self.state = ModelState::Converged(weights.clone());
            Ok(TrainingOutcome::Converged {
                weights,
                iterations: self.iterations,
            })
        } else {
            warn!(
                iterations = self.iterations,
                misclassified, "perceptron did not converge"
            );
            self.state = ModelState::NotConverged;
            Ok(TrainingOutcome::NotConverged {
                iterations: self.iterations,
            })
        }
    }

    pub fn classify(&self, x1: f64, x2: f64) -> Result<Label, PerceptronError> {
        let weights = self.weights().ok_or(PerceptronError::ModelNotReady)?;
        classify_point(weights, x1, x2)
    }

    /// Fraction of `examples` the converged model labels correctly.
    pub fn accuracy(&self, examples: &[TrainingExample]) -> Result<f64, PerceptronError> {
        let weights = self.weights().ok_or(PerceptronError::ModelNotReady)?;
        if examples.is_empty() {
            return Err(PerceptronError::MissingData);
        }

        let mut correct = 0usize;
        for example in examples {
            if activate(example.features.dot(weights)?) == example.label {
                correct += 1;
            }
        }

        Ok(correct as f64 / examples.len() as f64)
    }
}

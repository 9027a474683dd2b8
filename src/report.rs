use std::fmt;

use crate::boundary::{BoundaryError, DecisionBoundary, Line};
use crate::perceptron::{Label, Perceptron};

/// Summary of a training run for console output.
#[derive(Debug, Clone, PartialEq)]
pub enum TrainingReport {
    NotConverged {
        iterations: usize,
    },
    Converged {
        iterations: usize,
        weights: Vec<f64>,
        boundary: Result<Line, BoundaryError>,
    },
}

impl TrainingReport {
    pub fn from_perceptron(perceptron: &Perceptron) -> Self {
        let iterations = perceptron.iterations();

        match perceptron.weights() {
            None => TrainingReport::NotConverged { iterations },
            Some(weights) => TrainingReport::Converged {
                iterations,
                weights: weights.as_slice().to_vec(),
                boundary: DecisionBoundary::from_weights(weights)
                    .and_then(|boundary| boundary.solve_for_x2()),
            },
        }
    }
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainingReport::NotConverged { iterations } => {
                writeln!(f, "Solution did not converge after {iterations} iterations")
            }
            TrainingReport::Converged {
                iterations,
                weights,
                boundary,
            } => {
                writeln!(f, "Solution converged in {iterations} iterations")?;
                writeln!(f)?;
                writeln!(f, "Trained weights:")?;
                writeln!(f, "+------------------------+")?;
                for (index, weight) in weights.iter().enumerate() {
                    writeln!(f, "|  w{index}: {weight:>16.3}  |")?;
                }
                writeln!(f, "+------------------------+")?;
                writeln!(f)?;
                match boundary {
                    Ok(line) => writeln!(f, "Line of separation: x2 = {line}"),
                    Err(err) => writeln!(f, "Line of separation: {err}"),
                }
            }
        }
    }
}

pub fn format_classification(label: Label) -> String {
    let verdict = match label {
        Label::Positive => "positive (1)",
        Label::Negative => "negative (0)",
    };
    format!("The perceptron classifies the point as {verdict}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perceptron::TrainingExample;

    fn trained(max_iterations: usize, examples: &[TrainingExample]) -> Perceptron {
        let mut perceptron = Perceptron::new(0.1, max_iterations).unwrap();
        perceptron.train(examples).unwrap();
        perceptron
    }

    #[test]
    fn reports_converged_model() {
        let perceptron = trained(
            100,
            &[
                TrainingExample::new(0.0, 0.0, Label::Negative),
                TrainingExample::new(10.0, 10.0, Label::Positive),
            ],
        );

        let report = TrainingReport::from_perceptron(&perceptron);
        let text = report.to_string();

        assert!(text.contains("converged in 3 iterations"));
        assert!(text.contains("|  w1:            1.000  |"));
        assert!(text.contains("x2 = -1.00 x + "));
    }

    #[test]
    fn reports_non_convergence() {
        let perceptron = trained(
            4,
            &[
                TrainingExample::new(1.0, 1.0, Label::Negative),
                TrainingExample::new(1.0, 1.0, Label::Positive),
            ],
        );

        assert_eq!(
            TrainingReport::from_perceptron(&perceptron),
            TrainingReport::NotConverged { iterations: 4 }
        );
        assert_eq!(
            TrainingReport::from_perceptron(&perceptron).to_string(),
            "Solution did not converge after 4 iterations\n"
        );
    }

    #[test]
    fn reports_undefined_boundary() {
        // Converges with w2 == 0: only x1 separates the points.
        let perceptron = trained(
            100,
            &[
                TrainingExample::new(-1.0, 0.0, Label::Negative),
                TrainingExample::new(1.0, 0.0, Label::Positive),
            ],
        );

        let text = TrainingReport::from_perceptron(&perceptron).to_string();
        assert!(text.contains("weight w2 is zero"));
    }

    #[test]
    fn classification_line() {
        assert!(format_classification(Label::Positive).ends_with("positive (1)"));
        assert!(format_classification(Label::Negative).ends_with("negative (0)"));
    }
}

use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use thiserror::Error;

use crate::boundary::DecisionBoundary;
use crate::perceptron::{Label, TrainingExample};
use crate::vector::Vector;

const SIZE: (u32, u32) = (640, 480);
const POINT_RADIUS: i32 = 4;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("nothing to plot")]
    Empty,

    #[error("failed to draw plot: {0}")]
    Drawing(String),
}

fn drawing_error(err: impl std::fmt::Display) -> PlotError {
    PlotError::Drawing(err.to_string())
}

/// Renders the training points and, when given, the separating line as SVG.
pub fn render_svg(
    examples: &[TrainingExample],
    weights: Option<&Vector>,
) -> Result<String, PlotError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, SIZE).into_drawing_area();
        draw(&root, examples, weights)?;
    }
    Ok(svg)
}

pub fn plot_to_file(
    path: impl AsRef<Path>,
    examples: &[TrainingExample],
    weights: Option<&Vector>,
) -> Result<(), PlotError> {
    let root = SVGBackend::new(path.as_ref(), SIZE).into_drawing_area();
    draw(&root, examples, weights)
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    examples: &[TrainingExample],
    weights: Option<&Vector>,
) -> Result<(), PlotError> {
    let points: Vec<(f64, f64, Label)> = examples
        .iter()
        .filter_map(|example| match example.features.as_slice() {
            [_, x1, x2] => Some((*x1, *x2, example.label)),
            _ => None,
        })
        .collect();
    if points.is_empty() {
        return Err(PlotError::Empty);
    }

    let x_range = padded_range(points.iter().map(|point| point.0));
    let y_range = padded_range(points.iter().map(|point| point.1));

    root.fill(&WHITE).map_err(drawing_error)?;
    let mut chart = ChartBuilder::on(root)
        .margin(10)
        .build_cartesian_2d(x_range.clone(), y_range.clone())
        .map_err(drawing_error)?;

    for (label, color) in [(Label::Negative, RED), (Label::Positive, BLUE)] {
        chart
            .draw_series(
                points
                    .iter()
                    .filter(|(_, _, point_label)| *point_label == label)
                    .map(|&(x1, x2, _)| Circle::new((x1, x2), POINT_RADIUS, color.filled())),
            )
            .map_err(drawing_error)?;
    }

    let segment = weights.and_then(|weights| boundary_segment(weights, &x_range, &y_range));
    if let Some(segment) = segment {
        chart
            .draw_series(LineSeries::new(segment, &BLACK))
            .map_err(drawing_error)?;
    }

    root.present().map_err(drawing_error)
}

fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), value| {
        (lo.min(value), hi.max(value))
    });
    let margin = ((hi - lo) * 0.1).max(1.0);

    (lo - margin)..(hi + margin)
}

/// Endpoints of the decision line clipped to the plotted area.
fn boundary_segment(
    weights: &Vector,
    x_range: &Range<f64>,
    y_range: &Range<f64>,
) -> Option<Vec<(f64, f64)>> {
    let boundary = DecisionBoundary::from_weights(weights).ok()?;

    if let Ok(line) = boundary.solve_for_x2() {
        return Some(vec![
            (x_range.start, line.at(x_range.start)),
            (x_range.end, line.at(x_range.end)),
        ]);
    }

    // w2 is zero, so the line is vertical at a fixed x1.
    let x1 = boundary.solve_for_x1().ok()?.intercept;
    Some(vec![(x1, y_range.start), (x1, y_range.end)])
}

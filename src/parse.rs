use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, trace};

use crate::perceptron::{Label, TrainingExample};

pub const DEFAULT_DELIMITER: u8 = b',';

const X1_FIELD_INDEX: usize = 1;
const X2_FIELD_INDEX: usize = 2;
const LABEL_FIELD_INDEX: usize = 3;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("line {line}: expected at least 4 columns, found {found}")]
    TooFewColumns { line: u64, found: usize },

    #[error("line {line}: label must be 0 or 1, got {value}")]
    InvalidLabel { line: u64, value: f64 },
}

/// Reads `id, x1, x2, label` records, skipping any line that is not
/// entirely numeric (headers, footers, missing values).
pub fn parse(
    file_path: impl AsRef<Path>,
    delimiter: u8,
) -> Result<Vec<TrainingExample>, ParseError> {
    let file = File::open(file_path.as_ref())?;
    debug!(path = %file_path.as_ref().display(), "reading training data");

    parse_reader(BufReader::new(file), delimiter)
}

pub fn parse_reader<R: Read>(
    reader: R,
    delimiter: u8,
) -> Result<Vec<TrainingExample>, ParseError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut examples = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, csv::Position::line);

        let Some(values) = numeric_values(&record) else {
            trace!(line, "skipping non-numeric record");
            skipped += 1;
            continue;
        };

        if values.len() <= LABEL_FIELD_INDEX {
            return Err(ParseError::TooFewColumns {
                line,
                found: values.len(),
            });
        }

        let value = values[LABEL_FIELD_INDEX];
        let label =
            Label::try_from(value).map_err(|value| ParseError::InvalidLabel { line, value })?;

        examples.push(TrainingExample::new(
            values[X1_FIELD_INDEX],
            values[X2_FIELD_INDEX],
            label,
        ));
    }

    debug!(examples = examples.len(), skipped, "parsed training data");

    Ok(examples)
}

fn numeric_values(record: &StringRecord) -> Option<Vec<f64>> {
    if record.iter().all(str::is_empty) {
        return None;
    }

    record
        .iter()
        .map(|field| field.parse::<f64>().ok().filter(|value| value.is_finite()))
        .collect()
}

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use perceptron::{
    config::Config,
    parse::parse,
    plot::plot_to_file,
    report::{format_classification, TrainingReport},
    Perceptron,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Train a perceptron on labelled two-feature data and classify new points.
#[derive(Debug, Parser)]
#[command(name = "perceptron", version)]
struct Args {
    /// Delimited data file with `id, x1, x2, label` columns
    data: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Learning rate in (0, 1); overrides the config file
    #[arg(long)]
    learning_rate: Option<f64>,

    /// Maximum passes over the training data; overrides the config file
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Field delimiter of the data file; overrides the config file
    #[arg(long)]
    delimiter: Option<char>,

    /// Classify the point (X1, X2) after training
    #[arg(long, num_args = 2, value_names = ["X1", "X2"], allow_negative_numbers = true)]
    classify: Option<Vec<f64>>,

    /// Prompt for a point to classify after training
    #[arg(short, long, conflicts_with = "classify")]
    interactive: bool,

    /// Write an SVG plot of the data and decision line
    #[arg(long)]
    plot: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) -> Result<(), Box<dyn Error>> {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn delimiter_byte(delimiter: char) -> Result<u8, Box<dyn Error>> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| {
            format!("delimiter must be a single ASCII character, got {delimiter:?}").into()
        })
}

/// Asks until a finite number is entered; fails only when input ends.
fn prompt_number(input: &mut impl BufRead, name: &str) -> Result<f64, Box<dyn Error>> {
    let mut stdout = io::stdout();
    write!(stdout, "Please enter {name}: ")?;
    stdout.flush()?;

    loop {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(format!("no value entered for {name}").into());
        }

        match line.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => return Ok(value),
            _ => {
                write!(stdout, "Please try again, a number is required: ")?;
                stdout.flush()?;
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };

    let mut model: Perceptron = config.build_perceptron()?;
    if let Some(rate) = args.learning_rate {
        model.set_learning_rate(rate)?;
    }
    if let Some(max_iterations) = args.max_iterations {
        model.set_max_iterations(max_iterations)?;
    }

    let delimiter = match args.delimiter {
        Some(delimiter) => delimiter_byte(delimiter)?,
        None => config.data.delimiter_byte()?,
    };

    let examples = parse(&args.data, delimiter)?;
    model.train(&examples)?;

    println!("{}", TrainingReport::from_perceptron(&model));

    if let Some(path) = &args.plot {
        plot_to_file(path, &examples, model.weights())?;
        info!(path = %path.display(), "wrote plot");
    }

    let point = match args.classify.as_deref() {
        Some(&[x1, x2]) => Some((x1, x2)),
        _ if args.interactive => {
            let mut input = io::stdin().lock();
            let x1 = prompt_number(&mut input, "x1")?;
            let x2 = prompt_number(&mut input, "x2")?;
            Some((x1, x2))
        }
        _ => None,
    };

    if let Some((x1, x2)) = point {
        match model.classify(x1, x2) {
            Ok(label) => println!("{}", format_classification(label)),
            Err(err) => println!("Cannot classify point: {err}"),
        }
    }

    Ok(())
}

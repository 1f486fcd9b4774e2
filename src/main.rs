use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bar_cutter::matrix::{self, MatrixError};
use bar_cutter::report;
use bar_cutter::{BarCutter, BarStock, SearchMode};

#[derive(clap::Parser, Debug)]
#[command(version, about = "Enumerate the maximal ways to cut standard bars within a length limit", long_about = None)]
#[command(after_help = "Example:\n  ./barcut --bars 50,60,80 --limit 150 --describe")]
struct Args {
    /// Available bar lengths, comma separated
    #[arg(short = 'b', long = "bars", value_delimiter = ',', default_values_t = [50u64, 60, 80])]
    lengths: Vec<u64>,

    /// Maximum total length of a combination
    #[arg(short = 'l', long, default_value_t = 150)]
    limit: u64,

    /// Search strategy
    #[arg(short = 'm', long, value_enum, default_value_t = SearchMode::Exhaustive)]
    mode: SearchMode,

    /// Print a description of every combination after the matrices
    #[arg(long)]
    describe: bool,

    /// Also write the descriptions to this file
    #[arg(short = 'o', long = "out")]
    output_file: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Command line parsing
    let args = Args::parse();

    // Setup logging, on stderr so that stdout only carries results
    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    // Initialize the cutter
    let stock = BarStock::new(args.lengths, args.limit)?;
    let mut cutter = BarCutter::new(stock, args.mode);
    if let Some(path) = args.output_file {
        cutter.set_output_file(path);
    }

    // Run the search, discoveries are echoed while it runs
    let outcome = cutter.cut()?;
    info!(
        solutions = outcome.solutions.len(),
        nodes = outcome.stats.nodes,
        duplicates = outcome.stats.duplicates,
        "search complete in {:.2?}",
        outcome.elapsed
    );

    let response = matrix::response_matrix(&outcome.solutions);
    println!("{:?}", response);

    match matrix::transpose(&response) {
        Ok(coefficients) => println!("{:?}", coefficients),
        Err(MatrixError::Empty) => warn!("No combination found, the coefficient matrix is not built"),
        Err(e) => return Err(e.into()),
    }

    let waste = matrix::waste_column(&outcome.solutions);
    info!("Waste per combination: {:?}", waste);

    if args.describe {
        report::report(&outcome.solutions, cutter.stock(), std::io::stdout().lock())?;
    }

    // Success return
    Ok(())
}

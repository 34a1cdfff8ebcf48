use clap::Parser;
use climate::{
    AnalysisConfig, ClimateError, Console, OutputFormat, SimpleLogger, load_records, run_session,
};
use log::{debug, info};
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::time::Instant;

static LOGGER: SimpleLogger = SimpleLogger;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input CSV file (date, precipitation, temp max, temp min, humidity, wind)
    #[arg(short, long, default_value = "dados_climaticos_historicos.csv")]
    input_file: PathBuf,

    /// First year (inclusive) of the yearly-average window
    #[arg(long, default_value_t = 2006)]
    start_year: i32,

    /// Last year (inclusive) of the yearly-average window
    #[arg(long, default_value_t = 2016)]
    end_year: i32,

    /// Bar chart glyphs per degree
    #[arg(long, default_value_t = 5.0)]
    scale: f64,

    /// Format of the computed results
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    /// Log level for output
    #[arg(long, default_value = "false")]
    debug: bool,
}

fn main() -> Result<(), ClimateError> {
    let total_start = Instant::now();
    log::set_logger(&LOGGER)?;

    let args = Args::parse();
    if args.debug {
        log::set_max_level(log::LevelFilter::Debug);
    } else {
        log::set_max_level(log::LevelFilter::Info);
    }

    debug!(
        "Input file: {} | Window: {}-{} | Scale: {} | Format: {:?}",
        args.input_file.display(),
        args.start_year,
        args.end_year,
        args.scale,
        args.format
    );
    let config = AnalysisConfig {
        year_start: args.start_year,
        year_end: args.end_year,
        bar_scale: args.scale,
        format: args.format,
    };

    let load_start = Instant::now();
    let records = match load_records(&args.input_file) {
        Ok(records) => records,
        Err(ClimateError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            eprintln!(
                "File '{}' not found. Make sure it is in the same folder as the program.",
                args.input_file.display()
            );
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    info!("Loading took {:.2?}", load_start.elapsed());
    if records.is_empty() {
        info!("No records to analyse");
        return Ok(());
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    match config.format {
        // keep JSON on stdout free of prompts
        OutputFormat::Json => run_session(
            &records,
            &config,
            &mut Console {
                input: stdin.lock(),
                prompt: io::stderr().lock(),
                out: stdout.lock(),
            },
        )?,
        OutputFormat::Text => run_session(
            &records,
            &config,
            &mut Console {
                input: stdin.lock(),
                prompt: stdout.lock(),
                out: stdout.lock(),
            },
        )?,
    }

    debug!("Session completed in {:.2?}", total_start.elapsed());
    Ok(())
}

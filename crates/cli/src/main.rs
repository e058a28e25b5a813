//! # forecast-cli
//!
//! Command-line interface for the monthly metric forecasting engine.

use clap::{Parser, Subcommand};
use forecast_facade::{
    ForecastConfig, Forecaster, HistoricalSeries, MadDetector, MonthlySeriesPoint, OutlierFilter,
    PeriodKey,
};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

type CliResult<T> = std::result::Result<T, String>;

/// Header names recognised as the period column of a CSV file.
const PERIOD_COLUMNS: [&str; 4] = ["period", "periodKey", "period_key", "date"];

#[derive(Parser)]
#[command(name = "forecast")]
#[command(about = "Monthly metric forecasting CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast the months following the input history
    Forecast {
        /// Input file (CSV with period,value columns or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Number of months to forecast
        #[arg(short, long, allow_hyphen_values = true)]
        steps: i64,

        /// First period for input without period keys
        #[arg(long, default_value = "2000-01")]
        start: String,

        /// Engine configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report MAD outliers and the cleaned series
    Outliers {
        /// Input file (CSV with period,value columns or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// MAD multiplier (overrides the configuration)
        #[arg(short, long)]
        threshold: Option<f64>,

        /// First period for input without period keys
        #[arg(long, default_value = "2000-01")]
        start: String,

        /// Engine configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Load engine configuration, falling back to the defaults
fn load_config(path: Option<&Path>) -> CliResult<ForecastConfig> {
    let Some(path) = path else {
        return Ok(ForecastConfig::default());
    };
    let file = File::open(path).map_err(|e| format!("Failed to open config: {}", e))?;
    let config: ForecastConfig = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| format!("Failed to parse config: {}", e))?;
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn parse_start(start: &str) -> CliResult<PeriodKey> {
    start
        .parse()
        .map_err(|e: forecast_facade::ForecastError| e.to_string())
}

/// Load a monthly series from a CSV file
fn load_csv_series(path: &Path, start: PeriodKey) -> CliResult<HistoricalSeries> {
    let file = File::open(path).map_err(|e| format!("Failed to open file: {}", e))?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let headers = reader
        .headers()
        .map_err(|e| format!("Failed to read headers: {}", e))?
        .clone();

    let period_idx = headers
        .iter()
        .position(|h| PERIOD_COLUMNS.contains(&h.trim()));
    let value_idx = headers
        .iter()
        .position(|h| h.trim() == "value")
        .unwrap_or(if period_idx == Some(0) { 1 } else { 0 });

    let mut keys = Vec::new();
    let mut values = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result.map_err(|e| format!("Failed to read record: {}", e))?;
        let raw = record
            .get(value_idx)
            .ok_or_else(|| format!("Row {} has no value column", line + 1))?;
        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|_| format!("Row {}: '{}' is not a number", line + 1, raw))?;
        values.push(value);

        if let Some(idx) = period_idx {
            let key = record
                .get(idx)
                .ok_or_else(|| format!("Row {} has no period column", line + 1))?;
            keys.push(key.trim().parse::<PeriodKey>().map_err(|e| e.to_string())?);
        }
    }

    if values.is_empty() {
        return Err("No data rows found".to_string());
    }

    let series = if period_idx.is_some() {
        let points = keys
            .into_iter()
            .zip(values)
            .map(|(key, value)| MonthlySeriesPoint::new(key, value))
            .collect();
        HistoricalSeries::new(points)
    } else {
        HistoricalSeries::from_values(start, &values)
    };
    series.map_err(|e| e.to_string())
}

/// Load a monthly series from a JSON file
///
/// Accepts an array of `{periodKey|date, value}` objects or a plain array of
/// numbers laid out from `start`.
fn load_json_series(path: &Path, start: PeriodKey) -> CliResult<HistoricalSeries> {
    let file = File::open(path).map_err(|e| format!("Failed to open file: {}", e))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| format!("Failed to parse JSON: {}", e))?;

    let Some(arr) = json.as_array() else {
        return Err("Expected a JSON array of points or numbers".to_string());
    };

    if arr.iter().all(|v| v.is_number()) {
        let values: Vec<f64> = arr.iter().filter_map(|v| v.as_f64()).collect();
        return HistoricalSeries::from_values(start, &values).map_err(|e| e.to_string());
    }

    serde_json::from_value::<HistoricalSeries>(json)
        .map_err(|e| format!("Invalid series: {}", e))
}

/// Load data from file (auto-detect format)
fn load_series(path: &Path, start: PeriodKey) -> CliResult<HistoricalSeries> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => load_csv_series(path, start),
        "json" => load_json_series(path, start),
        _ => load_csv_series(path, start).or_else(|_| load_json_series(path, start)),
    }
}

/// Write JSON to file or stdout
fn write_json(json: &serde_json::Value, output: Option<&Path>) -> CliResult<()> {
    let rendered =
        serde_json::to_string_pretty(json).map_err(|e| format!("Failed to encode JSON: {}", e))?;
    if let Some(path) = output {
        std::fs::write(path, rendered).map_err(|e| format!("Failed to write output: {}", e))?;
        eprintln!("Results written to {:?}", path);
    } else {
        println!("{}", rendered);
    }
    Ok(())
}

/// Run forecast command
fn run_forecast(
    input: PathBuf,
    steps: i64,
    start: String,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
) -> CliResult<()> {
    let config = load_config(config.as_deref())?;
    let series = load_series(&input, parse_start(&start)?)?;
    eprintln!(
        "Loaded {} months from {:?}",
        series.len(),
        input.file_name().unwrap_or_default()
    );

    let forecaster = Forecaster::with_config(config).map_err(|e| e.to_string())?;
    let result = forecaster
        .forecast(&series, steps)
        .map_err(|e| e.to_string())?;

    eprintln!("Model: {}", result.method);
    for ((period, value), (lower, upper)) in result
        .periods
        .iter()
        .zip(&result.forecasted)
        .zip(result.confidence.lower.iter().zip(&result.confidence.upper))
    {
        eprintln!("  {}: {:.4}  [{:.4}, {:.4}]", period, value, lower, upper);
    }

    let json = serde_json::to_value(&result).map_err(|e| e.to_string())?;
    write_json(&json, output.as_deref())
}

/// Run outliers command
fn run_outliers(
    input: PathBuf,
    threshold: Option<f64>,
    start: String,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
) -> CliResult<()> {
    let mut config = load_config(config.as_deref())?;
    if let Some(k) = threshold {
        config = config.with_outlier_threshold(k);
        config.validate().map_err(|e| e.to_string())?;
    }
    let series = load_series(&input, parse_start(&start)?)?;

    let report = MadDetector::from_config(&config).filter(&series.values());
    let flagged: Vec<serde_json::Value> = report
        .outlier_indices()
        .into_iter()
        .map(|i| {
            let point = series.points()[i];
            serde_json::json!({
                "index": i,
                "periodKey": point.period_key,
                "value": point.value,
                "cleaned": report.cleaned[i]
            })
        })
        .collect();

    eprintln!(
        "Found {} outlier(s) in {} points (median {:.4}, MAD {:.4})",
        flagged.len(),
        series.len(),
        report.median,
        report.mad
    );

    let json = serde_json::json!({
        "threshold": report.threshold,
        "median": report.median,
        "mad": report.mad,
        "outliers": flagged,
        "cleaned": report.cleaned,
    });
    write_json(&json, output.as_deref())
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Forecast {
            input,
            steps,
            start,
            config,
            output,
        } => run_forecast(input, steps, start, config, output),

        Commands::Outliers {
            input,
            threshold,
            start,
            config,
            output,
        } => run_outliers(input, threshold, start, config, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

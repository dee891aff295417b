use anyhow::Result;
use clap::{Parser, ValueEnum};
use snowcast::models::date_range::DATE_FORMAT;
use snowcast::{DateRange, ForecastAggregator, ForecastRow, SnowcastConfig, logging, table};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser)]
#[command(version, about = "Daily weather and snow depth forecast for a city", long_about = None)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,

    /// City to forecast, e.g. "札幌" or "Niseko"
    #[arg(short, long)]
    city: Option<String>,

    /// First day, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    from: Option<String>,

    /// Last day, YYYY-MM-DD (defaults to the start day)
    #[arg(long)]
    to: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match SnowcastConfig::load_from_path(cli.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(&config.logging, cli.verbose) {
        eprintln!("Error: {e:#}");
        return ExitCode::FAILURE;
    }

    match run(&cli, &config).await {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            let message = match e.downcast_ref::<snowcast::SnowcastError>() {
                Some(err) => err.user_message(),
                None => format!("{e:#}"),
            };
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, config: &SnowcastConfig) -> Result<String> {
    let city = cli.city.clone().unwrap_or_else(|| config.defaults.city.clone());
    let today = DateRange::today_in(config.timezone()?)
        .format(DATE_FORMAT)
        .to_string();
    let from = cli.from.clone().unwrap_or(today);
    let to = cli.to.clone().unwrap_or_else(|| from.clone());
    debug!("Forecast request: city={city} from={from} to={to}");

    let aggregator = ForecastAggregator::open_meteo(&config.api)?;
    let rows = aggregator.aggregate_raw(&city, &from, &to).await?;

    render(&city, &from, &to, &rows, cli.format)
}

fn render(city: &str, from: &str, to: &str, rows: &[ForecastRow], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(rows)?)),
        OutputFormat::Table => Ok(format!(
            "{} {}..{}\n\n{}",
            city.trim(),
            from.trim(),
            to.trim(),
            table::render_table(rows)
        )),
    }
}

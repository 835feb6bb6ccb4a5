use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use exitpoint::prelude::*;
use log::info;
use prettytable::{Cell, Row, Table};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "exitpoint")]
#[command(about = "A Rust-based exit-signal and strategy backtesting engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    //compute signals for one strategy and backtest them
    Run {
        #[command(flatten)]
        source: SourceArgs,

        //strategy identifier (rsi, ma, movingaverage, trend, bollinger)
        #[arg(long)]
        algorithm: Option<String>,

        //strategy parameter as key=value, repeatable (eg --param oversold=25)
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, f64)>,

        //initial capital
        #[arg(long)]
        initial_capital: Option<f64>,

        //units bought on each entry
        #[arg(long)]
        position_size: Option<f64>,

        //output options
        //output path for signals csv
        #[arg(long)]
        output_signals_csv: Option<PathBuf>,

        //output path for trades csv
        #[arg(long)]
        output_trades_csv: Option<PathBuf>,

        //output path for the result as json
        #[arg(long)]
        output_result_json: Option<PathBuf>,
    },

    //backtest every strategy with default parameters over one series
    Compare {
        #[command(flatten)]
        source: SourceArgs,
    },

    //write a synthetic price series to csv
    Generate {
        //number of daily bars
        #[arg(long, default_value = "180")]
        days: usize,

        //random seed
        #[arg(long, default_value = "42")]
        seed: u64,

        //output csv path
        #[arg(long)]
        output: PathBuf,
    },
}

#[derive(Args)]
struct SourceArgs {
    //path to a json run configuration
    #[arg(long)]
    config: Option<PathBuf>,

    //path to csv data file
    #[arg(long, conflicts_with = "synthetic_days")]
    data: Option<PathBuf>,

    //generate this many synthetic daily bars instead of reading a file
    #[arg(long)]
    synthetic_days: Option<usize>,

    //seed for synthetic data
    #[arg(long)]
    seed: Option<u64>,
}

impl SourceArgs {
    //loads the configuration file, if any, and applies the data flags on top
    fn configuration(&self) -> Result<RunConfiguration> {
        let mut config = match &self.config {
            Some(path) => RunConfiguration::from_json_file(path)?,
            None => RunConfiguration::default(),
        };

        if let Some(path) = &self.data {
            config.data = DataSource::Csv { path: path.clone() };
        } else if self.synthetic_days.is_some() || self.seed.is_some() {
            let (default_days, default_seed) = match config.data {
                DataSource::Synthetic { days, seed } => (days, seed),
                DataSource::Csv { .. } => (180, 42),
            };
            config.data = DataSource::Synthetic {
                days: self.synthetic_days.unwrap_or(default_days),
                seed: self.seed.unwrap_or(default_seed),
            };
        }

        Ok(config)
    }
}

fn parse_param(s: &str) -> Result<(String, f64), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("parameter '{}' is not a number: '{}'", key, value))?;
    Ok((key.trim().to_string(), value))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            source,
            algorithm,
            params,
            initial_capital,
            position_size,
            output_signals_csv,
            output_trades_csv,
            output_result_json,
        } => {
            let mut config = source.configuration()?;

            if let Some(algorithm) = algorithm {
                config.algorithm = algorithm;
            }
            config.parameters.extend(params);
            if let Some(initial_capital) = initial_capital {
                config.initial_capital = initial_capital;
            }
            if let Some(position_size) = position_size {
                config.position_size = position_size;
            }
            if output_signals_csv.is_some() {
                config.output_signals_csv = output_signals_csv;
            }
            if output_trades_csv.is_some() {
                config.output_trades_csv = output_trades_csv;
            }
            if output_result_json.is_some() {
                config.output_result_json = output_result_json;
            }

            run_analysis(&config)?;
        }
        Commands::Compare { source } => {
            let config = source.configuration()?;
            run_comparison(&config)?;
        }
        Commands::Generate { days, seed, output } => {
            generate_csv(days, seed, &output)?;
        }
    }

    Ok(())
}

fn load_series(source: &DataSource) -> Result<Vec<PriceBar>> {
    let series = match source {
        DataSource::Csv { path } => {
            info!("Loading data from {:?}...", path);
            match load_csv(path) {
                Err(EngineError::EmptySeries) => {
                    anyhow::bail!("No valid data found in {:?}", path)
                }
                other => other.with_context(|| format!("Failed to load data from {:?}", path))?,
            }
        }
        DataSource::Synthetic { days, seed } => {
            info!("Generating {} synthetic bars (seed {})...", days, seed);
            generate_sample(*days, *seed)
        }
    };

    //the generators index into the series, an empty one stops here
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        anyhow::bail!("No data: the price series is empty");
    };

    info!(
        "Loaded {} bars, {} to {}",
        series.len(),
        first.iso_date(),
        last.iso_date()
    );

    Ok(series)
}

fn run_analysis(config: &RunConfiguration) -> Result<()> {
    let series = load_series(&config.data)?;

    let signals = compute_exit_points(&series, &config.algorithm, &config.parameters);
    info!("Computed {} signals", signals.len());

    let backtest = config.backtest_config();
    let result = BacktestEngine::new(backtest.clone()).run(&series, &signals);

    println!("Backtest Results: {}", result.algorithm);
    println!("==================\n");
    println!(
        "Initial capital: {:.2}, position size: {}",
        backtest.initial_capital, backtest.position_size
    );
    result.summary.pretty_print_table();

    //save outputs if requested
    if let Some(path) = &config.output_signals_csv {
        save_signals_csv(&signals, path)
            .with_context(|| format!("Failed to write signals to {:?}", path))?;
        println!("\nSignals saved to {:?}", path);
    }

    if let Some(path) = &config.output_trades_csv {
        save_trades_csv(&result.trades, path)
            .with_context(|| format!("Failed to write trades to {:?}", path))?;
        println!("Trades saved to {:?}", path);
    }

    if let Some(path) = &config.output_result_json {
        save_result_json(&result, path)?;
        println!("Result saved to {:?}", path);
    }

    Ok(())
}

fn run_comparison(config: &RunConfiguration) -> Result<()> {
    let series = load_series(&config.data)?;

    let strategies: Vec<(String, Vec<ExitSignal>)> = StrategyType::ALL
        .par_iter()
        .map(|strategy_type| {
            let signals = compute_exit_points(&series, strategy_type.id(), &Parameters::new());
            (strategy_type.label().to_string(), signals)
        })
        .collect();

    let results = compare_strategies(&series, &strategies);
    print_comparison_table(&results);

    Ok(())
}

fn print_comparison_table(results: &[BacktestResult]) {
    let mut table = Table::new();

    table.add_row(Row::new(vec![
        Cell::new("Algorithm"),
        Cell::new("Trades"),
        Cell::new("Win Rate"),
        Cell::new("Total Return"),
        Cell::new("Max Drawdown"),
        Cell::new("Sharpe"),
    ]));

    for result in results {
        let summary = &result.summary;
        table.add_row(Row::new(vec![
            Cell::new(&result.algorithm),
            Cell::new(&format!("{}", summary.total_trades)),
            Cell::new(&format!("{:.2}%", summary.win_rate)),
            Cell::new(&format!("{:.2}%", summary.total_return)),
            Cell::new(&format!("{:.2}%", summary.max_drawdown)),
            Cell::new(&format!("{:.3}", summary.sharpe_ratio)),
        ]));
    }

    table.printstd();
}

fn save_result_json(result: &BacktestResult, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write result to {:?}", path))?;
    Ok(())
}

fn generate_csv(days: usize, seed: u64, path: &Path) -> Result<()> {
    let bars = generate_sample(days, seed);

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file {:?}", path))?;
    for bar in &bars {
        writer.serialize(bar)?;
    }
    writer.flush()?;

    info!("Wrote {} synthetic bars to {:?}", bars.len(), path);
    Ok(())
}

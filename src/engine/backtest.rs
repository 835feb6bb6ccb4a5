use crate::data::PriceBar;
use crate::metrics::{calculate_capital_curve, CapitalPoint, SummaryMetrics};
use crate::portfolio::{Account, Trade};
use crate::strategy::ExitSignal;
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

//label used when the signal sequence names no algorithm
pub const UNKNOWN_ALGORITHM: &str = "Unknown";

//result of a backtest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub algorithm: String,
    #[serde(flatten)]
    pub summary: SummaryMetrics,
    pub trades: Vec<Trade>,
    pub capital_curve: Vec<CapitalPoint>,
}

//configuration for a backtest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    pub initial_capital: f64,
    pub position_size: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        BacktestConfig {
            initial_capital: 10_000.0,
            position_size: 1.0,
        }
    }
}

//replays signal sequences against a single-position account
#[derive(Debug, Clone, Default)]
pub struct BacktestEngine {
    config: BacktestConfig,
}

impl BacktestEngine {
    pub fn new(config: BacktestConfig) -> Self {
        BacktestEngine { config }
    }

    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    //runs the backtest over the given signals
    //signals are consumed in ascending timestamp order whatever order they
    //arrive in; a position still open after the last signal is not counted
    pub fn run(&self, series: &[PriceBar], signals: &[ExitSignal]) -> BacktestResult {
        let mut account = Account::new(self.config.initial_capital, self.config.position_size);

        let mut ordered: Vec<&ExitSignal> = signals.iter().collect();
        ordered.sort_by_key(|signal| signal.timestamp);

        //main replay loop
        for signal in ordered {
            account.process_signal(signal);
        }

        if account.position.is_long() {
            debug!("Position still open after the last signal, left out of the results");
        }

        let algorithm = signals
            .first()
            .map(|signal| signal.algorithm.clone())
            .unwrap_or_else(|| UNKNOWN_ALGORITHM.to_string());

        let result = self.build_result(algorithm, account);

        debug!(
            "{}: {} signals over {} bars, {} trades, return {:.2}%",
            result.algorithm,
            signals.len(),
            series.len(),
            result.summary.total_trades,
            result.summary.total_return
        );

        result
    }

    fn build_result(&self, algorithm: String, account: Account) -> BacktestResult {
        let capital_curve = calculate_capital_curve(account.initial_capital, &account.trade_log);
        let summary =
            SummaryMetrics::from_trades(&account.trade_log, &capital_curve, account.initial_capital);

        BacktestResult {
            algorithm,
            summary,
            trades: account.trade_log,
            capital_curve,
        }
    }
}

//backtests a signal sequence with the given capital and position size
pub fn backtest_strategy(
    series: &[PriceBar],
    signals: &[ExitSignal],
    initial_capital: f64,
    position_size: f64,
) -> BacktestResult {
    BacktestEngine::new(BacktestConfig {
        initial_capital,
        position_size,
    })
    .run(series, signals)
}

//backtests several named signal sets over one series with default settings
//runs in parallel, results keep the input order and carry the given names
pub fn compare_strategies(
    series: &[PriceBar],
    strategies: &[(String, Vec<ExitSignal>)],
) -> Vec<BacktestResult> {
    let engine = BacktestEngine::default();

    strategies
        .par_iter()
        .map(|(name, signals)| BacktestResult {
            algorithm: name.clone(),
            ..engine.run(series, signals)
        })
        .collect()
}

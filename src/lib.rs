//a Rust-based exit-signal and strategy backtesting engine

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod export;
pub mod indicators;
pub mod metrics;
pub mod portfolio;
pub mod strategy;

//prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{
        BollingerParams, DataSource, MaParams, Parameters, RsiParams, RunConfiguration,
        StrategyParams, StrategyType, TrendParams,
    };
    pub use crate::data::{generate_sample, generate_synthetic, load, load_csv, PriceBar};
    pub use crate::engine::{
        backtest_strategy, compare_strategies, BacktestConfig, BacktestEngine, BacktestResult,
    };
    pub use crate::error::EngineError;
    pub use crate::export::{
        save_signals_csv, save_trades_csv, write_signals_csv, write_trades_csv,
    };
    pub use crate::indicators::{bollinger_bands, rsi, sma, BollingerBand};
    pub use crate::metrics::{CapitalPoint, SummaryMetrics};
    pub use crate::portfolio::{Account, PositionState, Trade};
    pub use crate::strategy::{
        bollinger_touch::BollingerTouchStrategy, compute_exit_points,
        ma_crossover::MaCrossoverStrategy, rsi_threshold::RsiThresholdStrategy,
        trend_momentum::TrendMomentumStrategy, ExitSignal, SignalGenerator, SignalKind,
    };
}

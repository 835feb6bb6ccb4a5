pub mod backtest;

pub use backtest::{
    backtest_strategy, compare_strategies, BacktestConfig, BacktestEngine, BacktestResult,
    UNKNOWN_ALGORITHM,
};

pub mod run_config;
pub mod strategy_config;

pub use run_config::{DataSource, RunConfiguration};
pub use strategy_config::{
    BollingerParams, MaParams, Parameters, RsiParams, StrategyParams, StrategyType, TrendParams,
};

use crate::config::strategy_config::Parameters;
use crate::engine::BacktestConfig;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

//where the price series comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Csv { path: PathBuf },
    Synthetic { days: usize, seed: u64 },
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Synthetic { days: 180, seed: 42 }
    }
}

//complete analysis run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfiguration {
    //data
    pub data: DataSource,

    //strategy identifier and its free-form parameters
    pub algorithm: String,
    pub parameters: Parameters,

    //account settings
    pub initial_capital: f64,
    pub position_size: f64,

    //optional output paths
    pub output_signals_csv: Option<PathBuf>,
    pub output_trades_csv: Option<PathBuf>,
    pub output_result_json: Option<PathBuf>,
}

impl Default for RunConfiguration {
    fn default() -> Self {
        let backtest = BacktestConfig::default();
        RunConfiguration {
            data: DataSource::default(),
            algorithm: "rsi".to_string(),
            parameters: Parameters::new(),
            initial_capital: backtest.initial_capital,
            position_size: backtest.position_size,
            output_signals_csv: None,
            output_trades_csv: None,
            output_result_json: None,
        }
    }
}

impl RunConfiguration {
    //load configuration from a JSON file
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: RunConfiguration = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }

    //save configuration to a JSON file
    pub fn to_json_file(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file {:?}", path))?;
        Ok(())
    }

    //backtest settings for this run
    pub fn backtest_config(&self) -> BacktestConfig {
        BacktestConfig {
            initial_capital: self.initial_capital,
            position_size: self.position_size,
        }
    }
}

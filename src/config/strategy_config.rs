use crate::indicators::{DEFAULT_BOLLINGER_MULTIPLIER, DEFAULT_BOLLINGER_PERIOD, DEFAULT_RSI_PERIOD};
use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

//free-form numeric parameters keyed by name, as supplied by callers
pub type Parameters = IndexMap<String, f64>;

//strategy type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyType {
    Rsi,
    MovingAverage,
    Trend,
    Bollinger,
}

impl StrategyType {
    pub const ALL: [StrategyType; 4] = [
        StrategyType::Rsi,
        StrategyType::MovingAverage,
        StrategyType::Trend,
        StrategyType::Bollinger,
    ];

    //parse strategy type from an identifier (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "rsi" => Some(StrategyType::Rsi),
            "movingaverage" | "ma" => Some(StrategyType::MovingAverage),
            "trend" => Some(StrategyType::Trend),
            "bollinger" => Some(StrategyType::Bollinger),
            _ => None,
        }
    }

    //canonical identifier accepted by parse
    pub fn id(&self) -> &'static str {
        match self {
            StrategyType::Rsi => "rsi",
            StrategyType::MovingAverage => "movingaverage",
            StrategyType::Trend => "trend",
            StrategyType::Bollinger => "bollinger",
        }
    }

    //label stamped on every signal the strategy emits
    pub fn label(&self) -> &'static str {
        match self {
            StrategyType::Rsi => "RSI",
            StrategyType::MovingAverage => "Moving Average",
            StrategyType::Trend => "Trend",
            StrategyType::Bollinger => "Bollinger Bands",
        }
    }
}

impl fmt::Display for StrategyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//reads a numeric parameter, case-insensitive on the key
//missing, zero and non-finite values all mean "use the default"
fn param_f64(parameters: &Parameters, key: &str, default: f64) -> f64 {
    let value = parameters
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, &value)| value);

    match value {
        Some(v) if v.is_finite() && v != 0.0 => v,
        Some(v) => {
            warn!("Parameter {}={} ignored, using default {}", key, v, default);
            default
        }
        None => default,
    }
}

//longest window any generator accepts
pub const MAX_PERIOD: usize = 1_000_000;

//reads a window length, falling back when it truncates below one
//and capping it at MAX_PERIOD
fn param_period(parameters: &Parameters, key: &str, default: usize) -> usize {
    let value = param_f64(parameters, key, default as f64);
    if value < 1.0 {
        warn!("Parameter {}={} is not a valid period, using default {}", key, value, default);
        default
    } else if value > MAX_PERIOD as f64 {
        warn!("Parameter {}={} exceeds the longest period, using {}", key, value, MAX_PERIOD);
        MAX_PERIOD
    } else {
        value as usize
    }
}

//rsi threshold-cross parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsiParams {
    pub period: usize,
    pub oversold: f64,
    pub overbought: f64,
}

impl Default for RsiParams {
    fn default() -> Self {
        RsiParams {
            period: DEFAULT_RSI_PERIOD,
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

impl RsiParams {
    pub fn from_parameters(parameters: &Parameters) -> Self {
        let defaults = Self::default();
        RsiParams {
            period: param_period(parameters, "period", defaults.period),
            oversold: param_f64(parameters, "oversold", defaults.oversold),
            overbought: param_f64(parameters, "overbought", defaults.overbought),
        }
    }
}

//moving-average crossover parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaParams {
    pub short_period: usize,
    pub long_period: usize,
}

impl Default for MaParams {
    fn default() -> Self {
        MaParams {
            short_period: 10,
            long_period: 30,
        }
    }
}

impl MaParams {
    pub fn from_parameters(parameters: &Parameters) -> Self {
        let defaults = Self::default();
        MaParams {
            short_period: param_period(parameters, "shortPeriod", defaults.short_period),
            long_period: param_period(parameters, "longPeriod", defaults.long_period),
        }
    }
}

//trend-momentum parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendParams {
    pub threshold: f64,
    pub lookback: usize,
}

impl Default for TrendParams {
    fn default() -> Self {
        TrendParams {
            threshold: 0.03,
            lookback: 5,
        }
    }
}

impl TrendParams {
    pub fn from_parameters(parameters: &Parameters) -> Self {
        let defaults = Self::default();
        TrendParams {
            threshold: param_f64(parameters, "threshold", defaults.threshold),
            lookback: param_period(parameters, "lookback", defaults.lookback),
        }
    }
}

//bollinger-band touch parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerParams {
    pub period: usize,
    pub std_dev: f64,
}

impl Default for BollingerParams {
    fn default() -> Self {
        BollingerParams {
            period: DEFAULT_BOLLINGER_PERIOD,
            std_dev: DEFAULT_BOLLINGER_MULTIPLIER,
        }
    }
}

impl BollingerParams {
    pub fn from_parameters(parameters: &Parameters) -> Self {
        let defaults = Self::default();
        BollingerParams {
            period: param_period(parameters, "period", defaults.period),
            std_dev: param_f64(parameters, "stdDev", defaults.std_dev),
        }
    }
}

//strategy-specific parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StrategyParams {
    Rsi(RsiParams),
    MovingAverage(MaParams),
    Trend(TrendParams),
    Bollinger(BollingerParams),
}

impl StrategyParams {
    //typed parameters for a strategy type from a free-form map
    pub fn from_parameters(strategy_type: StrategyType, parameters: &Parameters) -> Self {
        match strategy_type {
            StrategyType::Rsi => StrategyParams::Rsi(RsiParams::from_parameters(parameters)),
            StrategyType::MovingAverage => {
                StrategyParams::MovingAverage(MaParams::from_parameters(parameters))
            }
            StrategyType::Trend => StrategyParams::Trend(TrendParams::from_parameters(parameters)),
            StrategyType::Bollinger => {
                StrategyParams::Bollinger(BollingerParams::from_parameters(parameters))
            }
        }
    }

    pub fn defaults(strategy_type: StrategyType) -> Self {
        Self::from_parameters(strategy_type, &Parameters::new())
    }

    pub fn strategy_type(&self) -> StrategyType {
        match self {
            StrategyParams::Rsi(_) => StrategyType::Rsi,
            StrategyParams::MovingAverage(_) => StrategyType::MovingAverage,
            StrategyParams::Trend(_) => StrategyType::Trend,
            StrategyParams::Bollinger(_) => StrategyType::Bollinger,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, f64)]) -> Parameters {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn parses_known_identifiers() {
        assert_eq!(StrategyType::parse("RSI"), Some(StrategyType::Rsi));
        assert_eq!(StrategyType::parse("ma"), Some(StrategyType::MovingAverage));
        assert_eq!(
            StrategyType::parse("MovingAverage"),
            Some(StrategyType::MovingAverage)
        );
        assert_eq!(StrategyType::parse("trend"), Some(StrategyType::Trend));
        assert_eq!(StrategyType::parse(" Bollinger "), Some(StrategyType::Bollinger));
        assert_eq!(StrategyType::parse("macd"), None);
        assert_eq!(StrategyType::parse(""), None);
    }

    #[test]
    fn ids_round_trip() {
        for strategy_type in StrategyType::ALL {
            assert_eq!(StrategyType::parse(strategy_type.id()), Some(strategy_type));
        }
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(
            StrategyParams::defaults(StrategyType::Rsi),
            StrategyParams::Rsi(RsiParams::default())
        );
        assert_eq!(TrendParams::default().lookback, 5);
        assert_eq!(MaParams::default().long_period, 30);
        assert_eq!(BollingerParams::default().std_dev, 2.0);
    }

    #[test]
    fn supplied_values_override_defaults() {
        let p = MaParams::from_parameters(&params(&[("shortPeriod", 5.0), ("LONGPERIOD", 20.0)]));
        assert_eq!(p, MaParams { short_period: 5, long_period: 20 });

        let p = BollingerParams::from_parameters(&params(&[("period", 10.0), ("stdDev", 1.5)]));
        assert_eq!(p, BollingerParams { period: 10, std_dev: 1.5 });
    }

    #[test]
    fn zero_and_non_finite_fall_back() {
        let p = RsiParams::from_parameters(&params(&[
            ("oversold", 0.0),
            ("overbought", f64::NAN),
            ("period", f64::INFINITY),
        ]));
        assert_eq!(p, RsiParams::default());
    }

    #[test]
    fn invalid_periods_fall_back() {
        let p = MaParams::from_parameters(&params(&[("shortPeriod", -4.0), ("longPeriod", 0.5)]));
        assert_eq!(p, MaParams::default());

        let p = TrendParams::from_parameters(&params(&[("lookback", 3.9)]));
        assert_eq!(p.lookback, 3);
    }

    #[test]
    fn oversized_periods_are_capped() {
        let p = RsiParams::from_parameters(&params(&[("period", 1e30)]));
        assert_eq!(p.period, MAX_PERIOD);

        let p = TrendParams::from_parameters(&params(&[("lookback", f64::MAX)]));
        assert_eq!(p.lookback, MAX_PERIOD);
    }

    #[test]
    fn strategy_type_of_params() {
        for strategy_type in StrategyType::ALL {
            assert_eq!(StrategyParams::defaults(strategy_type).strategy_type(), strategy_type);
        }
    }
}

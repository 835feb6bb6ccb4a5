use crate::config::{Parameters, RsiParams, StrategyParams, StrategyType};
use crate::data::PriceBar;
use crate::strategy::bollinger_touch::BollingerTouchStrategy;
use crate::strategy::ma_crossover::MaCrossoverStrategy;
use crate::strategy::rsi_threshold::RsiThresholdStrategy;
use crate::strategy::signal::ExitSignal;
use crate::strategy::trend_momentum::TrendMomentumStrategy;
use crate::strategy::SignalGenerator;
use log::{debug, warn};

//builds the generator for a typed parameter set
pub fn build_generator(params: &StrategyParams) -> Box<dyn SignalGenerator> {
    match params {
        StrategyParams::Rsi(p) => Box::new(RsiThresholdStrategy::new(p.clone())),
        StrategyParams::MovingAverage(p) => Box::new(MaCrossoverStrategy::new(p.clone())),
        StrategyParams::Trend(p) => Box::new(TrendMomentumStrategy::new(p.clone())),
        StrategyParams::Bollinger(p) => Box::new(BollingerTouchStrategy::new(p.clone())),
    }
}

//resolves an identifier and free-form parameters to typed parameters
//unknown identifiers resolve to rsi with its defaults, the supplied
//parameters are not carried over
pub fn resolve(algorithm_id: &str, parameters: &Parameters) -> StrategyParams {
    match StrategyType::parse(algorithm_id) {
        Some(strategy_type) => StrategyParams::from_parameters(strategy_type, parameters),
        None => {
            warn!(
                "Unknown algorithm '{}', falling back to RSI with default parameters",
                algorithm_id
            );
            StrategyParams::Rsi(RsiParams::default())
        }
    }
}

//computes the signals of the strategy named by algorithm_id over a series
pub fn compute_exit_points(
    series: &[PriceBar],
    algorithm_id: &str,
    parameters: &Parameters,
) -> Vec<ExitSignal> {
    let params = resolve(algorithm_id, parameters);
    let generator = build_generator(&params);
    let signals = generator.generate(series);

    debug!(
        "{} produced {} signals over {} bars ({:?})",
        generator.name(),
        signals.len(),
        series.len(),
        params
    );

    signals
}

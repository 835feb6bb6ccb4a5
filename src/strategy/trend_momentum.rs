use crate::config::{StrategyType, TrendParams};
use crate::data::PriceBar;
use crate::strategy::signal::{ExitSignal, SignalKind};
use crate::strategy::SignalGenerator;

//trend-momentum strategy
//compares each close with the close `lookback` bars earlier and emits a sell
//when the move exceeds the threshold in either direction: taking profit on a
//strong rise, cutting losses on a strong fall
#[derive(Debug, Clone)]
pub struct TrendMomentumStrategy {
    params: TrendParams,
}

impl TrendMomentumStrategy {
    pub fn new(params: TrendParams) -> Self {
        TrendMomentumStrategy { params }
    }
}

impl Default for TrendMomentumStrategy {
    fn default() -> Self {
        Self::new(TrendParams::default())
    }
}

impl SignalGenerator for TrendMomentumStrategy {
    fn generate(&self, series: &[PriceBar]) -> Vec<ExitSignal> {
        let TrendParams {
            threshold,
            lookback,
        } = self.params;
        let label = self.name();
        let mut signals = Vec::new();

        for i in lookback..series.len() {
            let current_price = series[i].close;
            let past_price = series[i - lookback].close;
            let change = (current_price - past_price) / past_price;

            //a zero past close gives no usable ratio
            if !change.is_finite() {
                continue;
            }

            if change > threshold {
                signals.push(ExitSignal::at_bar(
                    &series[i],
                    label,
                    SignalKind::Sell,
                    change / threshold,
                    format!("Strong upward trend detected ({:.2}% gain)", change * 100.0),
                ));
            } else if change < -threshold {
                signals.push(ExitSignal::at_bar(
                    &series[i],
                    label,
                    SignalKind::Sell,
                    change.abs() / threshold,
                    format!("Downward trend detected ({:.2}% loss)", change * 100.0),
                ));
            }
        }

        signals
    }

    fn name(&self) -> &str {
        StrategyType::Trend.label()
    }
}

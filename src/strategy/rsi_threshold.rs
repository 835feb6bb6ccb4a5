use crate::config::{RsiParams, StrategyType};
use crate::data::{closes, PriceBar};
use crate::indicators::rsi;
use crate::strategy::signal::{ExitSignal, SignalKind};
use crate::strategy::SignalGenerator;

//rsi threshold-cross strategy
//buys when rsi crosses up through oversold
//sells when rsi crosses down through overbought
#[derive(Debug, Clone)]
pub struct RsiThresholdStrategy {
    params: RsiParams,
}

impl RsiThresholdStrategy {
    pub fn new(params: RsiParams) -> Self {
        RsiThresholdStrategy { params }
    }
}

impl Default for RsiThresholdStrategy {
    fn default() -> Self {
        Self::new(RsiParams::default())
    }
}

impl SignalGenerator for RsiThresholdStrategy {
    fn generate(&self, series: &[PriceBar]) -> Vec<ExitSignal> {
        let RsiParams {
            period,
            oversold,
            overbought,
        } = self.params;
        let values = rsi(&closes(series), period);
        let label = self.name();
        let mut signals = Vec::new();

        for i in 1..series.len() {
            let prev = values[i - 1];
            let curr = values[i];

            if prev <= oversold && curr > oversold {
                signals.push(ExitSignal::at_bar(
                    &series[i],
                    label,
                    SignalKind::Buy,
                    (oversold - prev) / oversold,
                    format!("RSI crossed above {} (oversold)", oversold),
                ));
            } else if prev >= overbought && curr < overbought {
                signals.push(ExitSignal::at_bar(
                    &series[i],
                    label,
                    SignalKind::Sell,
                    (prev - overbought) / (100.0 - overbought),
                    format!("RSI crossed below {} (overbought)", overbought),
                ));
            }
        }

        signals
    }

    fn name(&self) -> &str {
        StrategyType::Rsi.label()
    }
}

use crate::config::{BollingerParams, StrategyType};
use crate::data::{closes, PriceBar};
use crate::indicators::bollinger_bands;
use crate::strategy::signal::{ExitSignal, SignalKind};
use crate::strategy::SignalGenerator;

//bollinger-band touch strategy
//sells when the close reaches the upper band, buys when it reaches the lower band
#[derive(Debug, Clone)]
pub struct BollingerTouchStrategy {
    params: BollingerParams,
}

impl BollingerTouchStrategy {
    pub fn new(params: BollingerParams) -> Self {
        BollingerTouchStrategy { params }
    }
}

impl Default for BollingerTouchStrategy {
    fn default() -> Self {
        Self::new(BollingerParams::default())
    }
}

impl SignalGenerator for BollingerTouchStrategy {
    fn generate(&self, series: &[PriceBar]) -> Vec<ExitSignal> {
        let BollingerParams { period, std_dev } = self.params;
        let period = period.max(1);
        let bands = bollinger_bands(&closes(series), period, std_dev);
        let label = self.name();
        let mut signals = Vec::new();

        //first bar with a full window behind it, warm-up bands are collapsed
        for i in period..series.len() {
            let band = bands[i];
            let price = series[i].close;

            if price >= band.upper {
                signals.push(ExitSignal::at_bar(
                    &series[i],
                    label,
                    SignalKind::Sell,
                    (price - band.upper) / band.upper,
                    "Price reached upper Bollinger Band",
                ));
            } else if price <= band.lower {
                signals.push(ExitSignal::at_bar(
                    &series[i],
                    label,
                    SignalKind::Buy,
                    (band.lower - price) / band.lower,
                    "Price reached lower Bollinger Band",
                ));
            }
        }

        signals
    }

    fn name(&self) -> &str {
        StrategyType::Bollinger.label()
    }
}

use crate::config::{MaParams, StrategyType};
use crate::data::{closes, PriceBar};
use crate::indicators::sma;
use crate::strategy::signal::{ExitSignal, SignalKind};
use crate::strategy::SignalGenerator;

//moving-average crossover strategy
//buys on a golden cross (short sma crosses above long sma)
//sells on a death cross (short sma crosses below long sma)
#[derive(Debug, Clone)]
pub struct MaCrossoverStrategy {
    params: MaParams,
}

impl MaCrossoverStrategy {
    pub fn new(params: MaParams) -> Self {
        MaCrossoverStrategy { params }
    }

    //checks for a crossover between two consecutive bars
    //returns some(buy) for a golden cross, some(sell) for a death cross
    fn check_crossover(
        prev_short: f64,
        prev_long: f64,
        curr_short: f64,
        curr_long: f64,
    ) -> Option<SignalKind> {
        if prev_short <= prev_long && curr_short > curr_long {
            return Some(SignalKind::Buy);
        }
        if prev_short >= prev_long && curr_short < curr_long {
            return Some(SignalKind::Sell);
        }
        None
    }
}

impl Default for MaCrossoverStrategy {
    fn default() -> Self {
        Self::new(MaParams::default())
    }
}

impl SignalGenerator for MaCrossoverStrategy {
    fn generate(&self, series: &[PriceBar]) -> Vec<ExitSignal> {
        let MaParams {
            short_period,
            long_period,
        } = self.params;
        let closes = closes(series);
        let short_ma = sma(&closes, short_period);
        let long_ma = sma(&closes, long_period);
        let label = self.name();
        let mut signals = Vec::new();

        for i in 1..series.len() {
            let (curr_short, curr_long) = (short_ma[i], long_ma[i]);

            let crossover =
                Self::check_crossover(short_ma[i - 1], long_ma[i - 1], curr_short, curr_long);

            let signal = match crossover {
                Some(SignalKind::Buy) => ExitSignal::at_bar(
                    &series[i],
                    label,
                    SignalKind::Buy,
                    (curr_short - curr_long) / curr_long,
                    format!("MA{} crossed above MA{}", short_period, long_period),
                ),
                Some(SignalKind::Sell) => ExitSignal::at_bar(
                    &series[i],
                    label,
                    SignalKind::Sell,
                    (curr_long - curr_short) / curr_long,
                    format!("MA{} crossed below MA{}", short_period, long_period),
                ),
                Some(SignalKind::Hold) | None => continue,
            };

            signals.push(signal);
        }

        signals
    }

    fn name(&self) -> &str {
        StrategyType::MovingAverage.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::test_support::series_from_closes;
    use approx::assert_relative_eq;

    #[test]
    fn golden_and_death_cross() {
        // sma2 vs sma3
        let closes = [10.0, 10.0, 10.0, 13.0, 13.0, 7.0, 7.0];
        let series = series_from_closes(&closes);
        let strategy = MaCrossoverStrategy::new(MaParams {
            short_period: 2,
            long_period: 3,
        });
        let signals = strategy.generate(&series);

        assert_eq!(signals.len(), 2);

        // bar 3: sma2 11.5, sma3 11
        let buy = &signals[0];
        assert_eq!(buy.signal, SignalKind::Buy);
        assert_eq!(buy.timestamp, series[3].timestamp);
        assert_relative_eq!(buy.confidence, 0.5 / 11.0, epsilon = 1e-12);
        assert_eq!(buy.reason, "MA2 crossed above MA3");
        assert_eq!(buy.algorithm, "Moving Average");

        // bar 5: sma2 10, sma3 11
        let sell = &signals[1];
        assert_eq!(sell.signal, SignalKind::Sell);
        assert_eq!(sell.timestamp, series[5].timestamp);
        assert_relative_eq!(sell.confidence, 1.0 / 11.0, epsilon = 1e-12);
        assert_eq!(sell.reason, "MA2 crossed below MA3");
    }

    #[test]
    fn persistent_order_does_not_repeat() {
        // steadily rising: once both averages are warm the short one stays above
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let series = series_from_closes(&closes);
        let strategy = MaCrossoverStrategy::new(MaParams {
            short_period: 2,
            long_period: 4,
        });
        let signals = strategy.generate(&series);
        let warm = series[3].timestamp;
        assert!(signals.iter().all(|s| s.timestamp <= warm));
        assert_eq!(signals.last().map(|s| s.signal), Some(SignalKind::Buy));
    }

    #[test]
    fn check_crossover_table() {
        assert_eq!(
            MaCrossoverStrategy::check_crossover(1.0, 1.0, 2.0, 1.0),
            Some(SignalKind::Buy)
        );
        assert_eq!(
            MaCrossoverStrategy::check_crossover(1.0, 1.0, 1.0, 2.0),
            Some(SignalKind::Sell)
        );
        assert_eq!(MaCrossoverStrategy::check_crossover(2.0, 1.0, 3.0, 1.0), None);
        assert_eq!(MaCrossoverStrategy::check_crossover(1.0, 1.0, 1.0, 1.0), None);
    }
}

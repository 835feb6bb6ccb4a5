use crate::indicators::moving_average::sma;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BOLLINGER_PERIOD: usize = 20;
pub const DEFAULT_BOLLINGER_MULTIPLIER: f64 = 2.0;

//one bollinger band observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBand {
    pub middle: f64,
    pub upper: f64,
    pub lower: f64,
}

impl BollingerBand {
    //band with zero width around a single value
    fn collapsed(value: f64) -> Self {
        BollingerBand {
            middle: value,
            upper: value,
            lower: value,
        }
    }
}

//bollinger bands: sma(period) +/- multiplier * population std-dev of the window
//deviations are measured against the sma at the same index
//warm-up indices carry a collapsed band at the close
pub fn bollinger_bands(closes: &[f64], period: usize, multiplier: f64) -> Vec<BollingerBand> {
    let period = period.max(1);
    let middle = sma(closes, period);

    middle
        .iter()
        .enumerate()
        .map(|(i, &ma)| {
            if i + 1 < period {
                return BollingerBand::collapsed(closes[i]);
            }

            let variance = closes[i + 1 - period..=i]
                .iter()
                .map(|close| (close - ma).powi(2))
                .sum::<f64>()
                / period as f64;
            let width = multiplier * variance.sqrt();

            BollingerBand {
                middle: ma,
                upper: ma + width,
                lower: ma - width,
            }
        })
        .collect()
}

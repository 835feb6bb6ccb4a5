//relative strength index over a close series
//
//each value averages the gains and losses of the trailing `period` changes with
//a simple mean. indices without a full window carry the neutral placeholder 50,
//and a window without any loss reads 100.

pub const DEFAULT_RSI_PERIOD: usize = 14;

//placeholder for indices without enough history
pub const NEUTRAL_RSI: f64 = 50.0;

pub fn rsi(closes: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1);

    if closes.len() <= period {
        return vec![NEUTRAL_RSI; closes.len()];
    }

    //changes[k] is the move into bar k + 1
    let changes: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    let mut values = Vec::with_capacity(closes.len());
    values.resize(period, NEUTRAL_RSI);

    for i in period..closes.len() {
        let window = &changes[i - period..i];
        let (gains, losses) = window.iter().fold((0.0, 0.0), |(g, l), &change| {
            if change > 0.0 {
                (g + change, l)
            } else {
                (g, l + change.abs())
            }
        });

        let avg_gain = gains / period as f64;
        let avg_loss = losses / period as f64;

        if avg_loss == 0.0 {
            values.push(100.0);
        } else {
            let rs = avg_gain / avg_loss;
            values.push(100.0 - (100.0 / (1.0 + rs)));
        }
    }

    values
}

//simple moving average aligned with its input
//indices before the first full window return their own close, so two averages
//over the same series start out equal and cannot cross during warm-up
pub fn sma(closes: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1);

    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            if i + 1 < period {
                close
            } else {
                closes[i + 1 - period..=i].iter().sum::<f64>() / period as f64
            }
        })
        .collect()
}

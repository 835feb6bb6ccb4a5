use crate::portfolio::Trade;
use serde::{Deserialize, Serialize};

//running capital after one realized trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapitalPoint {
    pub date: String,
    pub capital: f64,
    //fractional decline from the running peak
    pub drawdown: f64,
}

impl CapitalPoint {
    pub fn new(date: String, capital: f64, drawdown: f64) -> Self {
        CapitalPoint {
            date,
            capital,
            drawdown,
        }
    }
}

//calculates the capital curve trade by trade, the peak starts at initial capital
pub fn calculate_capital_curve(initial_capital: f64, trades: &[Trade]) -> Vec<CapitalPoint> {
    let mut curve = Vec::with_capacity(trades.len());
    let mut peak = initial_capital;
    let mut capital = initial_capital;

    for trade in trades {
        capital += trade.profit;

        //update peak
        if capital > peak {
            peak = capital;
        }

        //calculate drawdown
        let drawdown = if peak > 0.0 {
            (peak - capital) / peak
        } else {
            0.0
        };

        curve.push(CapitalPoint::new(trade.exit_date.clone(), capital, drawdown));
    }

    curve
}

//calculates the maximum fractional drawdown of a capital curve
pub fn max_drawdown(curve: &[CapitalPoint]) -> f64 {
    curve
        .iter()
        .map(|point| point.drawdown)
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn trade(profit: f64) -> Trade {
        Trade {
            entry_date: "2024-01-01".into(),
            exit_date: "2024-01-02".into(),
            entry_price: 100.0,
            exit_price: 100.0 + profit,
            profit,
            profit_percent: profit,
        }
    }

    #[test]
    fn peak_to_trough() {
        let trades = [trade(100.0), trade(-300.0), trade(50.0), trade(400.0)];
        let curve = calculate_capital_curve(1_000.0, &trades);

        let capital: Vec<f64> = curve.iter().map(|p| p.capital).collect();
        assert_eq!(capital, vec![1_100.0, 800.0, 850.0, 1_250.0]);

        assert_eq!(curve[0].drawdown, 0.0);
        assert_relative_eq!(curve[1].drawdown, 300.0 / 1_100.0);
        assert_relative_eq!(curve[2].drawdown, 250.0 / 1_100.0);
        assert_eq!(curve[3].drawdown, 0.0);
        assert_relative_eq!(max_drawdown(&curve), 300.0 / 1_100.0);
    }

    #[test]
    fn first_loss_measured_from_initial_capital() {
        let curve = calculate_capital_curve(1_000.0, &[trade(-100.0)]);
        assert_relative_eq!(max_drawdown(&curve), 0.1);
    }

    #[test]
    fn empty_curve_has_no_drawdown() {
        assert!(calculate_capital_curve(1_000.0, &[]).is_empty());
        assert_eq!(max_drawdown(&[]), 0.0);
    }

    #[test]
    fn non_positive_peak_reports_zero() {
        let curve = calculate_capital_curve(0.0, &[trade(-5.0)]);
        assert_eq!(curve[0].drawdown, 0.0);
    }
}

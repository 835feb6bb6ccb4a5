use crate::metrics::timeseries::{max_drawdown, CapitalPoint};
use crate::portfolio::Trade;
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

//summary metrics for a backtest
//percentages are expressed in percent (5.0 means 5%)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub win_rate: f64,
    pub total_return: f64,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
}

impl Default for SummaryMetrics {
    fn default() -> Self {
        SummaryMetrics {
            total_trades: 0,
            winning_trades: 0,
            losing_trades: 0,
            win_rate: 0.0,
            total_return: 0.0,
            max_drawdown: 0.0,
            sharpe_ratio: 0.0,
        }
    }
}

impl SummaryMetrics {
    //calculate summary metrics from the trade log and its capital curve
    pub fn from_trades(
        trades: &[Trade],
        capital_curve: &[CapitalPoint],
        initial_capital: f64,
    ) -> Self {
        let total_trades = trades.len();
        let winning_trades = trades.iter().filter(|t| t.is_win()).count();
        let losing_trades = total_trades - winning_trades;

        let win_rate = if total_trades > 0 {
            winning_trades as f64 / total_trades as f64 * 100.0
        } else {
            0.0
        };

        let final_capital = capital_curve
            .last()
            .map(|p| p.capital)
            .unwrap_or(initial_capital);
        let total_return = if initial_capital != 0.0 {
            (final_capital - initial_capital) / initial_capital * 100.0
        } else {
            0.0
        };

        let returns: Vec<f64> = trades.iter().map(|t| t.profit_percent).collect();

        SummaryMetrics {
            total_trades,
            winning_trades,
            losing_trades,
            win_rate,
            total_return,
            max_drawdown: max_drawdown(capital_curve) * 100.0,
            sharpe_ratio: calculate_sharpe_ratio(&returns),
        }
    }

    //prints metrics in a formatted table
    pub fn pretty_print_table(&self) {
        let mut table = Table::new();

        table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));

        table.add_row(Row::new(vec![
            Cell::new("Total Trades"),
            Cell::new(&format!("{}", self.total_trades)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Winning / Losing"),
            Cell::new(&format!("{} / {}", self.winning_trades, self.losing_trades)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Win Rate"),
            Cell::new(&format!("{:.2}%", self.win_rate)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Total Return"),
            Cell::new(&format!("{:.2}%", self.total_return)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Max Drawdown"),
            Cell::new(&format!("{:.2}%", self.max_drawdown)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Sharpe Ratio"),
            Cell::new(&format!("{:.3}", self.sharpe_ratio)),
        ]));

        table.printstd();
    }
}

//mean trade return over its population standard deviation, not annualized
//zero when there is nothing to measure or no dispersion
pub fn calculate_sharpe_ratio(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }

    let mean = returns.mean();
    let std_dev = returns.population_std_dev();

    if std_dev == 0.0 || !std_dev.is_finite() || !mean.is_finite() {
        return 0.0;
    }

    mean / std_dev
}

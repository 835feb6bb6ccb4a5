use crate::data::iso_date;
use crate::portfolio::position::PositionState;
use crate::portfolio::trade::Trade;
use crate::strategy::{ExitSignal, SignalKind};

//capital book of a single-position backtest
#[derive(Debug, Clone)]
pub struct Account {
    //capital before any trade
    pub initial_capital: f64,

    //capital after every realized trade
    pub capital: f64,

    //units bought on every entry
    pub position_size: f64,

    //flat or long
    pub position: PositionState,

    //completed round trips in closing order
    pub trade_log: Vec<Trade>,
}

impl Account {
    pub fn new(initial_capital: f64, position_size: f64) -> Self {
        Account {
            initial_capital,
            capital: initial_capital,
            position_size,
            position: PositionState::Flat,
            trade_log: Vec::new(),
        }
    }

    //applies one signal to the position state machine
    //  flat + buy  -> long at the signal price
    //  long + sell -> flat, realizing a trade at the signal price
    //every other combination leaves the state untouched
    //returns the trade closed by this signal, if any
    pub fn process_signal(&mut self, signal: &ExitSignal) -> Option<&Trade> {
        let state = std::mem::take(&mut self.position);
        let mut closed = false;

        self.position = match (state, signal.signal) {
            (PositionState::Flat, SignalKind::Buy) => PositionState::Long {
                entry_price: signal.price,
                entry_date: iso_date(signal.timestamp),
            },
            (
                PositionState::Long {
                    entry_price,
                    entry_date,
                },
                SignalKind::Sell,
            ) => {
                let trade = Trade::close(
                    entry_date,
                    entry_price,
                    iso_date(signal.timestamp),
                    signal.price,
                    self.position_size,
                );
                self.capital += trade.profit;
                self.trade_log.push(trade);
                closed = true;
                PositionState::Flat
            }
            (state, _) => state,
        };

        if closed {
            self.trade_log.last()
        } else {
            None
        }
    }

    //returns the total return as a percentage of initial capital
    pub fn total_return(&self) -> f64 {
        if self.initial_capital == 0.0 {
            return 0.0;
        }
        (self.capital - self.initial_capital) / self.initial_capital * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const T1: i64 = 1_704_067_200_000;
    const T2: i64 = T1 + 86_400_000;
    const T3: i64 = T2 + 86_400_000;

    #[test]
    fn buy_then_sell_closes_a_trade() {
        let mut account = Account::new(10_000.0, 1.0);

        assert!(account.process_signal(&ExitSignal::buy(T1, 10.0, "RSI")).is_none());
        assert_eq!(account.position.entry_price(), Some(10.0));

        let trade = account
            .process_signal(&ExitSignal::sell(T2, 15.0, "RSI"))
            .cloned()
            .unwrap();
        assert_eq!(trade.entry_date, "2024-01-01");
        assert_eq!(trade.exit_date, "2024-01-02");
        assert_relative_eq!(trade.profit, 5.0);
        assert_relative_eq!(trade.profit_percent, 50.0);

        assert!(account.position.is_flat());
        assert_relative_eq!(account.capital, 10_005.0);
        assert_relative_eq!(account.total_return(), 0.05);
    }

    #[test]
    fn buy_while_long_is_ignored() {
        let mut account = Account::new(10_000.0, 1.0);
        account.process_signal(&ExitSignal::buy(T1, 10.0, "RSI"));
        assert!(account.process_signal(&ExitSignal::buy(T2, 8.0, "RSI")).is_none());

        // cost basis stays at the first entry
        assert_eq!(account.position.entry_price(), Some(10.0));
        assert!(account.trade_log.is_empty());
    }

    #[test]
    fn sell_while_flat_is_ignored() {
        let mut account = Account::new(10_000.0, 1.0);
        assert!(account.process_signal(&ExitSignal::sell(T1, 10.0, "RSI")).is_none());
        assert!(account.position.is_flat());
        assert!(account.trade_log.is_empty());
        assert_eq!(account.capital, 10_000.0);
    }

    #[test]
    fn hold_never_transitions() {
        let hold = ExitSignal::new(T1, 10.0, "RSI", SignalKind::Hold, 0.5, "");
        let mut account = Account::new(10_000.0, 1.0);
        account.process_signal(&hold);
        assert!(account.position.is_flat());

        account.process_signal(&ExitSignal::buy(T2, 10.0, "RSI"));
        account.process_signal(&hold);
        assert!(account.position.is_long());
    }

    #[test]
    fn position_size_scales_profit() {
        let mut account = Account::new(1_000.0, 3.0);
        account.process_signal(&ExitSignal::buy(T1, 20.0, "Trend"));
        account.process_signal(&ExitSignal::sell(T2, 18.0, "Trend"));
        account.process_signal(&ExitSignal::sell(T3, 25.0, "Trend"));

        assert_eq!(account.trade_log.len(), 1);
        assert_relative_eq!(account.trade_log[0].profit, -6.0);
        assert_relative_eq!(account.capital, 994.0);
    }

    #[test]
    fn zero_capital_has_zero_return() {
        assert_eq!(Account::new(0.0, 1.0).total_return(), 0.0);
    }
}

use serde::{Deserialize, Serialize};

//a completed round trip, created when a sell closes an open position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub entry_date: String,
    pub exit_date: String,
    pub entry_price: f64,
    pub exit_price: f64,
    //currency units, scaled by position size
    pub profit: f64,
    pub profit_percent: f64,
}

impl Trade {
    //closes a round trip at exit_price
    pub fn close(
        entry_date: String,
        entry_price: f64,
        exit_date: String,
        exit_price: f64,
        position_size: f64,
    ) -> Self {
        Trade {
            entry_date,
            exit_date,
            entry_price,
            exit_price,
            profit: (exit_price - entry_price) * position_size,
            profit_percent: (exit_price - entry_price) / entry_price * 100.0,
        }
    }

    //a trade wins when it realizes a strictly positive profit
    pub fn is_win(&self) -> bool {
        self.profit > 0.0
    }
}

use serde::{Deserialize, Serialize};

//position state of the single-position backtest
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum PositionState {
    //no open position
    #[default]
    Flat,
    //one open position bought at entry_price
    Long { entry_price: f64, entry_date: String },
}

impl PositionState {
    //returns true if no position is open
    pub fn is_flat(&self) -> bool {
        matches!(self, PositionState::Flat)
    }

    //returns true if a position is open
    pub fn is_long(&self) -> bool {
        !self.is_flat()
    }

    //cost basis of the open position, if any
    pub fn entry_price(&self) -> Option<f64> {
        match self {
            PositionState::Flat => None,
            PositionState::Long { entry_price, .. } => Some(*entry_price),
        }
    }
}

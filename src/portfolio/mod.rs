pub mod account;
pub mod position;
pub mod trade;

pub use account::Account;
pub use position::PositionState;
pub use trade::Trade;

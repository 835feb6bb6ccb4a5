//pure indicator functions over close series
//every function returns one value per input close, with no look-ahead

pub mod bollinger;
pub mod moving_average;
pub mod rsi;

pub use bollinger::{
    bollinger_bands, BollingerBand, DEFAULT_BOLLINGER_MULTIPLIER, DEFAULT_BOLLINGER_PERIOD,
};
pub use moving_average::sma;
pub use rsi::{rsi, DEFAULT_RSI_PERIOD, NEUTRAL_RSI};

pub mod bollinger_touch;
pub mod dispatcher;
pub mod ma_crossover;
pub mod rsi_threshold;
pub mod signal;
pub mod trend_momentum;

use crate::data::PriceBar;

pub use dispatcher::{build_generator, compute_exit_points, resolve};
pub use signal::{clamp_confidence, ExitSignal, SignalKind};

//signal generator interface that all strategies implement
//a generator walks the series once and fires only on the bar where its
//condition flips, never on every bar where the condition merely holds
pub trait SignalGenerator: Send + Sync {
    //returns signals in the series' timestamp order
    fn generate(&self, series: &[PriceBar]) -> Vec<ExitSignal>;

    //returns the label stamped on emitted signals
    fn name(&self) -> &str;
}

pub mod summary;
pub mod timeseries;

pub use summary::{calculate_sharpe_ratio, SummaryMetrics};
pub use timeseries::{calculate_capital_curve, max_drawdown, CapitalPoint};

pub mod bar;
pub mod loader;
pub mod synthetic;

pub use bar::{closes, iso_date, PriceBar};
pub use loader::{load, load_csv, load_reader, parse_timestamp};
pub use synthetic::{generate_sample, generate_synthetic};

use crate::data::bar::PriceBar;
use chrono::{Days, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

//baseline price of every synthetic series
pub const BASELINE_PRICE: f64 = 100.0;

//centre of the daily delta distribution, slightly below 0.5 for upward drift
const DRIFT_CENTER: f64 = 0.48;
const DELTA_SCALE: f64 = 3.0;
const NOISE_SCALE: f64 = 2.0;
const VOLUME_SPAN: f64 = 1_000_000.0;
const VOLUME_FLOOR: f64 = 500_000.0;

//upfront allocation bound, longer series grow on demand
const PREALLOCATED_DAYS: usize = 100_000;

//generates one bar per calendar day starting at start_date
//demo and fixture data only, every random draw comes from the supplied rng
pub fn generate_synthetic<R: Rng + ?Sized>(
    num_days: usize,
    start_date: NaiveDate,
    rng: &mut R,
) -> Vec<PriceBar> {
    let mut bars = Vec::with_capacity(num_days.min(PREALLOCATED_DAYS));
    let mut price = BASELINE_PRICE;

    for day in 0..num_days {
        let Some(date) = start_date.checked_add_days(Days::new(day as u64)) else {
            break;
        };

        let change = (rng.gen::<f64>() - DRIFT_CENTER) * DELTA_SCALE;
        let noise = rng.gen::<f64>() * NOISE_SCALE;

        let open = price;
        let close = price + change;
        let high = open.max(close) + noise;
        let low = open.min(close) - noise;
        let volume = (rng.gen::<f64>() * VOLUME_SPAN).floor() + VOLUME_FLOOR;

        let timestamp = date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or_default();

        bars.push(PriceBar::new(
            timestamp,
            date.format("%Y-%m-%d").to_string(),
            open,
            high,
            low,
            close,
            Some(volume),
        ));

        price = close;
    }

    bars
}

//sample series of num_days bars ending yesterday, seeded for reproducibility
pub fn generate_sample(num_days: usize, seed: u64) -> Vec<PriceBar> {
    let today = Utc::now().date_naive();
    let start = today
        .checked_sub_days(Days::new(num_days as u64))
        .unwrap_or(today);
    let mut rng = StdRng::seed_from_u64(seed);
    generate_synthetic(num_days, start, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn same_seed_same_series() {
        let a = generate_synthetic(50, start(), &mut StdRng::seed_from_u64(7));
        let b = generate_synthetic(50, start(), &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn bars_are_chained_and_bracketed() {
        let bars = generate_synthetic(120, start(), &mut StdRng::seed_from_u64(1));
        assert_eq!(bars.len(), 120);
        assert_eq!(bars[0].open, BASELINE_PRICE);

        for pair in bars.windows(2) {
            assert_eq!(pair[1].open, pair[0].close);
            assert_eq!(pair[1].timestamp - pair[0].timestamp, 86_400_000);
        }
        for bar in &bars {
            assert!(bar.high >= bar.open.max(bar.close));
            assert!(bar.low <= bar.open.min(bar.close));
            let volume = bar.volume.unwrap();
            assert!((VOLUME_FLOOR..VOLUME_FLOOR + VOLUME_SPAN).contains(&volume));
        }
    }

    #[test]
    fn dates_follow_the_calendar() {
        let bars = generate_synthetic(3, start(), &mut StdRng::seed_from_u64(3));
        let dates: Vec<_> = bars.iter().map(|b| b.date.as_str()).collect();
        assert_eq!(dates, ["2024-01-01", "2024-01-02", "2024-01-03"]);
        assert_eq!(bars[0].iso_date(), "2024-01-01");
    }

    #[test]
    fn zero_days_is_empty() {
        assert!(generate_sample(0, 1).is_empty());
    }

    #[test]
    fn stops_at_the_last_calendar_date() {
        let start = NaiveDate::MAX.checked_sub_days(Days::new(2)).unwrap();
        let bars = generate_synthetic(usize::MAX, start, &mut StdRng::seed_from_u64(5));
        assert_eq!(bars.len(), 3);
    }

    #[test]
    fn sample_ends_before_today() {
        let bars = generate_sample(10, 42);
        assert_eq!(bars.len(), 10);
        let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        assert!(bars.last().unwrap().date < today);
    }
}

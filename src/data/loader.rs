use crate::data::bar::PriceBar;
use crate::error::{EngineError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

//column positions resolved from the header row
#[derive(Debug, Default)]
struct ColumnMap {
    width: usize,
    date: Option<usize>,
    timestamp: Option<usize>,
    open: Option<usize>,
    high: Option<usize>,
    low: Option<usize>,
    close: Option<usize>,
    volume: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Self {
        let mut map = ColumnMap {
            width: headers.len(),
            ..Default::default()
        };

        for (index, name) in headers.iter().enumerate() {
            let slot = match name.trim().to_lowercase().as_str() {
                "date" => &mut map.date,
                "timestamp" => &mut map.timestamp,
                "open" => &mut map.open,
                "high" => &mut map.high,
                "low" => &mut map.low,
                "close" => &mut map.close,
                "volume" => &mut map.volume,
                _ => continue,
            };
            //first occurrence wins
            if slot.is_none() {
                *slot = Some(index);
            }
        }

        map
    }

    //parses one data row, returning none for rows that must be dropped
    fn parse_row(&self, record: &StringRecord) -> Option<PriceBar> {
        if record.len() < self.width {
            return None;
        }

        let close = field_f64(record, self.close)?;

        //date wins over timestamp when both are present and non-empty
        let date = field(record, self.date)
            .filter(|value| !value.is_empty())
            .or_else(|| field(record, self.timestamp))?;
        let timestamp = parse_timestamp(date)?;

        Some(PriceBar::new(
            timestamp,
            date.to_string(),
            field_f64(record, self.open).unwrap_or(close),
            field_f64(record, self.high).unwrap_or(close),
            field_f64(record, self.low).unwrap_or(close),
            close,
            field_f64(record, self.volume),
        ))
    }
}

fn field(record: &StringRecord, index: Option<usize>) -> Option<&str> {
    index.and_then(|i| record.get(i)).map(str::trim)
}

fn field_f64(record: &StringRecord, index: Option<usize>) -> Option<f64> {
    field(record, index)
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| !value.is_nan())
}

//parses a calendar date or date-time into epoch milliseconds (utc)
//bare integers are taken as epoch milliseconds
pub fn parse_timestamp(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(millis) = value.parse::<i64>() {
        return Some(millis);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp_millis());
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc().timestamp_millis());
        }
    }

    None
}

//loads bars from any csv source
//malformed rows are dropped, an input yielding no bars is an EmptySeries error
pub fn load_reader<R: Read>(source: R) -> Result<Vec<PriceBar>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let columns = ColumnMap::from_headers(reader.headers()?);
    let mut bars = Vec::new();

    for (index, result) in reader.records().enumerate() {
        let line = index + 2;
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                debug!("Skipping unreadable row at line {}: {}", line, err);
                continue;
            }
        };

        match columns.parse_row(&record) {
            Some(bar) => bars.push(bar),
            None => debug!("Skipping invalid row at line {}", line),
        }
    }

    if bars.is_empty() {
        return Err(EngineError::EmptySeries);
    }

    //sort by timestamp to ensure chronological order
    bars.sort_by_key(|bar| bar.timestamp);

    debug!("Loaded {} price bars", bars.len());
    Ok(bars)
}

//loads bars from csv text
pub fn load(raw: &str) -> Result<Vec<PriceBar>> {
    load_reader(raw.as_bytes())
}

//loads bars from a csv file
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<PriceBar>> {
    let file = File::open(path.as_ref())?;
    load_reader(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn drops_short_row_and_sorts() {
        let raw = "date,open,high,low,close,volume\n\
                   2024-01-05,10,11,9,10.5,100\n\
                   2024-01-02,10,11,9,10.1,100\n\
                   2024-01-03,10\n\
                   2024-01-04,10,11,9,10.3,100\n\
                   2024-01-01,10,11,9,10.0,100\n";

        let bars = load(raw).unwrap();
        assert_eq!(bars.len(), 4);
        let dates: Vec<_> = bars.iter().map(|b| b.date.as_str()).collect();
        assert_eq!(dates, ["2024-01-01", "2024-01-02", "2024-01-04", "2024-01-05"]);
        assert!(bars.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn header_is_case_insensitive_and_order_independent() {
        let raw = "Close,Extra,DATE,Low,High,Open\n12.5,x,2024-02-01,12,13,12.2\n";
        let bars = load(raw).unwrap();
        assert_eq!(bars.len(), 1);
        let bar = &bars[0];
        assert_eq!(bar.close, 12.5);
        assert_eq!(bar.open, 12.2);
        assert_eq!(bar.high, 13.0);
        assert_eq!(bar.low, 12.0);
        assert_eq!(bar.volume, None);
        assert_eq!(bar.iso_date(), "2024-02-01");
    }

    #[test]
    fn drops_row_with_unparseable_close() {
        let raw = "date,open,high,low,close\n2024-01-01,1,1,1,abc\n2024-01-02,1,1,1,2\n";
        let bars = load(raw).unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].close, 2.0);
    }

    #[test]
    fn timestamp_column_is_used_without_date() {
        let raw = "timestamp,close\n2024-01-02T00:00:00Z,5\n1704067200000,4\n";
        let bars = load(raw).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].timestamp, 1_704_067_200_000);
        assert_eq!(bars[0].close, 4.0);
        assert_eq!(bars[1].iso_date(), "2024-01-02");
    }

    #[test]
    fn empty_input_is_empty_series() {
        assert!(matches!(load(""), Err(EngineError::EmptySeries)));
        assert!(matches!(
            load("date,open,high,low,close\n"),
            Err(EngineError::EmptySeries)
        ));
        assert!(matches!(
            load("date,close\nnot-a-date,1\n"),
            Err(EngineError::EmptySeries)
        ));
    }

    #[test]
    fn parses_common_date_shapes() {
        let midnight = 1_704_067_200_000;
        assert_eq!(parse_timestamp("2024-01-01"), Some(midnight));
        assert_eq!(parse_timestamp("2024/01/01"), Some(midnight));
        assert_eq!(parse_timestamp("01/01/2024"), Some(midnight));
        assert_eq!(parse_timestamp("2024-01-01 00:00:00"), Some(midnight));
        assert_eq!(parse_timestamp("2024-01-01T01:00:00+01:00"), Some(midnight));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "date,open,high,low,close,volume").unwrap();
        writeln!(file, "2024-01-01,1,2,0.5,1.5,1000").unwrap();
        let bars = load_csv(file.path()).unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].volume, Some(1000.0));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = load_csv("/definitely/not/here.csv");
        assert!(matches!(result, Err(EngineError::Io(_))));
    }
}

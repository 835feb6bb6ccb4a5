use crate::data::iso_date;
use crate::error::Result;
use crate::portfolio::Trade;
use crate::strategy::ExitSignal;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const SIGNALS_HEADER: &str = "Date,Price,Algorithm,Signal,Confidence,Reason";
pub const TRADES_HEADER: &str =
    "entry_date,exit_date,entry_price,exit_price,profit,profit_percent";

//quotes a field, doubling embedded quotes
fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

//quotes a field only when it holds a delimiter, quote or line break
fn field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        quoted(value)
    } else {
        value.to_string()
    }
}

//writes signals as Date,Price,Algorithm,Signal,Confidence,Reason rows
//the date is the iso date of the signal, the reason is always quoted and the
//algorithm label only when it needs to be
pub fn write_signals_csv<W: Write>(writer: &mut W, signals: &[ExitSignal]) -> Result<()> {
    writeln!(writer, "{}", SIGNALS_HEADER)?;

    for signal in signals {
        writeln!(
            writer,
            "{},{},{},{},{:.2},{}",
            iso_date(signal.timestamp),
            signal.price,
            field(&signal.algorithm),
            signal.signal,
            signal.confidence,
            quoted(&signal.reason)
        )?;
    }

    Ok(())
}

//writes completed trades, one row per round trip
pub fn write_trades_csv<W: Write>(writer: &mut W, trades: &[Trade]) -> Result<()> {
    writeln!(writer, "{}", TRADES_HEADER)?;

    for trade in trades {
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            trade.entry_date,
            trade.exit_date,
            trade.entry_price,
            trade.exit_price,
            trade.profit,
            trade.profit_percent
        )?;
    }

    Ok(())
}

pub fn save_signals_csv(signals: &[ExitSignal], path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_signals_csv(&mut writer, signals)?;
    writer.flush()?;
    Ok(())
}

pub fn save_trades_csv(trades: &[Trade], path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_trades_csv(&mut writer, trades)?;
    writer.flush()?;
    Ok(())
}

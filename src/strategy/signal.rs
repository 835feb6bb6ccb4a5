use crate::data::PriceBar;
use serde::{Deserialize, Serialize};
use std::fmt;

//direction of a signal
//hold is reserved, no generator emits it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    Buy,
    Sell,
    Hold,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Buy => "buy",
            SignalKind::Sell => "sell",
            SignalKind::Hold => "hold",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//a directional trade signal at one bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitSignal {
    pub timestamp: i64,
    pub price: f64,
    pub algorithm: String,
    pub signal: SignalKind,
    pub confidence: f64,
    pub reason: String,
}

impl ExitSignal {
    pub fn new(
        timestamp: i64,
        price: f64,
        algorithm: impl Into<String>,
        signal: SignalKind,
        confidence: f64,
        reason: impl Into<String>,
    ) -> Self {
        ExitSignal {
            timestamp,
            price,
            algorithm: algorithm.into(),
            signal,
            confidence: clamp_confidence(confidence),
            reason: reason.into(),
        }
    }

    //signal at a bar's close
    pub fn at_bar(
        bar: &PriceBar,
        algorithm: &str,
        signal: SignalKind,
        confidence: f64,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(bar.timestamp, bar.close, algorithm, signal, confidence, reason)
    }

    pub fn buy(timestamp: i64, price: f64, algorithm: impl Into<String>) -> Self {
        Self::new(timestamp, price, algorithm, SignalKind::Buy, 1.0, "")
    }

    pub fn sell(timestamp: i64, price: f64, algorithm: impl Into<String>) -> Self {
        Self::new(timestamp, price, algorithm, SignalKind::Sell, 1.0, "")
    }
}

//truncates a raw confidence into [0, 1], nan reads as no confidence
pub fn clamp_confidence(raw: f64) -> f64 {
    if raw.is_nan() {
        0.0
    } else {
        raw.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(clamp_confidence(0.4), 0.4);
        assert_eq!(clamp_confidence(7.0), 1.0);
        assert_eq!(clamp_confidence(-0.2), 0.0);
        assert_eq!(clamp_confidence(f64::INFINITY), 1.0);
        assert_eq!(clamp_confidence(f64::NAN), 0.0);
    }

    #[test]
    fn constructor_clamps() {
        let signal = ExitSignal::new(1, 2.0, "RSI", SignalKind::Buy, 3.5, "x");
        assert_eq!(signal.confidence, 1.0);
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&SignalKind::Sell).unwrap();
        assert_eq!(json, "\"sell\"");
        assert_eq!(SignalKind::Hold.to_string(), "hold");
    }
}

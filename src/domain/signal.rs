//! Per-bar crossover signal.
//!
//! The signal is level-based: `Buy` is emitted on every bar where the fast
//! average sits above the slow one, not only on the bar where it crosses.
//! The simulator treats repeated signals as no-ops, so a persistent `Buy`
//! keeps the portfolio invested.

use chrono::NaiveDate;
use std::fmt;

use crate::domain::enrichment::EnrichedBar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Signal {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl Signal {
    /// Buy if fast > slow, Sell if fast < slow, Hold on equality or when either
    /// average is still undefined.
    pub fn classify(sma_fast: Option<f64>, sma_slow: Option<f64>) -> Signal {
        match (sma_fast, sma_slow) {
            (Some(fast), Some(slow)) if fast > slow => Signal::Buy,
            (Some(fast), Some(slow)) if fast < slow => Signal::Sell,
            _ => Signal::Hold,
        }
    }

    /// +1 / -1 / 0
    pub fn as_i8(self) -> i8 {
        match self {
            Signal::Buy => 1,
            Signal::Sell => -1,
            Signal::Hold => 0,
        }
    }

    pub fn is_action(self) -> bool {
        self != Signal::Hold
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "buy"),
            Signal::Sell => write!(f, "sell"),
            Signal::Hold => write!(f, "hold"),
        }
    }
}

pub fn generate_signals(bars: &[EnrichedBar]) -> Vec<Signal> {
    bars.iter()
        .map(|b| Signal::classify(b.sma_fast, b.sma_slow))
        .collect()
}

/// A chart marker for a bar carrying a Buy or Sell signal.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalMarker {
    pub date: NaiveDate,
    pub signal: Signal,
    /// Fast SMA at the bar, or the close while it is undefined.
    pub price: f64,
    /// Signal differs from the previous bar's.
    pub is_transition: bool,
}

/// One marker per Buy/Sell bar, matching the level-based signal.
pub fn signal_markers(bars: &[EnrichedBar], signals: &[Signal]) -> Vec<SignalMarker> {
    let mut previous = Signal::Hold;
    let mut markers = Vec::new();

    for (bar, &signal) in bars.iter().zip(signals) {
        if signal.is_action() {
            markers.push(SignalMarker {
                date: bar.date(),
                signal,
                price: bar.sma_fast.unwrap_or(bar.close()),
                is_transition: signal != previous,
            });
        }
        previous = signal;
    }

    markers
}

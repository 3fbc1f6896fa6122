//! Crossover strategy parameters.

pub const DEFAULT_FAST_WINDOW: usize = 50;
pub const DEFAULT_SLOW_WINDOW: usize = 200;
pub const DEFAULT_VOLUME_WINDOW: usize = 30;
pub const DEFAULT_VOLATILITY_WINDOW: usize = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct Strategy {
    pub name: String,
    pub fast_window: usize,
    pub slow_window: usize,
    pub volume_window: usize,
    pub volatility_window: usize,
}

impl Strategy {
    /// Bars needed before both crossover averages are defined.
    pub fn warmup_bars(&self) -> usize {
        self.fast_window.max(self.slow_window)
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy {
            name: format!("SMA {DEFAULT_FAST_WINDOW}/{DEFAULT_SLOW_WINDOW} Crossover"),
            fast_window: DEFAULT_FAST_WINDOW,
            slow_window: DEFAULT_SLOW_WINDOW,
            volume_window: DEFAULT_VOLUME_WINDOW,
            volatility_window: DEFAULT_VOLATILITY_WINDOW,
        }
    }
}

use tracing::info;

/// Trading days per year, used both as the simulated history length and
/// as the annualization factor.
pub const TRADING_DAYS: usize = 252;

/// Risk-free annual rate used in the Sharpe calculation.
pub const RISK_FREE_RATE: f64 = 0.02;

/// Seed for the per-call generator behind the simulated return history.
pub const SIMULATION_SEED: u64 = 42;

/// Daily standard deviation of every simulated asset.
pub const DAILY_VOLATILITY: f64 = 0.01;

/// Weights are accepted when they round to 1.00 at two decimals.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.005;

/// Decimal places shown in the covariance table.
pub const COVARIANCE_DECIMALS: usize = 4;

// ── Window ──────────────────────────────────────────────────────────────────
pub const WINDOW_TITLE: &str = "Advanced Portfolio Manager";
pub const WINDOW_WIDTH: f32 = 500.0;
pub const WINDOW_HEIGHT: f32 = 600.0;

/// Tunables for one analyzer run. `Default` reproduces the stock behaviour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnalyzerConfig {
    pub trading_days: usize,
    pub risk_free_rate: f64,
    pub seed: u64,
    pub daily_volatility: f64,
    pub weight_tolerance: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            trading_days: TRADING_DAYS,
            risk_free_rate: RISK_FREE_RATE,
            seed: SIMULATION_SEED,
            daily_volatility: DAILY_VOLATILITY,
            weight_tolerance: WEIGHT_SUM_TOLERANCE,
        }
    }
}

impl AnalyzerConfig {
    pub fn with_risk_free_rate(mut self, rate: Option<f64>) -> Self {
        if let Some(rate) = rate {
            info!("Overriding risk-free rate: {:.4} -> {:.4}", self.risk_free_rate, rate);
            self.risk_free_rate = rate;
        }
        self
    }

    /// Annualization factor as a float.
    pub fn annualization(&self) -> f64 {
        self.trading_days as f64
    }
}

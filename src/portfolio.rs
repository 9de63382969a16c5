use crate::config::AnalyzerConfig;
use crate::error::AnalysisError;
use crate::input::PortfolioInput;
use crate::simulation::SimulatedReturns;
use serde::Serialize;
use tracing::{debug, info, warn};

// ──────────────────────────────────────────────────────────────────────────────
// Data Structures
// ──────────────────────────────────────────────────────────────────────────────

/// Annualized covariance of asset returns, labeled by ticker on both axes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CovarianceMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CovarianceMatrix {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    /// Copy with every entry rounded to `decimals` places, as shown to the user.
    /// Negative zero is folded into zero so the table never prints "-0.0000".
    pub fn rounded(&self, decimals: usize) -> CovarianceMatrix {
        let scale = 10f64.powi(decimals as i32);
        CovarianceMatrix {
            labels: self.labels.clone(),
            values: self
                .values
                .iter()
                .map(|row| row.iter().map(|v| (v * scale).round() / scale + 0.0).collect())
                .collect(),
        }
    }
}

/// Outcome of evaluating one weight vector.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PortfolioResult {
    pub expected_return: f64,
    /// Annualized standard deviation, never negative.
    pub std_dev: f64,
    /// Raw IEEE-754 quotient: ±inf or NaN when `std_dev` is zero.
    pub sharpe_ratio: f64,
    pub covariance: CovarianceMatrix,
}

impl PortfolioResult {
    pub fn sharpe_is_defined(&self) -> bool {
        self.sharpe_ratio.is_finite()
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Covariance Estimation
// ──────────────────────────────────────────────────────────────────────────────

/// Unbiased sample covariance of the simulated columns, scaled by `annualization`.
fn compute_covariance(
    sim: &SimulatedReturns,
    annualization: f64,
) -> Result<Vec<Vec<f64>>, AnalysisError> {
    let n = sim.num_assets();
    let num_days = sim.num_days();
    if num_days < 2 {
        return Err(AnalysisError::Computation(format!(
            "need at least 2 simulated days to estimate covariance, got {}",
            num_days
        )));
    }

    let means = sim.column_means();

    let mut cov = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in i..n {
            let sum: f64 = sim
                .days
                .iter()
                .map(|row| (row[i] - means[i]) * (row[j] - means[j]))
                .sum();
            let covariance = sum / (num_days as f64 - 1.0) * annualization;
            cov[i][j] = covariance;
            cov[j][i] = covariance;
        }
    }

    if cov.iter().flatten().any(|v| !v.is_finite()) {
        return Err(AnalysisError::Computation(
            "covariance matrix contains non-finite values".to_string(),
        ));
    }

    Ok(cov)
}

// ──────────────────────────────────────────────────────────────────────────────
// Portfolio Statistics
// ──────────────────────────────────────────────────────────────────────────────

fn portfolio_return(weights: &[f64], returns: &[f64]) -> f64 {
    weights.iter().zip(returns.iter()).map(|(w, r)| r * w).sum()
}

/// wᵀ·(C·w)
fn portfolio_variance(weights: &[f64], cov: &[Vec<f64>]) -> f64 {
    let cw: Vec<f64> = cov
        .iter()
        .map(|row| row.iter().zip(weights).map(|(c, w)| c * w).sum())
        .collect();
    weights.iter().zip(&cw).map(|(w, x)| w * x).sum()
}

/// Square root of the variance, clamping small negative values from rounding noise to zero.
fn portfolio_std_dev(variance: f64) -> f64 {
    if variance < 0.0 {
        warn!("Portfolio variance {:e} is negative; clamping to 0", variance);
        0.0
    } else {
        variance.sqrt()
    }
}

fn sharpe_ratio(expected_return: f64, risk_free_rate: f64, std_dev: f64) -> f64 {
    (expected_return - risk_free_rate) / std_dev
}

// ──────────────────────────────────────────────────────────────────────────────
// Top-Level Entry Points
// ──────────────────────────────────────────────────────────────────────────────

/// Parses the three raw form fields and evaluates the portfolio they describe.
pub fn analyze(
    tickers: &str,
    weights: &str,
    returns: &str,
    config: &AnalyzerConfig,
) -> Result<PortfolioResult, AnalysisError> {
    let input = PortfolioInput::parse(tickers, weights, returns, config)?;
    analyze_input(&input, config)
}

/// Evaluates a portfolio from typed input: simulate → covariance → return, risk, Sharpe.
///
/// Any statistic that overflows or turns NaN is a `Computation` error rather than a result.
pub fn analyze_input(
    input: &PortfolioInput,
    config: &AnalyzerConfig,
) -> Result<PortfolioResult, AnalysisError> {
    input.validate(config)?;

    info!("Analyzing portfolio: {:?}", input.tickers);

    let expected_return = portfolio_return(&input.weights, &input.returns);
    if !expected_return.is_finite() {
        return Err(AnalysisError::Computation(format!(
            "expected portfolio return is not a finite number ({})",
            expected_return
        )));
    }

    let sim = SimulatedReturns::generate(&input.returns, config)?;
    let cov = compute_covariance(&sim, config.annualization())?;

    let variance = portfolio_variance(&input.weights, &cov);
    if !variance.is_finite() {
        return Err(AnalysisError::Computation(format!(
            "portfolio variance is not a finite number ({})",
            variance
        )));
    }
    let std_dev = portfolio_std_dev(variance);
    let sharpe = sharpe_ratio(expected_return, config.risk_free_rate, std_dev);

    debug!("variance={:e}", variance);
    info!(
        "E[r]={:.4}, σ={:.4}, Sharpe={:.2}",
        expected_return, std_dev, sharpe
    );

    let result = PortfolioResult {
        expected_return,
        std_dev,
        sharpe_ratio: sharpe,
        covariance: CovarianceMatrix {
            labels: input.tickers.clone(),
            values: cov,
        },
    };
    if !result.sharpe_is_defined() {
        warn!("Sharpe ratio is undefined (std dev = {}): reporting {}", std_dev, sharpe);
    }
    Ok(result)
}

// ──────────────────────────────────────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────────────────────────────────────

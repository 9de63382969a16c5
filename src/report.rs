use crate::config::COVARIANCE_DECIMALS;
use crate::error::AnalysisError;
use crate::portfolio::{CovarianceMatrix, PortfolioResult};
use std::fmt::Write;

/// Renders the multi-section text report shown in the result area and on stdout.
pub fn render_report(result: &PortfolioResult) -> String {
    let mut out = String::from("Portfolio Analysis:\n\n");
    let _ = writeln!(out, "Expected Annual Return: {:.2}%", result.expected_return * 100.0);
    let _ = writeln!(out, "Portfolio Risk (Std Dev): {:.2}%", result.std_dev * 100.0);
    let _ = writeln!(out, "Sharpe Ratio: {}\n", format_ratio(result.sharpe_ratio));
    out.push_str("Covariance Matrix:\n");
    out.push_str(&render_matrix(&result.covariance.rounded(COVARIANCE_DECIMALS)));
    out
}

/// Pretty JSON with full-precision values. Non-finite numbers become `null`.
pub fn render_json(result: &PortfolioResult) -> Result<String, AnalysisError> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Two decimals for finite values, `inf` / `-inf` / `nan` otherwise.
pub fn format_ratio(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{:.2}", value)
    }
}

/// Labeled table: header of right-aligned column labels, then one row per asset.
fn render_matrix(cov: &CovarianceMatrix) -> String {
    let n = cov.len();
    let cells: Vec<Vec<String>> = (0..n)
        .map(|i| (0..n).map(|j| format!("{:.*}", COVARIANCE_DECIMALS, cov.get(i, j))).collect())
        .collect();

    let index_width = cov.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let col_widths: Vec<usize> = (0..n)
        .map(|j| {
            cells
                .iter()
                .map(|row| row[j].len())
                .chain(std::iter::once(cov.labels[j].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(n + 1);

    let mut header = " ".repeat(index_width);
    for (label, w) in cov.labels.iter().zip(&col_widths) {
        let _ = write!(header, "  {:>w$}", label, w = w);
    }
    lines.push(header);

    for (label, row) in cov.labels.iter().zip(&cells) {
        let mut line = format!("{:<w$}", label, w = index_width);
        for (cell, w) in row.iter().zip(&col_widths) {
            let _ = write!(line, "  {:>w$}", cell, w = w);
        }
        lines.push(line);
    }

    lines.join("\n")
}

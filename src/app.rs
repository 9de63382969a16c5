use crate::config::AnalyzerConfig;
use crate::portfolio;
use crate::report;
use tracing::{info, warn};

/// Form state owned by the UI layer. The analyzer itself keeps nothing between clicks.
pub struct App {
    pub config: AnalyzerConfig,
    pub tickers: String,
    pub weights: String,
    pub returns: String,
    pub report: String,
    pub error_msg: Option<String>,
}

impl App {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            tickers: String::new(),
            weights: String::new(),
            returns: String::new(),
            report: String::new(),
            error_msg: None,
        }
    }

    /// Runs one analysis over the current field contents.
    ///
    /// On success the report text is replaced; on failure it is left as is and
    /// `error_msg` holds what the error dialog should say.
    pub fn calculate(&mut self) {
        match portfolio::analyze(&self.tickers, &self.weights, &self.returns, &self.config) {
            Ok(result) => {
                self.report = report::render_report(&result);
                self.error_msg = None;
                info!("Report updated for {} assets", result.covariance.len());
            }
            Err(e) => {
                warn!("Analysis rejected ({:?}): {}", e.kind(), e);
                self.error_msg = Some(e.user_message());
            }
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error_msg = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(t: &str, w: &str, r: &str) -> App {
        let mut app = App::new(AnalyzerConfig::default());
        app.tickers = t.to_string();
        app.weights = w.to_string();
        app.returns = r.to_string();
        app
    }

    #[test]
    fn test_calculate_fills_report() {
        let mut app = filled("AAPL,MSFT", "0.5,0.5", "0.10,0.20");
        app.calculate();
        assert!(app.error_msg.is_none());
        assert!(app.report.starts_with("Portfolio Analysis:"));
        assert!(app.report.contains("Expected Annual Return: 15.00%"));
    }

    #[test]
    fn test_failed_calculation_keeps_previous_report() {
        let mut app = filled("AAPL,MSFT", "0.5,0.5", "0.10,0.20");
        app.calculate();
        let before = app.report.clone();

        app.weights = "0.5,0.6".to_string();
        app.calculate();
        assert_eq!(app.report, before);
        assert_eq!(
            app.error_msg.as_deref().map(|m| m.starts_with("Weights must add up to 1.0")),
            Some(true)
        );

        app.dismiss_error();
        assert!(app.error_msg.is_none());
    }

    #[test]
    fn test_length_mismatch_message() {
        let mut app = filled("A,B", "1.0", "0.1,0.2");
        app.calculate();
        let msg = app.error_msg.unwrap();
        assert!(msg.starts_with("Number of stocks, returns, and weights must match"), "{}", msg);
    }

    #[test]
    fn test_parse_failure_names_the_token_without_prefix() {
        let mut app = filled("A,B", "abc,0.5", "0.1,0.2");
        app.calculate();
        let msg = app.error_msg.unwrap();
        assert!(msg.starts_with("could not convert weight #1 ('abc')"), "{}", msg);
        assert!(!msg.contains("Something went wrong"));
    }

    #[test]
    fn test_computation_failure_is_prefixed() {
        let mut app = filled("A,B", "0.5,0.5", "inf,0.1");
        app.calculate();
        assert!(app.error_msg.unwrap().starts_with("Something went wrong:\n"));
        assert!(app.report.is_empty());
    }

    #[test]
    fn test_success_clears_stale_error() {
        let mut app = filled("A", "abc", "0.1");
        app.calculate();
        assert!(app.error_msg.is_some());

        app.weights = "1".to_string();
        app.calculate();
        assert!(app.error_msg.is_none());
        assert!(!app.report.is_empty());
    }
}

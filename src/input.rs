use crate::config::AnalyzerConfig;
use crate::error::AnalysisError;
use tracing::debug;

/// Validated user input: one ticker, weight and expected annual return per asset.
#[derive(Clone, Debug, PartialEq)]
pub struct PortfolioInput {
    pub tickers: Vec<String>,
    pub weights: Vec<f64>,
    pub returns: Vec<f64>,
}

impl PortfolioInput {
    /// Parses the three comma-separated form fields and validates them.
    ///
    /// Checks run in order and the first failure wins:
    ///   1. every token converts (tickers non-empty, weights/returns numeric)
    ///   2. all three lists have the same length
    ///   3. weights sum to 1.0 within `config.weight_tolerance`
    pub fn parse(
        tickers: &str,
        weights: &str,
        returns: &str,
        config: &AnalyzerConfig,
    ) -> Result<Self, AnalysisError> {
        let tickers = parse_tickers(tickers)?;
        let weights = parse_numbers(weights, "weight")?;
        let returns = parse_numbers(returns, "return")?;

        let input = Self { tickers, weights, returns };
        input.validate(config)?;
        Ok(input)
    }

    /// Length and weight-sum checks on already-typed input.
    pub fn validate(&self, config: &AnalyzerConfig) -> Result<(), AnalysisError> {
        if self.tickers.len() != self.weights.len() || self.weights.len() != self.returns.len() {
            return Err(AnalysisError::LengthMismatch {
                tickers: self.tickers.len(),
                weights: self.weights.len(),
                returns: self.returns.len(),
            });
        }

        let sum = self.weight_sum();
        if !((sum - 1.0).abs() < config.weight_tolerance) {
            return Err(AnalysisError::WeightSumInvalid { sum });
        }

        debug!("Validated {} assets (weight sum {:.6})", self.len(), sum);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn weight_sum(&self) -> f64 {
        self.weights.iter().sum()
    }
}

fn parse_tickers(raw: &str) -> Result<Vec<String>, AnalysisError> {
    raw.split(',')
        .enumerate()
        .map(|(i, s)| {
            let s = s.trim();
            if s.is_empty() {
                Err(AnalysisError::EmptyTicker { position: i + 1 })
            } else {
                Ok(s.to_string())
            }
        })
        .collect()
}

fn parse_numbers(raw: &str, field: &'static str) -> Result<Vec<f64>, AnalysisError> {
    raw.split(',')
        .enumerate()
        .map(|(i, token)| {
            let token = token.trim();
            token.parse::<f64>().map_err(|source| AnalysisError::Parse {
                field,
                position: i + 1,
                token: token.to_string(),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn parse(t: &str, w: &str, r: &str) -> Result<PortfolioInput, AnalysisError> {
        PortfolioInput::parse(t, w, r, &AnalyzerConfig::default())
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let input = parse(" AAPL , MSFT", "0.6, 0.4 ", "0.10 ,0.08").unwrap();
        assert_eq!(input.tickers, vec!["AAPL", "MSFT"]);
        assert_eq!(input.weights, vec![0.6, 0.4]);
        assert_eq!(input.returns, vec![0.10, 0.08]);
    }

    #[test]
    fn test_non_numeric_weight_is_parse_error() {
        let err = parse("A,B", "abc,0.5", "0.1,0.2").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        let msg = err.to_string();
        assert!(msg.contains("weight #1"), "unexpected message: {}", msg);
        assert!(msg.contains("'abc'"), "unexpected message: {}", msg);
    }

    #[test]
    fn test_non_numeric_return_is_parse_error() {
        let err = parse("A,B", "0.5,0.5", "0.1,ten").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("return #2"));
    }

    #[test]
    fn test_empty_ticker_is_parse_error() {
        let err = parse("A,,C", "0.3,0.3,0.4", "0.1,0.1,0.1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(matches!(err, AnalysisError::EmptyTicker { position: 2 }));
    }

    #[test]
    fn test_parse_error_wins_over_length_mismatch() {
        let err = parse("A,B,C", "x", "0.1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_length_mismatch() {
        let err = parse("A,B", "1.0", "0.1,0.2").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthMismatch);
        assert!(matches!(
            err,
            AnalysisError::LengthMismatch { tickers: 2, weights: 1, returns: 2 }
        ));

        let err = parse("A,B", "0.5,0.5", "0.1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthMismatch);
    }

    #[test]
    fn test_length_mismatch_wins_over_weight_sum() {
        let err = parse("A,B", "0.2", "0.1,0.2").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthMismatch);
    }

    #[test]
    fn test_weight_sum_within_tolerance_accepted() {
        assert!(parse("A,B", "0.5,0.499", "0.1,0.2").is_ok());
        assert!(parse("A,B", "0.5,0.504", "0.1,0.2").is_ok());
        assert!(parse("A", "1", "0.1").is_ok());
    }

    #[test]
    fn test_weight_sum_outside_tolerance_rejected() {
        for w in ["0.5,0.49", "0.5,0.51", "0.2,0.2", "NaN,0.5"] {
            let err = parse("A,B", w, "0.1,0.2").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::WeightSumInvalid, "weights {}", w);
        }
    }

    #[test]
    fn test_negative_weights_allowed_when_sum_is_one() {
        let input = parse("A,B", "1.5,-0.5", "0.1,0.2").unwrap();
        assert_eq!(input.len(), 2);
    }
}

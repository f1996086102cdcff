//! Token budget gate.
//!
//! Extracted text is measured against a per-model token ceiling before it is
//! returned. The tokenizer itself is an external collaborator behind the
//! [`TokenCounter`] trait; the crate ships a character-based estimate as the
//! default implementation.

use crate::error::{Error, Result};
use std::collections::HashMap;

/// Result of counting tokens for a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TokenUsage {
    /// Tokens counted in the text
    pub token_count: u32,
    /// Configured ceiling for the model
    pub model_limit: u32,
}

impl TokenUsage {
    /// Check whether the count exceeds the model limit.
    pub fn exceeds_limit(&self) -> bool {
        self.token_count > self.model_limit
    }

    /// Tokens remaining under the limit (0 when exceeded).
    pub fn tokens_remaining(&self) -> u32 {
        self.model_limit.saturating_sub(self.token_count)
    }
}

/// Collaborator that counts tokens for a model.
///
/// Implement this to plug in a real tokenizer; the trait deliberately knows
/// nothing about encodings or model families.
pub trait TokenCounter {
    /// Count tokens in `text` for `model`, returning the count together
    /// with the model's limit.
    fn count(&self, text: &str, model: &str) -> Result<TokenUsage>;
}

/// How counter failures are treated by the gate.
///
/// A failing *counter* is an infrastructure problem, not a property of the
/// document, so by default it is advisory: logged, and extraction proceeds
/// with the already-sanitized text. An exceeded *budget* always fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BudgetEnforcement {
    /// Log counter failures and continue without usage data
    #[default]
    Advisory,
    /// Propagate counter failures as errors
    Strict,
}

/// Character-count token estimate, roughly 4 characters per token for
/// English text.
#[derive(Debug, Clone)]
pub struct CharEstimateCounter {
    limits: HashMap<String, u32>,
    default_limit: u32,
}

impl CharEstimateCounter {
    /// Create a counter with the stock model-limit table.
    pub fn new() -> Self {
        let mut limits = HashMap::new();
        limits.insert("gpt-3.5-turbo".to_string(), 4096);
        limits.insert("gpt-4".to_string(), 8192);
        Self {
            limits,
            default_limit: 4096,
        }
    }

    /// Register or override a model's limit.
    pub fn with_limit(mut self, model: impl Into<String>, limit: u32) -> Self {
        self.limits.insert(model.into(), limit);
        self
    }

    /// Set the limit used for unknown models.
    pub fn with_default_limit(mut self, limit: u32) -> Self {
        self.default_limit = limit;
        self
    }

    fn limit_for(&self, model: &str) -> u32 {
        self.limits.get(model).copied().unwrap_or(self.default_limit)
    }
}

impl Default for CharEstimateCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenCounter for CharEstimateCounter {
    fn count(&self, text: &str, model: &str) -> Result<TokenUsage> {
        let token_count = (text.chars().count() / 4) as u32;
        Ok(TokenUsage {
            token_count,
            model_limit: self.limit_for(model),
        })
    }
}

/// Run the gate: count tokens and fail with [`Error::BudgetExceeded`] when
/// over the limit.
///
/// Counter failures follow the enforcement policy: advisory mode logs and
/// returns `None`, strict mode propagates the error.
pub fn enforce(
    text: &str,
    model: &str,
    counter: &dyn TokenCounter,
    enforcement: BudgetEnforcement,
) -> Result<Option<TokenUsage>> {
    match counter.count(text, model) {
        Ok(usage) => {
            if usage.exceeds_limit() {
                return Err(Error::BudgetExceeded {
                    token_count: usage.token_count,
                    model_limit: usage.model_limit,
                });
            }
            log::debug!(
                "token budget ok: {}/{} for model {}",
                usage.token_count,
                usage.model_limit,
                model
            );
            Ok(Some(usage))
        }
        Err(err) if enforcement == BudgetEnforcement::Strict => Err(err),
        Err(err) => {
            log::warn!("token counting failed, continuing without usage: {err}");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counter stub returning a fixed usage or a fixed failure.
    struct StubCounter {
        usage: Option<TokenUsage>,
    }

    impl TokenCounter for StubCounter {
        fn count(&self, _text: &str, _model: &str) -> Result<TokenUsage> {
            self.usage
                .ok_or_else(|| Error::TokenCount("tokenizer unavailable".to_string()))
        }
    }

    #[test]
    fn test_over_budget_is_an_error() {
        let counter = StubCounter {
            usage: Some(TokenUsage {
                token_count: 5000,
                model_limit: 4096,
            }),
        };
        let err = enforce("text", "gpt-4", &counter, BudgetEnforcement::Advisory).unwrap_err();
        match err {
            Error::BudgetExceeded {
                token_count,
                model_limit,
            } => {
                assert_eq!(token_count, 5000);
                assert_eq!(model_limit, 4096);
            }
            other => panic!("expected BudgetExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_under_budget_passes() {
        let counter = StubCounter {
            usage: Some(TokenUsage {
                token_count: 100,
                model_limit: 4096,
            }),
        };
        let usage = enforce("text", "gpt-4", &counter, BudgetEnforcement::Advisory)
            .unwrap()
            .unwrap();
        assert_eq!(usage.token_count, 100);
        assert_eq!(usage.tokens_remaining(), 3996);
    }

    #[test]
    fn test_counter_failure_advisory() {
        let counter = StubCounter { usage: None };
        let usage = enforce("text", "gpt-4", &counter, BudgetEnforcement::Advisory).unwrap();
        assert!(usage.is_none());
    }

    #[test]
    fn test_counter_failure_strict() {
        let counter = StubCounter { usage: None };
        let err = enforce("text", "gpt-4", &counter, BudgetEnforcement::Strict).unwrap_err();
        assert!(matches!(err, Error::TokenCount(_)));
    }

    #[test]
    fn test_char_estimate_counter() {
        let counter = CharEstimateCounter::new();
        let usage = counter.count("abcdefgh", "gpt-3.5-turbo").unwrap();
        assert_eq!(usage.token_count, 2);
        assert_eq!(usage.model_limit, 4096);

        let usage = counter.count("", "gpt-4").unwrap();
        assert_eq!(usage.token_count, 0);
        assert_eq!(usage.model_limit, 8192);
    }

    #[test]
    fn test_char_estimate_custom_limits() {
        let counter = CharEstimateCounter::new()
            .with_limit("tiny-model", 16)
            .with_default_limit(1024);
        assert_eq!(counter.count("x", "tiny-model").unwrap().model_limit, 16);
        assert_eq!(counter.count("x", "unknown").unwrap().model_limit, 1024);
    }
}

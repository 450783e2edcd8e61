//! Usage events and cost aggregation

use serde::{Deserialize, Serialize};

/// USD per one million input tokens
pub const PRICE_PER_1M_INPUT_TOKENS_USD: f64 = 0.25;
/// USD per one million output tokens
pub const PRICE_PER_1M_OUTPUT_TOKENS_USD: f64 = 2.00;

const SEVEN_DAYS_SECS: f64 = 7.0 * 24.0 * 60.0 * 60.0;

/// One transcription call, as persisted in the usage log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageEvent {
    /// Unix timestamp in seconds
    #[serde(default)]
    pub ts: f64,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    #[serde(default)]
    pub filename: String,
}

impl UsageEvent {
    /// Estimated cost of this call in USD
    pub fn cost_usd(&self) -> f64 {
        (self.input_tokens as f64 * PRICE_PER_1M_INPUT_TOKENS_USD
            + self.output_tokens as f64 * PRICE_PER_1M_OUTPUT_TOKENS_USD)
            / 1_000_000.0
    }
}

/// Aggregated spend over a set of events
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UsageSummary {
    pub count: usize,
    pub total_cost: f64,
    pub avg_cost: f64,
    pub last7_cost: f64,
}

impl UsageSummary {
    /// Summarize `events` relative to `now_ts` (Unix seconds)
    pub fn aggregate(events: &[UsageEvent], now_ts: f64) -> Self {
        let cutoff = now_ts - SEVEN_DAYS_SECS;
        let count = events.len();
        let total_cost: f64 = events.iter().map(UsageEvent::cost_usd).sum();
        let avg_cost = if count > 0 {
            total_cost / count as f64
        } else {
            0.0
        };
        let last7_cost = events
            .iter()
            .filter(|e| e.ts >= cutoff)
            .map(UsageEvent::cost_usd)
            .sum();

        Self {
            count,
            total_cost,
            avg_cost,
            last7_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(ts: f64, input: u64, output: u64) -> UsageEvent {
        UsageEvent {
            ts,
            model: "gpt-5-mini".to_string(),
            input_tokens: input,
            output_tokens: output,
            filename: "a.jpg".to_string(),
        }
    }

    #[test]
    fn cost_uses_per_million_prices() {
        let e = event(0.0, 1_000_000, 1_000_000);
        assert!((e.cost_usd() - 2.25).abs() < 1e-9);
    }

    #[test]
    fn empty_summary_is_zero() {
        let summary = UsageSummary::aggregate(&[], 1_000.0);
        assert_eq!(summary, UsageSummary::default());
    }

    #[test]
    fn last7_excludes_old_events() {
        let now = 10.0 * 24.0 * 3600.0;
        let events = vec![
            event(now - 8.0 * 24.0 * 3600.0, 1_000_000, 0),
            event(now - 3600.0, 0, 1_000_000),
        ];

        let summary = UsageSummary::aggregate(&events, now);

        assert_eq!(summary.count, 2);
        assert!((summary.total_cost - 2.25).abs() < 1e-9);
        assert!((summary.avg_cost - 1.125).abs() < 1e-9);
        assert!((summary.last7_cost - 2.0).abs() < 1e-9);
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let e: UsageEvent = serde_json::from_str(r#"{"ts": 5.5}"#).unwrap();
        assert_eq!(e.ts, 5.5);
        assert_eq!(e.input_tokens, 0);
        assert!(e.model.is_empty());
    }
}

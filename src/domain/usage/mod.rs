//! Token usage accounting

mod event;

pub use event::{
    UsageEvent, UsageSummary, PRICE_PER_1M_INPUT_TOKENS_USD, PRICE_PER_1M_OUTPUT_TOKENS_USD,
};

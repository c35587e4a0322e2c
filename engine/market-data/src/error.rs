//! Error types for the market data service

use thiserror::Error;

/// Result type for market data operations
pub type Result<T> = std::result::Result<T, MarketDataError>;

/// Errors that can occur while obtaining market data
///
/// These never reach the pricing engine's public callers: the recommendation
/// assembler recovers from them with its degraded fallback path.
#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("Market data provider error: {0}")]
    Provider(String),

    #[error("Market data fetch timed out after {0} ms")]
    Timeout(u64),
}

//! Price sources polled by the workers.
//!
//! A [`PriceSource`] answers one question: what is the price of this symbol right now.
//! It is shared read-only by every worker (`Arc<dyn PriceSource>`), so implementations
//! keep any mutable state behind their own synchronization.
//!
//! - `binance` — REST ticker endpoint of the quote service.
//! - `simulated` — offline random walk, useful for demos and local runs.
use std::sync::Arc;

use clap::ValueEnum;
use serde::Deserialize;
use strum_macros::Display;
use thiserror::Error;

use crate::config::Config;
use crate::result::Result;

pub mod binance;
pub mod simulated;

pub use binance::BinanceSource;
pub use simulated::SimulatedSource;

/// Why a single price lookup failed. Always recoverable: the symbol is skipped for
/// the current pass and tried again on the next one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request could not be sent or its body could not be read.
    #[error("error making request to price service: {0}")]
    Network(String),

    /// The service answered with a non-success status code.
    #[error("received non-success status code: {0}")]
    Status(u16),

    /// The body was not a ticker payload or its price was not a number.
    #[error("error decoding price response: {0}")]
    Decode(String),
}

/// Something that can quote a symbol.
pub trait PriceSource: Send + Sync {
    /// Fetch the current price of `symbol`. Blocks until the source answers.
    fn fetch_price(&self, symbol: &str) -> std::result::Result<f64, FetchError>;
}

/// Selects the `PriceSource` implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SourceKind {
    /// Binance REST API.
    #[default]
    Binance,
    /// Local random walk, no network access.
    Simulated,
}

/// Build the source selected by `config.source`.
pub fn build_source(config: &Config) -> Result<Arc<dyn PriceSource>> {
    let source: Arc<dyn PriceSource> = match config.source {
        SourceKind::Binance => Arc::new(BinanceSource::new(
            &config.api_url,
            config.request_timeout(),
        )?),
        SourceKind::Simulated => Arc::new(SimulatedSource::default()),
    };
    Ok(source)
}

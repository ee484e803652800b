//! Binance REST ticker source.
//!
//! `GET {base}/api/v3/ticker/price?symbol=BTCUSDT` answers
//! `{"symbol":"BTCUSDT","price":"64123.45000000"}`; the price is a decimal string.
use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::result::Result;
use crate::source::{FetchError, PriceSource};

/// Path of the ticker price endpoint.
pub const TICKER_PRICE_PATH: &str = "/api/v3/ticker/price";

#[derive(Debug, Deserialize)]
struct TickerResponse {
    price: String,
}

/// Blocking HTTP price source for the Binance ticker endpoint.
pub struct BinanceSource {
    client: Client,
    endpoint: String,
}

impl BinanceSource {
    /// Create a source for `base_url`. `timeout` of `None` disables the request timeout.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), TICKER_PRICE_PATH);
        Ok(Self { client, endpoint })
    }

    /// Full URL of the ticker endpoint, without the query string.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl PriceSource for BinanceSource {
    fn fetch_price(&self, symbol: &str) -> std::result::Result<f64, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("symbol", symbol)])
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .map_err(|e| FetchError::Network(format!("error reading response body: {e}")))?;
        debug!("{} -> {}", symbol, body);
        decode_price(&body)
    }
}

/// Decode a ticker payload into a price.
pub fn decode_price(body: &str) -> std::result::Result<f64, FetchError> {
    let ticker: TickerResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    parse_price(&ticker.price)
}

/// Parse a decimal price string. Non-finite values are rejected.
pub fn parse_price(text: &str) -> std::result::Result<f64, FetchError> {
    let price: f64 = text
        .trim()
        .parse()
        .map_err(|e| FetchError::Decode(format!("error parsing price string {text:?}: {e}")))?;
    if !price.is_finite() {
        return Err(FetchError::Decode(format!("price is not finite: {text:?}")));
    }
    Ok(price)
}

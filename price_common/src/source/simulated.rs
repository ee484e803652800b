//! Offline price source.
//!
//! Every symbol starts at a base price and takes a small random step on each fetch,
//! rounded to cents, so both changed and unchanged observations show up on the console.
use std::collections::HashMap;
use std::sync::Mutex;

use rand::Rng;

use crate::source::{FetchError, PriceSource};

const BASE_PRICE: f64 = 100.0;
const MIN_PRICE: f64 = 0.01;

/// Random-walk price source shared by all workers.
pub struct SimulatedSource {
    base_price: f64,
    prices: Mutex<HashMap<String, f64>>,
}

impl SimulatedSource {
    /// Create a source whose symbols all start at `base_price`.
    pub fn new(base_price: f64) -> Self {
        Self {
            base_price: base_price.max(MIN_PRICE),
            prices: Mutex::new(HashMap::new()),
        }
    }

    /// Next price after `current_price`: a uniform step in `[-1%, +1%]`, rounded to
    /// cents and clamped to a minimum positive value.
    pub fn next_price(current_price: f64) -> f64 {
        let mut rng = rand::rng();
        let change: f64 = rng.random_range(-0.01..0.01);
        let new_price = (current_price * (1.0 + change) * 100.0).round() / 100.0;
        new_price.max(MIN_PRICE)
    }
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::new(BASE_PRICE)
    }
}

impl PriceSource for SimulatedSource {
    fn fetch_price(&self, symbol: &str) -> Result<f64, FetchError> {
        // The map only caches the last walked price, a poisoned lock leaves it usable.
        let mut prices = self
            .prices
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let price = match prices.get(symbol) {
            Some(current) => Self::next_price(*current),
            None => self.base_price,
        };
        prices.insert(symbol.to_string(), price);
        Ok(price)
    }
}

//! Price message emitted once per successful poll of a symbol.
use std::fmt;

/// One observation of a symbol's price, as rendered on the console.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceMessage {
    /// Symbol the price belongs to.
    pub symbol: String,
    /// Last price returned by the price source.
    pub price: f64,
    /// `true` when the price differs from the previously observed one.
    pub changed: bool,
}

impl PriceMessage {
    /// Build a new message.
    pub fn new(symbol: impl Into<String>, price: f64, changed: bool) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            changed,
        }
    }
}

impl fmt::Display for PriceMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} price:{:.2}", self.symbol, self.price)?;
        if self.changed {
            write!(f, " changed")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_unchanged() {
        let msg = PriceMessage::new("BTCUSDT", 100.0, false);
        assert_eq!(msg.to_string(), "BTCUSDT price:100.00");
    }

    #[test]
    fn test_display_changed_rounds_to_cents() {
        let msg = PriceMessage::new("ETHUSDT", 3150.4567, true);
        assert_eq!(msg.to_string(), "ETHUSDT price:3150.46 changed");
    }
}

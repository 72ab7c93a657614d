//! Order book snapshot structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single resting level in the order book
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BookLevel {
    /// Price at this level
    pub price: f64,
    /// Size at this level, in shares
    pub size: u32,
}

impl BookLevel {
    /// Create a new book level
    pub fn new(price: f64, size: u32) -> Self {
        Self { price, size }
    }

    /// A level is valid when it carries a positive price and nonzero size.
    /// Missing cells in the input surface here as zeroed levels.
    pub fn is_valid(&self) -> bool {
        self.price > 0.0 && self.size > 0
    }

    /// Notional value resting at this level
    pub fn notional(&self) -> f64 {
        self.price * f64::from(self.size)
    }
}

/// Point-in-time view of the book for one symbol.
///
/// Bids are sorted by price descending, asks ascending, each side holding up
/// to 10 levels. Snapshots are immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSnapshot {
    /// Trading symbol
    pub symbol: String,
    /// Event timestamp of the snapshot
    pub timestamp: DateTime<Utc>,
    /// Bid levels, best first
    pub bids: Vec<BookLevel>,
    /// Ask levels, best first
    pub asks: Vec<BookLevel>,
}

impl BookSnapshot {
    /// Create a new snapshot
    pub fn new(
        symbol: String,
        timestamp: DateTime<Utc>,
        bids: Vec<BookLevel>,
        asks: Vec<BookLevel>,
    ) -> Self {
        Self {
            symbol,
            timestamp,
            bids,
            asks,
        }
    }

    /// Best bid level, if the bid side has a valid top
    pub fn best_bid(&self) -> Option<&BookLevel> {
        self.bids.first().filter(|l| l.is_valid())
    }

    /// Best ask level, if the ask side has a valid top
    pub fn best_ask(&self) -> Option<&BookLevel> {
        self.asks.first().filter(|l| l.is_valid())
    }

    /// Mid price, undefined when either side is empty
    pub fn mid_price(&self) -> Option<f64> {
        let bid = self.best_bid()?.price;
        let ask = self.best_ask()?.price;
        Some((bid + ask) / 2.0)
    }

    /// Bid-ask spread in price units
    pub fn spread(&self) -> Option<f64> {
        let bid = self.best_bid()?.price;
        let ask = self.best_ask()?.price;
        Some(ask - bid)
    }

    /// Bid-ask spread in basis points of the mid price
    pub fn spread_bps(&self) -> Option<f64> {
        let spread = self.spread()?;
        let mid = self.mid_price()?;
        Some(spread / mid * 10000.0)
    }

    /// Total bid depth over the first N levels, in shares
    pub fn bid_depth(&self, levels: usize) -> u64 {
        self.bids
            .iter()
            .take(levels)
            .map(|l| u64::from(l.size))
            .sum()
    }

    /// Total ask depth over the first N levels, in shares
    pub fn ask_depth(&self, levels: usize) -> u64 {
        self.asks
            .iter()
            .take(levels)
            .map(|l| u64::from(l.size))
            .sum()
    }

    /// A snapshot is valid when a mid price can be formed
    pub fn is_valid(&self) -> bool {
        self.best_bid().is_some() && self.best_ask().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot() -> BookSnapshot {
        let bids = vec![
            BookLevel::new(100.0, 10),
            BookLevel::new(99.5, 20),
            BookLevel::new(99.0, 15),
        ];

        let asks = vec![
            BookLevel::new(100.5, 8),
            BookLevel::new(101.0, 25),
            BookLevel::new(101.5, 12),
        ];

        BookSnapshot::new("CRWV".to_string(), Utc::now(), bids, asks)
    }

    #[test]
    fn test_mid_price() {
        let snapshot = sample_snapshot();
        let mid = snapshot.mid_price().unwrap();
        assert!((mid - 100.25).abs() < 1e-9);
    }

    #[test]
    fn test_spread() {
        let snapshot = sample_snapshot();
        let spread = snapshot.spread().unwrap();
        assert!((spread - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_spread_bps() {
        let snapshot = sample_snapshot();
        // 0.5 / 100.25 * 10000 ≈ 49.88 bps
        let spread_bps = snapshot.spread_bps().unwrap();
        assert!(spread_bps > 49.0 && spread_bps < 51.0);
    }

    #[test]
    fn test_depth() {
        let snapshot = sample_snapshot();

        assert_eq!(snapshot.bid_depth(1), 10);
        assert_eq!(snapshot.bid_depth(3), 45);
        assert_eq!(snapshot.ask_depth(2), 33);
        assert_eq!(snapshot.ask_depth(10), 45);
    }

    #[test]
    fn test_mid_price_requires_both_sides() {
        let mut snapshot = sample_snapshot();
        snapshot.asks.clear();

        assert!(snapshot.mid_price().is_none());
        assert!(snapshot.spread_bps().is_none());
        assert!(!snapshot.is_valid());
    }

    #[test]
    fn test_zeroed_top_level_is_not_best() {
        let mut snapshot = sample_snapshot();
        snapshot.bids[0] = BookLevel::new(0.0, 0);

        assert!(snapshot.best_bid().is_none());
        assert!(snapshot.mid_price().is_none());
    }

    #[test]
    fn test_level_validity() {
        assert!(BookLevel::new(10.0, 1).is_valid());
        assert!(!BookLevel::new(10.0, 0).is_valid());
        assert!(!BookLevel::new(0.0, 5).is_valid());
        assert!(!BookLevel::new(f64::NAN, 5).is_valid());
    }

    #[test]
    fn test_notional() {
        let level = BookLevel::new(100.5, 8);
        assert!((level.notional() - 804.0).abs() < 1e-9);
    }
}

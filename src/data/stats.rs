//! Per-symbol summary statistics.

use crate::data::orderbook::BookSnapshot;
use crate::BOOK_DEPTH;

/// Averages over a symbol's loaded snapshots, narrated to the console
/// before curve construction.
#[derive(Debug, Clone, Default)]
pub struct SymbolStats {
    /// Snapshots with a defined mid price
    pub snapshot_count: usize,
    /// Mean mid price, in dollars
    pub avg_mid_price: f64,
    /// Mean bid-ask spread, in basis points
    pub avg_spread_bps: f64,
    /// Mean resting bid depth, in shares
    pub avg_bid_depth: f64,
    /// Mean resting ask depth, in shares
    pub avg_ask_depth: f64,
}

impl SymbolStats {
    /// Aggregate statistics over the given snapshots.
    ///
    /// Snapshots without a mid price do not contribute.
    pub fn from_snapshots(snapshots: &[BookSnapshot]) -> Self {
        let mut count = 0usize;
        let mut total_mid = 0.0;
        let mut total_spread_bps = 0.0;
        let mut total_bid_depth = 0u64;
        let mut total_ask_depth = 0u64;

        for snapshot in snapshots {
            let (Some(mid), Some(spread_bps)) = (snapshot.mid_price(), snapshot.spread_bps())
            else {
                continue;
            };

            count += 1;
            total_mid += mid;
            total_spread_bps += spread_bps;
            total_bid_depth += snapshot.bid_depth(BOOK_DEPTH);
            total_ask_depth += snapshot.ask_depth(BOOK_DEPTH);
        }

        if count == 0 {
            return Self::default();
        }

        let n = count as f64;
        Self {
            snapshot_count: count,
            avg_mid_price: total_mid / n,
            avg_spread_bps: total_spread_bps / n,
            avg_bid_depth: total_bid_depth as f64 / n,
            avg_ask_depth: total_ask_depth as f64 / n,
        }
    }

    /// Print summary statistics
    pub fn print_summary(&self, symbol: &str) {
        println!("=== {symbol} ===");
        println!("Snapshots: {}", self.snapshot_count);
        println!("Average mid price: ${:.4}", self.avg_mid_price);
        println!("Average spread: {:.2} bps", self.avg_spread_bps);
        println!("Average bid depth: {:.0} shares", self.avg_bid_depth);
        println!("Average ask depth: {:.0} shares", self.avg_ask_depth);
    }
}

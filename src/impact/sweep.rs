//! Liquidity sweep over resting book levels.

use serde::{Deserialize, Serialize};

use crate::data::{BookLevel, BookSnapshot};

/// Side of a simulated order. Buys consume ask liquidity, sells consume bids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Lowercase label used in file names and console output
    pub fn label(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }

    /// Relative impact of an average execution price against the mid price.
    ///
    /// Positive whenever the sweep crosses the spread unfavorably: buying
    /// above mid or selling below it.
    pub fn impact(&self, avg_price: f64, mid_price: f64) -> f64 {
        match self {
            Side::Buy => (avg_price - mid_price) / mid_price,
            Side::Sell => (mid_price - avg_price) / mid_price,
        }
    }
}

/// Outcome of sweeping a target size through one side of the book
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    /// Shares actually filled, never more than the requested size
    pub filled: u32,
    /// Total value of the filled shares
    pub notional: f64,
}

impl SweepResult {
    /// Volume-weighted average execution price.
    ///
    /// `None` when nothing filled; callers skip such snapshots rather than
    /// dividing by zero.
    pub fn avg_price(&self) -> Option<f64> {
        if self.filled > 0 {
            Some(self.notional / f64::from(self.filled))
        } else {
            None
        }
    }

    /// Whether the full target size was filled
    pub fn is_complete(&self, target_size: u32) -> bool {
        self.filled == target_size
    }
}

/// Consume resting liquidity level by level in the given priority order.
///
/// `levels` must already be sorted for the side being swept: ascending for
/// asks, descending for bids. Levels with zero size or a missing price are
/// skipped without ending the scan. Exhausting the book before the target
/// is reached is not an error; the result simply reports `filled` short of
/// the target.
pub fn sweep(levels: &[BookLevel], target_size: u32) -> SweepResult {
    let mut remaining = target_size;
    let mut filled = 0u32;
    let mut notional = 0.0f64;

    for level in levels {
        if remaining == 0 {
            break;
        }
        if !level.is_valid() {
            continue;
        }

        let take = level.size.min(remaining);
        notional += f64::from(take) * level.price;
        filled += take;
        remaining -= take;
    }

    SweepResult { filled, notional }
}

/// Impact of sweeping `target_size` shares through one snapshot, considering
/// the first `level_count` levels of the relevant side.
///
/// `None` when the snapshot has no mid price or the sweep fills nothing.
pub fn snapshot_impact(
    snapshot: &BookSnapshot,
    side: Side,
    target_size: u32,
    level_count: usize,
) -> Option<f64> {
    let mid = snapshot.mid_price()?;

    let levels = match side {
        Side::Buy => &snapshot.asks,
        Side::Sell => &snapshot.bids,
    };
    let levels = &levels[..levels.len().min(level_count)];

    let avg = sweep(levels, target_size).avg_price()?;
    Some(side.impact(avg, mid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BOOK_DEPTH;
    use chrono::Utc;

    fn levels(pairs: &[(f64, u32)]) -> Vec<BookLevel> {
        pairs.iter().map(|&(p, s)| BookLevel::new(p, s)).collect()
    }

    #[test]
    fn test_full_fill_across_levels() {
        // Asks 100.00 x 30, 100.05 x 50; take 60
        let asks = levels(&[(100.00, 30), (100.05, 50)]);
        let result = sweep(&asks, 60);

        assert_eq!(result.filled, 60);
        assert!((result.notional - 6001.5).abs() < 1e-9);
        assert!((result.avg_price().unwrap() - 100.025).abs() < 1e-9);
        assert!(result.is_complete(60));
    }

    #[test]
    fn test_impact_conversion() {
        let asks = levels(&[(100.00, 30), (100.05, 50)]);
        let avg = sweep(&asks, 60).avg_price().unwrap();

        let impact = Side::Buy.impact(avg, 99.98);
        let impact_bps = impact * 10000.0;
        assert!((impact - (100.025 - 99.98) / 99.98).abs() < 1e-12);
        assert!((impact_bps - 4.5).abs() < 0.01);
    }

    #[test]
    fn test_exhausted_book_is_not_an_error() {
        let asks = levels(&[(100.00, 30), (100.05, 50)]);
        let result = sweep(&asks, 200);

        assert_eq!(result.filled, 80);
        assert!(!result.is_complete(200));
        assert!(result.avg_price().is_some());
    }

    #[test]
    fn test_invalid_levels_skipped_not_terminal() {
        // A zero-size and a zero-price level sit between two valid levels
        let asks = levels(&[(100.00, 10), (100.02, 0), (0.0, 40), (100.05, 10)]);
        let result = sweep(&asks, 20);

        assert_eq!(result.filled, 20);
        let expected = 10.0 * 100.00 + 10.0 * 100.05;
        assert!((result.notional - expected).abs() < 1e-9);
    }

    #[test]
    fn test_empty_or_dead_book_fills_nothing() {
        assert_eq!(sweep(&[], 50).filled, 0);
        assert!(sweep(&[], 50).avg_price().is_none());

        let dead = levels(&[(0.0, 0), (0.0, 0)]);
        let result = sweep(&dead, 50);
        assert_eq!(result.filled, 0);
        assert_eq!(result.notional, 0.0);
        assert!(result.avg_price().is_none());
    }

    #[test]
    fn test_notional_is_priority_ordered_sum() {
        let bids = levels(&[(99.95, 5), (99.90, 5), (99.85, 100)]);
        let result = sweep(&bids, 12);

        assert_eq!(result.filled, 12);
        let expected = 5.0 * 99.95 + 5.0 * 99.90 + 2.0 * 99.85;
        assert!((result.notional - expected).abs() < 1e-9);
    }

    #[test]
    fn test_sell_impact_sign() {
        // Selling below mid costs; impact positive
        assert!(Side::Sell.impact(99.9, 100.0) > 0.0);
        // Selling above mid would be favorable; impact negative
        assert!(Side::Sell.impact(100.1, 100.0) < 0.0);
        assert!(Side::Buy.impact(100.1, 100.0) > 0.0);
    }

    #[test]
    fn test_snapshot_impact() {
        let snapshot = BookSnapshot::new(
            "CRWV".to_string(),
            Utc::now(),
            levels(&[(99.96, 40)]),
            levels(&[(100.00, 30), (100.05, 50)]),
        );

        // mid = (99.96 + 100.00) / 2 = 99.98
        let impact = snapshot_impact(&snapshot, Side::Buy, 60, BOOK_DEPTH).unwrap();
        assert!((impact * 10000.0 - 4.5).abs() < 0.01);

        let sell = snapshot_impact(&snapshot, Side::Sell, 10, BOOK_DEPTH).unwrap();
        assert!((sell - (99.98 - 99.96) / 99.98).abs() < 1e-12);
    }

    #[test]
    fn test_snapshot_impact_respects_level_count() {
        let snapshot = BookSnapshot::new(
            "CRWV".to_string(),
            Utc::now(),
            levels(&[(99.96, 40)]),
            levels(&[(100.00, 30), (100.05, 50)]),
        );

        // Only the first ask level visible: 60 shares cannot all fill there,
        // but the 30 that do fill price at exactly 100.00
        let impact = snapshot_impact(&snapshot, Side::Buy, 60, 1).unwrap();
        assert!((impact - (100.00 - 99.98) / 99.98).abs() < 1e-12);
    }

    #[test]
    fn test_snapshot_impact_none_cases() {
        let no_mid = BookSnapshot::new(
            "CRWV".to_string(),
            Utc::now(),
            vec![],
            levels(&[(100.00, 30)]),
        );
        assert!(snapshot_impact(&no_mid, Side::Buy, 10, BOOK_DEPTH).is_none());

        let dead_side = BookSnapshot::new(
            "CRWV".to_string(),
            Utc::now(),
            levels(&[(99.96, 40)]),
            levels(&[(100.00, 0)]),
        );
        assert!(snapshot_impact(&dead_side, Side::Buy, 10, BOOK_DEPTH).is_none());
    }
}

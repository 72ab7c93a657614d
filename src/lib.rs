//! # Book Impact
//!
//! Temporary price impact analysis from limit order book snapshots.
//!
//! Given MBP-10 style snapshots (up to 10 resting levels per side), the
//! library estimates the volume-weighted average price of sweeping a target
//! number of shares through one side of the book, converts it into a
//! mid-relative impact, and aggregates the per-snapshot impacts into an
//! impact curve per symbol and side.
//!
//! ## Modules
//!
//! - [`data`] - Book snapshot model, CSV ingestion, per-symbol statistics
//! - [`impact`] - Liquidity sweep and impact curve construction
//! - [`chart`] - PNG line chart rendering for curve comparison
//!
//! ## Example
//!
//! ```rust,no_run
//! use book_impact::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let snapshots = load_symbol_snapshots("data", "CRWV", &LoaderConfig::default())?;
//!     let curve = build_curve(&snapshots, Side::Buy, &CurveConfig::default());
//!
//!     for point in &curve.points {
//!         println!("{} shares -> {:.2} bps", point.order_size, point.impact_bps);
//!     }
//!     Ok(())
//! }
//! ```

pub mod chart;
pub mod data;
pub mod impact;

// Re-export main types for convenience
pub use chart::{compose_side_by_side, ChartConfig, LineChart, LineSeries};
pub use data::{
    load_symbol_snapshots, BookLevel, BookSnapshot, DataError, LoaderConfig, SymbolStats,
};
pub use impact::{
    build_curve, load_curve_csv, save_curve_csv, snapshot_impact, sweep, CurveConfig,
    CurvePoint, ImpactCurve, Side, SweepResult,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Book depth of the MBP-10 format (levels per side)
pub const BOOK_DEPTH: usize = 10;

/// Symbols analyzed by default
pub const DEFAULT_SYMBOLS: &[&str] = &["CRWV", "FROG", "SOUN"];

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::chart::{compose_side_by_side, LineChart, LineSeries};
    pub use crate::data::{load_symbol_snapshots, BookSnapshot, LoaderConfig, SymbolStats};
    pub use crate::impact::{
        build_curve, save_curve_csv, sweep, CurveConfig, ImpactCurve, Side,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_constants() {
        assert_eq!(BOOK_DEPTH, 10);
        assert_eq!(DEFAULT_SYMBOLS.len(), 3);
    }
}

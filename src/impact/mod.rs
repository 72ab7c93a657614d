//! Temporary price impact estimation.
//!
//! This module provides:
//! - The liquidity sweep over resting book levels
//! - Mid-relative impact conversion per snapshot
//! - Impact curve construction and CSV persistence

mod curve;
mod sweep;

pub use curve::{
    build_curve, load_curve_csv, save_curve_csv, CurveConfig, CurvePoint, ImpactCurve,
};
pub use sweep::{snapshot_impact, sweep, Side, SweepResult};

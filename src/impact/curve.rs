//! Impact curve construction and persistence.

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::BookSnapshot;
use crate::impact::sweep::{snapshot_impact, Side};
use crate::BOOK_DEPTH;

/// Parameters for building an impact curve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveConfig {
    /// Smallest order size tested, in shares
    pub min_shares: u32,
    /// Largest order size tested, in shares
    pub max_shares: u32,
    /// Increment between tested sizes, in shares
    pub step: u32,
    /// Snapshots averaged per order size
    pub sample_count: usize,
    /// Book depth considered per sweep
    pub level_count: usize,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            min_shares: 10,
            max_shares: 500,
            step: 10,
            sample_count: 100,
            level_count: BOOK_DEPTH,
        }
    }
}

impl CurveConfig {
    /// Tested order sizes, strictly increasing
    pub fn order_sizes(&self) -> impl Iterator<Item = u32> + '_ {
        (self.min_shares..=self.max_shares).step_by(self.step.max(1) as usize)
    }
}

/// One point of an impact curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Order size in shares
    pub order_size: u32,
    /// Average impact as a fraction of the mid price
    pub avg_impact: f64,
    /// Average impact in basis points
    pub impact_bps: f64,
}

/// Average temporary impact per order size for one symbol and side.
///
/// Not mutated after construction; the points are ordered by strictly
/// increasing order size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactCurve {
    pub side: Side,
    pub points: Vec<CurvePoint>,
}

impl ImpactCurve {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Largest impact on the curve, in basis points
    pub fn max_impact_bps(&self) -> Option<f64> {
        self.points
            .iter()
            .map(|p| p.impact_bps)
            .fold(None, |acc, bps| Some(acc.map_or(bps, |m: f64| m.max(bps))))
    }
}

/// Deterministic stride sample of up to `sample_count` snapshots, evenly
/// spaced over the input.
fn sample_snapshots(snapshots: &[BookSnapshot], sample_count: usize) -> Vec<&BookSnapshot> {
    if sample_count == 0 || snapshots.is_empty() {
        return Vec::new();
    }
    if snapshots.len() <= sample_count {
        return snapshots.iter().collect();
    }

    let stride = snapshots.len() / sample_count;
    snapshots
        .iter()
        .step_by(stride.max(1))
        .take(sample_count)
        .collect()
}

/// Build the impact curve for one side over a symbol's snapshots.
///
/// For each tested order size the per-snapshot impacts are averaged over the
/// sample; snapshots where the sweep fills nothing are discarded. A size for
/// which every sampled snapshot fills nothing is omitted from the curve. An
/// empty snapshot set yields an empty curve.
pub fn build_curve(snapshots: &[BookSnapshot], side: Side, config: &CurveConfig) -> ImpactCurve {
    let sample = sample_snapshots(snapshots, config.sample_count);
    let mut points = Vec::new();

    for order_size in config.order_sizes() {
        let impacts: Vec<f64> = sample
            .iter()
            .filter_map(|snapshot| snapshot_impact(snapshot, side, order_size, config.level_count))
            .collect();

        if impacts.is_empty() {
            continue;
        }

        let avg_impact = impacts.iter().sum::<f64>() / impacts.len() as f64;
        points.push(CurvePoint {
            order_size,
            avg_impact,
            impact_bps: avg_impact * 10000.0,
        });
    }

    debug!(
        "built {} curve with {} points from {} sampled snapshots",
        side.label(),
        points.len(),
        sample.len()
    );

    ImpactCurve { side, points }
}

/// Save a curve as CSV with `order_size,avg_impact,impact_bps` columns
pub fn save_curve_csv(curve: &ImpactCurve, path: impl AsRef<Path>) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    for point in &curve.points {
        writer.serialize(point)?;
    }

    writer.flush()?;
    Ok(())
}

/// Load a curve previously written by [`save_curve_csv`]
pub fn load_curve_csv(path: impl AsRef<Path>, side: Side) -> Result<ImpactCurve> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut points = Vec::new();

    for result in reader.deserialize() {
        points.push(result?);
    }

    Ok(ImpactCurve { side, points })
}

//! Batch temporary price impact analysis over per-symbol snapshot files.
//!
//! For each symbol: load the bounded snapshot history, narrate summary
//! statistics, build buy/sell impact curves, write them as CSV, and render a
//! per-symbol chart. Afterwards a single comparison image overlays every
//! symbol's curves, buy panel beside sell panel.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use image::Rgb;
use tracing::{info, warn};

use book_impact::chart::{colors, compose_side_by_side, LineChart, LineSeries};
use book_impact::data::{load_symbol_snapshots, DataError, LoaderConfig, SymbolStats};
use book_impact::impact::{build_curve, save_curve_csv, CurveConfig, ImpactCurve, Side};

/// Series colors for the cross-symbol comparison panels
const PALETTE: [Rgb<u8>; 4] = [colors::BLUE, colors::GREEN, colors::ORANGE, colors::RED];

#[derive(Parser)]
#[command(name = "book-impact")]
#[command(about = "Temporary price impact curves from order book snapshots")]
struct Cli {
    /// Root folder containing one subdirectory of CSV files per symbol
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// Output folder for curve CSVs and charts
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Symbols to analyze (comma-separated)
    #[arg(short, long, default_value = "CRWV,FROG,SOUN")]
    symbols: String,

    /// Smallest order size tested, shares
    #[arg(long, default_value_t = 10)]
    min_shares: u32,

    /// Largest order size tested, shares
    #[arg(long, default_value_t = 500)]
    max_shares: u32,

    /// Increment between tested sizes, shares
    #[arg(long, default_value_t = 10)]
    step: u32,

    /// Snapshots averaged per order size
    #[arg(long, default_value_t = 100)]
    sample_count: usize,

    /// Book depth considered per sweep
    #[arg(long, default_value_t = 10)]
    levels: usize,

    /// CSV files loaded per symbol
    #[arg(long, default_value_t = 3)]
    max_files: usize,

    /// Rows parsed per file
    #[arg(long, default_value_t = 10_000)]
    max_rows: usize,
}

struct SymbolCurves {
    symbol: String,
    buy: ImpactCurve,
    sell: ImpactCurve,
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    let loader_config = LoaderConfig {
        max_files: cli.max_files,
        max_rows: cli.max_rows,
        level_count: cli.levels,
    };
    let curve_config = CurveConfig {
        min_shares: cli.min_shares,
        max_shares: cli.max_shares,
        step: cli.step,
        sample_count: cli.sample_count,
        level_count: cli.levels,
    };

    std::fs::create_dir_all(&cli.out_dir)?;

    let mut results: Vec<SymbolCurves> = Vec::new();

    for symbol in cli.symbols.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        info!("analyzing {symbol}");

        let snapshots = match load_symbol_snapshots(&cli.data_dir, symbol, &loader_config) {
            Ok(snapshots) => snapshots,
            Err(DataError::NoData { .. }) => {
                warn!("no data available for {symbol}, skipping");
                continue;
            }
            Err(err) => {
                warn!("failed to load {symbol}: {err}");
                continue;
            }
        };

        SymbolStats::from_snapshots(&snapshots).print_summary(symbol);

        let buy = build_curve(&snapshots, Side::Buy, &curve_config);
        let sell = build_curve(&snapshots, Side::Sell, &curve_config);

        for curve in [&buy, &sell] {
            if curve.is_empty() {
                warn!("{symbol} {} curve is empty, no file written", curve.side.label());
                continue;
            }

            let path = cli
                .out_dir
                .join(format!("{symbol}_{}_impact.csv", curve.side.label()));
            save_curve_csv(curve, &path)?;
            info!("wrote {}", path.display());
            print_sample_points(symbol, curve);
        }

        render_symbol_chart(&cli.out_dir, symbol, &buy, &sell)?;

        results.push(SymbolCurves {
            symbol: symbol.to_string(),
            buy,
            sell,
        });
    }

    if results.is_empty() {
        warn!("no curves produced, skipping comparison chart");
        return Ok(());
    }

    render_comparison_chart(&cli.out_dir, &results)?;
    Ok(())
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_sample_points(symbol: &str, curve: &ImpactCurve) {
    println!("Sample {} {} impact:", symbol, curve.side.label());
    for point in curve.points.iter().take(5) {
        println!(
            "  {:>6} shares -> {:>8.2} bps",
            point.order_size, point.impact_bps
        );
    }
}

fn curve_series(curve: &ImpactCurve, color: Rgb<u8>) -> LineSeries {
    let points = curve
        .points
        .iter()
        .map(|p| (f64::from(p.order_size), p.impact_bps))
        .collect();
    LineSeries::new(points, color)
}

/// Per-symbol chart: buy curve in blue, sell curve in red
fn render_symbol_chart(
    out_dir: &Path,
    symbol: &str,
    buy: &ImpactCurve,
    sell: &ImpactCurve,
) -> Result<()> {
    if buy.is_empty() && sell.is_empty() {
        warn!("{symbol} has no curves, skipping chart");
        return Ok(());
    }

    let mut series = Vec::new();
    if !buy.is_empty() {
        series.push(curve_series(buy, colors::BLUE));
    }
    if !sell.is_empty() {
        series.push(curve_series(sell, colors::RED));
    }

    let img = LineChart::default().render(&series);
    let path = out_dir.join(format!("{symbol}_impact.png"));
    img.save(&path)?;
    info!("wrote {}", path.display());
    Ok(())
}

/// One comparison image: buy panel beside sell panel, one color per symbol
fn render_comparison_chart(out_dir: &Path, results: &[SymbolCurves]) -> Result<()> {
    let mut buy_series = Vec::new();
    let mut sell_series = Vec::new();

    for (i, result) in results.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        if !result.buy.is_empty() {
            buy_series.push(curve_series(&result.buy, color));
        }
        if !result.sell.is_empty() {
            sell_series.push(curve_series(&result.sell, color));
        }
        info!("comparison: {} drawn in {:?}", result.symbol, color.0);
    }

    let chart = LineChart::default();
    let canvas = compose_side_by_side(&chart.render(&buy_series), &chart.render(&sell_series));

    let path = out_dir.join("impact_comparison.png");
    canvas.save(&path)?;
    info!("wrote {}", path.display());
    Ok(())
}

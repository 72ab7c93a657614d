//! Line chart renderer.

use image::{Rgb, RgbImage};

use crate::chart::{
    draw_filled_rect, draw_horizontal_line, draw_line, draw_vertical_line, ChartConfig,
};

/// A single polyline on a chart
#[derive(Debug, Clone)]
pub struct LineSeries {
    /// Data points as (x, y) pairs, in x order
    pub points: Vec<(f64, f64)>,
    pub color: Rgb<u8>,
}

impl LineSeries {
    /// Create a new series
    pub fn new(points: Vec<(f64, f64)>, color: Rgb<u8>) -> Self {
        Self { points, color }
    }
}

/// Renders one or more series into a fixed-size chart image
pub struct LineChart {
    config: ChartConfig,
}

/// Grid divisions per axis
const GRID_DIVISIONS: u32 = 4;

/// Square marker edge, in pixels
const MARKER_SIZE: u32 = 3;

impl LineChart {
    /// Create a renderer with the given canvas size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            config: ChartConfig {
                width,
                height,
                ..Default::default()
            },
        }
    }

    /// Create a renderer with a custom configuration
    pub fn with_config(config: ChartConfig) -> Self {
        Self { config }
    }

    /// Render the series onto a fresh canvas.
    ///
    /// An empty series set produces a valid image with axes and grid only.
    pub fn render(&self, series: &[LineSeries]) -> RgbImage {
        let cfg = &self.config;
        let mut img = RgbImage::from_pixel(cfg.width, cfg.height, cfg.background);

        // Plot area inside the margins
        let x0 = cfg.margin;
        let y0 = cfg.margin;
        let x1 = cfg.width.saturating_sub(cfg.margin).max(x0 + 1);
        let y1 = cfg.height.saturating_sub(cfg.margin).max(y0 + 1);

        self.draw_frame(&mut img, x0, y0, x1, y1);

        let Some((min_x, max_x, min_y, max_y)) = data_bounds(series) else {
            return img;
        };

        let span_x = if max_x > min_x { max_x - min_x } else { 1.0 };
        let span_y = if max_y > min_y { max_y - min_y } else { 1.0 };

        let to_pixel = |(x, y): (f64, f64)| -> (u32, u32) {
            let px = x0 as f64 + (x - min_x) / span_x * (x1 - x0) as f64;
            let py = y1 as f64 - (y - min_y) / span_y * (y1 - y0) as f64;
            (px.round() as u32, py.round() as u32)
        };

        for line in series {
            let pixels: Vec<(u32, u32)> = line.points.iter().map(|&p| to_pixel(p)).collect();

            for pair in pixels.windows(2) {
                draw_line(&mut img, pair[0].0, pair[0].1, pair[1].0, pair[1].1, line.color);
            }

            for &(px, py) in &pixels {
                let half = MARKER_SIZE / 2;
                draw_filled_rect(
                    &mut img,
                    px.saturating_sub(half),
                    py.saturating_sub(half),
                    MARKER_SIZE,
                    MARKER_SIZE,
                    line.color,
                );
            }
        }

        img
    }

    fn draw_frame(&self, img: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32) {
        let cfg = &self.config;

        for i in 1..GRID_DIVISIONS {
            let gx = x0 + (x1 - x0) * i / GRID_DIVISIONS;
            let gy = y0 + (y1 - y0) * i / GRID_DIVISIONS;
            draw_vertical_line(img, gx, y0, y1, cfg.grid_color);
            draw_horizontal_line(img, gy, x0, x1, cfg.grid_color);
        }

        // Axes along the left and bottom edges of the plot area
        draw_vertical_line(img, x0, y0, y1, cfg.axis_color);
        draw_horizontal_line(img, y1, x0, x1, cfg.axis_color);
    }
}

impl Default for LineChart {
    fn default() -> Self {
        Self {
            config: ChartConfig::default(),
        }
    }
}

/// Bounds over all series points, `None` when no series has data
fn data_bounds(series: &[LineSeries]) -> Option<(f64, f64, f64, f64)> {
    let mut bounds: Option<(f64, f64, f64, f64)> = None;

    for line in series {
        for &(x, y) in &line.points {
            bounds = Some(match bounds {
                None => (x, x, y, y),
                Some((min_x, max_x, min_y, max_y)) => {
                    (min_x.min(x), max_x.max(x), min_y.min(y), max_y.max(y))
                }
            });
        }
    }

    bounds
}

/// Stack two chart images side by side onto one canvas
pub fn compose_side_by_side(left: &RgbImage, right: &RgbImage) -> RgbImage {
    let width = left.width() + right.width();
    let height = left.height().max(right.height());
    let mut canvas = RgbImage::new(width, height);

    for (x, y, pixel) in left.enumerate_pixels() {
        canvas.put_pixel(x, y, *pixel);
    }
    for (x, y, pixel) in right.enumerate_pixels() {
        canvas.put_pixel(left.width() + x, y, *pixel);
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::colors;

    fn sample_series() -> LineSeries {
        let points = (1..=10).map(|i| (i as f64 * 10.0, i as f64 * 1.5)).collect();
        LineSeries::new(points, colors::BLUE)
    }

    #[test]
    fn test_render_dimensions() {
        let chart = LineChart::new(320, 240);
        let img = chart.render(&[sample_series()]);

        assert_eq!(img.width(), 320);
        assert_eq!(img.height(), 240);
    }

    #[test]
    fn test_render_draws_series_pixels() {
        let chart = LineChart::new(320, 240);
        let img = chart.render(&[sample_series()]);

        let blue_pixels = img.pixels().filter(|&&p| p == colors::BLUE).count();
        assert!(blue_pixels > 0);
    }

    #[test]
    fn test_render_empty_series_is_axes_only() {
        let chart = LineChart::new(320, 240);
        let img = chart.render(&[]);

        assert_eq!(img.width(), 320);
        let axis_pixels = img.pixels().filter(|&&p| p == colors::LIGHT_GRAY).count();
        assert!(axis_pixels > 0);
        let blue_pixels = img.pixels().filter(|&&p| p == colors::BLUE).count();
        assert_eq!(blue_pixels, 0);
    }

    #[test]
    fn test_single_point_series_renders() {
        let chart = LineChart::new(64, 64);
        let series = LineSeries::new(vec![(100.0, 5.0)], colors::RED);
        let img = chart.render(&[series]);

        let red_pixels = img.pixels().filter(|&&p| p == colors::RED).count();
        assert!(red_pixels > 0);
    }

    #[test]
    fn test_compose_side_by_side() {
        let left = RgbImage::from_pixel(32, 24, colors::BLUE);
        let right = RgbImage::from_pixel(16, 48, colors::RED);

        let canvas = compose_side_by_side(&left, &right);

        assert_eq!(canvas.width(), 48);
        assert_eq!(canvas.height(), 48);
        assert_eq!(*canvas.get_pixel(0, 0), colors::BLUE);
        assert_eq!(*canvas.get_pixel(32, 0), colors::RED);
    }
}

//! Chart rendering for impact curves.
//!
//! Curves are drawn directly into RGB images: a dark canvas, axis lines, a
//! light grid, and one polyline per series. The stack does not rasterize
//! text, so charts carry no labels; series are distinguished by color.

mod line;

pub use line::{compose_side_by_side, LineChart, LineSeries};

use image::{Rgb, RgbImage};

/// Common color definitions
pub mod colors {
    use image::Rgb;

    pub const GREEN: Rgb<u8> = Rgb([0, 200, 83]);
    pub const RED: Rgb<u8> = Rgb([255, 68, 68]);
    pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    pub const DARK_GRAY: Rgb<u8> = Rgb([30, 30, 30]);
    pub const LIGHT_GRAY: Rgb<u8> = Rgb([200, 200, 200]);
    pub const BLUE: Rgb<u8> = Rgb([33, 150, 243]);
    pub const ORANGE: Rgb<u8> = Rgb([255, 152, 0]);
}

/// Chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    /// Padding between the canvas edge and the plot area, in pixels
    pub margin: u32,
    pub background: Rgb<u8>,
    pub axis_color: Rgb<u8>,
    pub grid_color: Rgb<u8>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            margin: 40,
            background: colors::BLACK,
            axis_color: colors::LIGHT_GRAY,
            grid_color: colors::DARK_GRAY,
        }
    }
}

/// Helper function to draw a filled rectangle
pub fn draw_filled_rect(
    img: &mut RgbImage,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    color: Rgb<u8>,
) {
    let img_width = img.width();
    let img_height = img.height();

    for dy in 0..height {
        for dx in 0..width {
            let px = x + dx;
            let py = y + dy;
            if px < img_width && py < img_height {
                img.put_pixel(px, py, color);
            }
        }
    }
}

/// Helper function to draw a vertical line
pub fn draw_vertical_line(img: &mut RgbImage, x: u32, y1: u32, y2: u32, color: Rgb<u8>) {
    let (start, end) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
    let img_height = img.height();

    if x < img.width() && img_height > 0 {
        for y in start..=end.min(img_height - 1) {
            img.put_pixel(x, y, color);
        }
    }
}

/// Helper function to draw a horizontal line
pub fn draw_horizontal_line(img: &mut RgbImage, y: u32, x1: u32, x2: u32, color: Rgb<u8>) {
    let (start, end) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
    let img_width = img.width();

    if y < img.height() && img_width > 0 {
        for x in start..=end.min(img_width - 1) {
            img.put_pixel(x, y, color);
        }
    }
}

/// Draw a line segment between two pixels
pub fn draw_line(img: &mut RgbImage, x1: u32, y1: u32, x2: u32, y2: u32, color: Rgb<u8>) {
    let dx = (x2 as i32 - x1 as i32).abs();
    let dy = (y2 as i32 - y1 as i32).abs();
    let sx = if x1 < x2 { 1i32 } else { -1i32 };
    let sy = if y1 < y2 { 1i32 } else { -1i32 };
    let mut err = dx - dy;

    let mut x = x1 as i32;
    let mut y = y1 as i32;

    loop {
        if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
            img.put_pixel(x as u32, y as u32, color);
        }

        if x == x2 as i32 && y == y2 as i32 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

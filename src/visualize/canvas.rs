//! Minimal raster drawing on top of [`image::RgbImage`]: panels, bars, heat cells and points.
//!
//! Coordinates passed to the chart primitives are data-space values; each primitive maps them into
//! the target [`Rect`] with the y axis pointing up.

use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgb, RgbImage};

use crate::error::AnalysisResult;
use crate::report::file_timestamp;

pub type Color = Rgb<u8>;

pub const WHITE: Color = Rgb([255, 255, 255]);
pub const AXIS: Color = Rgb([64, 64, 64]);
pub const STEELBLUE: Color = Rgb([70, 130, 180]);
pub const SKYBLUE: Color = Rgb([135, 206, 235]);
pub const LIGHTCORAL: Color = Rgb([240, 128, 128]);
pub const LIGHTGREEN: Color = Rgb([144, 238, 144]);
pub const GOLD: Color = Rgb([255, 215, 0]);
pub const CRIMSON: Color = Rgb([220, 20, 60]);
pub const ORANGE: Color = Rgb([255, 165, 0]);
pub const CORAL: Color = Rgb([255, 127, 80]);
pub const DARKRED: Color = Rgb([139, 0, 0]);
pub const PURPLE: Color = Rgb([128, 0, 128]);
pub const YELLOW: Color = Rgb([255, 255, 0]);
pub const RED: Color = Rgb([255, 0, 0]);
pub const BLUE: Color = Rgb([0, 0, 255]);
pub const BLACK: Color = Rgb([0, 0, 0]);

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Shrink by `margin` on every side (never below zero size).
    pub fn inset(self, margin: u32) -> Self {
        let m = margin.min(self.w / 2).min(self.h / 2);
        Self::new(self.x + m, self.y + m, self.w - 2 * m, self.h - 2 * m)
    }

    /// Split into a `rows x cols` grid, row-major.
    pub fn grid(self, rows: u32, cols: u32) -> Vec<Rect> {
        let (rows, cols) = (rows.max(1), cols.max(1));
        let (cw, ch) = (self.w / cols, self.h / rows);
        (0..rows)
            .flat_map(|r| (0..cols).map(move |c| (r, c)))
            .map(|(r, c)| Rect::new(self.x + c * cw, self.y + r * ch, cw, ch))
            .collect()
    }

    fn right(self) -> u32 {
        self.x + self.w
    }

    fn bottom(self) -> u32 {
        self.y + self.h
    }
}

/// Linear interpolation between two colours, `t` clamped to `[0, 1]`.
pub fn lerp_color(from: Color, to: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    Rgb([
        mix(from[0], to[0]),
        mix(from[1], to[1]),
        mix(from[2], to[2]),
    ])
}

/// `n` colours along a purple-teal-yellow ramp.
pub fn palette(n: usize) -> Vec<Color> {
    const STOPS: [Color; 3] = [Rgb([68, 1, 84]), Rgb([33, 145, 140]), Rgb([253, 231, 37])];
    (0..n)
        .map(|i| {
            let t = if n <= 1 { 0.0 } else { i as f64 / (n - 1) as f64 };
            if t <= 0.5 {
                lerp_color(STOPS[0], STOPS[1], t * 2.0)
            } else {
                lerp_color(STOPS[1], STOPS[2], (t - 0.5) * 2.0)
            }
        })
        .collect()
}

/// An RGB drawing surface with a white background.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::from_pixel(width.max(1), height.max(1), WHITE),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.image.width(), self.image.height())
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image.get_pixel_checked(x, y).copied()
    }

    /// Fill `rect`, clipped to the canvas.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let x_end = rect.right().min(self.image.width());
        let y_end = rect.bottom().min(self.image.height());
        for y in rect.y..y_end {
            for x in rect.x..x_end {
                self.image.put_pixel(x, y, color);
            }
        }
    }

    pub fn outline_rect(&mut self, rect: Rect, color: Color) {
        if rect.w == 0 || rect.h == 0 {
            return;
        }
        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, 1), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - 1, rect.w, 1), color);
        self.fill_rect(Rect::new(rect.x, rect.y, 1, rect.h), color);
        self.fill_rect(Rect::new(rect.right() - 1, rect.y, 1, rect.h), color);
    }

    /// Alpha-blend a single pixel; out-of-bounds coordinates are ignored.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Color, alpha: f64) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if let Some(px) = self.image.get_pixel_mut_checked(x, y) {
            *px = lerp_color(*px, color, alpha);
        }
    }

    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color, alpha: f64) {
        let r = radius.max(0.0);
        let (x0, x1) = ((cx - r).floor() as i64, (cx + r).ceil() as i64);
        let (y0, y1) = ((cy - r).floor() as i64, (cy + r).ceil() as i64);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let (dx, dy) = (x as f64 - cx, y as f64 - cy);
                if dx * dx + dy * dy <= r * r {
                    self.blend_pixel(x, y, color, alpha);
                }
            }
        }
    }

    /// Left and bottom axis lines of a plot area.
    pub fn axes(&mut self, area: Rect) {
        if area.w == 0 || area.h == 0 {
            return;
        }
        self.fill_rect(Rect::new(area.x, area.y, 2, area.h), AXIS);
        self.fill_rect(Rect::new(area.x, area.bottom() - 2, area.w, 2), AXIS);
    }

    /// Vertical bars scaled to the largest value; `color_of(i)` picks each bar's colour.
    pub fn bars<F>(&mut self, area: Rect, values: &[f64], mut color_of: F)
    where
        F: FnMut(usize) -> Color,
    {
        self.axes(area);
        let max = max_of(values);
        if values.is_empty() || max <= 0.0 {
            return;
        }
        let slot = area.w / values.len() as u32;
        let bar_w = (slot * 4 / 5).max(1);
        for (i, v) in values.iter().enumerate() {
            let h = scaled(*v, max, area.h);
            let x = area.x + i as u32 * slot + slot.saturating_sub(bar_w) / 2;
            self.fill_rect(Rect::new(x, area.bottom() - h, bar_w, h), color_of(i));
        }
    }

    /// Side-by-side bars per category, one series per colour, on a shared scale.
    pub fn grouped_bars(&mut self, area: Rect, series: &[(&[f64], Color)]) {
        self.axes(area);
        let categories = series.iter().map(|(v, _)| v.len()).max().unwrap_or(0);
        let max = series.iter().map(|(v, _)| max_of(v)).fold(0.0, f64::max);
        if categories == 0 || series.is_empty() || max <= 0.0 {
            return;
        }
        let slot = area.w / categories as u32;
        let bar_w = (slot * 4 / 5 / series.len() as u32).max(1);
        for (s, (values, color)) in series.iter().enumerate() {
            for (i, v) in values.iter().enumerate() {
                let h = scaled(*v, max, area.h);
                let x = area.x + i as u32 * slot + slot / 10 + s as u32 * bar_w;
                self.fill_rect(Rect::new(x, area.bottom() - h, bar_w, h), *color);
            }
        }
    }

    /// Horizontal bars from the left axis, first value at the top.
    pub fn hbars(&mut self, area: Rect, values: &[f64], color: Color) {
        self.axes(area);
        let max = max_of(values);
        if values.is_empty() || max <= 0.0 {
            return;
        }
        let slot = area.h / values.len() as u32;
        let bar_h = (slot * 4 / 5).max(1);
        for (i, v) in values.iter().enumerate() {
            let w = scaled(*v, max, area.w);
            let y = area.y + i as u32 * slot + slot.saturating_sub(bar_h) / 2;
            self.fill_rect(Rect::new(area.x, y, w, bar_h), color);
        }
    }

    /// One horizontal band split proportionally between `parts`.
    pub fn split_bar(&mut self, area: Rect, parts: &[(f64, Color)]) {
        let total: f64 = parts.iter().map(|(v, _)| v.max(0.0)).sum();
        if total <= 0.0 {
            return;
        }
        let band = Rect::new(area.x, area.y + area.h / 3, area.w, area.h / 3);
        let mut x = band.x;
        for (v, color) in parts {
            let w = (v.max(0.0) / total * f64::from(band.w)).round() as u32;
            self.fill_rect(Rect::new(x, band.y, w.min(band.right() - x), band.h), *color);
            x = (x + w).min(band.right());
        }
        self.outline_rect(band, AXIS);
    }

    /// Grid of cells shaded from `low` (zero) to `high` (largest count).
    pub fn heatmap(&mut self, area: Rect, cells: &[&[usize]], low: Color, high: Color) {
        let rows = cells.len();
        let cols = cells.iter().map(|r| r.len()).max().unwrap_or(0);
        if rows == 0 || cols == 0 {
            return;
        }
        let max = cells.iter().flat_map(|r| r.iter()).copied().max().unwrap_or(0);
        let (cw, ch) = (area.w / cols as u32, area.h / rows as u32);
        for (r, row) in cells.iter().enumerate() {
            for (c, n) in row.iter().enumerate() {
                let t = if max == 0 { 0.0 } else { *n as f64 / max as f64 };
                let cell = Rect::new(area.x + c as u32 * cw, area.y + r as u32 * ch, cw, ch);
                self.fill_rect(cell, lerp_color(low, high, t));
                self.outline_rect(cell, WHITE);
            }
        }
    }

    /// Map data-space `(x, y)` into `area` for the given ranges (y up).
    pub fn project(
        area: Rect,
        (x, y): (f64, f64),
        x_range: (f64, f64),
        y_range: (f64, f64),
    ) -> (f64, f64) {
        let span = |(lo, hi): (f64, f64)| if hi > lo { hi - lo } else { 1.0 };
        let px = f64::from(area.x) + (x - x_range.0) / span(x_range) * f64::from(area.w);
        let py = f64::from(area.bottom()) - (y - y_range.0) / span(y_range) * f64::from(area.h);
        (px, py)
    }

    /// Draw data-space points as filled circles.
    pub fn scatter(
        &mut self,
        area: Rect,
        points: &[(f64, f64)],
        x_range: (f64, f64),
        y_range: (f64, f64),
        style: (f64, Color, f64),
    ) {
        let (radius, color, alpha) = style;
        for point in points {
            let (px, py) = Self::project(area, *point, x_range, y_range);
            self.fill_circle(px, py, radius, color, alpha);
        }
    }

    /// Encode as PNG into `dir` as `<name>_<timestamp>.png`, creating `dir` if needed.
    pub fn save_png(&self, dir: &Path, name: &str) -> AnalysisResult<PathBuf> {
        fs::create_dir_all(dir)?;
        let stem = name.strip_suffix(".png").unwrap_or(name);
        let path = dir.join(format!("{stem}_{}.png", file_timestamp()));
        self.image.save_with_format(&path, ImageFormat::Png)?;
        Ok(path)
    }
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().filter(|v| v.is_finite()).fold(0.0, f64::max)
}

fn scaled(v: f64, max: f64, extent: u32) -> u32 {
    if !v.is_finite() || v <= 0.0 {
        return 0;
    }
    ((v / max) * f64::from(extent)).round().min(f64::from(extent)) as u32
}

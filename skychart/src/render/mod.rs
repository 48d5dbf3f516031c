//! Chart rendering behind a narrow interface so the pipeline never needs a display

use skytypes::prelude::*;

pub use self::listing::Listing;
pub use self::png::PngChart;
pub use self::window::SkyChartWindow;

pub mod listing;
pub mod png;
pub mod window;

pub type Rgb = [f32; 3];

pub const BACKGROUND_RGB: Rgb = [0.0, 0.0, 0.0];
pub const STAR_RGB: Rgb = [1.0, 1.0, 1.0];
pub const LABEL_RGB: Rgb = [1.0, 1.0, 0.0];
pub const TEXT_RGB: Rgb = [1.0, 1.0, 1.0];
pub const GRID_RGB: Rgb = [0.35, 0.35, 0.35];

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Nothing to render, the dataset is empty")]
    EmptyDataset,
    #[error("Failed to draw the chart: {0}")]
    Draw(String),
    #[error("Failed to write image '{path}': {msg}")]
    Image { path: String, msg: String },
}

pub trait Renderer {
    /// Draw every point of `dataset`, labeling the ones named in `main_stars`
    fn render(&mut self, dataset: &PlotDataset, main_stars: &MainStarSet)
        -> Result<(), RenderError>;
}

/// Look of the chart, shared by all renderers
#[derive(Clone, PartialEq, Debug)]
pub struct ChartStyle {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Window or image size [px]
    pub width: u32,
    pub height: u32,
    /// Space kept free around the plot area for captions [px]
    pub margin: u32,
    pub star_radius: f32,
    /// Label position relative to the star [px], right and up
    pub label_offset: (f32, f32),
    pub label_size: f32,
    pub text_size: f32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            title: "Constellation: Orion".to_owned(),
            x_label: "Right ascension (degrees)".to_owned(),
            y_label: "Declination (degrees)".to_owned(),
            width: 1000,
            height: 800,
            margin: 70,
            star_radius: 3.0,
            label_offset: (5.0, 5.0),
            label_size: 18.0,
            text_size: 22.0,
        }
    }
}

impl ChartStyle {
    pub fn with_title<S: Into<String>>(title: S) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Points that get a text label, in dataset order
pub fn labeled_points<'a>(
    dataset: &'a PlotDataset,
    main_stars: &'a MainStarSet,
) -> impl Iterator<Item = (&'a str, DecimalCoordinate)> + 'a {
    dataset.points().filter(|(n, _)| main_stars.contains(n))
}

/// Maps sky coordinates to pixel positions inside the plot area.
///
/// Pixel origin is the top-left corner of the image. Right ascension
/// increases to the left, as on a sky chart seen from the ground.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ChartLayout {
    /// Visible sky region, already padded
    pub sky: Bounds,
    pub left: f64,
    pub top: f64,
    pub plot_width: f64,
    pub plot_height: f64,
}

impl ChartLayout {
    /// Fraction of the data span added on each side
    pub const PADDING: f64 = 0.05;
    /// Minimum padding [deg] so a single star still gets a visible region
    pub const MIN_PADDING: f64 = 0.5;
    pub const TARGET_TICKS: f64 = 6.0;
    /// Upper limit on grid lines per axis
    pub const MAX_TICKS: usize = 50;

    pub fn new(dataset: &PlotDataset, style: &ChartStyle) -> Option<Self> {
        let sky = dataset.bounds()?.padded(Self::PADDING, Self::MIN_PADDING);
        let margin = style.margin as f64;
        Some(Self {
            sky,
            left: margin,
            top: margin,
            plot_width: (style.width as f64 - 2.0 * margin).max(1.0),
            plot_height: (style.height as f64 - 2.0 * margin).max(1.0),
        })
    }

    /// Pixel position of a sky coordinate.
    ///
    /// A region too large or too far out for `f64` to resolve collapses to
    /// its center.
    pub fn project(&self, c: DecimalCoordinate) -> (f64, f64) {
        let fraction = |max: f64, v: f64, span: f64| {
            let f = (max - v) / span;
            if f.is_finite() {
                f
            } else {
                0.5
            }
        };
        let fx = fraction(self.sky.max_x, c.x, self.sky.width());
        let fy = fraction(self.sky.max_y, c.y, self.sky.height());
        (
            self.left + fx * self.plot_width,
            self.top + fy * self.plot_height,
        )
    }

    pub fn right(&self) -> f64 {
        self.left + self.plot_width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.plot_height
    }

    /// Right ascension grid values [deg]
    pub fn x_ticks(&self) -> Vec<f64> {
        ticks(self.sky.min_x, self.sky.max_x, Self::TARGET_TICKS)
    }

    /// Declination grid values [deg]
    pub fn y_ticks(&self) -> Vec<f64> {
        ticks(self.sky.min_y, self.sky.max_y, Self::TARGET_TICKS)
    }
}

/// Round step of 1, 2 or 5 times a power of ten giving roughly `target` intervals
pub fn nice_step(span: f64, target: f64) -> f64 {
    if span <= 0.0 || !span.is_finite() {
        return 1.0;
    }
    let raw = span / target;
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let step = if norm < 1.5 {
        1.0
    } else if norm < 3.0 {
        2.0
    } else if norm < 7.0 {
        5.0
    } else {
        10.0
    };
    step * mag
}

/// Dash and gap length of grid lines [px]
pub const DASH: f64 = 6.0;
pub const GAP: f64 = 4.0;

pub type Segment = ((f64, f64), (f64, f64));

/// Split a line into the visible pieces of a dashed line
pub fn dash_segments(a: (f64, f64), b: (f64, f64)) -> Vec<Segment> {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len = dx.hypot(dy);
    if len <= 0.0 {
        return Vec::new();
    }
    let (ux, uy) = (dx / len, dy / len);
    let mut out = Vec::new();
    let mut t = 0.0;
    while t < len {
        let end = (t + DASH).min(len);
        out.push((
            (a.0 + ux * t, a.1 + uy * t),
            (a.0 + ux * end, a.1 + uy * end),
        ));
        t += DASH + GAP;
    }
    out
}

/// Tick captions with just enough decimals for the grid spacing
pub fn tick_labels(ticks: &[f64]) -> Vec<String> {
    let decimals = match ticks {
        [a, b, ..] => (-(b - a).log10().floor()).max(0.0) as usize,
        _ => 0,
    };
    ticks.iter().map(|t| format!("{t:.decimals$}")).collect()
}

fn ticks(min: f64, max: f64, target: f64) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || max < min {
        return Vec::new();
    }
    let step = nice_step(max - min, target);
    let first = (min / step).ceil() * step;
    // Step below the resolution of the values
    if first + step == first {
        return Vec::new();
    }
    let count = ((max - first) / step + 1e-9).floor();
    if count < 0.0 {
        return Vec::new();
    }
    let count = (count as usize + 1).min(ChartLayout::MAX_TICKS);
    (0..count)
        .map(|i| first + i as f64 * step)
        // Avoid printing -0
        .map(|v| if v.abs() < step * 1e-9 { 0.0 } else { v })
        .collect()
}

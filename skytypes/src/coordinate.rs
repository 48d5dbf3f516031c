use derive_more::Display;

/// A position on the sky in decimal degrees.
///
/// `x` is the right ascension and `y` the declination. Values are whatever the
/// sexagesimal arithmetic produced; nothing is clamped or wrapped.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Display)]
#[display(fmt = "({:.4}°, {:.4}°)", "x", "y")]
pub struct DecimalCoordinate {
    /// Right ascension [deg]
    pub x: f64,
    /// Declination [deg]
    pub y: f64,
}

impl DecimalCoordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box in decimal degrees
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Display)]
#[display(
    fmt = "{{x: [{}, {}], y: [{}, {}]}}",
    "min_x",
    "max_x",
    "min_y",
    "max_y"
)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_point(c: DecimalCoordinate) -> Self {
        Self {
            min_x: c.x,
            max_x: c.x,
            min_y: c.y,
            max_y: c.y,
        }
    }

    pub fn include(&mut self, c: DecimalCoordinate) {
        self.min_x = self.min_x.min(c.x);
        self.max_x = self.max_x.max(c.x);
        self.min_y = self.min_y.min(c.y);
        self.max_y = self.max_y.max(c.y);
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Grow each side by `fraction` of the span, or by `min_pad` when the span is degenerate
    pub fn padded(&self, fraction: f64, min_pad: f64) -> Self {
        let pad_x = (self.width() * fraction).max(min_pad);
        let pad_y = (self.height() * fraction).max(min_pad);
        Self {
            min_x: self.min_x - pad_x,
            max_x: self.max_x + pad_x,
            min_y: self.min_y - pad_y,
            max_y: self.max_y + pad_y,
        }
    }
}

use derive_more::Display;

/// Hour-angle to degrees, 360° / 24h
pub const DEGREES_PER_HOUR: f64 = 15.0;

/// Right ascension in sexagesimal hours, minutes and seconds of time
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Display)]
#[display(fmt = "{:02}h {:02}m {}s", "hours", "minutes", "seconds")]
pub struct RightAscension {
    /// Whole hours, any magnitude
    pub hours: f64,
    pub minutes: f64,
    pub seconds: f64,
}

impl RightAscension {
    pub fn new(hours: f64, minutes: f64, seconds: f64) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// Decimal hours, no wraparound
    pub fn to_hours(&self) -> f64 {
        self.hours + self.minutes / 60.0 + self.seconds / 3600.0
    }

    /// Decimal degrees [deg], no modulo-360 normalization
    pub fn to_degrees(&self) -> f64 {
        self.to_hours() * DEGREES_PER_HOUR
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Display)]
pub enum Sign {
    /// Catalog entries without a sign are north of the celestial equator
    #[default]
    #[display(fmt = "+")]
    Positive,
    #[display(fmt = "-")]
    Negative,
}

impl Sign {
    pub const fn factor(self) -> f64 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }
}

/// Declination in signed sexagesimal degrees, arcminutes and arcseconds
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Display)]
#[display(
    fmt = "{}{:02}° {:02}′ {}″",
    "sign",
    "degrees",
    "minutes",
    "seconds"
)]
pub struct Declination {
    pub sign: Sign,
    /// Whole degrees, any magnitude
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
}

impl Declination {
    pub fn new(sign: Sign, degrees: f64, minutes: f64, seconds: f64) -> Self {
        Self {
            sign,
            degrees,
            minutes,
            seconds,
        }
    }

    /// Unsigned magnitude [deg]
    pub fn magnitude(&self) -> f64 {
        self.degrees + self.minutes / 60.0 + self.seconds / 3600.0
    }

    /// Signed decimal degrees [deg], no hemisphere validation
    pub fn to_degrees(&self) -> f64 {
        self.sign.factor() * self.magnitude()
    }
}

use crate::coordinate::{Bounds, DecimalCoordinate};
use std::collections::BTreeSet;

/// Parallel sequences of plottable points, in catalog response order.
///
/// The three columns are only ever extended together so they always have the
/// same length.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct PlotDataset {
    xs: Vec<f64>,
    ys: Vec<f64>,
    names: Vec<String>,
}

impl PlotDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<S: Into<String>>(&mut self, name: S, coord: DecimalCoordinate) {
        self.xs.push(coord.x);
        self.ys.push(coord.y);
        self.names.push(name.into());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Right ascension column [deg]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Declination column [deg]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn points(&self) -> impl Iterator<Item = (&str, DecimalCoordinate)> + '_ {
        self.names
            .iter()
            .zip(self.xs.iter().zip(self.ys.iter()))
            .map(|(n, (x, y))| (n.as_str(), DecimalCoordinate::new(*x, *y)))
    }

    /// Bounding box of all points, `None` when empty
    pub fn bounds(&self) -> Option<Bounds> {
        let mut pts = self.points().map(|(_, c)| c);
        let first = pts.next()?;
        Some(pts.fold(Bounds::from_point(first), |mut b, c| {
            b.include(c);
            b
        }))
    }
}

/// Names of the stars that get a text label on the chart
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct MainStarSet(BTreeSet<String>);

impl MainStarSet {
    /// Principal stars of Orion
    pub const ORION: [&'static str; 8] = [
        "Betelgeuse",
        "Rigel",
        "Bellatrix",
        "Alnilam",
        "Alnitak",
        "Mintaka",
        "Saiph",
        "Kappa Orionis",
    ];

    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Exact, case-sensitive match
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for MainStarSet {
    fn default() -> Self {
        Self::new(Self::ORION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_stay_parallel() {
        let mut ds = PlotDataset::new();
        assert!(ds.is_empty());
        assert!(ds.bounds().is_none());

        ds.push("Betelgeuse", DecimalCoordinate::new(88.79, 7.41));
        ds.push("Rigel", DecimalCoordinate::new(78.63, -8.20));
        ds.push("Meissa", DecimalCoordinate::new(83.78, 9.93));

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.xs(), &[88.79, 78.63, 83.78]);
        assert_eq!(ds.ys(), &[7.41, -8.20, 9.93]);
        assert_eq!(ds.names(), &["Betelgeuse", "Rigel", "Meissa"]);

        let names: Vec<&str> = ds.points().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Betelgeuse", "Rigel", "Meissa"]);

        let b = ds.bounds().unwrap();
        assert_eq!(b.min_x, 78.63);
        assert_eq!(b.max_x, 88.79);
        assert_eq!(b.min_y, -8.20);
        assert_eq!(b.max_y, 9.93);
    }

    #[test]
    fn main_star_membership() {
        let stars = MainStarSet::default();
        assert_eq!(stars.len(), 8);
        assert!(stars.contains("Betelgeuse"));
        assert!(stars.contains("Kappa Orionis"));
        assert!(!stars.contains("betelgeuse"));
        assert!(!stars.contains("Meissa"));
    }
}

use super::{RenderError, Renderer};
use skytypes::prelude::*;
use std::io::{self, Write};

/// Prints the chart's points as a table instead of drawing them
#[derive(Debug)]
pub struct Listing<W> {
    out: W,
}

impl Listing<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> Listing<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_table(&mut self, dataset: &PlotDataset, main_stars: &MainStarSet) -> io::Result<()> {
        let width = dataset
            .names()
            .iter()
            .map(|n| n.chars().count())
            .max()
            .unwrap_or(0)
            .max(4);
        writeln!(
            self.out,
            "{:<width$}  {:>10}  {:>10}  label",
            "name", "ra [deg]", "dec [deg]"
        )?;
        for (name, c) in dataset.points() {
            let label = if main_stars.contains(name) { "*" } else { "" };
            writeln!(
                self.out,
                "{:<width$}  {:>10.4}  {:>10.4}  {}",
                name, c.x, c.y, label
            )?;
        }
        self.out.flush()
    }
}

impl<W: Write> Renderer for Listing<W> {
    fn render(
        &mut self,
        dataset: &PlotDataset,
        main_stars: &MainStarSet,
    ) -> Result<(), RenderError> {
        if dataset.is_empty() {
            return Err(RenderError::EmptyDataset);
        }
        self.write_table(dataset, main_stars)
            .map_err(|e| RenderError::Draw(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table() {
        let mut ds = PlotDataset::new();
        ds.push("Betelgeuse", DecimalCoordinate::new(88.792939, 7.407064));
        ds.push("Meissa", DecimalCoordinate::new(83.784486, 9.934156));

        let mut listing = Listing::new(Vec::new());
        listing.render(&ds, &MainStarSet::default()).unwrap();
        let out = String::from_utf8(listing.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Betelgeuse     88.7929      7.4071  *");
        assert_eq!(lines[2], "Meissa         83.7845      9.9342  ");
    }
}

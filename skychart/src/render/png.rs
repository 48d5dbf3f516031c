use super::{
    dash_segments, labeled_points, tick_labels, ChartLayout, ChartStyle, RenderError, Renderer,
    Rgb, BACKGROUND_RGB, GRID_RGB, LABEL_RGB, STAR_RGB, TEXT_RGB,
};
use plotters::prelude::*;
use skytypes::prelude::*;
use std::path::PathBuf;
use tracing::info;

const FONT: &str = "sans-serif";

/// Writes the chart to a bitmap file instead of opening a window
#[derive(Debug, Clone)]
pub struct PngChart {
    path: PathBuf,
    style: ChartStyle,
}

impl PngChart {
    pub fn new<P: Into<PathBuf>>(path: P, style: ChartStyle) -> Self {
        Self {
            path: path.into(),
            style,
        }
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, plotters::coord::Shift>,
        layout: &ChartLayout,
        dataset: &PlotDataset,
        main_stars: &MainStarSet,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let style = &self.style;
        root.fill(&color(BACKGROUND_RGB))?;

        let grid = color(GRID_RGB).stroke_width(1);
        let tick_font = (FONT, style.label_size as f64)
            .into_font()
            .color(&color(TEXT_RGB));

        let x_ticks = layout.x_ticks();
        for (v, label) in x_ticks.iter().zip(tick_labels(&x_ticks)) {
            let (px, _) = layout.project(DecimalCoordinate::new(*v, layout.sky.min_y));
            for seg in dash_segments((px, layout.top), (px, layout.bottom())) {
                root.draw(&PathElement::new(vec![pixel(seg.0), pixel(seg.1)], grid))?;
            }
            root.draw(&Text::new(
                label,
                pixel((px - 10.0, layout.bottom() + 6.0)),
                tick_font.clone(),
            ))?;
        }

        let y_ticks = layout.y_ticks();
        for (v, label) in y_ticks.iter().zip(tick_labels(&y_ticks)) {
            let (_, py) = layout.project(DecimalCoordinate::new(layout.sky.min_x, *v));
            for seg in dash_segments((layout.left, py), (layout.right(), py)) {
                root.draw(&PathElement::new(vec![pixel(seg.0), pixel(seg.1)], grid))?;
            }
            root.draw(&Text::new(
                label,
                pixel((layout.left - 45.0, py - 9.0)),
                tick_font.clone(),
            ))?;
        }

        root.draw(&Rectangle::new(
            [
                pixel((layout.left, layout.top)),
                pixel((layout.right(), layout.bottom())),
            ],
            color(TEXT_RGB).stroke_width(1),
        ))?;

        for (_, c) in dataset.points() {
            root.draw(&Circle::new(
                pixel(layout.project(c)),
                style.star_radius.round() as i32,
                color(STAR_RGB).filled(),
            ))?;
        }

        let label_font = (FONT, style.label_size as f64)
            .into_font()
            .color(&color(LABEL_RGB));
        let (off_x, off_y) = style.label_offset;
        for (name, c) in labeled_points(dataset, main_stars) {
            let (px, py) = layout.project(c);
            root.draw(&Text::new(
                name.to_owned(),
                pixel((
                    px + off_x as f64,
                    py - off_y as f64 - style.label_size as f64,
                )),
                label_font.clone(),
            ))?;
        }

        let text_font = (FONT, style.text_size as f64)
            .into_font()
            .color(&color(TEXT_RGB));
        let (w, h) = (style.width as f64, style.height as f64);
        root.draw(&Text::new(
            style.title.clone(),
            pixel((w / 2.0 - 120.0, 15.0)),
            text_font,
        ))?;
        root.draw(&Text::new(
            style.x_label.clone(),
            pixel((w / 2.0 - 110.0, h - 35.0)),
            tick_font.clone(),
        ))?;
        root.draw(&Text::new(
            style.y_label.clone(),
            pixel((10.0, 40.0)),
            tick_font,
        ))?;

        root.present()
    }
}

impl Renderer for PngChart {
    fn render(
        &mut self,
        dataset: &PlotDataset,
        main_stars: &MainStarSet,
    ) -> Result<(), RenderError> {
        let layout = ChartLayout::new(dataset, &self.style).ok_or(RenderError::EmptyDataset)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| RenderError::Image {
                    path: self.path.display().to_string(),
                    msg: e.to_string(),
                })?;
            }
        }

        let root =
            BitMapBackend::new(&self.path, (self.style.width, self.style.height)).into_drawing_area();
        self.draw(&root, &layout, dataset, main_stars)
            .map_err(|e| RenderError::Draw(e.to_string()))?;

        info!(path = %self.path.display(), points = dataset.len(), "Chart written");
        Ok(())
    }
}

fn color(rgb: Rgb) -> RGBColor {
    RGBColor(
        (rgb[0] * 255.0).round() as u8,
        (rgb[1] * 255.0).round() as u8,
        (rgb[2] * 255.0).round() as u8,
    )
}

fn pixel(p: (f64, f64)) -> (i32, i32) {
    (p.0.round() as i32, p.1.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors() {
        assert_eq!(color(STAR_RGB), RGBColor(255, 255, 255));
        assert_eq!(color(BACKGROUND_RGB), RGBColor(0, 0, 0));
        assert_eq!(color(LABEL_RGB), RGBColor(255, 255, 0));
    }

    #[test]
    fn empty_dataset() {
        let mut chart = PngChart::new("unused.png", ChartStyle::default());
        assert!(matches!(
            chart.render(&PlotDataset::new(), &MainStarSet::default()),
            Err(RenderError::EmptyDataset)
        ));
    }
}

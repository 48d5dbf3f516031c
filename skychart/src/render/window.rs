use super::{
    dash_segments, labeled_points, tick_labels, ChartLayout, ChartStyle, RenderError, Renderer, Rgb,
    BACKGROUND_RGB, GRID_RGB, LABEL_RGB, STAR_RGB, TEXT_RGB,
};
use kiss3d::{
    event::{Action, Key, WindowEvent},
    scene::PlanarSceneNode,
    text::Font,
    window::Window,
};
use na::{Point2, Point3, Translation2};
use skytypes::prelude::*;
use std::{fmt::Write, path::Path, rc::Rc};
use tracing::{debug, info};

pub const SNAPSHOT_PATH: &str = "snapshot.png";

/// Interactive chart window. Blocks in [`Renderer::render`] until closed.
#[derive(Debug, Clone, Default)]
pub struct SkyChartWindow {
    style: ChartStyle,
}

impl SkyChartWindow {
    pub fn new(style: ChartStyle) -> Self {
        Self { style }
    }
}

impl Renderer for SkyChartWindow {
    fn render(
        &mut self,
        dataset: &PlotDataset,
        main_stars: &MainStarSet,
    ) -> Result<(), RenderError> {
        let mut state = WindowState::new(&self.style, dataset)?;
        state.run(dataset, main_stars)
    }
}

struct WindowState {
    window: Window,
    style: ChartStyle,
    font: Rc<Font>,
    text_buf: String,
    star_nodes: Vec<PlanarSceneNode>,
}

impl WindowState {
    fn new(style: &ChartStyle, dataset: &PlotDataset) -> Result<Self, RenderError> {
        if dataset.is_empty() {
            return Err(RenderError::EmptyDataset);
        }

        let mut window = Window::new_with_size(&style.title, style.width, style.height);
        window.set_background_color(BACKGROUND_RGB[0], BACKGROUND_RGB[1], BACKGROUND_RGB[2]);
        window.set_framerate_limit(Some(30));

        let star_nodes = (0..dataset.len())
            .map(|_| {
                let mut n = window.add_circle(style.star_radius);
                n.set_color(STAR_RGB[0], STAR_RGB[1], STAR_RGB[2]);
                n
            })
            .collect();

        println!("----------------------------------------------");
        println!("|               Chart key map                |");
        println!("----------------------------------------------");
        println!("'p'   : snapshot : writes {SNAPSHOT_PATH} to the CWD");
        println!("ESC   : exit");
        println!("----------------------------------------------");

        Ok(Self {
            window,
            style: style.clone(),
            font: Font::default(),
            text_buf: String::with_capacity(256),
            star_nodes,
        })
    }

    fn run(&mut self, dataset: &PlotDataset, main_stars: &MainStarSet) -> Result<(), RenderError> {
        loop {
            let layout = self.layout(dataset)?;

            self.draw_grid(&layout);
            self.draw_frame(&layout);
            self.place_stars(&layout, dataset);
            self.draw_star_labels(&layout, dataset, main_stars);
            self.draw_captions(&layout);

            if !self.window.render() {
                debug!("Chart window closed");
                break Ok(());
            }

            for event in self.window.events().iter() {
                if let WindowEvent::Key(Key::P, Action::Press, _) = event.value {
                    let img = self.window.snap_image();
                    let img_path = Path::new(SNAPSHOT_PATH);
                    info!(path = %img_path.display(), "Writing snapshot");
                    img.save(img_path).map_err(|e| RenderError::Image {
                        path: SNAPSHOT_PATH.to_owned(),
                        msg: e.to_string(),
                    })?;
                }
            }
        }
    }

    /// Layout for the current window size, in logical pixels
    fn layout(&self, dataset: &PlotDataset) -> Result<ChartLayout, RenderError> {
        let (w, h) = self.logical_size();
        let style = ChartStyle {
            width: w as u32,
            height: h as u32,
            ..self.style.clone()
        };
        ChartLayout::new(dataset, &style).ok_or(RenderError::EmptyDataset)
    }

    fn logical_size(&self) -> (f64, f64) {
        let size = self.window.size();
        let scale = self.window.scale_factor();
        (size[0] as f64 / scale, size[1] as f64 / scale)
    }

    /// Top-left pixel coordinates to the planar scene frame (centered, y up)
    fn to_planar(&self, px: f64, py: f64) -> Point2<f32> {
        let (w, h) = self.logical_size();
        Point2::new((px - w / 2.0) as f32, (h / 2.0 - py) as f32)
    }

    /// Text is positioned in physical pixels from the top-left corner
    fn to_text_pos(&self, px: f64, py: f64) -> Point2<f32> {
        let scale = self.window.scale_factor();
        Point2::new((px * scale) as f32, (py * scale) as f32)
    }

    fn line(&mut self, a: (f64, f64), b: (f64, f64), rgb: Rgb) {
        let a = self.to_planar(a.0, a.1);
        let b = self.to_planar(b.0, b.1);
        self.window
            .draw_planar_line(&a, &b, &Point3::new(rgb[0], rgb[1], rgb[2]));
    }

    fn dashed_line(&mut self, a: (f64, f64), b: (f64, f64), rgb: Rgb) {
        for (s, e) in dash_segments(a, b) {
            self.line(s, e, rgb);
        }
    }

    fn text(&mut self, px: f64, py: f64, size: f32, rgb: Rgb) {
        let pos = self.to_text_pos(px, py);
        let scale = self.window.scale_factor() as f32;
        self.window.draw_text(
            &self.text_buf,
            &pos,
            size * scale,
            &self.font,
            &Point3::new(rgb[0], rgb[1], rgb[2]),
        );
    }

    fn draw_grid(&mut self, layout: &ChartLayout) {
        let x_ticks = layout.x_ticks();
        let y_ticks = layout.y_ticks();

        for (v, label) in x_ticks.iter().zip(tick_labels(&x_ticks)) {
            let (px, _) = layout.project(DecimalCoordinate::new(*v, layout.sky.min_y));
            self.dashed_line((px, layout.top), (px, layout.bottom()), GRID_RGB);
            self.text_buf = label;
            self.text(px - 10.0, layout.bottom() + 6.0, self.style.label_size, TEXT_RGB);
        }

        for (v, label) in y_ticks.iter().zip(tick_labels(&y_ticks)) {
            let (_, py) = layout.project(DecimalCoordinate::new(layout.sky.min_x, *v));
            self.dashed_line((layout.left, py), (layout.right(), py), GRID_RGB);
            self.text_buf = label;
            self.text(layout.left - 45.0, py - 9.0, self.style.label_size, TEXT_RGB);
        }
    }

    fn draw_frame(&mut self, layout: &ChartLayout) {
        let (l, t, r, b) = (layout.left, layout.top, layout.right(), layout.bottom());
        self.line((l, t), (r, t), TEXT_RGB);
        self.line((r, t), (r, b), TEXT_RGB);
        self.line((r, b), (l, b), TEXT_RGB);
        self.line((l, b), (l, t), TEXT_RGB);
    }

    fn place_stars(&mut self, layout: &ChartLayout, dataset: &PlotDataset) {
        let positions: Vec<Point2<f32>> = dataset
            .points()
            .map(|(_, c)| {
                let (px, py) = layout.project(c);
                self.to_planar(px, py)
            })
            .collect();
        for (n, p) in self.star_nodes.iter_mut().zip(positions) {
            n.set_local_translation(Translation2::new(p.x, p.y));
        }
    }

    fn draw_star_labels(
        &mut self,
        layout: &ChartLayout,
        dataset: &PlotDataset,
        main_stars: &MainStarSet,
    ) {
        let (off_x, off_y) = self.style.label_offset;
        for (name, c) in labeled_points(dataset, main_stars) {
            let (px, py) = layout.project(c);
            self.text_buf.clear();
            self.text_buf.push_str(name);
            // Offset up and to the right, text grows downwards from its origin
            self.text(
                px + off_x as f64,
                py - off_y as f64 - self.style.label_size as f64,
                self.style.label_size,
                LABEL_RGB,
            );
        }
    }

    fn draw_captions(&mut self, layout: &ChartLayout) {
        let (w, h) = self.logical_size();

        self.text_buf.clear();
        self.text_buf.push_str(&self.style.title);
        self.text(w / 2.0 - 120.0, 15.0, self.style.text_size, TEXT_RGB);

        self.text_buf.clear();
        self.text_buf.push_str(&self.style.x_label);
        self.text(w / 2.0 - 110.0, h - 35.0, self.style.label_size, TEXT_RGB);

        self.text_buf.clear();
        let _ = write!(
            &mut self.text_buf,
            "{} ({:.1}..{:.1})",
            self.style.y_label, layout.sky.min_y, layout.sky.max_y
        );
        self.text(10.0, 40.0, self.style.label_size, TEXT_RGB);
    }
}

use crate::{
    config::RenderConfig,
    constants::MAP_MAX,
    error::Result,
    export::ensure_dir,
    geometry::{CandidateSet, Coordinate, Extent},
    session::Session,
};

use image::{ImageBuffer, Rgb, RgbImage, imageops::FilterType};
use imageproc::{
    drawing::{
        draw_filled_rect_mut, draw_hollow_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut,
    },
    rect::Rect,
};
use log::debug;
use std::path::{Path, PathBuf};

/// Map units between grid lines on a blank background
const GRID_STEP: i32 = 512;
const CENTER_MARK_PX: i32 = 6;

/// Color definitions
pub struct Colors;

impl Colors {
    pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    pub const LIGHT_GRAY: Rgb<u8> = Rgb([220, 220, 220]);
    pub const DARK_GRAY: Rgb<u8> = Rgb([128, 128, 128]);
}

/// Draws map-space shapes onto a square image
pub struct Renderer {
    pub image: RgbImage,
    pub size: u32,
    /// pixels per map unit
    scale: f64,
}

impl Renderer {
    /// White canvas with a light grid
    pub fn new(size: u32) -> Self {
        let image = ImageBuffer::from_pixel(size, size, Colors::WHITE);
        let mut renderer = Self::from_image(image);
        renderer.draw_grid(GRID_STEP, Colors::LIGHT_GRAY);
        renderer
    }

    /// Background stretched to cover the whole map
    pub fn with_background<P: AsRef<Path>>(path: P, size: u32) -> Result<Self> {
        let background = image::open(path)?.to_rgb8();
        let image = image::imageops::resize(&background, size, size, FilterType::Triangle);
        Ok(Self::from_image(image))
    }

    fn from_image(image: RgbImage) -> Self {
        let size = image.width();
        Self {
            image,
            size,
            scale: size as f64 / (MAP_MAX as f64 + 1.0),
        }
    }

    /// Map coordinate to pixel (top-left of its cell)
    #[inline]
    fn to_px(&self, x: i32, y: i32) -> (i32, i32) {
        (
            (x as f64 * self.scale).floor() as i32,
            (y as f64 * self.scale).floor() as i32,
        )
    }

    /// Pixel span of `n` map units starting at `from`, at least 1
    #[inline]
    fn span_px(&self, from: i32, n: i32) -> u32 {
        let a = (from as f64 * self.scale).floor();
        let b = ((from + n) as f64 * self.scale).floor();
        ((b - a) as u32).max(1)
    }

    pub fn draw_candidates(&mut self, candidates: &CandidateSet, color: Rgb<u8>) {
        for p in candidates {
            let (px, py) = self.to_px(p.x, p.y);
            let rect = Rect::at(px, py).of_size(self.span_px(p.x, 1), self.span_px(p.y, 1));
            draw_filled_rect_mut(&mut self.image, rect, color);
        }
    }

    /// Ring with a cross through it
    pub fn draw_center(&mut self, center: Coordinate, color: Rgb<u8>) {
        let (cx, cy) = self.to_px(center.x, center.y);
        let r = CENTER_MARK_PX;
        draw_hollow_circle_mut(&mut self.image, (cx, cy), r, color);
        draw_line_segment_mut(
            &mut self.image,
            ((cx - r) as f32, cy as f32),
            ((cx + r) as f32, cy as f32),
            color,
        );
        draw_line_segment_mut(
            &mut self.image,
            (cx as f32, (cy - r) as f32),
            (cx as f32, (cy + r) as f32),
            color,
        );
    }

    pub fn draw_extent(&mut self, extent: &Extent, color: Rgb<u8>) {
        let (px, py) = self.to_px(extent.min_x, extent.min_y);
        let w = self.span_px(extent.min_x, extent.width() as i32);
        let h = self.span_px(extent.min_y, extent.height() as i32);
        draw_hollow_rect_mut(&mut self.image, Rect::at(px, py).of_size(w, h), color);
    }

    pub fn draw_grid(&mut self, step: i32, color: Rgb<u8>) {
        let last = self.size as f32 - 1.0;
        for u in (0..=MAP_MAX).step_by(step as usize) {
            let (p, _) = self.to_px(u, 0);
            let p = p as f32;
            draw_line_segment_mut(&mut self.image, (p, 0.0), (p, last), color);
            draw_line_segment_mut(&mut self.image, (0.0, p), (last, p), color);
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.image.save(path)?;
        Ok(())
    }
}

/// Candidates, their bounding box and every clue position
pub fn render_session(session: &Session, config: &RenderConfig) -> Result<Renderer> {
    let mut renderer = match &config.map_image {
        Some(map) => Renderer::with_background(map, config.size_px)?,
        None => Renderer::new(config.size_px),
    };

    if let Some(candidates) = session.current() {
        renderer.draw_candidates(candidates, config.candidate_rgb()?);
        if let Some(extent) = candidates.bounding_extent() {
            renderer.draw_extent(&extent, Colors::DARK_GRAY);
        }
        debug!("rendered {} candidates", candidates.len());
    }

    let center_color = config.center_rgb()?;
    for region in session.regions() {
        renderer.draw_center(region.center, center_color);
    }
    Ok(renderer)
}

pub fn export_png(
    session: &Session,
    config: &RenderConfig,
    output_dir: &Path,
    stem: &str,
) -> Result<PathBuf> {
    ensure_dir(output_dir)?;
    let file_path = output_dir.join(format!("{stem}.png"));
    render_session(session, config)?.save(&file_path)?;
    Ok(file_path)
}

//! Shared helpers for the example binaries: tracing setup and a minimal
//! PNG renderer that acts as the display side of the engine.
use anyhow::Context;
use image::{Rgb, RgbImage};
use star_field::field::StarField;
use tracing_subscriber::EnvFilter;

/// Initializes a tracing subscriber honoring `RUST_LOG`, defaulting to
/// `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// How to rasterize a field.
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    /// Output image size in pixels (width, height).
    pub image_size: (u32, u32),
    /// Background color.
    pub background: [u8; 3],
    /// Star color at full opacity; scaled by each star's current alpha.
    pub star_color: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_size: (540, 1080),
            background: [10, 12, 26],
            star_color: [235, 235, 245],
        }
    }
}

/// Rasterizes the field's stars (scroll offset applied) into a PNG.
pub fn render_field_to_png(field: &StarField, config: &RenderConfig, path: &str) -> anyhow::Result<()> {
    let (width, height) = config.image_size;
    let mut img = RgbImage::from_pixel(width, height, Rgb(config.background));

    let state = field.state();
    let offset = field.scroll_offset();
    let scale_x = width as f32 / state.spread_width;
    let scale_y = height as f32 / state.spread_height;

    for star in field.stars() {
        let cx = (star.position.x + state.spread_width * 0.5) * scale_x;
        let cy = (star.position.y + offset + state.spread_height * 0.5) * scale_y;
        let radius = (star.size * 0.5 * scale_x).max(0.5);
        let color = Rgb([
            blend(config.background[0], config.star_color[0], star.alpha),
            blend(config.background[1], config.star_color[1], star.alpha),
            blend(config.background[2], config.star_color[2], star.alpha),
        ]);
        draw_disc(&mut img, cx, cy, radius, color);
    }

    img.save(path).with_context(|| format!("writing {path}"))?;
    Ok(())
}

fn blend(background: u8, star: u8, alpha: f32) -> u8 {
    let alpha = alpha.clamp(0.0, 1.0);
    (background as f32 + (star as f32 - background as f32) * alpha) as u8
}

fn draw_disc(img: &mut RgbImage, cx: f32, cy: f32, radius: f32, color: Rgb<u8>) {
    let (width, height) = img.dimensions();
    let min_x = (cx - radius).floor().max(0.0) as u32;
    let max_x = (cx + radius).ceil().min(width as f32 - 1.0) as u32;
    let min_y = (cy - radius).floor().max(0.0) as u32;
    let max_y = (cy + radius).ceil().min(height as f32 - 1.0) as u32;
    if min_x > max_x || min_y > max_y {
        return;
    }

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= radius * radius {
                img.put_pixel(x, y, color);
            }
        }
    }
}

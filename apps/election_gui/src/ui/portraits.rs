//! Portrait texture cache keyed by resolved asset path.

use std::{collections::HashMap, path::PathBuf};

use eframe::egui;
use egui::TextureHandle;
use image::GenericImageView;

const MAX_PORTRAIT_DIMENSION: u32 = 512;

pub struct PortraitCache {
    html_dir: PathBuf,
    textures: HashMap<String, Option<TextureHandle>>,
}

impl PortraitCache {
    pub fn new(html_dir: PathBuf) -> Self {
        Self {
            html_dir,
            textures: HashMap::new(),
        }
    }

    /// Loads on first use; failures are cached so a missing file is read once.
    pub fn texture(&mut self, ctx: &egui::Context, portrait: &str) -> Option<&TextureHandle> {
        if !self.textures.contains_key(portrait) {
            let loaded = self.load(ctx, portrait);
            self.textures.insert(portrait.to_string(), loaded);
        }
        self.textures.get(portrait).and_then(Option::as_ref)
    }

    fn load(&self, ctx: &egui::Context, portrait: &str) -> Option<TextureHandle> {
        let path = self.html_dir.join(portrait);
        let decoded = match image::open(&path) {
            Ok(decoded) => decoded,
            Err(err) => {
                tracing::debug!("portrait '{}' unavailable: {err}", path.display());
                return None;
            }
        };

        let (orig_w, orig_h) = decoded.dimensions();
        let decoded = if orig_w.max(orig_h) > MAX_PORTRAIT_DIMENSION {
            decoded.thumbnail(MAX_PORTRAIT_DIMENSION, MAX_PORTRAIT_DIMENSION)
        } else {
            decoded
        };
        let rgba = decoded.to_rgba8();
        let [w, h] = [rgba.width() as usize, rgba.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied([w, h], rgba.as_raw());
        Some(ctx.load_texture(
            format!("portrait:{portrait}"),
            color_image,
            egui::TextureOptions::LINEAR,
        ))
    }
}

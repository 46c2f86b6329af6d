//! Presents a recorded `DrawList` through egui's background layer.
//!
//! The virtual screen is scaled by the largest integer factor that fits the
//! window and centred; the remainder is letterbox.

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use ludo_core::canvas::{palette_rgb, DrawCommand, DrawList};
use ludo_core::SpriteUv;

use crate::banks::ImageBanks;

/// Glyph cell height of the virtual screen's font, in virtual pixels.
const GLYPH_HEIGHT: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTransform {
    pub origin: Vec2,
    pub scale: f32,
    pub size: Vec2,
}

impl ScreenTransform {
    pub fn fit(virtual_size: (u32, u32), available: Vec2) -> Self {
        let virt = Vec2::new(virtual_size.0.max(1) as f32, virtual_size.1.max(1) as f32);
        let ratio = available / virt;
        let scale = ratio.x.min(ratio.y).floor().max(1.0);
        let size = virt * scale;
        let origin = ((available - size) * 0.5).max(Vec2::ZERO).floor();
        Self {
            origin,
            scale,
            size,
        }
    }

    pub fn to_screen(&self, x: i32, y: i32) -> Vec2 {
        self.origin + Vec2::new(x as f32, y as f32) * self.scale
    }

    fn rect(&self, x: i32, y: i32, w: i32, h: i32) -> egui::Rect {
        let min = self.to_screen(x, y);
        let max = min + Vec2::new(w as f32, h as f32) * self.scale;
        egui::Rect::from_min_max(egui::pos2(min.x, min.y), egui::pos2(max.x, max.y))
    }
}

pub struct ScreenPainter {
    virtual_size: (u32, u32),
    textures: HashMap<u32, egui::TextureHandle>,
    texture_generation: u64,
    warned_banks: HashSet<u32>,
}

impl ScreenPainter {
    pub fn new(virtual_size: (u32, u32)) -> Self {
        Self {
            virtual_size,
            textures: HashMap::new(),
            texture_generation: 0,
            warned_banks: HashSet::new(),
        }
    }

    /// Re-uploads bank textures when the banks were reloaded.
    pub fn sync_banks(&mut self, ctx: &egui::Context, banks: &ImageBanks) {
        if banks.generation() == self.texture_generation {
            return;
        }
        self.textures.clear();
        self.warned_banks.clear();
        for index in 0..banks.bank_count() as u32 {
            let Some(image) = banks.bank(index) else {
                continue;
            };
            let color_image = egui::ColorImage::from_rgba_unmultiplied(
                [image.width() as usize, image.height() as usize],
                image.as_raw(),
            );
            let handle = ctx.load_texture(
                format!("bank{index}"),
                color_image,
                egui::TextureOptions::NEAREST,
            );
            self.textures.insert(index, handle);
        }
        self.texture_generation = banks.generation();
        log::info!("Uploaded {} bank texture(s)", self.textures.len());
    }

    pub fn paint(&mut self, ctx: &egui::Context, list: &DrawList) {
        let screen = ctx.screen_rect();
        let transform = ScreenTransform::fit(
            self.virtual_size,
            Vec2::new(screen.width(), screen.height()),
        );
        let clip = transform.rect(0, 0, self.virtual_size.0 as i32, self.virtual_size.1 as i32);
        let painter = ctx.layer_painter(egui::LayerId::background()).with_clip_rect(clip);

        for command in list.commands() {
            match command {
                DrawCommand::Cls { color } => {
                    painter.rect_filled(clip, 0.0, color32(*color));
                }
                DrawCommand::Text { x, y, text, color } => {
                    let pos = transform.to_screen(*x, *y);
                    painter.text(
                        egui::pos2(pos.x, pos.y),
                        egui::Align2::LEFT_TOP,
                        text,
                        egui::FontId::monospace(GLYPH_HEIGHT * transform.scale),
                        color32(*color),
                    );
                }
                DrawCommand::Rect { x, y, w, h, color } => {
                    painter.rect_filled(transform.rect(*x, *y, *w, *h), 0.0, color32(*color));
                }
                DrawCommand::Blt { x, y, sprite } => {
                    self.paint_sprite(&painter, &transform, *x, *y, *sprite);
                }
            }
        }
    }

    fn paint_sprite(
        &mut self,
        painter: &egui::Painter,
        transform: &ScreenTransform,
        x: i32,
        y: i32,
        sprite: SpriteUv,
    ) {
        let Some(texture) = self.textures.get(&sprite.bank) else {
            if self.warned_banks.insert(sprite.bank) {
                log::warn!("Sprite drawn from unloaded bank {}", sprite.bank);
            }
            return;
        };
        let [tex_w, tex_h] = texture.size();
        let uv = sprite_uv_rect(sprite, (tex_w as f32, tex_h as f32));
        let rect = transform.rect(x, y, sprite.w.abs(), sprite.h.abs());
        painter.image(texture.id(), rect, uv, egui::Color32::WHITE);
    }
}

/// Normalised UV rect for a sprite; a negative width or height mirrors it.
fn sprite_uv_rect(sprite: SpriteUv, texture_size: (f32, f32)) -> egui::Rect {
    let (tw, th) = texture_size;
    let (w, h) = (sprite.w.abs() as f32, sprite.h.abs() as f32);
    let (u0, v0) = (sprite.u as f32, sprite.v as f32);
    let (mut left, mut right) = (u0 / tw, (u0 + w) / tw);
    let (mut top, mut bottom) = (v0 / th, (v0 + h) / th);
    if sprite.w < 0 {
        std::mem::swap(&mut left, &mut right);
    }
    if sprite.h < 0 {
        std::mem::swap(&mut top, &mut bottom);
    }
    egui::Rect::from_min_max(egui::pos2(left, top), egui::pos2(right, bottom))
}

fn color32(color: u8) -> egui::Color32 {
    let [r, g, b] = palette_rgb(color);
    egui::Color32::from_rgb(r, g, b)
}

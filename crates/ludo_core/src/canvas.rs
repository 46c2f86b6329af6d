//! Drawing surface handed to scenes.
//!
//! Scenes draw in virtual-pixel coordinates with palette colour indices. The
//! host passes a `DrawList`, which only records commands; presenting them is
//! the renderer's job.

use crate::assets::SpriteUv;

/// Fixed 16-colour palette, 0xRRGGBB.
pub const PALETTE: [u32; 16] = [
    0x000000, 0x2b335f, 0x7e2072, 0x19959c, 0x8b4852, 0x395c98, 0xa9c1ff, 0xeeeeee,
    0xd4186c, 0xd38441, 0xe9c35b, 0x70c6a9, 0x7696de, 0xa3a3a3, 0xff9798, 0xedc7b0,
];

/// RGB triple for a palette index. Indices wrap modulo the palette size.
pub fn palette_rgb(color: u8) -> [u8; 3] {
    let c = PALETTE[color as usize % PALETTE.len()];
    [(c >> 16) as u8, (c >> 8) as u8, c as u8]
}

pub trait Canvas {
    fn cls(&mut self, color: u8);
    fn text(&mut self, x: i32, y: i32, s: &str, color: u8);
    fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u8);
    fn blt(&mut self, x: i32, y: i32, sprite: SpriteUv);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Cls {
        color: u8,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        color: u8,
    },
    Rect {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: u8,
    },
    Blt {
        x: i32,
        y: i32,
        sprite: SpriteUv,
    },
}

#[derive(Debug, Default, Clone)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn sprite_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Blt { .. }))
            .count()
    }
}

impl Canvas for DrawList {
    fn cls(&mut self, color: u8) {
        // Everything before a full-screen clear is invisible.
        self.commands.clear();
        self.commands.push(DrawCommand::Cls { color });
    }

    fn text(&mut self, x: i32, y: i32, s: &str, color: u8) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: s.to_string(),
            color,
        });
    }

    fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u8) {
        if w <= 0 || h <= 0 {
            return;
        }
        self.commands.push(DrawCommand::Rect { x, y, w, h, color });
    }

    fn blt(&mut self, x: i32, y: i32, sprite: SpriteUv) {
        self.commands.push(DrawCommand::Blt { x, y, sprite });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_rgb_splits_channels() {
        assert_eq!(palette_rgb(0), [0, 0, 0]);
        assert_eq!(palette_rgb(7), [0xee, 0xee, 0xee]);
        assert_eq!(palette_rgb(8), [0xd4, 0x18, 0x6c]);
    }

    #[test]
    fn palette_index_wraps() {
        assert_eq!(palette_rgb(16), palette_rgb(0));
        assert_eq!(palette_rgb(23), palette_rgb(7));
    }

    #[test]
    fn cls_discards_earlier_commands() {
        let mut list = DrawList::new();
        list.text(0, 0, "gone", 7);
        list.cls(1);
        list.text(4, 4, "kept", 7);
        assert_eq!(list.len(), 2);
        assert_eq!(list.commands()[0], DrawCommand::Cls { color: 1 });
    }

    #[test]
    fn empty_rect_is_dropped() {
        let mut list = DrawList::new();
        list.rect(0, 0, 0, 5, 3);
        list.rect(0, 0, 5, -1, 3);
        assert!(list.is_empty());
    }

    #[test]
    fn sprite_count_counts_blits_only() {
        let mut list = DrawList::new();
        let sprite = SpriteUv {
            bank: 0,
            u: 0,
            v: 0,
            w: 8,
            h: 8,
        };
        list.cls(0);
        list.blt(0, 0, sprite);
        list.blt(8, 0, sprite);
        list.text(0, 10, "x", 7);
        assert_eq!(list.sprite_count(), 2);
        list.clear();
        assert_eq!(list.sprite_count(), 0);
    }
}

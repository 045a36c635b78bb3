use bevy_ecs::prelude::Component;

use crate::resources::sheet::SourceRect;

/// Sprite is identified by a texture key and the pixel size of that texture.
/// `source` selects the cell of the sprite sheet to draw and `width`/`height`
/// is the render size, which follows the cell size.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Sprite {
    pub tex_key: String,
    pub image_width: u32,
    pub image_height: u32,
    pub source: SourceRect,
    pub width: f32,
    pub height: f32,
}

impl Sprite {
    pub fn new(tex_key: impl Into<String>, image_width: u32, image_height: u32) -> Self {
        Self {
            tex_key: tex_key.into(),
            image_width,
            image_height,
            source: SourceRect {
                x: 0,
                y: 0,
                width: image_width,
                height: image_height,
            },
            width: image_width as f32,
            height: image_height as f32,
        }
    }

    /// Select a cell and match the render size to it.
    pub fn set_source(&mut self, source: SourceRect) {
        self.source = source;
        self.width = source.width as f32;
        self.height = source.height as f32;
    }
}

//! Layer - A single compositable layer

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use super::LayerId;

/// A single layer in the compositor
pub struct Layer {
    pub id: LayerId,
    /// Z-order (higher = in front)
    pub z_index: i32,
    /// Screen position and size
    pub bounds: Rect,
    pub visible: bool,
    /// Render buffer in layer-local coordinates (origin 0,0)
    pub buffer: Buffer,
}

impl Layer {
    pub fn new(id: LayerId, bounds: Rect, z_index: i32) -> Self {
        Self {
            id,
            z_index,
            bounds,
            visible: true,
            buffer: Buffer::empty(Rect::new(0, 0, bounds.width, bounds.height)),
        }
    }

    /// Move and resize; the buffer is only reallocated when the size changes
    pub fn place(&mut self, bounds: Rect) {
        if bounds.width != self.bounds.width || bounds.height != self.bounds.height {
            self.buffer = Buffer::empty(Rect::new(0, 0, bounds.width, bounds.height));
        }
        self.bounds = bounds;
    }

    /// Check if a screen point is within this layer's bounds
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.bounds.x
            && x < self.bounds.x + self.bounds.width
            && y >= self.bounds.y
            && y < self.bounds.y + self.bounds.height
    }

    /// Convert a screen point to layer-local coordinates
    pub fn to_local(&self, x: u16, y: u16) -> Option<(u16, u16)> {
        self.contains(x, y)
            .then(|| (x - self.bounds.x, y - self.bounds.y))
    }
}

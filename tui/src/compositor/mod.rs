//! Layered Compositor
//!
//! The widget floats over the host screen as a stack of layers: a status
//! line at the back, the chat panel, and the robot avatar in front. Each
//! layer renders into its own buffer; `composite` blits visible layers back
//! to front.

mod layer;

use std::collections::HashMap;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

pub use layer::Layer;

/// Unique identifier for a layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerId(u32);

/// The compositor manages all layers and composites them together
pub struct Compositor {
    layers: HashMap<LayerId, Layer>,
    /// Layers sorted by z-index, back to front
    render_order: Vec<LayerId>,
    next_id: u32,
    output: Buffer,
    area: Rect,
}

impl Compositor {
    pub fn new(area: Rect) -> Self {
        Self {
            layers: HashMap::new(),
            render_order: Vec::new(),
            next_id: 0,
            output: Buffer::empty(area),
            area,
        }
    }

    /// Create a new layer and return its ID
    pub fn create_layer(&mut self, bounds: Rect, z_index: i32) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;

        self.layers.insert(id, Layer::new(id, bounds, z_index));
        self.update_render_order();

        id
    }

    /// Mutable access to a layer's buffer for rendering
    pub fn layer_buffer_mut(&mut self, id: LayerId) -> Option<&mut Buffer> {
        self.layers.get_mut(&id).map(|l| &mut l.buffer)
    }

    /// Screen bounds of a layer
    pub fn bounds(&self, id: LayerId) -> Option<Rect> {
        self.layers.get(&id).map(|l| l.bounds)
    }

    /// Move and resize a layer in one step
    pub fn place_layer(&mut self, id: LayerId, bounds: Rect) {
        if let Some(layer) = self.layers.get_mut(&id) {
            layer.place(bounds);
        }
    }

    pub fn set_visible(&mut self, id: LayerId, visible: bool) {
        if let Some(layer) = self.layers.get_mut(&id) {
            layer.visible = visible;
        }
    }

    /// Resize the whole screen
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        self.output = Buffer::empty(area);
    }

    /// Composite all visible layers into the output buffer
    pub fn composite(&mut self) -> &Buffer {
        self.output.reset();

        for id in &self.render_order {
            if let Some(layer) = self.layers.get(id) {
                if layer.visible {
                    Self::blit_layer(&mut self.output, &self.area, layer);
                }
            }
        }

        &self.output
    }

    /// Blit a layer onto the output buffer.
    ///
    /// Space cells are transparent so the robot's silhouette shows whatever
    /// sits behind it.
    fn blit_layer(output: &mut Buffer, area: &Rect, layer: &Layer) {
        let lb = &layer.bounds;

        for ly in 0..lb.height {
            for lx in 0..lb.width {
                let dst_x = lb.x + lx;
                let dst_y = lb.y + ly;
                if dst_x >= area.width || dst_y >= area.height {
                    continue;
                }

                let src_idx = layer.buffer.index_of(lx, ly);
                let Some(src_cell) = layer.buffer.content.get(src_idx) else {
                    continue;
                };

                if src_cell.symbol() != " " {
                    let dst_idx = output.index_of(dst_x, dst_y);
                    if let Some(dst) = output.content.get_mut(dst_idx) {
                        *dst = src_cell.clone();
                    }
                }
            }
        }
    }

    /// Topmost visible layer at a screen position, with the position in
    /// that layer's local coordinates
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(LayerId, u16, u16)> {
        self.render_order.iter().rev().find_map(|id| {
            let layer = self.layers.get(id)?;
            if !layer.visible {
                return None;
            }
            layer.to_local(x, y).map(|(lx, ly)| (*id, lx, ly))
        })
    }

    fn update_render_order(&mut self) {
        self.render_order = self.layers.keys().copied().collect();
        self.render_order
            .sort_by_key(|id| self.layers.get(id).map(|l| (l.z_index, l.id.0)).unwrap_or((0, 0)));
    }
}

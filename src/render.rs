use serde::Deserialize;

use crate::tilemap::AtlasRect;

// ── Color ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const WHITE: Self = Self([1.0, 1.0, 1.0, 1.0]);
    pub const RED: Self = Self([1.0, 0.0, 0.0, 1.0]);
    pub const GREEN: Self = Self([0.0, 1.0, 0.0, 1.0]);
    pub const BLUE: Self = Self([0.0, 0.0, 1.0, 1.0]);
    pub const YELLOW: Self = Self([1.0, 1.0, 0.0, 1.0]);
    pub const TRANSPARENT: Self = Self([0.0, 0.0, 0.0, 0.0]);

    /// Build a colour from 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0])
    }

    /// Same colour with an 8-bit alpha.
    pub fn with_alpha8(self, a: u8) -> Self {
        let [r, g, b, _] = self.0;
        Self([r, g, b, a as f32 / 255.0])
    }

    /// Alpha channel rounded back to 8 bits.
    pub fn alpha8(&self) -> u8 {
        (self.0[3].clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

// ── Draw commands ──────────────────────────────────────────────────────────

/// One primitive the level asks the rendering backend to draw.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// An atlas tile at a pixel position.
    Tile { source: AtlasRect, pos: [f32; 2] },
    /// A filled, axis-aligned rectangle.
    Rect { pos: [f32; 2], size: [f32; 2], color: Color },
    /// A filled circle; `pos` is the top-left of its bounding box.
    Circle { pos: [f32; 2], radius: f32, color: Color },
}

/// Anything that accepts draw commands, in submission order.
pub trait RenderSink {
    fn submit(&mut self, command: DrawCommand);

    fn draw_tile(&mut self, source: AtlasRect, pos: [f32; 2]) {
        self.submit(DrawCommand::Tile { source, pos });
    }

    fn fill_rect(&mut self, pos: [f32; 2], size: [f32; 2], color: Color) {
        self.submit(DrawCommand::Rect { pos, size, color });
    }

    fn fill_circle(&mut self, pos: [f32; 2], radius: f32, color: Color) {
        self.submit(DrawCommand::Circle { pos, radius, color });
    }
}

/// Records commands for a backend to replay once per frame.
#[derive(Default, Debug)]
pub struct DrawQueue {
    commands: Vec<DrawCommand>,
}

impl DrawQueue {
    pub fn new() -> Self {
        Self::default()
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

    /// Hand the recorded commands over and start an empty frame.
    pub fn drain(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl RenderSink for DrawQueue {
    fn submit(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

//! Drawing surface abstractions
//!
//! Scenes and entities draw through [`DrawContext`], a small subset of a 2D
//! canvas context. The engine ships a recording implementation,
//! [`CommandBuffer`](super::CommandBuffer); real backends plug in here.

use crate::core::config::CanvasConfig;

/// Pixel dimensions of the surface being drawn to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Canvas {
    /// Create a canvas of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width as a drawing coordinate
    pub fn width_f32(&self) -> f32 {
        self.width as f32
    }

    /// Height as a drawing coordinate
    pub fn height_f32(&self) -> f32 {
        self.height as f32
    }
}

impl From<CanvasConfig> for Canvas {
    fn from(config: CanvasConfig) -> Self {
        Self::new(config.width, config.height)
    }
}

/// 2D drawing operations available to scenes and entities
///
/// Styles are CSS-like color strings; interpretation is up to the backend.
pub trait DrawContext {
    /// Current fill style
    fn fill_style(&self) -> &str;

    /// Set the style used by subsequent fills
    fn set_fill_style(&mut self, style: &str);

    /// Fill a rectangle with the current fill style
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Current stroke style
    fn stroke_style(&self) -> &str;

    /// Set the style used by subsequent strokes
    fn set_stroke_style(&mut self, style: &str);

    /// Outline a rectangle with the current stroke style
    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
}

/// What an entity receives when asked to draw
pub struct Frame<'a> {
    /// Surface dimensions
    pub canvas: &'a Canvas,
    /// Drawing context for this frame
    pub context: &'a mut dyn DrawContext,
}

impl Frame<'_> {
    /// Fill the whole surface with `style`
    pub fn fill_canvas(&mut self, style: &str) {
        self.context.set_fill_style(style);
        self.context
            .fill_rect(0.0, 0.0, self.canvas.width_f32(), self.canvas.height_f32());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{CommandBuffer, DrawCommand};

    #[test]
    fn test_canvas_from_config() {
        let canvas = Canvas::from(CanvasConfig::new(320, 200));
        assert_eq!(canvas, Canvas::new(320, 200));
        assert_eq!(canvas.width_f32(), 320.0);
    }

    #[test]
    fn test_frame_fill_canvas_covers_surface() {
        let canvas = Canvas::new(8, 4);
        let mut buffer = CommandBuffer::new();
        let mut frame = Frame {
            canvas: &canvas,
            context: &mut buffer,
        };

        frame.fill_canvas("navy");

        assert_eq!(
            buffer.commands(),
            &[DrawCommand::FillRect {
                style: "navy".to_string(),
                x: 0.0,
                y: 0.0,
                width: 8.0,
                height: 4.0,
            }]
        );
    }
}

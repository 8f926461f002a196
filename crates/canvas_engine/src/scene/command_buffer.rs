//! Recorded draw commands
//!
//! A headless [`DrawContext`] that keeps every call as a [`DrawCommand`] in
//! submission order. Useful for tests, replay and for backends that consume a
//! command list once per frame.

use super::surface::DrawContext;

/// Style a fresh context starts with, as on an HTML canvas
pub const DEFAULT_STYLE: &str = "black";

/// A single recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled rectangle
    FillRect {
        /// Fill style in effect
        style: String,
        /// Left edge
        x: f32,
        /// Top edge
        y: f32,
        /// Width
        width: f32,
        /// Height
        height: f32,
    },
    /// Outlined rectangle
    StrokeRect {
        /// Stroke style in effect
        style: String,
        /// Left edge
        x: f32,
        /// Top edge
        y: f32,
        /// Width
        width: f32,
        /// Height
        height: f32,
    },
}

impl DrawCommand {
    /// Style the command was recorded with
    pub fn style(&self) -> &str {
        match self {
            Self::FillRect { style, .. } | Self::StrokeRect { style, .. } => style,
        }
    }

    /// Whether this is a fill
    pub fn is_fill(&self) -> bool {
        matches!(self, Self::FillRect { .. })
    }
}

/// Recording draw context
#[derive(Debug, Clone)]
pub struct CommandBuffer {
    fill_style: String,
    stroke_style: String,
    commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    /// Create an empty buffer with default styles
    pub fn new() -> Self {
        Self {
            fill_style: DEFAULT_STYLE.to_string(),
            stroke_style: DEFAULT_STYLE.to_string(),
            commands: Vec::new(),
        }
    }

    /// Commands recorded so far
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the buffer empty
    ///
    /// Styles are kept, matching a context that persists across frames.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Drop all recorded commands
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of recorded commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of recorded fills
    pub fn fill_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_fill()).count()
    }
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawContext for CommandBuffer {
    fn fill_style(&self) -> &str {
        &self.fill_style
    }

    fn set_fill_style(&mut self, style: &str) {
        style.clone_into(&mut self.fill_style);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::FillRect {
            style: self.fill_style.clone(),
            x,
            y,
            width,
            height,
        });
    }

    fn stroke_style(&self) -> &str {
        &self.stroke_style
    }

    fn set_stroke_style(&mut self, style: &str) {
        style.clone_into(&mut self.stroke_style);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::StrokeRect {
            style: self.stroke_style.clone(),
            x,
            y,
            width,
            height,
        });
    }
}

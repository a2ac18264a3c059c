use egui::{Color32, PointerButton, Pos2};

use crate::command::Command;
use crate::stroke::{BrushWidth, StrokeSegment};

/// Current interpretation of primary-button input on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Brush,
    Eraser,
    /// Waiting for a click to place the pending text
    Text,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Brush => "Brush",
            Self::Eraser => "Eraser",
            Self::Text => "Text",
        }
    }
}

/// Colors, width and the active tool, plus the transient drag position.
///
/// `secondary` holds the eraser color while the brush is active and the
/// brush color while the eraser is active.
#[derive(Debug, Clone)]
pub struct ToolState {
    active: Tool,
    color: Color32,
    secondary: Color32,
    width: BrushWidth,
    last_point: Option<Pos2>,
    pending_text: Option<String>,
    resume: Tool,
}

impl ToolState {
    pub fn new(brush_color: Color32, eraser_color: Color32, width: BrushWidth) -> Self {
        Self {
            active: Tool::Brush,
            color: brush_color,
            secondary: eraser_color,
            width,
            last_point: None,
            pending_text: None,
            resume: Tool::Brush,
        }
    }

    pub fn active(&self) -> Tool {
        self.active
    }

    /// The color strokes and text are drawn with right now
    pub fn color(&self) -> Color32 {
        self.color
    }

    /// The brush color, even while the eraser is active
    pub fn brush_color(&self) -> Color32 {
        if self.erasing() { self.secondary } else { self.color }
    }

    pub fn eraser_color(&self) -> Color32 {
        if self.erasing() { self.color } else { self.secondary }
    }

    pub fn width(&self) -> BrushWidth {
        self.width
    }

    pub fn width_mut(&mut self) -> &mut BrushWidth {
        &mut self.width
    }

    pub fn set_width(&mut self, width: BrushWidth) {
        self.width = width;
    }

    pub fn last_point(&self) -> Option<Pos2> {
        self.last_point
    }

    pub fn pending_text(&self) -> Option<&str> {
        self.pending_text.as_deref()
    }

    /// Whether the eraser is in effect, directly or underneath an armed text tool
    pub fn erasing(&self) -> bool {
        self.active == Tool::Eraser || (self.active == Tool::Text && self.resume == Tool::Eraser)
    }

    /// Swap the active and secondary colors, flipping between brush and eraser
    pub fn toggle_eraser(&mut self) {
        self.cancel_text();
        std::mem::swap(&mut self.color, &mut self.secondary);
        self.active = match self.active {
            Tool::Eraser => Tool::Brush,
            _ => Tool::Eraser,
        };
        log::debug!("Tool switched to {}", self.active.name());
    }

    /// Choose a new brush color. Leaves eraser mode if it was on; armed text
    /// stays armed and will be placed in the new color.
    pub fn set_color(&mut self, color: Color32) {
        if self.erasing() {
            self.secondary = self.color;
            match self.active {
                Tool::Text => self.resume = Tool::Brush,
                _ => self.active = Tool::Brush,
            }
        }
        self.color = color;
    }

    /// Follow a background change so the eraser keeps painting background
    pub fn set_eraser_color(&mut self, color: Color32) {
        if self.erasing() {
            self.color = color;
        } else {
            self.secondary = color;
        }
    }

    /// Arm the text tool. Blank text leaves the state untouched.
    pub fn begin_text(&mut self, text: String) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        if self.active != Tool::Text {
            self.resume = self.active;
        }
        self.active = Tool::Text;
        self.pending_text = Some(text);
        self.last_point = None;
        true
    }

    pub fn cancel_text(&mut self) {
        if self.active == Tool::Text {
            self.pending_text = None;
            self.active = self.resume;
        }
    }

    /// Primary press starts a stroke or places text; secondary press picks a color
    pub fn on_pointer_down(&mut self, pos: Pos2, button: PointerButton) -> Option<Command> {
        match button {
            PointerButton::Primary => {
                if self.active == Tool::Text {
                    let text = self.pending_text.take()?;
                    self.active = self.resume;
                    return Some(Command::StampText {
                        text,
                        at: pos,
                        color: self.color,
                    });
                }
                self.last_point = Some(pos);
                None
            }
            PointerButton::Secondary => Some(Command::PickColor { at: pos }),
            _ => None,
        }
    }

    /// Continue a stroke from the previous point to `pos`
    pub fn on_pointer_move(&mut self, pos: Pos2) -> Option<Command> {
        if self.active == Tool::Text {
            return None;
        }
        let previous = self.last_point.replace(pos)?;
        Some(Command::DrawSegment(StrokeSegment::new(previous, pos, self.width, self.color)))
    }

    /// End the stroke so the next drag starts fresh
    pub fn on_pointer_up(&mut self) {
        self.last_point = None;
    }
}

use std::path::PathBuf;

use egui::{Color32, Pos2};

use crate::canvas::{Canvas, ContentPolicy};
use crate::error::{PaintError, PaintResult};
use crate::stroke::StrokeSegment;
use crate::text::TextRasterizer;
use crate::tools::ToolState;

/// A single change to the canvas or tool state, produced by tools and prompts
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// One piece of a freehand stroke
    DrawSegment(StrokeSegment),
    /// Place text with its top-left corner at `at`
    StampText {
        text: String,
        at: Pos2,
        color: Color32,
    },
    /// Take the active color from the exported pixel under `at`
    PickColor { at: Pos2 },
    Clear,
    Resize {
        width: u32,
        height: u32,
        policy: ContentPolicy,
    },
    ChangeBackground {
        color: Color32,
        policy: ContentPolicy,
    },
    /// Write the canvas to a PNG file
    Export { path: PathBuf },
}

/// What executing a command produced, beyond mutating the canvas
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Applied,
    /// Nothing to do, e.g. a pick outside the canvas
    Skipped,
    Saved(PathBuf),
}

/// Everything a command may touch
pub struct CommandContext<'a> {
    pub canvas: &'a mut Canvas,
    pub tools: &'a mut ToolState,
    pub text: Option<&'a TextRasterizer>,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::DrawSegment(_) => "Draw Segment",
            Self::StampText { .. } => "Stamp Text",
            Self::PickColor { .. } => "Pick Color",
            Self::Clear => "Clear",
            Self::Resize { .. } => "Resize",
            Self::ChangeBackground { .. } => "Change Background",
            Self::Export { .. } => "Export",
        }
    }

    pub fn execute(&self, ctx: &mut CommandContext<'_>) -> PaintResult<CommandOutcome> {
        match self {
            Self::DrawSegment(segment) => {
                ctx.canvas.draw_segment(segment);
            }
            Self::StampText { text, at, color } => {
                let rasterizer = ctx
                    .text
                    .ok_or_else(|| PaintError::Font("text rasterizer not loaded".to_owned()))?;
                let mask = rasterizer.rasterize(text, *at);
                ctx.canvas.stamp(&mask, *color);
                log::info!("Placed text {:?} at ({}, {})", text, at.x, at.y);
            }
            Self::PickColor { at } => {
                let Some(color) = ctx.canvas.pixel_at(*at) else {
                    return Ok(CommandOutcome::Skipped);
                };
                ctx.tools.set_color(color);
                log::debug!("Picked {:?} at ({}, {})", color, at.x, at.y);
            }
            Self::Clear => {
                ctx.canvas.clear();
                log::info!("Canvas cleared");
            }
            Self::Resize { width, height, policy } => {
                let background = ctx.canvas.background();
                ctx.canvas.resize(*width, *height, background, *policy)?;
                ctx.tools.on_pointer_up();
            }
            Self::ChangeBackground { color, policy } => {
                ctx.canvas.set_background(*color, *policy);
                ctx.tools.set_eraser_color(*color);
            }
            Self::Export { path } => {
                let written = ctx.canvas.export_png(path)?;
                return Ok(CommandOutcome::Saved(written));
            }
        }
        Ok(CommandOutcome::Applied)
    }
}

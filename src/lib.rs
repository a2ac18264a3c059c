#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod command;
pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod panels;
pub mod prompt;
pub mod raster;
pub mod stroke;
pub mod surface;
pub mod text;
pub mod tools;

pub use app::PaintApp;
pub use canvas::{Canvas, ContentPolicy};
pub use command::{Command, CommandContext, CommandOutcome};
pub use config::PaintSettings;
pub use error::{PaintError, PaintResult};
pub use input::{InputEvent, InputHandler};
pub use stroke::{BrushWidth, StrokeSegment};
pub use tools::{Tool, ToolState};

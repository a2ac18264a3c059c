use std::path::PathBuf;

use egui::{Align2, Color32, Context, Key};

use crate::canvas::{ContentPolicy, validate_dimensions};
use crate::command::Command;

/// A modal window waiting for user input. While one is open the canvas
/// ignores pointer input.
#[derive(Debug, Clone, PartialEq)]
pub enum Prompt {
    /// Enter text to stamp on the next click
    Text { text: String },
    /// Choose the brush color
    Color { color: Color32 },
    /// Enter new canvas dimensions
    Resize { width: String, height: String },
    /// Keep or discard the drawing when resizing
    ConfirmResize { width: u32, height: u32 },
    /// Choose a new background color
    Background { color: Color32 },
    /// Keep or discard the drawing when changing the background
    ConfirmBackground { color: Color32 },
    /// Enter the export path
    Save { path: String },
    /// Show a message until dismissed
    Notice { title: String, message: String },
}

/// What the app should do after showing a prompt for one frame
#[derive(Debug, Clone, PartialEq)]
pub enum PromptAction {
    /// Keep the prompt open
    Stay,
    /// Close without doing anything
    Close,
    /// Replace this prompt with another one
    Next(Prompt),
    /// Close and run a command
    Run(Command),
    /// Close and arm the text tool
    BeginText(String),
    /// Close and set the brush color
    SetColor(Color32),
}

/// Button pressed in a prompt this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Ok,
    Keep,
    Discard,
    Cancel,
}

/// Parse the resize prompt fields. `None` for anything that is not a
/// usable width and height.
pub fn parse_dimensions(width: &str, height: &str) -> Option<(u32, u32)> {
    let width = width.trim().parse::<u32>().ok()?;
    let height = height.trim().parse::<u32>().ok()?;
    validate_dimensions(width, height).ok()?;
    Some((width, height))
}

impl Prompt {
    pub fn title(&self) -> &str {
        match self {
            Self::Text { .. } => "Text",
            Self::Color { .. } => "Brush color",
            Self::Resize { .. } => "Canvas size",
            Self::ConfirmResize { .. } | Self::ConfirmBackground { .. } => "Keep drawing?",
            Self::Background { .. } => "Background color",
            Self::Save { .. } => "Save as PNG",
            Self::Notice { title, .. } => title,
        }
    }

    pub fn notice(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Notice {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Draw the prompt window and report what the user decided
    pub fn show(&mut self, ctx: &Context) -> PromptAction {
        let title = self.title().to_owned();
        let mut choice = None;

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                match self {
                    Self::Text { text } => {
                        ui.label("Text to place on the canvas:");
                        let response = ui.text_edit_singleline(text);
                        response.request_focus();
                        if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                            choice = Some(Choice::Ok);
                        }
                    }
                    Self::Color { color } | Self::Background { color } => {
                        egui::color_picker::color_picker_color32(
                            ui,
                            color,
                            egui::color_picker::Alpha::Opaque,
                        );
                    }
                    Self::Resize { width, height } => {
                        egui::Grid::new("resize_grid").num_columns(2).show(ui, |ui| {
                            ui.label("Width:");
                            ui.text_edit_singleline(width);
                            ui.end_row();
                            ui.label("Height:");
                            ui.text_edit_singleline(height);
                            ui.end_row();
                        });
                    }
                    Self::ConfirmResize { .. } | Self::ConfirmBackground { .. } => {
                        ui.label("Keep the current drawing?");
                    }
                    Self::Save { path } => {
                        ui.label("File name:");
                        let response = ui.text_edit_singleline(path);
                        if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                            choice = Some(Choice::Ok);
                        }
                    }
                    Self::Notice { message, .. } => {
                        ui.label(message.as_str());
                    }
                }

                ui.separator();
                ui.horizontal(|ui| match self {
                    Self::ConfirmResize { .. } | Self::ConfirmBackground { .. } => {
                        if ui.button("Keep").clicked() {
                            choice = Some(Choice::Keep);
                        }
                        if ui.button("Discard").clicked() {
                            choice = Some(Choice::Discard);
                        }
                        if ui.button("Cancel").clicked() {
                            choice = Some(Choice::Cancel);
                        }
                    }
                    Self::Notice { .. } => {
                        if ui.button("OK").clicked() {
                            choice = Some(Choice::Ok);
                        }
                    }
                    _ => {
                        if ui.button("OK").clicked() {
                            choice = Some(Choice::Ok);
                        }
                        if ui.button("Cancel").clicked() {
                            choice = Some(Choice::Cancel);
                        }
                    }
                });
            });

        if choice.is_none() && ctx.input(|i| i.key_pressed(Key::Escape)) {
            choice = Some(Choice::Cancel);
        }

        match choice {
            Some(choice) => self.resolve(choice),
            None => PromptAction::Stay,
        }
    }

    /// Turn a button press into the follow-up action
    fn resolve(&self, choice: Choice) -> PromptAction {
        if choice == Choice::Cancel {
            return PromptAction::Close;
        }

        let policy = if choice == Choice::Discard {
            ContentPolicy::Discard
        } else {
            ContentPolicy::Keep
        };

        match self {
            Self::Text { text } => {
                if text.trim().is_empty() {
                    PromptAction::Close
                } else {
                    PromptAction::BeginText(text.clone())
                }
            }
            Self::Color { color } => PromptAction::SetColor(*color),
            Self::Resize { width, height } => match parse_dimensions(width, height) {
                Some((width, height)) => PromptAction::Next(Self::ConfirmResize { width, height }),
                None => {
                    log::warn!("Resize aborted: invalid size {:?}x{:?}", width, height);
                    PromptAction::Close
                }
            },
            Self::ConfirmResize { width, height } => PromptAction::Run(Command::Resize {
                width: *width,
                height: *height,
                policy,
            }),
            Self::Background { color } => PromptAction::Next(Self::ConfirmBackground { color: *color }),
            Self::ConfirmBackground { color } => {
                PromptAction::Run(Command::ChangeBackground { color: *color, policy })
            }
            Self::Save { path } => {
                let path = path.trim();
                if path.is_empty() {
                    PromptAction::Close
                } else {
                    PromptAction::Run(Command::Export {
                        path: PathBuf::from(path),
                    })
                }
            }
            Self::Notice { .. } => PromptAction::Close,
        }
    }
}

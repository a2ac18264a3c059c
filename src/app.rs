use egui::{Key, KeyboardShortcut, Modifiers, Rect};

use crate::canvas::Canvas;
use crate::command::{Command, CommandContext, CommandOutcome};
use crate::config::PaintSettings;
use crate::error::PaintResult;
use crate::input::{InputEvent, InputHandler};
use crate::panels::{central_panel, controls_panel};
use crate::prompt::{Prompt, PromptAction};
use crate::text::TextRasterizer;
use crate::tools::ToolState;

pub const SAVE_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::S);
pub const COLOR_SHORTCUT: KeyboardShortcut =
    KeyboardShortcut::new(Modifiers::COMMAND.plus(Modifiers::SHIFT), Key::C);

/// The paint application: owns the canvas, the tool state and the open prompt
#[derive(Debug)]
pub struct PaintApp {
    settings: PaintSettings,
    canvas: Canvas,
    tools: ToolState,
    text: Option<TextRasterizer>,
    input: InputHandler,
    prompt: Option<Prompt>,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> PaintResult<Self> {
        let settings = cc
            .storage
            .and_then(|storage| eframe::get_value::<PaintSettings>(storage, eframe::APP_KEY))
            .unwrap_or_default();

        Self::with_settings(settings)
    }

    /// Build the app without a window, from explicit settings
    pub fn with_settings(settings: PaintSettings) -> PaintResult<Self> {
        let settings = settings.sanitized();
        let canvas = Canvas::new(settings.canvas_width, settings.canvas_height, settings.background)?;

        let text = match TextRasterizer::from_default_fonts(settings.text_size) {
            Ok(text) => Some(text),
            Err(err) => {
                log::error!("Text tool disabled: {err}");
                None
            }
        };

        let tools = ToolState::new(settings.brush_color, settings.background, settings.brush_width);
        log::info!(
            "Starting with a {}x{} canvas",
            canvas.width(),
            canvas.height()
        );

        Ok(Self {
            settings,
            canvas,
            tools,
            text,
            input: InputHandler::new(Rect::NOTHING),
            prompt: None,
        })
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut ToolState {
        &mut self.tools
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub fn has_text_support(&self) -> bool {
        self.text.is_some()
    }

    /// Open a prompt, replacing any open one. Drags in progress are dropped.
    pub fn open_prompt(&mut self, prompt: Prompt) {
        self.input.reset();
        self.tools.on_pointer_up();
        self.prompt = Some(prompt);
    }

    pub fn open_color_prompt(&mut self) {
        let color = self.tools.brush_color();
        self.open_prompt(Prompt::Color { color });
    }

    pub fn open_resize_prompt(&mut self) {
        self.open_prompt(Prompt::Resize {
            width: self.canvas.width().to_string(),
            height: self.canvas.height().to_string(),
        });
    }

    pub fn open_background_prompt(&mut self) {
        let color = self.canvas.background();
        self.open_prompt(Prompt::Background { color });
    }

    /// Settings to persist: the current tools and canvas shape
    pub fn current_settings(&self) -> PaintSettings {
        PaintSettings {
            canvas_width: self.canvas.width(),
            canvas_height: self.canvas.height(),
            background: self.canvas.background(),
            brush_color: self.tools.brush_color(),
            brush_width: self.tools.width(),
            text_size: self.settings.text_size,
        }
    }

    /// Run a command against the canvas and tools
    pub fn execute_command(&mut self, command: Command) -> PaintResult<CommandOutcome> {
        let mut ctx = CommandContext {
            canvas: &mut self.canvas,
            tools: &mut self.tools,
            text: self.text.as_ref(),
        };
        command.execute(&mut ctx)
    }

    /// Run a command from the UI, reporting failures instead of returning them
    pub fn run_command(&mut self, command: Command) {
        let name = command.name();
        let is_export = matches!(command, Command::Export { .. });
        match self.execute_command(command) {
            Ok(CommandOutcome::Saved(path)) => {
                self.prompt = Some(Prompt::notice(
                    "Saved",
                    format!("Image saved to {}", path.display()),
                ));
            }
            Ok(_) => {}
            Err(err) => {
                log::error!("{name} failed: {err}");
                if is_export {
                    self.prompt = Some(Prompt::notice("Save failed", err.to_string()));
                }
            }
        }
    }

    /// Feed canvas input events through the active tool
    pub fn handle_input_events(&mut self, events: &[InputEvent]) {
        for event in events {
            let command = match *event {
                InputEvent::PointerDown { pos, button } => self.tools.on_pointer_down(pos, button),
                InputEvent::PointerDrag { pos } => self.tools.on_pointer_move(pos),
                InputEvent::PointerUp { .. } => {
                    self.tools.on_pointer_up();
                    None
                }
            };
            if let Some(command) = command {
                self.run_command(command);
            }
        }
    }

    /// Apply the result of the open prompt
    pub fn apply_prompt_action(&mut self, action: PromptAction) {
        match action {
            PromptAction::Stay => {}
            PromptAction::Close => self.prompt = None,
            PromptAction::Next(prompt) => self.prompt = Some(prompt),
            PromptAction::Run(command) => {
                self.prompt = None;
                self.run_command(command);
            }
            PromptAction::BeginText(text) => {
                self.prompt = None;
                if self.text.is_none() {
                    log::warn!("Text tool unavailable, ignoring {:?}", text);
                } else if self.tools.begin_text(text) {
                    log::debug!("Text tool armed");
                }
            }
            PromptAction::SetColor(color) => {
                self.prompt = None;
                self.tools.set_color(color);
            }
        }
    }

    /// Process canvas input for this frame, unless a prompt is open.
    /// `hit_rect` is the part of the canvas that currently takes presses.
    pub(crate) fn handle_canvas_input(&mut self, ctx: &egui::Context, canvas_rect: Rect, hit_rect: Rect) {
        self.input.set_canvas_rect(canvas_rect, hit_rect);
        if self.prompt.is_some() {
            return;
        }
        let events = ctx.input(|input| self.input.process_input(input));
        self.handle_input_events(&events);
    }

    pub(crate) fn texture_id(&mut self, ctx: &egui::Context) -> egui::TextureId {
        self.canvas.display_mut().texture_id(ctx)
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if self.prompt.is_some() {
            return;
        }
        if ctx.input_mut(|i| i.consume_shortcut(&SAVE_SHORTCUT)) {
            self.open_prompt(Prompt::Save { path: String::new() });
        } else if ctx.input_mut(|i| i.consume_shortcut(&COLOR_SHORTCUT)) {
            self.open_color_prompt();
        }
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.current_settings());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        controls_panel(self, ctx);
        central_panel(self, ctx);

        if let Some(prompt) = &mut self.prompt {
            let action = prompt.show(ctx);
            self.apply_prompt_action(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, Event, PointerButton, Pos2, RawInput};

    fn key_frame(app: &mut PaintApp, key: Key, modifiers: Modifiers) {
        let ctx = egui::Context::default();
        let raw = RawInput {
            events: vec![Event::Key {
                key,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers,
            }],
            ..Default::default()
        };
        let _ = ctx.run(raw, |ctx| app.handle_shortcuts(ctx));
    }

    #[test]
    fn test_save_shortcut_opens_save_prompt() {
        let mut app = PaintApp::with_settings(PaintSettings::default()).unwrap();
        key_frame(&mut app, Key::S, Modifiers::COMMAND);
        assert!(matches!(app.prompt(), Some(Prompt::Save { path }) if path.is_empty()));
    }

    #[test]
    fn test_color_shortcut_opens_color_prompt() {
        let mut app = PaintApp::with_settings(PaintSettings::default()).unwrap();
        key_frame(&mut app, Key::C, Modifiers::COMMAND.plus(Modifiers::SHIFT));
        assert!(matches!(app.prompt(), Some(Prompt::Color { color }) if *color == Color32::BLACK));
    }

    #[test]
    fn test_plain_key_opens_nothing() {
        let mut app = PaintApp::with_settings(PaintSettings::default()).unwrap();
        key_frame(&mut app, Key::S, Modifiers::NONE);
        assert!(app.prompt().is_none());
    }

    #[test]
    fn test_shortcuts_ignored_while_prompt_open() {
        let mut app = PaintApp::with_settings(PaintSettings::default()).unwrap();
        app.open_resize_prompt();

        key_frame(&mut app, Key::S, Modifiers::COMMAND);
        assert!(matches!(app.prompt(), Some(Prompt::Resize { .. })));

        key_frame(&mut app, Key::C, Modifiers::COMMAND.plus(Modifiers::SHIFT));
        assert!(matches!(app.prompt(), Some(Prompt::Resize { .. })));
    }

    #[test]
    fn test_drag_events_draw_on_canvas() {
        let mut app = PaintApp::with_settings(PaintSettings::default()).unwrap();
        app.handle_input_events(&[
            InputEvent::PointerDown { pos: Pos2::new(10.0, 10.0), button: PointerButton::Primary },
            InputEvent::PointerDrag { pos: Pos2::new(40.0, 10.0) },
            InputEvent::PointerUp { pos: Pos2::new(40.0, 10.0) },
        ]);

        assert_eq!(app.canvas().pixel_at(Pos2::new(25.0, 10.0)), Some(Color32::BLACK));
        assert_eq!(app.tools().last_point(), None);
    }

    #[test]
    fn test_prompt_actions() {
        let mut app = PaintApp::with_settings(PaintSettings::default()).unwrap();
        app.open_color_prompt();
        assert!(matches!(app.prompt(), Some(Prompt::Color { .. })));

        app.apply_prompt_action(PromptAction::SetColor(Color32::RED));
        assert!(app.prompt().is_none());
        assert_eq!(app.tools().color(), Color32::RED);
    }

    #[test]
    fn test_current_settings_reflect_tools() {
        let mut app = PaintApp::with_settings(PaintSettings::default()).unwrap();
        app.tools_mut().set_color(Color32::GREEN);
        app.tools_mut().toggle_eraser();

        let settings = app.current_settings();
        assert_eq!(settings.brush_color, Color32::GREEN);
        assert_eq!(settings.canvas_width, 600);
    }
}

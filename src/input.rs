use egui::{InputState, PointerButton, Pos2, Rect};

/// Pointer input translated into canvas pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A button was pressed over the canvas
    PointerDown { pos: Pos2, button: PointerButton },
    /// The pointer moved while a primary drag that began on the canvas is held
    PointerDrag { pos: Pos2 },
    /// The primary button was released after a drag began on the canvas
    PointerUp { pos: Pos2 },
}

/// Converts raw egui input into canvas-local [`InputEvent`]s
#[derive(Debug, Clone)]
pub struct InputHandler {
    canvas_rect: Rect,
    /// Part of the canvas that can be pressed: visible and not covered
    hit_rect: Rect,
    last_pointer_pos: Option<Pos2>,
    dragging: bool,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            hit_rect: canvas_rect,
            last_pointer_pos: None,
            dragging: false,
        }
    }

    /// Update the on-screen canvas rectangle (e.g. after scrolling or a resize).
    /// Presses only count inside `hit_rect`; `rect.min` stays the pixel origin.
    pub fn set_canvas_rect(&mut self, rect: Rect, hit_rect: Rect) {
        self.canvas_rect = rect;
        self.hit_rect = hit_rect.intersect(rect);
    }

    /// Screen position to integer canvas pixel position
    pub fn to_canvas(&self, screen: Pos2) -> Pos2 {
        let local = screen - self.canvas_rect.min;
        Pos2::new(local.x.floor(), local.y.floor())
    }

    /// Forget any drag in progress, e.g. while a prompt is open
    pub fn reset(&mut self) {
        self.dragging = false;
        self.last_pointer_pos = None;
    }

    /// Process one frame of egui input
    pub fn process_input(&mut self, input: &InputState) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let Some(pos) = input.pointer.latest_pos() else {
            return events;
        };
        let in_canvas = self.hit_rect.contains(pos);

        for button in [PointerButton::Primary, PointerButton::Secondary] {
            if input.pointer.button_pressed(button) && in_canvas {
                events.push(InputEvent::PointerDown {
                    pos: self.to_canvas(pos),
                    button,
                });
                if button == PointerButton::Primary {
                    // The press itself is the stroke's start point, not a move
                    self.dragging = true;
                    self.last_pointer_pos = Some(pos);
                }
            }
        }

        if self.dragging && Some(pos) != self.last_pointer_pos && input.pointer.primary_down() {
            events.push(InputEvent::PointerDrag {
                pos: self.to_canvas(pos),
            });
        }

        if self.dragging && input.pointer.button_released(PointerButton::Primary) {
            events.push(InputEvent::PointerUp {
                pos: self.to_canvas(pos),
            });
            self.dragging = false;
        }

        self.last_pointer_pos = Some(pos);
        events
    }
}

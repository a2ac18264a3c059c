use egui::{Context, Event, Modifiers, MouseWheelUnit, PointerButton, Pos2, RawInput, Rect, pos2, vec2};
use raster_paint::panels::central_panel;
use raster_paint::{PaintApp, PaintSettings};

const STRIP_HEIGHT: f32 = 40.0;

fn create_large_app() -> PaintApp {
    PaintApp::with_settings(PaintSettings {
        canvas_width: 2000,
        canvas_height: 2000,
        ..Default::default()
    })
    .unwrap()
}

/// Run one frame of a small window: a fixed strip on top, the canvas below
fn frame(ctx: &Context, app: &mut PaintApp, events: Vec<Event>) {
    let raw = RawInput {
        screen_rect: Some(Rect::from_min_size(Pos2::ZERO, vec2(400.0, 300.0))),
        events,
        ..Default::default()
    };
    let _ = ctx.run(raw, |ctx| {
        egui::TopBottomPanel::top("strip")
            .exact_height(STRIP_HEIGHT)
            .show(ctx, |ui| {
                ui.label("tools");
            });
        central_panel(app, ctx);
    });
}

fn scroll_down(ctx: &Context, app: &mut PaintApp) {
    let over_canvas = pos2(200.0, 150.0);
    frame(ctx, app, vec![Event::PointerMoved(over_canvas)]);
    for _ in 0..10 {
        frame(
            ctx,
            app,
            vec![Event::MouseWheel {
                unit: MouseWheelUnit::Point,
                delta: vec2(0.0, -100.0),
                modifiers: Modifiers::NONE,
            }],
        );
    }
    for _ in 0..60 {
        frame(ctx, app, Vec::new());
    }
}

fn button(pos: Pos2, pressed: bool) -> Event {
    Event::PointerButton {
        pos,
        button: PointerButton::Primary,
        pressed,
        modifiers: Modifiers::NONE,
    }
}

fn drag_on_screen(ctx: &Context, app: &mut PaintApp, from: Pos2, to: Pos2) {
    frame(ctx, app, vec![Event::PointerMoved(from)]);
    frame(ctx, app, vec![Event::PointerMoved(from), button(from, true)]);
    frame(ctx, app, vec![Event::PointerMoved(to)]);
    frame(ctx, app, vec![button(to, false)]);
}

fn painted_pixels(app: &PaintApp) -> usize {
    app.canvas()
        .raster()
        .image()
        .pixels()
        .filter(|p| p.0 != [255, 255, 255])
        .count()
}

#[test]
fn test_drag_over_strip_leaves_scrolled_canvas_untouched() {
    let ctx = Context::default();
    let mut app = create_large_app();
    scroll_down(&ctx, &mut app);

    let y = STRIP_HEIGHT / 2.0;
    drag_on_screen(&ctx, &mut app, pos2(100.0, y), pos2(300.0, y));

    assert_eq!(painted_pixels(&app), 0);
}

#[test]
fn test_drag_on_visible_canvas_still_draws_after_scroll() {
    let ctx = Context::default();
    let mut app = create_large_app();
    scroll_down(&ctx, &mut app);

    drag_on_screen(&ctx, &mut app, pos2(100.0, 150.0), pos2(300.0, 150.0));

    assert!(painted_pixels(&app) > 0);
}

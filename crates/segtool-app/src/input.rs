use egui::{Key, PointerButton};
use segtool_core::command::{ButtonKind, Command, Modifiers};
use segtool_core::compositor::ViewMode;

/// Translate this frame's device events over the image area into commands.
///
/// Bindings mirror the original tool: Space commits, S saves, R resets,
/// T discards pending strokes, U/I/O/P pick the view mode, =/- adjust the
/// brush, F resets the view, Esc moves to the next image. Primary paints
/// foreground, secondary background; Ctrl selects the probable tier, Shift
/// erases. Middle-drag pans; with Ctrl it zooms, with Shift it adjusts the
/// brush radius instead.
pub fn collect(ui: &egui::Ui, response: &egui::Response, origin: egui::Pos2) -> Vec<Command> {
    let mut commands = Vec::new();

    let (mods, pointer_pos) = ui.input(|i| (i.modifiers, i.pointer.interact_pos()));
    let modifiers = Modifiers {
        probable: mods.ctrl,
        erase: mods.shift,
        adjust_radius: mods.shift,
    };

    let rel = pointer_pos.map(|p| (p.x - origin.x, p.y - origin.y));

    if let Some(pos) = rel {
        let painting_fg = response.dragged_by(PointerButton::Primary) || response.clicked();
        let painting_bg =
            response.dragged_by(PointerButton::Secondary) || response.secondary_clicked();

        if painting_fg {
            commands.push(Command::PaintStroke {
                pos,
                button: ButtonKind::Primary,
                modifiers,
            });
        }
        if painting_bg {
            commands.push(Command::PaintStroke {
                pos,
                button: ButtonKind::Secondary,
                modifiers,
            });
        }

        if response.dragged_by(PointerButton::Middle) {
            let delta = response.drag_delta();
            if mods.ctrl || mods.shift {
                commands.push(Command::DragZoom {
                    anchor: pos,
                    dy: delta.y,
                    modifiers,
                });
            } else {
                commands.push(Command::DragPan {
                    delta: (delta.x, delta.y),
                });
            }
        }
    }

    ui.input(|i| {
        if i.key_pressed(Key::Space) {
            commands.push(Command::Commit);
        }
        if i.key_pressed(Key::S) {
            commands.push(Command::Save);
        }
        if i.key_pressed(Key::R) {
            commands.push(Command::Reset);
        }
        if i.key_pressed(Key::T) {
            commands.push(Command::DiscardPending);
        }
        if i.key_pressed(Key::U) {
            commands.push(Command::SetViewMode(ViewMode::Blend));
        }
        if i.key_pressed(Key::I) {
            commands.push(Command::SetViewMode(ViewMode::Image));
        }
        if i.key_pressed(Key::O) {
            commands.push(Command::SetViewMode(ViewMode::MaskedImage));
        }
        if i.key_pressed(Key::P) {
            commands.push(Command::SetViewMode(ViewMode::Mask));
        }
        if i.key_pressed(Key::Equals) || i.key_pressed(Key::Plus) {
            commands.push(Command::AdjustBrushRadius(1));
        }
        if i.key_pressed(Key::Minus) {
            commands.push(Command::AdjustBrushRadius(-1));
        }
        if i.key_pressed(Key::F) {
            commands.push(Command::ResetView);
        }
        if i.key_pressed(Key::Escape) {
            commands.push(Command::Quit);
        }
    });

    commands
}

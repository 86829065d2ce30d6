use crate::compositor::ViewMode;
use crate::error::Result;
use crate::mask::Label;
use crate::session::EditSession;

/// Pointer button driving a paint stroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonKind {
    /// Paints foreground.
    Primary,
    /// Paints background.
    Secondary,
}

/// Gesture modifiers. `probable`, `erase`, and `adjust_radius` are mutually
/// exclusive per gesture; `adjust_radius` only applies to drag-zoom.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Paint the probable tier instead of the definite one.
    pub probable: bool,
    /// Erase pending edits instead of painting.
    pub erase: bool,
    /// Adjust the brush radius instead of zooming.
    pub adjust_radius: bool,
}

/// Device-agnostic interaction surface. The windowing shell translates raw
/// key/mouse events into these and dispatches them through
/// [`EditSession::apply`], re-rendering after each.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    PaintStroke {
        pos: (f32, f32),
        button: ButtonKind,
        modifiers: Modifiers,
    },
    DragPan {
        delta: (f32, f32),
    },
    DragZoom {
        anchor: (f32, f32),
        dy: f32,
        modifiers: Modifiers,
    },
    AdjustBrushRadius(i32),
    SetViewMode(ViewMode),
    Commit,
    Reset,
    ResetView,
    DiscardPending,
    Save,
    Quit,
}

/// What the driver should do after a command was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// State may have changed; re-render.
    Redraw,
    /// Persist the current mask.
    Save,
    /// End this session.
    Quit,
}

fn stroke_label(button: ButtonKind, probable: bool) -> Label {
    match (button, probable) {
        (ButtonKind::Primary, false) => Label::DefiniteForeground,
        (ButtonKind::Primary, true) => Label::ProbableForeground,
        (ButtonKind::Secondary, false) => Label::DefiniteBackground,
        (ButtonKind::Secondary, true) => Label::ProbableBackground,
    }
}

impl EditSession {
    /// Dispatch one interaction command into session method calls.
    pub fn apply(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::PaintStroke {
                pos,
                button,
                modifiers,
            } => {
                if modifiers.erase {
                    self.erase(pos);
                } else {
                    self.paint(pos, stroke_label(button, modifiers.probable));
                }
            }
            Command::DragPan { delta } => self.pan(delta.0, delta.1),
            Command::DragZoom {
                anchor,
                dy,
                modifiers,
            } => {
                if modifiers.adjust_radius {
                    if dy != 0.0 {
                        self.adjust_brush_radius(if dy < 0.0 { 1 } else { -1 });
                    }
                } else {
                    self.zoom_step(anchor, dy);
                }
            }
            Command::AdjustBrushRadius(delta) => self.adjust_brush_radius(delta),
            Command::SetViewMode(mode) => self.set_view_mode(mode),
            Command::Commit => self.commit_and_refine()?,
            Command::Reset => self.reset()?,
            Command::ResetView => self.reset_view(),
            Command::DiscardPending => self.discard_pending(),
            Command::Save => return Ok(Outcome::Save),
            Command::Quit => return Ok(Outcome::Quit),
        }
        Ok(Outcome::Redraw)
    }
}

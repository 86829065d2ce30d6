use std::collections::VecDeque;
use std::path::PathBuf;

use segtool_core::command::Outcome;
use segtool_core::config::SessionConfig;
use segtool_core::session::EditSession;
use tracing::{error, warn};

use crate::convert::rgb_to_color_image;
use crate::{input, loader};

struct Item {
    session: EditSession,
    image_path: PathBuf,
}

/// Windowing shell: owns the batch queue and the current edit session,
/// dispatches device events into session commands, re-renders after each.
pub struct SegtoolApp {
    queue: VecDeque<PathBuf>,
    current: Option<Item>,
    config: SessionConfig,
    texture: Option<egui::TextureHandle>,
}

impl SegtoolApp {
    pub fn new(queue: Vec<PathBuf>, config: SessionConfig) -> Self {
        Self {
            queue: queue.into(),
            current: None,
            config,
            texture: None,
        }
    }

    /// Pop images until one yields a session; invalid items are skipped,
    /// fatal only to themselves.
    fn advance(&mut self) {
        while let Some(path) = self.queue.pop_front() {
            match loader::load(&path, &self.config) {
                Ok(session) => {
                    self.current = Some(Item {
                        session,
                        image_path: path,
                    });
                    return;
                }
                Err(err) => warn!(path = %path.display(), "skipped: {err:#}"),
            }
        }
    }

    fn show_session(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let Some(item) = &mut self.current else {
            return;
        };

        let (display_w, display_h) = item.session.viewport().display_size();
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(display_w as f32, display_h as f32),
            egui::Sense::click_and_drag(),
        );

        let mut finished = false;
        for command in input::collect(ui, &response, rect.min) {
            match item.session.apply(command) {
                Ok(Outcome::Redraw) => {}
                Ok(Outcome::Save) => {
                    if let Err(err) = loader::save(&item.session, &item.image_path) {
                        error!("{err:#}");
                    }
                }
                Ok(Outcome::Quit) => finished = true,
                Err(err) => error!(path = %item.image_path.display(), "{err}"),
            }
        }

        let cursor = ui
            .input(|i| i.pointer.hover_pos())
            .filter(|_| response.hovered())
            .map(|p| (p.x - rect.min.x, p.y - rect.min.y));

        let buffer = item.session.render(cursor);
        let color_image = rgb_to_color_image(&buffer);
        let size = color_image.size;
        // Keep the handle on self so the texture outlives this frame's paint.
        let texture = self
            .texture
            .insert(ctx.load_texture("viewport", color_image, egui::TextureOptions::NEAREST));
        ui.painter().image(
            texture.id(),
            egui::Rect::from_min_size(rect.min, egui::vec2(size[0] as f32, size[1] as f32)),
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        let status = format!(
            "{} | iter {} | brush {} | {:?}",
            item.image_path.display(),
            item.session.iteration(),
            item.session.brush_radius(),
            item.session.view_mode(),
        );
        ui.painter().text(
            rect.left_bottom() + egui::vec2(8.0, -8.0),
            egui::Align2::LEFT_BOTTOM,
            status,
            egui::FontId::proportional(14.0),
            egui::Color32::from_white_alpha(200),
        );

        if finished {
            self.current = None;
            self.texture = None;
        }
    }
}

impl eframe::App for SegtoolApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.current.is_none() {
            self.advance();
            if self.current.is_none() {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                return;
            }
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(egui::Color32::from_gray(30)))
            .show(ctx, |ui| self.show_session(ctx, ui));
    }
}

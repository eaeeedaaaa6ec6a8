//! UI rendering and input forwarding for the portfolio canvas.

use crate::PortfolioApp;
use crate::colors;
use crate::constants::SIDEBAR_WIDTH;
use crate::minimap::show_minimap;
use crate::sections::draw_section;
use eframe::egui;
use portfolio_canvas::canvas::input::{InputEvent, Key, Modifiers};
use portfolio_canvas::canvas::layout::PLANE_SIZE;
use std::time::Duration;

/// Plane units between background grid lines.
const GRID_SPACING: f32 = 250.0;

fn modifiers(m: egui::Modifiers) -> Modifiers {
    Modifiers {
        ctrl: m.ctrl,
        meta: m.mac_cmd,
    }
}

impl PortfolioApp {
    /// Forwards keyboard shortcuts for panning, zooming and reset.
    pub fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        let (events, reset) = ctx.input(|i| {
            let modifiers = modifiers(i.modifiers);
            let keys = [
                (egui::Key::ArrowUp, Key::ArrowUp),
                (egui::Key::ArrowDown, Key::ArrowDown),
                (egui::Key::ArrowLeft, Key::ArrowLeft),
                (egui::Key::ArrowRight, Key::ArrowRight),
                (egui::Key::Plus, Key::Plus),
                (egui::Key::Equals, Key::Plus),
                (egui::Key::Minus, Key::Minus),
            ];
            let events: Vec<_> = keys
                .into_iter()
                .filter(|(egui_key, _)| i.key_pressed(*egui_key))
                .map(|(_, key)| InputEvent::Key { key, modifiers })
                .collect();
            (events, i.key_pressed(egui::Key::Num0))
        });

        for event in &events {
            self.canvas.handle_input(event);
        }
        if reset {
            self.canvas.reset();
        }
    }

    /// Renders the bottom status bar with controls hint and zoom level.
    pub fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    "Drag: Pan | Scroll: Pan | Ctrl+Scroll: Zoom | Arrows: Pan | Ctrl +/-: Zoom | 0: Reset",
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{:.0}%", self.canvas.view().scale * 100.0));
                });
            });
        });
    }

    /// Renders the left sidebar with section navigation and contact links.
    pub fn show_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("sidebar")
            .exact_width(SIDEBAR_WIDTH)
            .resizable(false)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.show_sidebar_content(ui);
                });
            });
    }

    fn show_sidebar_content(&mut self, ui: &mut egui::Ui) {
        ui.add_space(4.0);

        ui.strong("Sections");
        ui.separator();

        let mut target = None;
        for section in self.canvas.layout().sections() {
            if ui.selectable_label(false, section.title.as_str()).clicked() {
                target = Some(section.id.clone());
            }
        }
        if let Some(id) = target {
            self.canvas.navigate_to_section(&id);
        }

        if let Some(contact) = &self.content.contact {
            ui.add_space(12.0);
            ui.strong("Links");
            ui.separator();

            if !contact.email.is_empty() {
                ui.hyperlink_to(contact.email.as_str(), format!("mailto:{}", contact.email));
            }
            for social in &contact.socials {
                ui.hyperlink_to(social.platform.as_str(), &social.url);
            }
        }
    }

    /// Renders the central panel containing the canvas.
    pub fn show_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(colors::CANVAS_BACKGROUND))
            .show(ctx, |ui| {
                let panel_rect = ui.max_rect();
                self.show_canvas(ui, ctx);
                show_minimap(ctx, &mut self.canvas, panel_rect);
                self.show_zoom_controls(ctx, panel_rect);
            });
    }

    /// Renders the floating zoom controls panel.
    fn show_zoom_controls(&mut self, ctx: &egui::Context, panel_rect: egui::Rect) {
        let margin = 12.0;
        let panel_width = 160.0;
        let panel_height = 36.0;

        let anchor_pos = egui::pos2(
            panel_rect.right() - panel_width - margin,
            panel_rect.bottom() - panel_height - margin,
        );

        egui::Area::new(egui::Id::new("zoom_controls"))
            .fixed_pos(anchor_pos)
            .interactable(true)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .fill(ui.style().visuals.window_fill.gamma_multiply(0.95))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            if ui.button("−").on_hover_text("Zoom out (Ctrl -)").clicked() {
                                self.canvas.zoom_out();
                            }
                            if ui.button("+").on_hover_text("Zoom in (Ctrl +)").clicked() {
                                self.canvas.zoom_in();
                            }
                            if ui.button("Reset").on_hover_text("Reset view (0)").clicked() {
                                self.canvas.reset();
                            }
                        });
                    });
            });
    }

    /// Forwards pointer, touch and wheel input, advances motion, and draws
    /// the plane and its sections.
    fn show_canvas(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let (viewport_rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        let origin = viewport_rect.min;
        self.canvas.set_viewport(viewport_rect.size());

        for event in pointer_events(ui, &response, origin) {
            self.canvas.handle_input(&event);
        }
        if let Some(event) = wheel_event(ui, viewport_rect) {
            self.canvas.handle_input(&event);
        }

        let now = Duration::from_secs_f64(ui.input(|i| i.time));
        self.canvas.frame(now, ctx);

        ui.set_clip_rect(viewport_rect);

        let transform = self.canvas.transform();
        let scale = transform.scale;
        let plane_rect = transform.apply_rect(
            egui::Rect::from_min_size(egui::Pos2::ZERO, PLANE_SIZE),
            origin,
        );
        ui.painter().rect_filled(plane_rect, 0.0, colors::PLANE_FILL);
        draw_grid(ui.painter(), plane_rect, scale);

        for (section, fragments) in self.canvas.layout().sections().iter().zip(&self.fragments) {
            let screen_rect = transform.apply_rect(section.rect, origin);
            draw_section(ui, section, screen_rect, fragments, scale);
        }
    }
}

/// Translates this frame's drag state on the canvas into input events.
fn pointer_events(ui: &egui::Ui, response: &egui::Response, origin: egui::Pos2) -> Vec<InputEvent> {
    let local = |pos: egui::Pos2| (pos - origin).to_pos2();
    let (press_origin, touches) = ui.input(|i| {
        let touches = i
            .any_touches()
            .then(|| i.multi_touch().map_or(1, |touch| touch.num_touches));
        (i.pointer.press_origin(), touches)
    });

    let mut events = Vec::new();

    if response.drag_started()
        && let Some(pos) = press_origin.or(response.interact_pointer_pos())
    {
        let pos = local(pos);
        events.push(match touches {
            Some(touches) => InputEvent::TouchStart { pos, touches },
            None => InputEvent::PointerDown { pos },
        });
    }

    if response.dragged()
        && let Some(pos) = response.interact_pointer_pos()
    {
        let pos = local(pos);
        events.push(match touches {
            Some(touches) => InputEvent::TouchMove { pos, touches },
            None => InputEvent::PointerMove { pos },
        });
    }

    if response.drag_stopped() {
        events.push(match touches {
            Some(_) => InputEvent::TouchEnd,
            None => InputEvent::PointerUp,
        });
    }

    events
}

/// Converts wheel input over the canvas into a browser-style wheel event.
fn wheel_event(ui: &egui::Ui, viewport_rect: egui::Rect) -> Option<InputEvent> {
    let (scroll_delta, hover_pos, m) =
        ui.input(|i| (i.raw_scroll_delta, i.pointer.hover_pos(), i.modifiers));

    if scroll_delta == egui::Vec2::ZERO {
        return None;
    }
    let hover = hover_pos.filter(|p| viewport_rect.contains(*p))?;

    Some(InputEvent::Wheel {
        delta: wheel_delta(scroll_delta),
        pointer: (hover - viewport_rect.min).to_pos2(),
        modifiers: modifiers(m),
    })
}

/// egui reports how far content should move; wheel events report the
/// direction the user scrolled (positive `y` is down).
fn wheel_delta(raw_scroll_delta: egui::Vec2) -> egui::Vec2 {
    -raw_scroll_delta
}

fn draw_grid(painter: &egui::Painter, plane_rect: egui::Rect, scale: f32) {
    let spacing = GRID_SPACING * scale;
    if spacing < 8.0 {
        return;
    }
    let stroke = egui::Stroke::new(1.0, colors::GRID_LINE);

    let mut x = plane_rect.left();
    while x <= plane_rect.right() {
        painter.vline(x, plane_rect.y_range(), stroke);
        x += spacing;
    }
    let mut y = plane_rect.top();
    while y <= plane_rect.bottom() {
        painter.hline(plane_rect.x_range(), y, stroke);
        y += spacing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_canvas::canvas::Canvas;
    use portfolio_canvas::config::CanvasConfig;
    use portfolio_canvas::default_sections;

    #[test]
    fn scrolling_down_reports_positive_wheel_delta() {
        // egui: scrolling down moves content up, i.e. negative y
        let delta = wheel_delta(egui::vec2(0.0, -40.0));
        assert_eq!(delta, egui::vec2(0.0, 40.0));
    }

    #[test]
    fn unmodified_scroll_moves_plane_with_content() {
        let mut canvas = Canvas::new(CanvasConfig::default(), &default_sections());
        canvas.set_viewport(egui::vec2(1600.0, 900.0));

        let raw = egui::vec2(0.0, -40.0);
        canvas.handle_input(&InputEvent::Wheel {
            delta: wheel_delta(raw),
            pointer: egui::pos2(800.0, 450.0),
            modifiers: Modifiers::NONE,
        });

        // Pan follows egui's content motion, scaled by the wheel multiplier.
        assert_eq!(canvas.view().pan, raw * CanvasConfig::default().wheel_pan_multiplier);
    }
}

//! Minimap overlay: section markers, the viewport indicator and click handling.

use crate::colors;
use crate::constants::{MINIMAP_MARGIN, MINIMAP_MARKER_RADIUS};
use eframe::egui;
use portfolio_canvas::canvas::Canvas;
use portfolio_canvas::canvas::minimap::{marker_position, minimap_size};

/// Draws the minimap in the bottom-left corner of `canvas_rect` and handles
/// clicks on it.
pub fn show_minimap(ctx: &egui::Context, canvas: &mut Canvas, canvas_rect: egui::Rect) {
    let size = minimap_size(canvas.config().minimap_width);
    let anchor_pos = egui::pos2(
        canvas_rect.left() + MINIMAP_MARGIN,
        canvas_rect.bottom() - size.y - MINIMAP_MARGIN,
    );

    egui::Area::new(egui::Id::new("minimap"))
        .fixed_pos(anchor_pos)
        .interactable(true)
        .show(ctx, |ui| {
            let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
            let painter = ui.painter_at(rect);

            painter.rect_filled(rect, 4.0, colors::MINIMAP_FILL);

            for section in canvas.layout().sections() {
                let center = rect.min + marker_position(section.rect.center(), size).to_vec2();
                painter.circle_filled(center, MINIMAP_MARKER_RADIUS, colors::MINIMAP_MARKER);
            }

            let indicator = canvas
                .minimap_indicator(size)
                .translate(rect.min.to_vec2())
                .intersect(rect);
            if indicator.is_positive() {
                painter.rect_stroke(
                    indicator,
                    2.0,
                    egui::Stroke::new(1.5, colors::MINIMAP_VIEWPORT),
                    egui::StrokeKind::Inside,
                );
            }

            let hovered_marker = response.hover_pos().and_then(|pos| {
                canvas.layout().sections().iter().find(|section| {
                    let center = rect.min + marker_position(section.rect.center(), size).to_vec2();
                    center.distance(pos) <= MINIMAP_MARKER_RADIUS
                })
            });
            let response = match hovered_marker {
                Some(section) => response
                    .on_hover_text(section.title.as_str())
                    .on_hover_cursor(egui::CursorIcon::PointingHand),
                None => response.on_hover_cursor(egui::CursorIcon::Crosshair),
            };

            if response.clicked()
                && let Some(pos) = response.interact_pointer_pos()
            {
                let click = (pos - rect.min).to_pos2();
                canvas.minimap_click(click, size, MINIMAP_MARKER_RADIUS);
            }
        });
}

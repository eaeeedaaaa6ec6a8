//! Drawing of section cards and their content fragments.

use crate::colors;
use crate::constants::{HEADING_SIZE, SECTION_PADDING, TEXT_SIZE};
use eframe::egui;
use portfolio_canvas::canvas::layout::PlacedSection;
use portfolio_canvas::content::Fragment;

/// Text smaller than this many pixels is not drawn.
const MIN_READABLE_FONT: f32 = 3.0;

/// Draws one section card at its screen rectangle.
pub fn draw_section(
    ui: &mut egui::Ui,
    section: &PlacedSection,
    screen_rect: egui::Rect,
    fragments: &[Fragment],
    scale: f32,
) {
    if !ui.clip_rect().intersects(screen_rect) {
        return;
    }

    let rounding = 16.0 * scale;
    ui.painter().rect_filled(screen_rect, rounding, colors::SECTION_FILL);
    ui.painter().rect_stroke(
        screen_rect,
        rounding,
        egui::Stroke::new((2.0 * scale).max(1.0), colors::SECTION_STROKE),
        egui::StrokeKind::Inside,
    );

    let padding = SECTION_PADDING * scale;
    let content_rect = screen_rect.shrink(padding);
    let painter = ui.painter().with_clip_rect(content_rect.intersect(ui.clip_rect()));
    let wrap_width = content_rect.width().max(1.0);
    let mut cursor = content_rect.min;

    for (idx, fragment) in fragments.iter().enumerate() {
        if cursor.y > content_rect.max.y {
            break;
        }

        match fragment {
            Fragment::Heading(text) => {
                let size = HEADING_SIZE * scale;
                cursor.y += draw_text(&painter, cursor, text, size, colors::HEADING_TEXT, wrap_width);
                cursor.y += 12.0 * scale;
            }
            Fragment::Subheading(text) => {
                let size = TEXT_SIZE * 1.2 * scale;
                cursor.y += 6.0 * scale;
                cursor.y += draw_text(&painter, cursor, text, size, colors::HEADING_TEXT, wrap_width);
            }
            Fragment::Text(text) => {
                let size = TEXT_SIZE * scale;
                cursor.y += draw_text(&painter, cursor, text, size, colors::BODY_TEXT, wrap_width);
            }
            Fragment::Tags(tags) => {
                cursor.y += draw_tags(&painter, cursor, tags, TEXT_SIZE * 0.8 * scale, wrap_width);
            }
            Fragment::Link { label, url } => {
                let size = TEXT_SIZE * scale;
                let height = draw_text(&painter, cursor, label, size, colors::LINK_TEXT, wrap_width);
                let link_rect = egui::Rect::from_min_size(cursor, egui::vec2(wrap_width, height));
                let id = egui::Id::new((&section.id, "link", idx));
                let response = ui
                    .interact(link_rect.intersect(content_rect), id, egui::Sense::click())
                    .on_hover_cursor(egui::CursorIcon::PointingHand);
                if response.clicked() {
                    ui.ctx().open_url(egui::OpenUrl::new_tab(url));
                }
                cursor.y += height;
            }
            Fragment::Image { url, width, height } => {
                let size = egui::vec2(*width as f32, *height as f32) * scale * 0.5;
                let image_rect = egui::Rect::from_min_size(cursor, size);
                if painter.clip_rect().intersects(image_rect) {
                    egui::Image::new(url.as_str())
                        .corner_radius(4.0 * scale)
                        .paint_at(ui, image_rect);
                }
                cursor.y += size.y + 6.0 * scale;
            }
            Fragment::Separator => {
                cursor.y += 10.0 * scale;
                painter.hline(
                    content_rect.x_range(),
                    cursor.y,
                    egui::Stroke::new(1.0, colors::MUTED_TEXT),
                );
                cursor.y += 10.0 * scale;
            }
        }
    }
}

/// Draws wrapped text and returns its height.
fn draw_text(
    painter: &egui::Painter,
    pos: egui::Pos2,
    text: &str,
    font_size: f32,
    color: egui::Color32,
    wrap_width: f32,
) -> f32 {
    if font_size < MIN_READABLE_FONT {
        return font_size * 1.3;
    }
    let galley = painter.layout(
        text.to_owned(),
        egui::FontId::proportional(font_size),
        color,
        wrap_width,
    );
    let height = galley.size().y;
    painter.galley(pos, galley, color);
    height
}

/// Draws a row of tag pills, wrapping onto new lines, and returns the height.
fn draw_tags(
    painter: &egui::Painter,
    pos: egui::Pos2,
    tags: &[String],
    font_size: f32,
    wrap_width: f32,
) -> f32 {
    if font_size < MIN_READABLE_FONT {
        return font_size * 1.6;
    }

    let pad = egui::vec2(font_size * 0.5, font_size * 0.25);
    let gap = font_size * 0.4;
    let mut x = 0.0;
    let mut y = 0.0;
    let mut row_height: f32 = 0.0;

    for tag in tags {
        let galley = painter.layout_no_wrap(
            tag.clone(),
            egui::FontId::proportional(font_size),
            colors::BODY_TEXT,
        );
        let size = galley.size() + pad * 2.0;
        if x > 0.0 && x + size.x > wrap_width {
            x = 0.0;
            y += row_height + gap;
            row_height = 0.0;
        }

        let rect = egui::Rect::from_min_size(pos + egui::vec2(x, y), size);
        painter.rect_filled(rect, size.y * 0.5, colors::TAG_FILL);
        painter.galley(rect.min + pad, galley, colors::BODY_TEXT);

        x += size.x + gap;
        row_height = row_height.max(size.y);
    }

    y + row_height + gap
}

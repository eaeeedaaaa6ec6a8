//! Projection of the view state onto the canvas surface and the minimap.

use super::layout::{Layout, PLANE_SIZE};
use super::view::ViewState;
use eframe::egui::{Pos2, Rect, Vec2};

/// `translate(pan) scale(scale)` applied to the canvas surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate: Vec2,
    pub scale: f32,
}

impl Transform {
    pub fn from_view(view: &ViewState) -> Self {
        Self {
            translate: view.pan,
            scale: view.scale,
        }
    }

    pub fn apply(&self, plane: Pos2) -> Pos2 {
        (self.translate + plane.to_vec2() * self.scale).to_pos2()
    }

    /// Maps a plane rectangle to screen space, offset by the viewport origin.
    pub fn apply_rect(&self, plane: Rect, origin: Pos2) -> Rect {
        Rect::from_min_max(
            self.apply(plane.min) + origin.to_vec2(),
            self.apply(plane.max) + origin.to_vec2(),
        )
    }
}

/// Minimap dimensions for a given width, keeping the plane aspect ratio.
pub fn minimap_size(width: f32) -> Vec2 {
    Vec2::new(width, width * PLANE_SIZE.y / PLANE_SIZE.x)
}

fn plane_to_minimap(plane: Vec2, minimap: Vec2) -> Vec2 {
    plane / PLANE_SIZE * minimap
}

/// Rectangle of the minimap covered by the window, relative to the
/// minimap's top-left corner.
pub fn viewport_indicator(view: &ViewState, window: Vec2, minimap: Vec2) -> Rect {
    let size = plane_to_minimap(window / view.scale, minimap);
    let offset = plane_to_minimap(-view.pan / view.scale, minimap);
    Rect::from_min_size(offset.to_pos2(), size)
}

/// Position of a section's marker on the minimap.
pub fn marker_position(plane_center: Pos2, minimap: Vec2) -> Pos2 {
    plane_to_minimap(plane_center.to_vec2(), minimap).to_pos2()
}

/// What a click on the minimap landed on.
#[derive(Debug, Clone, PartialEq)]
pub enum MinimapHit {
    /// A section marker; navigation should animate to this section.
    Marker(String),
    /// Empty minimap area at normalized coordinates in `[0, 1]`.
    Background(Vec2),
}

/// Classifies a click at `click` (relative to the minimap's top-left).
pub fn hit_test(layout: &Layout, click: Pos2, minimap: Vec2, marker_radius: f32) -> MinimapHit {
    let marker = layout.sections().iter().find(|section| {
        marker_position(section.rect.center(), minimap).distance(click) <= marker_radius
    });
    if let Some(section) = marker {
        return MinimapHit::Marker(section.id.clone());
    }

    let normalized = Vec2::new(
        (click.x / minimap.x).clamp(0.0, 1.0),
        (click.y / minimap.y).clamp(0.0, 1.0),
    );
    MinimapHit::Background(normalized)
}

/// Pan that puts the plane point at `normalized` in the window center.
pub fn pan_centering(normalized: Vec2, scale: f32, window: Vec2) -> Vec2 {
    let plane_point = normalized * PLANE_SIZE;
    window * 0.5 - plane_point * scale
}

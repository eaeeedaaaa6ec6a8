//! Pan/zoom state of the canvas and the operations that mutate it.

use crate::config::CanvasConfig;
use eframe::egui::{Pos2, Vec2};

/// Current view of the canvas surface.
///
/// Screen coordinates are relative to the top-left corner of the canvas
/// viewport. A plane point `p` is drawn at `pan + p * scale`.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Zoom multiplier, always within `[min_scale, max_scale]`
    pub scale: f32,
    /// Translation of the canvas surface in screen pixels
    pub pan: Vec2,
    pub is_dragging: bool,
    /// Pointer position minus pan at the moment the drag started
    pub drag_anchor: Vec2,
    pub last_pointer: Pos2,
    /// Pointer delta of the latest drag event; seeds coasting
    pub velocity: Vec2,
    /// Per-frame velocity multiplier while coasting
    pub friction: f32,
    min_scale: f32,
    max_scale: f32,
    initial_scale: f32,
    initial_pan: Vec2,
}

impl ViewState {
    pub fn new(config: &CanvasConfig) -> Self {
        let initial_scale = config.initial_scale.clamp(config.min_scale, config.max_scale);
        let initial_pan = Vec2::new(config.initial_pan[0], config.initial_pan[1]);
        Self {
            scale: initial_scale,
            pan: initial_pan,
            is_dragging: false,
            drag_anchor: Vec2::ZERO,
            last_pointer: Pos2::ZERO,
            velocity: Vec2::ZERO,
            friction: config.friction,
            min_scale: config.min_scale,
            max_scale: config.max_scale,
            initial_scale,
            initial_pan,
        }
    }

    pub fn min_scale(&self) -> f32 {
        self.min_scale
    }

    pub fn max_scale(&self) -> f32 {
        self.max_scale
    }

    /// Translates the canvas by `(dx, dy)` screen pixels.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        if dx.is_finite() && dy.is_finite() {
            self.pan += Vec2::new(dx, dy);
        }
    }

    /// Multiplies the scale by `factor`, keeping the plane point under
    /// `anchor` at the same screen position.
    ///
    /// Anchors that are not finite or lie outside the viewport are replaced
    /// by the viewport center.
    pub fn zoom_by(&mut self, factor: f32, anchor: Pos2, viewport: Vec2) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }

        let anchor = if is_valid_anchor(anchor, viewport) {
            anchor
        } else {
            (viewport * 0.5).to_pos2()
        };

        let old_scale = self.scale;
        let new_scale = self.clamp_scale(old_scale * factor);
        if new_scale == old_scale {
            return;
        }

        let ratio = (new_scale - old_scale) / old_scale;
        self.pan -= (anchor.to_vec2() - self.pan) * ratio;
        self.scale = new_scale;
    }

    /// Sets the scale directly, clamped to the configured bounds.
    pub fn set_scale(&mut self, value: f32) {
        if value.is_finite() {
            self.scale = self.clamp_scale(value);
        }
    }

    /// Restores the initial scale and pan and clears drag state.
    pub fn reset(&mut self) {
        self.scale = self.initial_scale;
        self.pan = self.initial_pan;
        self.is_dragging = false;
        self.velocity = Vec2::ZERO;
    }

    /// Converts a screen position to plane coordinates.
    pub fn screen_to_plane(&self, screen: Pos2) -> Pos2 {
        ((screen.to_vec2() - self.pan) / self.scale).to_pos2()
    }

    /// Converts plane coordinates to a screen position.
    pub fn plane_to_screen(&self, plane: Pos2) -> Pos2 {
        (self.pan + plane.to_vec2() * self.scale).to_pos2()
    }

    fn clamp_scale(&self, value: f32) -> f32 {
        value.clamp(self.min_scale, self.max_scale)
    }
}

fn is_valid_anchor(anchor: Pos2, viewport: Vec2) -> bool {
    anchor.x.is_finite()
        && anchor.y.is_finite()
        && (0.0..=viewport.x).contains(&anchor.x)
        && (0.0..=viewport.y).contains(&anchor.y)
}

//! Drag, momentum and animated navigation as an explicit state machine.
//!
//! The host calls [`Motion::tick`] once per displayed frame. A tick
//! returns [`Tick::Continue`] while another frame is needed and
//! [`Tick::Settled`] once the view is at rest.

use super::view::ViewState;
use eframe::egui::{Pos2, Vec2};
use std::time::Duration;

/// Result of advancing the motion by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Settled,
}

/// An in-flight eased transition of the pan offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    from: Vec2,
    to: Vec2,
    duration: Duration,
    /// Set by the first tick after the animation was requested
    started_at: Option<Duration>,
}

impl Animation {
    fn progress(&mut self, now: Duration) -> f32 {
        let started_at = *self.started_at.get_or_insert(now);
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Dragging,
    Coasting,
    Animating(Animation),
}

/// Owns the current phase. Only one of coasting or animating is ever
/// active; entering any phase overwrites the previous one.
#[derive(Debug, Clone)]
pub struct Motion {
    phase: Phase,
    velocity_threshold: f32,
}

fn exceeds(velocity: Vec2, threshold: f32) -> bool {
    velocity.x.abs() >= threshold || velocity.y.abs() >= threshold
}

/// Quartic ease-out.
pub fn ease_out_quart(progress: f32) -> f32 {
    let progress = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - progress).powi(4)
}

impl Motion {
    pub fn new(velocity_threshold: f32) -> Self {
        Self {
            phase: Phase::Idle,
            velocity_threshold,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Starts a drag at `pointer`, interrupting any coast or animation.
    pub fn press(&mut self, view: &mut ViewState, pointer: Pos2) {
        view.is_dragging = true;
        view.drag_anchor = pointer.to_vec2() - view.pan;
        view.last_pointer = pointer;
        view.velocity = Vec2::ZERO;
        self.phase = Phase::Dragging;
    }

    /// Moves the drag to `pointer`. Ignored when no drag is in progress.
    pub fn drag_to(&mut self, view: &mut ViewState, pointer: Pos2) {
        if !matches!(self.phase, Phase::Dragging) {
            return;
        }
        view.pan = pointer.to_vec2() - view.drag_anchor;
        view.velocity = pointer - view.last_pointer;
        view.last_pointer = pointer;
    }

    /// Ends the drag, coasting if the last pointer velocity was large enough.
    pub fn release(&mut self, view: &mut ViewState) {
        if !matches!(self.phase, Phase::Dragging) {
            return;
        }
        view.is_dragging = false;
        if self.above_threshold(view.velocity) {
            self.phase = Phase::Coasting;
        } else {
            view.velocity = Vec2::ZERO;
            self.phase = Phase::Idle;
        }
    }

    /// Animates the pan offset from its current value to `target`.
    pub fn animate_to(&mut self, view: &mut ViewState, target: Vec2, duration: Duration) {
        view.is_dragging = false;
        view.velocity = Vec2::ZERO;
        self.phase = Phase::Animating(Animation {
            from: view.pan,
            to: target,
            duration,
            started_at: None,
        });
    }

    /// Drops any coast or animation without touching the pan.
    pub fn stop(&mut self, view: &mut ViewState) {
        view.is_dragging = false;
        view.velocity = Vec2::ZERO;
        self.phase = Phase::Idle;
    }

    /// Drops an in-flight animation. Its target pan was computed for the
    /// scale at request time and no longer lands where it should once the
    /// scale changes.
    pub fn cancel_animation(&mut self) {
        if matches!(self.phase, Phase::Animating(_)) {
            self.phase = Phase::Idle;
        }
    }

    /// Advances the current phase to `now` (time since an arbitrary origin).
    pub fn tick(&mut self, view: &mut ViewState, now: Duration) -> Tick {
        let settled = match &mut self.phase {
            Phase::Idle | Phase::Dragging => return Tick::Settled,
            Phase::Coasting => {
                view.velocity *= view.friction;
                view.pan += view.velocity;
                !exceeds(view.velocity, self.velocity_threshold)
            }
            Phase::Animating(animation) => {
                let progress = animation.progress(now);
                if progress >= 1.0 {
                    view.pan = animation.to;
                    true
                } else {
                    let eased = ease_out_quart(progress);
                    view.pan = animation.from + (animation.to - animation.from) * eased;
                    false
                }
            }
        };

        if settled {
            view.velocity = Vec2::ZERO;
            self.phase = Phase::Idle;
            Tick::Settled
        } else {
            Tick::Continue
        }
    }

    fn above_threshold(&self, velocity: Vec2) -> bool {
        exceeds(velocity, self.velocity_threshold)
    }
}

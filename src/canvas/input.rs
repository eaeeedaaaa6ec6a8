//! Translation of raw input events into view state changes.
//!
//! Positions are in viewport coordinates. Wheel deltas follow the browser
//! convention: positive `y` means the user scrolled down.

use super::motion::Motion;
use super::view::ViewState;
use crate::config::CanvasConfig;
use eframe::egui::{Pos2, Vec2};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        meta: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        meta: false,
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Plus,
    Minus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { pos: Pos2 },
    PointerMove { pos: Pos2 },
    PointerUp,
    /// `touches` is the number of fingers currently on the surface.
    TouchStart { pos: Pos2, touches: usize },
    TouchMove { pos: Pos2, touches: usize },
    TouchEnd,
    Wheel {
        delta: Vec2,
        pointer: Pos2,
        modifiers: Modifiers,
    },
    Key { key: Key, modifiers: Modifiers },
}

/// Mutable state the adapters write to.
pub struct InputTarget<'a> {
    pub view: &'a mut ViewState,
    pub motion: &'a mut Motion,
    pub config: &'a CanvasConfig,
    pub viewport: Vec2,
}

impl InputTarget<'_> {
    /// Applies `event` synchronously. Returns `false` if it was ignored.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::PointerDown { pos } => {
                self.motion.press(self.view, pos);
                true
            }
            InputEvent::PointerMove { pos } => self.drag(pos),
            InputEvent::PointerUp => self.release(),
            InputEvent::TouchStart { pos, touches } => {
                if touches != 1 {
                    return false;
                }
                self.motion.press(self.view, pos);
                true
            }
            InputEvent::TouchMove { pos, touches } => {
                if touches != 1 {
                    return false;
                }
                self.drag(pos)
            }
            InputEvent::TouchEnd => self.release(),
            InputEvent::Wheel {
                delta,
                pointer,
                modifiers,
            } => self.wheel(delta, pointer, modifiers),
            InputEvent::Key { key, modifiers } => self.key(key, modifiers),
        }
    }

    fn drag(&mut self, pos: Pos2) -> bool {
        if !self.view.is_dragging {
            return false;
        }
        self.motion.drag_to(self.view, pos);
        true
    }

    fn release(&mut self) -> bool {
        if !self.view.is_dragging {
            return false;
        }
        self.motion.release(self.view);
        true
    }

    fn wheel(&mut self, delta: Vec2, pointer: Pos2, modifiers: Modifiers) -> bool {
        if modifiers.command() {
            let factor = if delta.y > 0.0 {
                self.config.wheel_zoom_out
            } else if delta.y < 0.0 {
                self.config.wheel_zoom_in
            } else {
                return false;
            };
            self.motion.cancel_animation();
            self.view.zoom_by(factor, pointer, self.viewport);
            return true;
        }

        if delta == Vec2::ZERO {
            return false;
        }
        let pan = -delta * self.config.wheel_pan_multiplier;
        self.view.pan(pan.x, pan.y);
        true
    }

    fn key(&mut self, key: Key, modifiers: Modifiers) -> bool {
        let step = self.config.key_pan_step;
        match key {
            Key::ArrowUp => self.view.pan(0.0, step),
            Key::ArrowDown => self.view.pan(0.0, -step),
            Key::ArrowLeft => self.view.pan(step, 0.0),
            Key::ArrowRight => self.view.pan(-step, 0.0),
            Key::Plus if modifiers.command() => {
                self.motion.cancel_animation();
                self.view.set_scale(self.view.scale + self.config.key_zoom_step);
            }
            Key::Minus if modifiers.command() => {
                self.motion.cancel_animation();
                self.view.set_scale(self.view.scale - self.config.key_zoom_step);
            }
            Key::Plus | Key::Minus => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::motion::Phase;
    use eframe::egui::pos2;
    use std::time::Duration;

    struct Harness {
        view: ViewState,
        motion: Motion,
        config: CanvasConfig,
    }

    impl Harness {
        fn new() -> Self {
            let config = CanvasConfig::default();
            Self {
                view: ViewState::new(&config),
                motion: Motion::new(config.velocity_threshold),
                config,
            }
        }

        fn send(&mut self, event: InputEvent) -> bool {
            InputTarget {
                view: &mut self.view,
                motion: &mut self.motion,
                config: &self.config,
                viewport: Vec2::new(1000.0, 600.0),
            }
            .handle(&event)
        }
    }

    #[test]
    fn pointer_drag_scenario() {
        let mut h = Harness::new();
        h.send(InputEvent::PointerDown {
            pos: pos2(100.0, 100.0),
        });
        h.send(InputEvent::PointerMove {
            pos: pos2(150.0, 130.0),
        });
        assert_eq!(h.view.pan, Vec2::new(50.0, 30.0));

        h.send(InputEvent::PointerUp);
        assert!(!h.view.is_dragging);
        assert_eq!(h.motion.phase(), &Phase::Coasting);
    }

    #[test]
    fn drag_is_relative_to_starting_pan() {
        let mut h = Harness::new();
        h.view.pan = Vec2::new(-300.0, 20.0);
        h.send(InputEvent::PointerDown {
            pos: pos2(400.0, 400.0),
        });
        h.send(InputEvent::PointerMove {
            pos: pos2(390.0, 420.0),
        });
        assert_eq!(h.view.pan, Vec2::new(-310.0, 40.0));
    }

    #[test]
    fn move_without_press_is_ignored() {
        let mut h = Harness::new();
        assert!(!h.send(InputEvent::PointerMove {
            pos: pos2(10.0, 10.0)
        }));
        assert!(!h.send(InputEvent::PointerUp));
        assert_eq!(h.view.pan, Vec2::ZERO);
    }

    #[test]
    fn single_touch_drags() {
        let mut h = Harness::new();
        h.send(InputEvent::TouchStart {
            pos: pos2(10.0, 10.0),
            touches: 1,
        });
        h.send(InputEvent::TouchMove {
            pos: pos2(30.0, 5.0),
            touches: 1,
        });
        h.send(InputEvent::TouchEnd);
        assert_eq!(h.view.pan, Vec2::new(20.0, -5.0));
    }

    #[test]
    fn multi_touch_is_ignored() {
        let mut h = Harness::new();
        assert!(!h.send(InputEvent::TouchStart {
            pos: pos2(10.0, 10.0),
            touches: 2,
        }));
        assert!(!h.send(InputEvent::TouchMove {
            pos: pos2(80.0, 80.0),
            touches: 2,
        }));
        assert_eq!(h.view.pan, Vec2::ZERO);
        assert_eq!(h.view.scale, 1.0);
    }

    #[test]
    fn plain_wheel_pans_against_scroll_direction() {
        let mut h = Harness::new();
        h.send(InputEvent::Wheel {
            delta: Vec2::new(10.0, 100.0),
            pointer: pos2(0.0, 0.0),
            modifiers: Modifiers::NONE,
        });
        assert_eq!(h.view.pan, Vec2::new(-15.0, -150.0));
        assert_eq!(h.view.scale, 1.0);
    }

    #[test]
    fn command_wheel_zooms_about_pointer() {
        let mut h = Harness::new();
        h.send(InputEvent::Wheel {
            delta: Vec2::new(0.0, -100.0),
            pointer: pos2(200.0, 100.0),
            modifiers: Modifiers::CTRL,
        });
        assert!((h.view.scale - 1.1).abs() < 1e-5);
        assert!((h.view.pan.x - -20.0).abs() < 1e-3);
        assert!((h.view.pan.y - -10.0).abs() < 1e-3);

        h.send(InputEvent::Wheel {
            delta: Vec2::new(0.0, 100.0),
            pointer: pos2(200.0, 100.0),
            modifiers: Modifiers {
                ctrl: false,
                meta: true,
            },
        });
        assert!((h.view.scale - 0.99).abs() < 1e-5);
    }

    #[test]
    fn arrow_keys_pan_by_fixed_step() {
        let mut h = Harness::new();
        for key in [Key::ArrowLeft, Key::ArrowLeft, Key::ArrowUp, Key::ArrowRight] {
            h.send(InputEvent::Key {
                key,
                modifiers: Modifiers::NONE,
            });
        }
        assert_eq!(h.view.pan, Vec2::new(100.0, 100.0));

        h.send(InputEvent::Key {
            key: Key::ArrowDown,
            modifiers: Modifiers::NONE,
        });
        assert_eq!(h.view.pan, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn command_plus_minus_step_scale() {
        let mut h = Harness::new();
        assert!(!h.send(InputEvent::Key {
            key: Key::Plus,
            modifiers: Modifiers::NONE,
        }));
        assert_eq!(h.view.scale, 1.0);

        h.send(InputEvent::Key {
            key: Key::Plus,
            modifiers: Modifiers::CTRL,
        });
        assert!((h.view.scale - 1.1).abs() < 1e-5);

        for _ in 0..30 {
            h.send(InputEvent::Key {
                key: Key::Minus,
                modifiers: Modifiers::CTRL,
            });
        }
        assert_eq!(h.view.scale, h.view.min_scale());
    }

    #[test]
    fn keyboard_zoom_cancels_animation() {
        let mut h = Harness::new();
        let target = Vec2::new(-500.0, -300.0);
        h.motion.animate_to(&mut h.view, target, Duration::from_millis(800));
        h.send(InputEvent::Key {
            key: Key::Plus,
            modifiers: Modifiers::CTRL,
        });
        assert_eq!(h.motion.phase(), &Phase::Idle);
        assert!((h.view.scale - 1.1).abs() < 1e-5);
    }

    #[test]
    fn arrow_keys_leave_animation_running() {
        let mut h = Harness::new();
        let target = Vec2::new(-500.0, -300.0);
        h.motion.animate_to(&mut h.view, target, Duration::from_millis(800));
        h.send(InputEvent::Key {
            key: Key::ArrowUp,
            modifiers: Modifiers::NONE,
        });
        assert!(matches!(h.motion.phase(), Phase::Animating(_)));
    }
}

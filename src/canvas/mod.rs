//! The infinite canvas: sections on a fixed plane, viewed through a
//! pannable, zoomable window.

pub mod input;
pub mod layout;
pub mod minimap;
pub mod motion;
pub mod view;

use crate::Section;
use crate::config::CanvasConfig;
use eframe::egui::{self, Pos2, Rect, Vec2};
use input::{InputEvent, InputTarget};
use layout::Layout;
use minimap::{MinimapHit, Transform};
use motion::{Motion, Tick};
use std::time::Duration;
use view::ViewState;

/// Something that can schedule another frame.
pub trait FrameScheduler {
    fn request_frame(&self);
}

impl FrameScheduler for egui::Context {
    fn request_frame(&self) {
        self.request_repaint();
    }
}

/// Owns the view state, the motion state machine and the section layout.
/// Navigation and minimap UI drive the canvas through its methods.
pub struct Canvas {
    config: CanvasConfig,
    view: ViewState,
    motion: Motion,
    layout: Layout,
    viewport: Vec2,
}

impl Canvas {
    pub fn new(config: CanvasConfig, sections: &[Section]) -> Self {
        let view = ViewState::new(&config);
        let motion = Motion::new(config.velocity_threshold);
        Self {
            view,
            motion,
            layout: Layout::new(sections),
            viewport: Vec2::ZERO,
            config,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Replaces the section layout, keeping the current view.
    pub fn set_sections(&mut self, sections: &[Section]) {
        self.layout = Layout::new(sections);
    }

    /// Records the size of the window the canvas is shown in.
    pub fn set_viewport(&mut self, size: Vec2) {
        self.viewport = size;
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        InputTarget {
            view: &mut self.view,
            motion: &mut self.motion,
            config: &self.config,
            viewport: self.viewport,
        }
        .handle(event)
    }

    /// Advances momentum or animation and asks for another frame if needed.
    pub fn frame(&mut self, now: Duration, scheduler: &impl FrameScheduler) -> Tick {
        let tick = self.motion.tick(&mut self.view, now);
        if tick == Tick::Continue {
            scheduler.request_frame();
        }
        tick
    }

    pub fn transform(&self) -> Transform {
        Transform::from_view(&self.view)
    }

    /// Viewport indicator rectangle relative to the minimap's top-left.
    pub fn minimap_indicator(&self, minimap: Vec2) -> Rect {
        minimap::viewport_indicator(&self.view, self.viewport, minimap)
    }

    /// Zooms one step in, about the viewport center.
    pub fn zoom_in(&mut self) {
        self.zoom_step(self.config.key_zoom_step);
    }

    /// Zooms one step out, about the viewport center.
    pub fn zoom_out(&mut self) {
        self.zoom_step(-self.config.key_zoom_step);
    }

    fn zoom_step(&mut self, step: f32) {
        let factor = (self.view.scale + step) / self.view.scale;
        let center = (self.viewport * 0.5).to_pos2();
        self.motion.cancel_animation();
        self.view.zoom_by(factor, center, self.viewport);
    }

    pub fn reset(&mut self) {
        self.motion.stop(&mut self.view);
        self.view.reset();
    }

    /// Starts an animated transition that centers the section in the window.
    ///
    /// Returns `false` (and leaves the view alone) if no section matches.
    pub fn navigate_to_section(&mut self, section_id: &str) -> bool {
        let Some(section) = self.layout.find(section_id) else {
            log::debug!("navigate_to_section: no section matches '{section_id}'");
            return false;
        };

        let target = self.pan_centering_plane(section.rect.center());
        let duration = Duration::from_millis(self.config.navigate_duration_ms);
        log::debug!("Navigating to '{}' (pan {:?})", section.id, target);
        self.motion.animate_to(&mut self.view, target, duration);
        true
    }

    /// Handles a click on the minimap at `click` (relative to its top-left).
    ///
    /// Markers navigate with animation; anywhere else jumps immediately.
    pub fn minimap_click(&mut self, click: Pos2, minimap: Vec2, marker_radius: f32) {
        match minimap::hit_test(&self.layout, click, minimap, marker_radius) {
            MinimapHit::Marker(id) => {
                self.navigate_to_section(&id);
            }
            MinimapHit::Background(normalized) => {
                self.motion.stop(&mut self.view);
                self.view.pan = minimap::pan_centering(normalized, self.view.scale, self.viewport);
            }
        }
    }

    fn pan_centering_plane(&self, plane_point: Pos2) -> Vec2 {
        self.viewport * 0.5 - plane_point.to_vec2() * self.view.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_sections;
    use eframe::egui::pos2;
    use motion::Phase;
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingScheduler {
        requests: Cell<usize>,
    }

    impl FrameScheduler for CountingScheduler {
        fn request_frame(&self) {
            self.requests.set(self.requests.get() + 1);
        }
    }

    fn canvas() -> Canvas {
        let mut canvas = Canvas::new(CanvasConfig::default(), &default_sections());
        canvas.set_viewport(Vec2::new(1600.0, 900.0));
        canvas
    }

    fn run_until_settled(canvas: &mut Canvas, scheduler: &CountingScheduler) {
        let mut t = Duration::ZERO;
        while canvas.frame(t, scheduler) == Tick::Continue {
            t += Duration::from_millis(16);
            assert!(t < Duration::from_secs(10), "never settled");
        }
    }

    #[test]
    fn navigation_centers_section() {
        let mut canvas = canvas();
        let scheduler = CountingScheduler::default();
        assert!(canvas.navigate_to_section("Projects"));
        run_until_settled(&mut canvas, &scheduler);

        let projects = canvas.layout().find("projects").unwrap().rect;
        let screen = canvas.transform().apply(projects.center());
        assert!((screen.x - 800.0).abs() < 1e-2);
        assert!((screen.y - 450.0).abs() < 1e-2);
        assert!(scheduler.requests.get() > 0);
        assert_eq!(canvas.motion().phase(), &Phase::Idle);
    }

    #[test]
    fn unknown_section_is_a_no_op() {
        let mut canvas = canvas();
        let before = canvas.view().clone();
        assert!(!canvas.navigate_to_section("blog"));
        assert_eq!(canvas.view(), &before);
        assert_eq!(canvas.motion().phase(), &Phase::Idle);
    }

    #[test]
    fn settled_canvas_requests_no_frames() {
        let mut canvas = canvas();
        let scheduler = CountingScheduler::default();
        assert_eq!(canvas.frame(Duration::ZERO, &scheduler), Tick::Settled);
        assert_eq!(scheduler.requests.get(), 0);
    }

    #[test]
    fn zoom_buttons_step_about_center() {
        let mut canvas = canvas();
        let center = pos2(800.0, 450.0);
        let plane_center = canvas.view().screen_to_plane(center);

        canvas.zoom_in();
        assert!((canvas.view().scale - 1.1).abs() < 1e-5);
        let after = canvas.view().plane_to_screen(plane_center);
        assert!((after - center).length() < 1e-2);

        canvas.zoom_out();
        canvas.zoom_out();
        assert!((canvas.view().scale - 0.9).abs() < 1e-5);
    }

    #[test]
    fn reset_cancels_animation() {
        let mut canvas = canvas();
        let scheduler = CountingScheduler::default();
        canvas.navigate_to_section("contact");
        canvas.frame(Duration::ZERO, &scheduler);
        canvas.frame(Duration::from_millis(300), &scheduler);
        canvas.reset();

        assert_eq!(canvas.motion().phase(), &Phase::Idle);
        assert_eq!(canvas.view().pan, Vec2::ZERO);
        assert_eq!(canvas.view().scale, 1.0);
    }

    #[test]
    fn minimap_background_click_jumps_without_animation() {
        let mut canvas = canvas();
        canvas.minimap_click(pos2(100.0, 10.0), minimap::minimap_size(200.0), 6.0);

        assert_eq!(canvas.motion().phase(), &Phase::Idle);
        let screen = canvas.transform().apply(pos2(2000.0, 200.0));
        assert!((screen - pos2(800.0, 450.0)).length() < 1e-2);
    }

    #[test]
    fn minimap_marker_click_animates() {
        let mut canvas = canvas();
        let minimap = minimap::minimap_size(200.0);
        let about = canvas.layout().find("about").unwrap().rect.center();
        let marker = minimap::marker_position(about, minimap);

        canvas.minimap_click(marker, minimap, 6.0);
        assert!(matches!(canvas.motion().phase(), Phase::Animating(_)));
    }

    #[test]
    fn zoom_during_navigation_cancels_it() {
        let mut canvas = canvas();
        let scheduler = CountingScheduler::default();
        canvas.navigate_to_section("projects");
        canvas.frame(Duration::ZERO, &scheduler);
        canvas.frame(Duration::from_millis(200), &scheduler);

        canvas.handle_input(&InputEvent::Wheel {
            delta: Vec2::new(0.0, -100.0),
            pointer: pos2(800.0, 450.0),
            modifiers: input::Modifiers::CTRL,
        });
        assert_eq!(canvas.motion().phase(), &Phase::Idle);

        let pan = canvas.view().pan;
        assert_eq!(canvas.frame(Duration::from_millis(900), &scheduler), Tick::Settled);
        assert_eq!(canvas.view().pan, pan);
    }

    #[test]
    fn zoom_button_during_navigation_cancels_it() {
        let mut canvas = canvas();
        let scheduler = CountingScheduler::default();
        canvas.navigate_to_section("contact");
        canvas.frame(Duration::ZERO, &scheduler);
        canvas.zoom_in();
        assert_eq!(canvas.motion().phase(), &Phase::Idle);
    }

    #[test]
    fn drag_interrupts_navigation() {
        let mut canvas = canvas();
        let scheduler = CountingScheduler::default();
        canvas.navigate_to_section("education");
        canvas.frame(Duration::ZERO, &scheduler);
        canvas.handle_input(&InputEvent::PointerDown {
            pos: pos2(5.0, 5.0),
        });
        assert_eq!(canvas.motion().phase(), &Phase::Dragging);
        assert_eq!(canvas.frame(Duration::from_millis(900), &scheduler), Tick::Settled);
    }
}

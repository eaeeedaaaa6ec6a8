#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod assets;
mod colors;
mod constants;
mod minimap;
mod sections;
mod ui;

use assets::{LiveContent, load_content};
use clap::Parser;
use eframe::egui;
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use portfolio_canvas::SiteContent;
use portfolio_canvas::canvas::Canvas;
use portfolio_canvas::cms::CmsConfig;
use portfolio_canvas::config::Config;
use portfolio_canvas::content::{Fragment, fragments};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Portfolio shown as a pannable, zoomable canvas")]
struct Args {
    /// Path to a RON config file (defaults to the per-user config file)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fetch content from the CMS at startup instead of only using the
    /// embedded snapshot
    #[arg(long)]
    live: bool,
}

/// Main application state for the portfolio viewer.
pub struct PortfolioApp {
    content: SiteContent,
    cms: CmsConfig,
    canvas: Canvas,
    /// Render fragments per section, in layout order
    fragments: Vec<Vec<Fragment>>,
    live_content: Option<LiveContent>,
    toasts: Toasts,
}

impl PortfolioApp {
    fn new(cc: &eframe::CreationContext<'_>, config: Config, live: bool) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);
        // Ctrl +/- drives the canvas scale, not the UI zoom
        cc.egui_ctx.options_mut(|o| o.zoom_with_keyboard = false);

        let mut toasts = Toasts::new()
            .anchor(egui::Align2::RIGHT_TOP, (-10.0, 10.0))
            .direction(egui::Direction::TopDown);

        let content = match load_content() {
            Ok(content) => content,
            Err(err) => {
                log::error!("{err}");
                toasts.add(error_toast(err.to_string()));
                SiteContent::default()
            }
        };

        let live_content = if !live {
            None
        } else if config.cms.is_configured() {
            LiveContent::spawn(cc.egui_ctx.clone(), config.cms.clone())
        } else {
            log::warn!("--live given but no CMS project id is configured");
            None
        };

        let canvas = Canvas::new(config.canvas, &content.sections);
        let mut app = Self {
            content,
            cms: config.cms,
            canvas,
            fragments: Vec::new(),
            live_content,
            toasts,
        };
        app.rebuild_fragments();
        app
    }

    fn rebuild_fragments(&mut self) {
        self.fragments = self
            .content
            .sections
            .iter()
            .map(|section| fragments(section, &self.content, &self.cms))
            .collect();
    }

    /// Swaps in content fetched from the CMS once it arrives.
    fn poll_live_content(&mut self) {
        let Some(live) = &mut self.live_content else {
            return;
        };
        let Some(mut fetched) = live.poll() else {
            return;
        };
        self.live_content = None;

        // The layout is authored locally; only records come from the CMS.
        fetched.sections = std::mem::take(&mut self.content.sections);
        self.content = fetched;
        self.canvas.set_sections(&self.content.sections);
        self.rebuild_fragments();
    }
}

fn error_toast(text: String) -> Toast {
    Toast {
        kind: ToastKind::Error,
        text: text.into(),
        options: ToastOptions::default()
            .duration_in_seconds(10.0)
            .show_icon(true),
        ..Default::default()
    }
}

impl eframe::App for PortfolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_live_content();
        self.handle_keyboard_input(ctx);

        self.show_status_bar(ctx);
        self.show_sidebar(ctx);
        self.show_central_panel(ctx);

        self.toasts.show(ctx);
    }
}

fn main() -> eframe::Result {
    env_logger::init();

    let args = Args::parse();
    let config = Config::load_or_default(args.config.as_deref());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 720.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Portfolio",
        options,
        Box::new(move |cc| Ok(Box::new(PortfolioApp::new(cc, config, args.live)))),
    )
}

//! Color constants for the canvas, section cards and minimap.

use eframe::egui::Color32;

// Canvas
pub const CANVAS_BACKGROUND: Color32 = Color32::from_rgb(18, 18, 24);
pub const PLANE_FILL: Color32 = Color32::from_rgb(26, 26, 34);
pub const GRID_LINE: Color32 = Color32::from_rgba_premultiplied(255, 255, 255, 10);

// Section cards
pub const SECTION_FILL: Color32 = Color32::from_rgb(36, 36, 48);
pub const SECTION_STROKE: Color32 = Color32::from_rgb(88, 101, 242);
pub const HEADING_TEXT: Color32 = Color32::WHITE;
pub const BODY_TEXT: Color32 = Color32::from_rgba_premultiplied(220, 220, 230, 230);
pub const MUTED_TEXT: Color32 = Color32::from_rgba_premultiplied(160, 160, 175, 200);
pub const LINK_TEXT: Color32 = Color32::from_rgb(130, 170, 255);
pub const TAG_FILL: Color32 = Color32::from_rgb(54, 58, 84);

// Minimap
pub const MINIMAP_FILL: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 180);
pub const MINIMAP_MARKER: Color32 = Color32::from_rgb(88, 101, 242);
pub const MINIMAP_VIEWPORT: Color32 = Color32::from_rgba_premultiplied(255, 255, 255, 200);

/// Width of the navigation sidebar in pixels.
pub const SIDEBAR_WIDTH: f32 = 180.0;

/// Distance between the minimap and the canvas corner.
pub const MINIMAP_MARGIN: f32 = 12.0;

/// Radius of a section marker on the minimap (also its click radius).
pub const MINIMAP_MARKER_RADIUS: f32 = 5.0;

/// Base font size of section headings at scale 1.0.
pub const HEADING_SIZE: f32 = 48.0;

/// Base font size of body text at scale 1.0.
pub const TEXT_SIZE: f32 = 22.0;

/// Padding inside a section card at scale 1.0.
pub const SECTION_PADDING: f32 = 40.0;

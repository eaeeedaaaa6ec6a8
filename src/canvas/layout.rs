//! Placement of sections on the fixed-size virtual plane.

use crate::{Section, SectionKind};
use eframe::egui::{Pos2, Rect, Vec2, pos2, vec2};

/// Width of the virtual plane in canvas units.
pub const PLANE_WIDTH: f32 = 4000.0;

/// Height of the virtual plane in canvas units.
pub const PLANE_HEIGHT: f32 = 3000.0;

pub const PLANE_SIZE: Vec2 = Vec2::new(PLANE_WIDTH, PLANE_HEIGHT);

/// A section resolved to absolute plane coordinates.
#[derive(Debug, Clone)]
pub struct PlacedSection {
    pub id: String,
    /// Navigation identifier derived from `id`
    pub anchor: String,
    pub title: String,
    pub kind: SectionKind,
    pub rect: Rect,
}

/// Immutable set of placed sections.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    sections: Vec<PlacedSection>,
}

/// Derives the navigation identifier for a section id or nav label:
/// lowercase alphanumeric words joined by dashes, prefixed with `section-`.
///
/// Already-prefixed ids map to themselves, so `section-about`, `About` and
/// `about` all resolve to `section-about`.
pub fn anchor_id(id: &str) -> String {
    let mut slug = String::with_capacity(id.len() + 8);
    for word in id
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
    {
        if !slug.is_empty() {
            slug.push('-');
        }
        slug.extend(word.chars().flat_map(char::to_lowercase));
    }

    match slug.strip_prefix("section-") {
        Some(_) => slug,
        None => format!("section-{slug}"),
    }
}

/// Converts percentage coordinates to an absolute plane offset.
pub fn percent_to_plane(x_percent: f32, y_percent: f32) -> Pos2 {
    pos2(
        x_percent / 100.0 * PLANE_WIDTH,
        y_percent / 100.0 * PLANE_HEIGHT,
    )
}

impl Layout {
    pub fn new(sections: &[Section]) -> Self {
        let sections = sections
            .iter()
            .map(|section| {
                let origin = percent_to_plane(section.x_percent, section.y_percent);
                let size = vec2(section.width.max(0.0), section.height.max(0.0));
                PlacedSection {
                    id: section.id.clone(),
                    anchor: anchor_id(&section.id),
                    title: section.title.clone(),
                    kind: section.kind,
                    rect: Rect::from_min_size(origin, size),
                }
            })
            .collect();
        Self { sections }
    }

    pub fn sections(&self) -> &[PlacedSection] {
        &self.sections
    }

    /// Finds a section by id, nav label or anchor identifier.
    pub fn find(&self, section_id: &str) -> Option<&PlacedSection> {
        let anchor = anchor_id(section_id);
        self.sections.iter().find(|section| section.anchor == anchor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_sections;

    #[test]
    fn anchor_ids_are_normalized() {
        assert_eq!(anchor_id("about"), "section-about");
        assert_eq!(anchor_id("About Me"), "section-about-me");
        assert_eq!(anchor_id("section-about"), "section-about");
        assert_eq!(anchor_id("  Side_Projects!! "), "section-side-projects");
    }

    #[test]
    fn percentages_map_onto_plane() {
        assert_eq!(percent_to_plane(0.0, 0.0), pos2(0.0, 0.0));
        assert_eq!(percent_to_plane(50.0, 50.0), pos2(2000.0, 1500.0));
        assert_eq!(percent_to_plane(100.0, 100.0), pos2(4000.0, 3000.0));
    }

    #[test]
    fn default_layout_fits_on_plane() {
        let layout = Layout::new(&default_sections());
        let plane = Rect::from_min_size(Pos2::ZERO, PLANE_SIZE);
        for section in layout.sections() {
            assert!(plane.contains_rect(section.rect), "{} off plane", section.id);
        }
    }

    #[test]
    fn find_resolves_labels_and_anchors() {
        let layout = Layout::new(&default_sections());
        assert_eq!(layout.find("Projects").map(|s| s.id.as_str()), Some("projects"));
        assert_eq!(layout.find("section-contact").map(|s| s.id.as_str()), Some("contact"));
        assert!(layout.find("blog").is_none());
    }
}

use serde::{Deserialize, Serialize};

pub mod canvas;
pub mod cms;
pub mod config;
pub mod content;

/// What a section on the canvas displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionKind {
    Hero,
    About,
    Projects,
    Experience,
    Education,
    Testimonials,
    Contact,
}

/// A named region laid out on the canvas plane.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Identifier used by navigation (e.g., "projects", "about")
    pub id: String,
    /// Title shown in the navigation and on the section card
    pub title: String,
    pub kind: SectionKind,
    /// Horizontal position as a percentage of the plane width
    pub x_percent: f32,
    /// Vertical position as a percentage of the plane height
    pub y_percent: f32,
    /// Width in plane units
    pub width: f32,
    /// Height in plane units
    pub height: f32,
    /// Free text for hero/about sections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// A portfolio project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub technologies: Vec<String>,
    /// CMS image asset reference (e.g., "image-abc123-1200x800-png")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

/// A work experience entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub company: String,
    pub role: String,
    /// Display period (e.g., "2021 - Present")
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub description: String,
}

/// An education entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub description: String,
}

/// A testimonial quote
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub author: String,
    #[serde(default)]
    pub role: String,
    pub quote: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// A link to a social profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

/// Contact details shown in the contact section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub socials: Vec<SocialLink>,
}

/// Everything the canvas renders: the section layout plus CMS records,
/// each record list already in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    pub sections: Vec<Section>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactInfo>,
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            sections: default_sections(),
            projects: Vec::new(),
            experience: Vec::new(),
            education: Vec::new(),
            testimonials: Vec::new(),
            contact: None,
        }
    }
}

fn section(id: &str, title: &str, kind: SectionKind, x: f32, y: f32, w: f32, h: f32) -> Section {
    Section {
        id: id.to_owned(),
        title: title.to_owned(),
        kind,
        x_percent: x,
        y_percent: y,
        width: w,
        height: h,
        body: None,
    }
}

/// The stock canvas layout used when no layout has been authored.
pub fn default_sections() -> Vec<Section> {
    vec![
        section("hero", "Hello", SectionKind::Hero, 37.5, 40.0, 1000.0, 600.0),
        section("about", "About", SectionKind::About, 5.0, 5.0, 900.0, 700.0),
        section("projects", "Projects", SectionKind::Projects, 62.5, 5.0, 1300.0, 900.0),
        section("experience", "Experience", SectionKind::Experience, 5.0, 65.0, 1000.0, 900.0),
        section("education", "Education", SectionKind::Education, 37.5, 75.0, 900.0, 600.0),
        section("testimonials", "Testimonials", SectionKind::Testimonials, 70.0, 45.0, 1000.0, 700.0),
        section("contact", "Contact", SectionKind::Contact, 72.5, 75.0, 900.0, 600.0),
    ]
}

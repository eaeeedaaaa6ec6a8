//! Maps site content records to the fragments drawn inside each section.

use crate::cms::{self, CmsConfig, ImageSize};
use crate::{Section, SectionKind, SiteContent};

/// Thumbnail rendition requested for project images.
const PROJECT_IMAGE: (u32, u32) = (480, 270);

/// Avatar rendition requested for testimonial authors.
const AVATAR_IMAGE: (u32, u32) = (96, 96);

#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Heading(String),
    Subheading(String),
    Text(String),
    Tags(Vec<String>),
    Link { label: String, url: String },
    Image { url: String, width: u32, height: u32 },
    Separator,
}

fn image(cms: &CmsConfig, reference: Option<&str>, (width, height): (u32, u32)) -> Option<Fragment> {
    let reference = reference?;
    match cms::image_url(cms, reference, ImageSize::new(width, height)) {
        Ok(url) => Some(Fragment::Image { url, width, height }),
        Err(err) => {
            log::debug!("Skipping image: {err}");
            None
        }
    }
}

fn push_text(out: &mut Vec<Fragment>, text: &str) {
    if !text.trim().is_empty() {
        out.push(Fragment::Text(text.to_owned()));
    }
}

/// Builds the fragments for `section` from `content`.
///
/// Sections whose records are missing yield just their heading (and body,
/// if any); nothing here fails.
pub fn fragments(section: &Section, content: &SiteContent, cms: &CmsConfig) -> Vec<Fragment> {
    let mut out = vec![Fragment::Heading(section.title.clone())];
    if let Some(body) = &section.body {
        push_text(&mut out, body);
    }

    match section.kind {
        SectionKind::Hero | SectionKind::About => {}
        SectionKind::Projects => {
            for (idx, project) in content.projects.iter().enumerate() {
                if idx > 0 {
                    out.push(Fragment::Separator);
                }
                out.push(Fragment::Subheading(project.title.clone()));
                out.extend(image(cms, project.image.as_deref(), PROJECT_IMAGE));
                push_text(&mut out, &project.description);
                if !project.technologies.is_empty() {
                    out.push(Fragment::Tags(project.technologies.clone()));
                }
                if let Some(url) = &project.link {
                    out.push(Fragment::Link {
                        label: "Live".to_owned(),
                        url: url.clone(),
                    });
                }
                if let Some(url) = &project.repository {
                    out.push(Fragment::Link {
                        label: "Source".to_owned(),
                        url: url.clone(),
                    });
                }
            }
        }
        SectionKind::Experience => {
            for entry in &content.experience {
                out.push(Fragment::Subheading(format!("{} · {}", entry.role, entry.company)));
                push_text(&mut out, &entry.period);
                push_text(&mut out, &entry.description);
            }
        }
        SectionKind::Education => {
            for entry in &content.education {
                out.push(Fragment::Subheading(format!(
                    "{} · {}",
                    entry.degree, entry.institution
                )));
                push_text(&mut out, &entry.period);
                push_text(&mut out, &entry.description);
            }
        }
        SectionKind::Testimonials => {
            for testimonial in &content.testimonials {
                out.extend(image(cms, testimonial.avatar.as_deref(), AVATAR_IMAGE));
                out.push(Fragment::Text(format!("“{}”", testimonial.quote)));
                let byline = if testimonial.role.is_empty() {
                    format!("- {}", testimonial.author)
                } else {
                    format!("- {}, {}", testimonial.author, testimonial.role)
                };
                out.push(Fragment::Subheading(byline));
            }
        }
        SectionKind::Contact => {
            if let Some(contact) = &content.contact {
                if !contact.email.is_empty() {
                    out.push(Fragment::Link {
                        label: contact.email.clone(),
                        url: format!("mailto:{}", contact.email),
                    });
                }
                if let Some(phone) = &contact.phone {
                    push_text(&mut out, phone);
                }
                if let Some(location) = &contact.location {
                    push_text(&mut out, location);
                }
                for social in &contact.socials {
                    out.push(Fragment::Link {
                        label: social.platform.clone(),
                        url: social.url.clone(),
                    });
                }
            }
        }
    }

    out
}

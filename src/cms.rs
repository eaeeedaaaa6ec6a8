//! Headless CMS client: GROQ queries over HTTP and image URL construction.

use crate::{ContactInfo, Education, Experience, Project, SiteContent, SocialLink, Testimonial};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

const USER_AGENT: &str = "portfolio-canvas";

const IMAGE_CDN: &str = "https://cdn.sanity.io/images";

/// Default JPEG/WebP quality for sized image URLs.
pub const DEFAULT_IMAGE_QUALITY: u8 = 80;

static IMAGE_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^image-(?<id>[A-Za-z0-9]+)-(?<w>\d+)x(?<h>\d+)-(?<fmt>[a-z0-9]+)$")
        .expect("image reference pattern is valid")
});

/// Errors that can occur when talking to the CMS.
#[derive(Error, Debug)]
pub enum CmsError {
    #[error("CMS project id is not configured")]
    NotConfigured,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("CMS returned {status} for '{content_type}'")]
    Status {
        content_type: String,
        status: reqwest::StatusCode,
    },
    #[error("CMS query for '{content_type}' failed: {message}")]
    Query {
        content_type: String,
        message: String,
    },
    #[error("malformed image reference: {0}")]
    InvalidImageRef(String),
}

/// Where the content lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    pub project_id: String,
    pub dataset: String,
    /// API version date (e.g., "2024-01-01")
    pub api_version: String,
    /// Query the edge cache instead of the live API
    pub use_cdn: bool,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: "production".to_owned(),
            api_version: "2024-01-01".to_owned(),
            use_cdn: true,
        }
    }
}

impl CmsConfig {
    pub fn is_configured(&self) -> bool {
        !self.project_id.trim().is_empty()
    }

    /// Query endpoint for this project and dataset.
    pub fn query_url(&self) -> String {
        let host = if self.use_cdn { "apicdn" } else { "api" };
        format!(
            "https://{}.{}.sanity.io/v{}/data/query/{}",
            self.project_id, host, self.api_version, self.dataset
        )
    }
}

/// GROQ query returning all documents of `content_type` in display order.
pub fn ordered_query(content_type: &str) -> String {
    format!(r#"*[_type == "{content_type}"] | order(order asc)"#)
}

// ============================================================================
// Images
// ============================================================================

/// A parsed image asset reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
}

impl ImageAsset {
    /// Parses references of the form `image-{id}-{w}x{h}-{format}`.
    pub fn parse(reference: &str) -> Result<Self, CmsError> {
        let invalid = || CmsError::InvalidImageRef(reference.to_owned());
        let caps = IMAGE_REF.captures(reference).ok_or_else(invalid)?;

        Ok(Self {
            id: caps["id"].to_owned(),
            width: caps["w"].parse().map_err(|_| invalid())?,
            height: caps["h"].parse().map_err(|_| invalid())?,
            format: caps["fmt"].to_owned(),
        })
    }
}

/// Requested rendition of an image.
#[derive(Debug, Clone, Copy)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
    pub quality: u8,
    /// Output format for the `fm` parameter
    pub format: &'static str,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            quality: DEFAULT_IMAGE_QUALITY,
            format: "webp",
        }
    }
}

/// Builds a sized CDN URL for an image asset reference.
pub fn image_url(config: &CmsConfig, reference: &str, size: ImageSize) -> Result<String, CmsError> {
    let asset = ImageAsset::parse(reference)?;
    Ok(format!(
        "{IMAGE_CDN}/{}/{}/{}-{}x{}.{}?w={}&h={}&q={}&fm={}&fit=crop",
        config.project_id,
        config.dataset,
        asset.id,
        asset.width,
        asset.height,
        asset.format,
        size.width,
        size.height,
        size.quality,
        size.format,
    ))
}

// ============================================================================
// Fetched types - match the CMS JSON
// ============================================================================

#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    #[serde(default)]
    result: Option<T>,
    #[serde(default)]
    error: Option<QueryError>,
}

#[derive(Debug, Deserialize)]
struct QueryError {
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct FetchedImage {
    asset: Option<FetchedReference>,
}

#[derive(Debug, Deserialize)]
struct FetchedReference {
    #[serde(rename = "_ref")]
    reference: String,
}

fn image_ref(image: Option<FetchedImage>) -> Option<String> {
    image.and_then(|image| image.asset).map(|asset| asset.reference)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FetchedProject {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    technologies: Option<Vec<String>>,
    #[serde(default)]
    image: Option<FetchedImage>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    github_link: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FetchedExperience {
    company: String,
    #[serde(alias = "position")]
    role: String,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FetchedEducation {
    institution: String,
    degree: String,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FetchedTestimonial {
    #[serde(alias = "name")]
    author: String,
    #[serde(default)]
    role: Option<String>,
    quote: String,
    #[serde(default)]
    image: Option<FetchedImage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FetchedContactInfo {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    social_links: Option<Vec<FetchedSocialLink>>,
}

#[derive(Debug, Deserialize)]
struct FetchedSocialLink {
    platform: String,
    url: String,
}

/// "2021 - Present" style period from optional start/end dates (year kept).
fn period(start: Option<&str>, end: Option<&str>) -> String {
    let year = |date: &str| date.split('-').next().unwrap_or(date).to_owned();
    match (start, end) {
        (Some(start), Some(end)) => format!("{} - {}", year(start), year(end)),
        (Some(start), None) => format!("{} - Present", year(start)),
        (None, Some(end)) => year(end),
        (None, None) => String::new(),
    }
}

impl From<FetchedProject> for Project {
    fn from(fetched: FetchedProject) -> Self {
        Self {
            title: fetched.title,
            description: fetched.description.unwrap_or_default(),
            technologies: fetched.technologies.unwrap_or_default(),
            image: image_ref(fetched.image),
            link: fetched.link,
            repository: fetched.github_link,
        }
    }
}

impl From<FetchedExperience> for Experience {
    fn from(fetched: FetchedExperience) -> Self {
        Self {
            period: period(fetched.start_date.as_deref(), fetched.end_date.as_deref()),
            company: fetched.company,
            role: fetched.role,
            description: fetched.description.unwrap_or_default(),
        }
    }
}

impl From<FetchedEducation> for Education {
    fn from(fetched: FetchedEducation) -> Self {
        Self {
            period: period(fetched.start_date.as_deref(), fetched.end_date.as_deref()),
            institution: fetched.institution,
            degree: fetched.degree,
            description: fetched.description.unwrap_or_default(),
        }
    }
}

impl From<FetchedTestimonial> for Testimonial {
    fn from(fetched: FetchedTestimonial) -> Self {
        Self {
            author: fetched.author,
            role: fetched.role.unwrap_or_default(),
            quote: fetched.quote,
            avatar: image_ref(fetched.image),
        }
    }
}

impl From<FetchedContactInfo> for ContactInfo {
    fn from(fetched: FetchedContactInfo) -> Self {
        Self {
            email: fetched.email.unwrap_or_default(),
            phone: fetched.phone,
            location: fetched.location,
            socials: fetched
                .social_links
                .unwrap_or_default()
                .into_iter()
                .map(|link| SocialLink {
                    platform: link.platform,
                    url: link.url,
                })
                .collect(),
        }
    }
}

// ============================================================================
// Client
// ============================================================================

/// Content types in the order they are fetched.
pub const CONTENT_TYPES: [&str; 5] = [
    "project",
    "experience",
    "education",
    "testimonial",
    "contactInfo",
];

pub struct CmsClient {
    http: reqwest::Client,
    config: CmsConfig,
}

impl CmsClient {
    pub fn new(config: CmsConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    async fn query<T: DeserializeOwned>(&self, content_type: &str) -> Result<Vec<T>, CmsError> {
        if !self.config.is_configured() {
            return Err(CmsError::NotConfigured);
        }

        let response = self
            .http
            .get(self.config.query_url())
            .query(&[("query", ordered_query(content_type))])
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CmsError::Status {
                content_type: content_type.to_owned(),
                status: response.status(),
            });
        }

        let body: QueryResponse<Vec<T>> = response.json().await?;
        decode_response(content_type, body)
    }

    pub async fn projects(&self) -> Result<Vec<Project>, CmsError> {
        let fetched: Vec<FetchedProject> = self.query("project").await?;
        Ok(fetched.into_iter().map(Project::from).collect())
    }

    pub async fn experience(&self) -> Result<Vec<Experience>, CmsError> {
        let fetched: Vec<FetchedExperience> = self.query("experience").await?;
        Ok(fetched.into_iter().map(Experience::from).collect())
    }

    pub async fn education(&self) -> Result<Vec<Education>, CmsError> {
        let fetched: Vec<FetchedEducation> = self.query("education").await?;
        Ok(fetched.into_iter().map(Education::from).collect())
    }

    pub async fn testimonials(&self) -> Result<Vec<Testimonial>, CmsError> {
        let fetched: Vec<FetchedTestimonial> = self.query("testimonial").await?;
        Ok(fetched.into_iter().map(Testimonial::from).collect())
    }

    pub async fn contact(&self) -> Result<Option<ContactInfo>, CmsError> {
        let fetched: Vec<FetchedContactInfo> = self.query("contactInfo").await?;
        Ok(fetched.into_iter().next().map(ContactInfo::from))
    }

    /// Fetches every content type. Each failure is logged and replaced by
    /// an empty result, so this never fails.
    pub async fn fetch_site_content(&self) -> SiteContent {
        SiteContent {
            projects: or_empty("project", self.projects().await),
            experience: or_empty("experience", self.experience().await),
            education: or_empty("education", self.education().await),
            testimonials: or_empty("testimonial", self.testimonials().await),
            contact: or_empty("contactInfo", self.contact().await),
            ..SiteContent::default()
        }
    }
}

fn decode_response<T>(content_type: &str, body: QueryResponse<Vec<T>>) -> Result<Vec<T>, CmsError> {
    if let Some(error) = body.error {
        return Err(CmsError::Query {
            content_type: content_type.to_owned(),
            message: error.description,
        });
    }
    Ok(body.result.unwrap_or_default())
}

fn or_empty<T: Default>(content_type: &str, result: Result<T, CmsError>) -> T {
    result.unwrap_or_else(|err| {
        log::error!("Failed to fetch {content_type}: {err}");
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CmsConfig {
        CmsConfig {
            project_id: "abc123".to_owned(),
            ..CmsConfig::default()
        }
    }

    #[test]
    fn query_url_switches_host_on_cdn() {
        let mut config = config();
        assert_eq!(
            config.query_url(),
            "https://abc123.apicdn.sanity.io/v2024-01-01/data/query/production"
        );
        config.use_cdn = false;
        assert!(config.query_url().starts_with("https://abc123.api.sanity.io/"));
    }

    #[test]
    fn ordered_query_filters_by_type() {
        assert_eq!(
            ordered_query("project"),
            r#"*[_type == "project"] | order(order asc)"#
        );
    }

    #[test]
    fn image_url_includes_size_quality_and_format() {
        let url = image_url(
            &config(),
            "image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg",
            ImageSize::new(800, 600),
        )
        .unwrap();
        assert_eq!(
            url,
            "https://cdn.sanity.io/images/abc123/production/\
             Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000.jpg?w=800&h=600&q=80&fm=webp&fit=crop"
        );
    }

    #[test]
    fn malformed_image_reference_is_rejected() {
        for reference in ["", "file-abc-pdf", "image-abc-20x-png", "image-abc-20x30"] {
            let err = image_url(&config(), reference, ImageSize::new(10, 10)).unwrap_err();
            assert!(matches!(err, CmsError::InvalidImageRef(_)), "{reference}");
        }
    }

    #[test]
    fn project_json_converts_to_record() {
        let json = r#"{
            "_id": "p1",
            "title": "Canvas",
            "description": "Infinite canvas portfolio",
            "technologies": ["Rust", "egui"],
            "image": { "asset": { "_ref": "image-a1-10x10-png" } },
            "githubLink": "https://github.com/example/canvas",
            "order": 1
        }"#;
        let project = Project::from(serde_json::from_str::<FetchedProject>(json).unwrap());

        assert_eq!(project.title, "Canvas");
        assert_eq!(project.technologies, ["Rust", "egui"]);
        assert_eq!(project.image.as_deref(), Some("image-a1-10x10-png"));
        assert_eq!(project.repository.as_deref(), Some("https://github.com/example/canvas"));
        assert!(project.link.is_none());
    }

    #[test]
    fn experience_period_is_derived_from_dates() {
        let json = r#"{ "company": "Acme", "position": "Engineer", "startDate": "2021-03-01" }"#;
        let experience = Experience::from(serde_json::from_str::<FetchedExperience>(json).unwrap());
        assert_eq!(experience.role, "Engineer");
        assert_eq!(experience.period, "2021 - Present");

        assert_eq!(period(Some("2015-09-01"), Some("2019-06-30")), "2015 - 2019");
        assert_eq!(period(None, None), "");
    }

    #[test]
    fn query_error_body_is_reported() {
        let body: QueryResponse<Vec<FetchedProject>> = serde_json::from_str(
            r#"{ "error": { "description": "expected ']'" } }"#,
        )
        .unwrap();
        let err = decode_response("project", body).unwrap_err();
        assert!(matches!(err, CmsError::Query { .. }));
    }

    #[test]
    fn missing_result_is_empty() {
        let body: QueryResponse<Vec<FetchedProject>> =
            serde_json::from_str(r#"{ "ms": 3 }"#).unwrap();
        assert!(decode_response("project", body).unwrap().is_empty());
    }

    #[test]
    fn failures_resolve_to_empty() {
        let projects: Vec<Project> = or_empty("project", Err(CmsError::NotConfigured));
        assert!(projects.is_empty());
    }

    #[tokio::test]
    async fn unconfigured_client_yields_empty_content() {
        let client = CmsClient::new(CmsConfig::default());
        let content = client.fetch_site_content().await;
        assert!(content.projects.is_empty());
        assert!(content.contact.is_none());
        assert!(!content.sections.is_empty());
    }
}

use clap::Parser;
use color_eyre::eyre::WrapErr;
use indicatif::{ProgressBar, ProgressStyle};
use portfolio_canvas::cms::{CONTENT_TYPES, CmsClient};
use portfolio_canvas::config::Config;
use portfolio_canvas::{Section, SiteContent, default_sections};
use ron::ser::PrettyConfig;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const CONTENT_RON_PATH: &str = "assets/content.ron";

#[derive(Parser, Debug)]
#[command(about = "Fetch portfolio content from the CMS into assets/content.ron")]
struct Args {
    /// Path to a RON config file (defaults to the per-user config file)
    #[arg(long)]
    config: Option<PathBuf>,

    /// CMS project id, overriding the config file
    #[arg(long)]
    project_id: Option<String>,

    /// CMS dataset, overriding the config file
    #[arg(long)]
    dataset: Option<String>,

    /// Query the live API instead of the CDN
    #[arg(long)]
    no_cdn: bool,
}

fn repo_path(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(path)
}

/// Keeps the currently authored section layout.
///
/// Only a missing snapshot falls back to the default layout; an unreadable
/// or malformed one is an error so it is never overwritten.
fn existing_sections(path: &Path) -> color_eyre::Result<Vec<Section>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::info!("{} not found; using default sections", path.display());
            return Ok(default_sections());
        }
        Err(err) => {
            return Err(err).wrap_err_with(|| format!("failed to read {}", path.display()));
        }
    };

    let content: SiteContent = ron::from_str(&text)
        .wrap_err_with(|| format!("failed to parse {}", path.display()))?;
    if content.sections.is_empty() {
        return Ok(default_sections());
    }
    Ok(content.sections)
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let args = Args::parse();
    let mut cms = Config::load_or_default(args.config.as_deref()).cms;
    if let Some(project_id) = args.project_id {
        cms.project_id = project_id;
    }
    if let Some(dataset) = args.dataset {
        cms.dataset = dataset;
    }
    if args.no_cdn {
        cms.use_cdn = false;
    }

    if !cms.is_configured() {
        return Err(color_eyre::eyre::eyre!(
            "No CMS project id configured; pass --project-id or set cms.project_id"
        ));
    }

    let output_path = repo_path(CONTENT_RON_PATH);
    let sections = existing_sections(&output_path)?;

    println!("Fetching content from {}...", cms.query_url());
    let client = CmsClient::new(cms);

    let progress = ProgressBar::new(CONTENT_TYPES.len() as u64);
    progress.set_style(ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")?);

    progress.set_message("project");
    let projects = client.projects().await?;
    progress.inc(1);

    progress.set_message("experience");
    let experience = client.experience().await?;
    progress.inc(1);

    progress.set_message("education");
    let education = client.education().await?;
    progress.inc(1);

    progress.set_message("testimonial");
    let testimonials = client.testimonials().await?;
    progress.inc(1);

    progress.set_message("contactInfo");
    let contact = client.contact().await?;
    progress.inc(1);
    progress.finish_with_message("done");

    let content = SiteContent {
        sections,
        projects,
        experience,
        education,
        testimonials,
        contact,
    };

    println!(
        "Fetched {} projects, {} experience entries, {} education entries, {} testimonials{}",
        content.projects.len(),
        content.experience.len(),
        content.education.len(),
        content.testimonials.len(),
        if content.contact.is_some() {
            ", contact info"
        } else {
            ""
        }
    );

    // Serialize to RON with pretty formatting
    let pretty_config = PrettyConfig::new()
        .depth_limit(10)
        .indentor("  ".to_string())
        .struct_names(true)
        .enumerate_arrays(false);

    let ron_string = ron::ser::to_string_pretty(&content, pretty_config)?;
    println!("Serialized to {} bytes of RON", ron_string.len());

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_path, &ron_string)?;
    println!("Wrote content to {}", output_path.display());

    Ok(())
}

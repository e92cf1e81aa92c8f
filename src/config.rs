//! Site configuration module.
//!
//! Handles loading and validating the YAML configuration that drives a build.
//! The config names the TOM instance to pull target details from and lists
//! the targets to build pages for.
//!
//! ## Config File Format
//!
//! ```yaml
//! tom_education_url: https://tom.example.org
//! targets:
//!   - pk: 100                      # Primary key in the TOM database
//!     template_name: asteroid.html # Template for this target's page
//!     preview_image: previews/didymos.jpg
//!     teaser: "Visible in the northern sky until March"
//!   - pk: 101
//!     template_name: asteroid.html
//!     preview_image: previews/apophis.png
//!     # teaser is optional and defaults to empty
//! ```
//!
//! Both `tom_education_url` and `targets` are required; an empty target list
//! is allowed. Unknown keys are rejected to catch typos early.
//!
//! ## Base URL Normalization
//!
//! A single trailing `/` is stripped from `tom_education_url` at parse time
//! so that API paths (which always start with `/`) can be appended without
//! producing a double slash. The site's JavaScript client relies on the same
//! convention. Normalization is idempotent.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Invalid(#[from] serde_yaml::Error),
}

/// Build configuration loaded from a YAML file.
///
/// Constructed once at process start via [`Config::parse`] and immutable
/// thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the TOM instance, stored without a trailing slash.
    pub tom_education_url: String,
    /// Targets to build pages for, in page order.
    pub targets: Vec<Target>,
}

/// A single astronomical target tracked by the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Target {
    /// Primary key of the target in the TOM database. Relied upon to be
    /// unique within a config: preview images are named after it.
    pub pk: u32,
    /// Name of the template used to render this target's page.
    pub template_name: String,
    /// Local path to the target's preview image.
    pub preview_image: PathBuf,
    /// Short blurb shown under the target on the home page.
    #[serde(default)]
    pub teaser: String,
}

impl Config {
    /// Read and parse the YAML config at `path`.
    ///
    /// Missing required keys or target entries of the wrong shape fail with
    /// [`ConfigError::Invalid`]. The base URL is normalized before the config
    /// is returned.
    pub fn parse(path: &Path) -> Result<Config, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&raw)?;
        config.tom_education_url = normalize_base_url(config.tom_education_url);
        Ok(config)
    }

    /// The normalized base URL of the TOM instance.
    pub fn base_url(&self) -> &str {
        &self.tom_education_url
    }
}

impl Target {
    /// Filename of this target's preview image in the generated site.
    ///
    /// The primary key becomes the base name and the source file's extension
    /// is preserved: `pk=42`, `preview_image="a/b.jpg"` → `"42.jpg"`. An
    /// extensionless source yields just `"42"`.
    pub fn preview_image_output_name(&self) -> String {
        match self.preview_image.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}.{}", self.pk, ext),
            None => self.pk.to_string(),
        }
    }
}

/// Strip exactly one trailing `/` if present. Idempotent.
fn normalize_base_url(url: String) -> String {
    match url.strip_suffix('/') {
        Some(stripped) => stripped.to_string(),
        None => url,
    }
}

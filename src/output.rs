//! CLI output formatting.
//!
//! Each command has a `format_*` function returning `Vec<String>` for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! ```text
//! target_1 → target_1/index.html
//! target_2 → target_2/index.html
//! Home → index.html
//! Copied static assets and 2 preview images
//! Site generated at dist
//! ```

use std::path::Path;

use crate::config::{Config, Target};
use crate::pages::Page;

/// Format the per-page lines and summary for a completed build.
pub fn format_build_output(pages: &[Page], targets: &[Target], outdir: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    for page in pages {
        if page.name.is_empty() {
            lines.push("Home → index.html".to_string());
        } else {
            lines.push(format!("{} → {}/index.html", page.name, page.name));
        }
    }
    let plural = if targets.len() == 1 { "" } else { "s" };
    lines.push(format!(
        "Copied static assets and {} preview image{}",
        targets.len(),
        plural
    ));
    lines.push(format!("Site generated at {}", outdir.display()));
    lines
}

pub fn print_build_output(pages: &[Page], targets: &[Target], outdir: &Path) {
    for line in format_build_output(pages, targets, outdir) {
        println!("{line}");
    }
}

/// Format the target inventory for `check`.
pub fn format_check_output(config: &Config) -> Vec<String> {
    let mut lines = vec![format!("TOM instance: {}", config.base_url())];
    for (idx, target) in config.targets.iter().enumerate() {
        lines.push(format!(
            "{:0>3} pk={} template={} preview={}",
            idx + 1,
            target.pk,
            target.template_name,
            target.preview_image.display()
        ));
    }
    lines.push(format!(
        "Config is valid ({} target{})",
        config.targets.len(),
        if config.targets.len() == 1 { "" } else { "s" }
    ));
    lines
}

pub fn print_check_output(config: &Config) {
    for line in format_check_output(config) {
        println!("{line}");
    }
}

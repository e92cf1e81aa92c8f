//! Site materialization.
//!
//! Final stage of the build pipeline. Takes the assembled page descriptors
//! and writes the finished site to the output directory.
//!
//! ## Output Structure
//!
//! ```text
//! outdir/
//! ├── index.html                 # Home page
//! ├── 2019-ABC/
//! │   └── index.html             # One directory per target identifier
//! ├── 65803-didymos/
//! │   └── index.html
//! └── static/
//!     ├── css/...                # Copied from the static source dir
//!     ├── js/asteroid.js
//!     └── previews/
//!         ├── 100.jpg            # Preview images, named by target pk
//!         └── 101.png
//! ```
//!
//! ## Templating
//!
//! Pages are rendered with [minijinja](https://docs.rs/minijinja). The
//! environment is built once per [`SiteWriter`] and loads templates by name
//! from the template directory, so the config can pick a template per target.
//! A `current_year` global is available to all templates for footers.
//!
//! ## Static Assets
//!
//! `outdir/static` is replaced wholesale on every build: the old tree is
//! removed before the static source directory is copied over, so files
//! deleted from the source do not linger in the output.

use chrono::Utc;
use minijinja::{Environment, path_loader};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::Target;
use crate::pages::Page;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Writes rendered pages and static assets to the output directory.
///
/// Holds the template environment for the duration of one build; constructed
/// by the CLI and discarded when the build ends.
pub struct SiteWriter {
    env: Environment<'static>,
    static_dir: PathBuf,
}

impl SiteWriter {
    /// Create a writer loading templates from `template_dir` and static
    /// assets from `static_dir`.
    pub fn new(template_dir: &Path, static_dir: &Path) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(template_dir));
        env.add_global("current_year", Utc::now().format("%Y").to_string());
        Self {
            env,
            static_dir: static_dir.to_path_buf(),
        }
    }

    /// Materialize `pages` under `outdir`, then copy static assets and the
    /// targets' preview images.
    ///
    /// Every write is eager and unconditional: existing pages are
    /// overwritten and `outdir/static` is fully replaced.
    pub fn write(&self, outdir: &Path, pages: &[Page], targets: &[Target]) -> Result<(), WriteError> {
        fs::create_dir_all(outdir)?;

        for page in pages {
            let page_dir = if page.name.is_empty() {
                outdir.to_path_buf()
            } else {
                outdir.join(&page.name)
            };
            fs::create_dir_all(&page_dir)?;

            let template = self.env.get_template(&page.template)?;
            let html = template.render(&page.context)?;
            fs::write(page_dir.join("index.html"), html)?;
        }

        self.copy_static_files(outdir, targets)?;
        Ok(())
    }

    /// Replace `outdir/static` with the static source tree, then copy each
    /// target's preview image into `static/previews/`.
    fn copy_static_files(&self, outdir: &Path, targets: &[Target]) -> Result<(), WriteError> {
        let out_static = outdir.join("static");
        if out_static.exists() {
            fs::remove_dir_all(&out_static)?;
        }
        fs::create_dir_all(&out_static)?;
        copy_dir_recursive(&self.static_dir, &out_static)?;

        let previews = out_static.join("previews");
        fs::create_dir_all(&previews)?;
        for target in targets {
            fs::copy(
                &target.preview_image,
                previews.join(target.preview_image_output_name()),
            )?;
        }
        Ok(())
    }
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

//! # Asteroid Tracker
//!
//! A static site generator for asteroid observation campaigns backed by a
//! TOM (Target and Observation Manager) instance. The configuration file is
//! the data source: it names the TOM to query and lists the targets to
//! publish, and everything else is pulled from the TOM's API at build time.
//!
//! # Architecture: Linear Pipeline
//!
//! A build runs four stages in sequence, each a plain function call:
//!
//! ```text
//! 1. Parse     config.yaml  →  Config          (YAML → validated config)
//! 2. Fetch     TOM API      →  TargetDetails   (one GET per target)
//! 3. Assemble  details      →  Vec<Page>       (render contexts, home page last)
//! 4. Write     pages        →  outdir/         (HTML + static assets)
//! ```
//!
//! Assembly is all-or-nothing: every fetch must succeed before anything is
//! written, so a failed build never leaves a half-finished site behind.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | YAML config loading and validation |
//! | [`fetch`] | Blocking HTTP client for the TOM API |
//! | [`pages`] | Page assembly — fetched details + config → page descriptors |
//! | [`site`] | Site writer — template rendering and filesystem output |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Runtime Templates Over Compile-Time HTML
//!
//! Pages are rendered with [minijinja](https://docs.rs/minijinja). Each
//! target names its template in the config, so templates must be resolvable
//! by string at runtime — campaigns restyle a target's page by editing a
//! template file, not by recompiling the binary.
//!
//! ## Thin Pages, Live Data
//!
//! Generated pages are deliberately sparse: the build bakes in only the
//! target's identity and a `settings` object. The interesting data
//! (timelapses, observation counts) is fetched live from the TOM by the
//! site's JavaScript, so pages stay current between builds.
//!
//! ## Sequential Fetching
//!
//! Target lists are short (a campaign tracks a handful of asteroids) and a
//! build is an operator-run batch job, so fetches are sequential and
//! blocking. One request per target per build, no retries, no caching.

pub mod config;
pub mod fetch;
pub mod output;
pub mod pages;
pub mod site;

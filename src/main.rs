use asteroid_tracker::{config::Config, fetch::TomClient, output, pages, site::SiteWriter};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "ast-tracker")]
#[command(about = "Static site generator for asteroid observation campaigns")]
#[command(long_about = "\
Static site generator for asteroid observation campaigns

Reads a YAML config naming a TOM instance and the targets to publish,
fetches each target's details from the TOM API, and renders a static site:
one page per target plus a home page listing them all.

Config format:

  tom_education_url: https://tom.example.org
  targets:
    - pk: 100                      # Primary key in the TOM database
      template_name: asteroid.html # Template for this target's page
      preview_image: imgs/didymos.jpg
      teaser: \"Visible until March\"

Output layout:

  outdir/
  ├── index.html                   # Home page
  ├── <identifier>/index.html      # One page per target
  └── static/                      # Copied assets + previews/<pk>.<ext>")]
#[command(version)]
struct Cli {
    /// Template directory
    #[arg(long, default_value = "templates", global = true)]
    templates: PathBuf,

    /// Static assets directory
    #[arg(long = "static-dir", default_value = "static", global = true)]
    static_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch target details and build the full site
    Build {
        /// Path to the YAML config
        config: PathBuf,
        /// Output directory
        outdir: PathBuf,
    },
    /// Validate the config without fetching or writing
    Check {
        /// Path to the YAML config
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Build { config, outdir } => {
            let config = Config::parse(&config)?;
            let client = TomClient::new()?;
            let pages = pages::assemble(&config, &client)?;
            let writer = SiteWriter::new(&cli.templates, &cli.static_dir);
            writer.write(&outdir, &pages, &config.targets)?;
            output::print_build_output(&pages, &config.targets, &outdir);
        }
        Command::Check { config } => {
            let config = Config::parse(&config)?;
            output::print_check_output(&config);
        }
    }
    Ok(())
}

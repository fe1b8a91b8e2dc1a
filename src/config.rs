//! Command line configuration.

use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Resume document fetched when no local file is given.
pub const DEFAULT_RESUME_URL: &str = "https://www.nikola.cx/assets/json/resume.json";

/// Command line configuration for Texume.
#[derive(Debug, Clone, Parser)]
#[command(name = "texume", version, about, long_about = None)]
pub struct Config {
    /// Resume JSON URL
    #[arg(default_value = DEFAULT_RESUME_URL)]
    pub url: String,

    /// Local resume JSON file, used instead of fetching the URL
    #[arg(long, value_name = "PATH")]
    pub resume: Option<PathBuf>,

    /// Template directory
    #[arg(long, default_value = "templates")]
    pub templates: PathBuf,

    /// Resource directory holding the avatar and its bundled default
    #[arg(long, default_value = "resources")]
    pub resources: PathBuf,

    /// Output directory for rendered sections (recreated on every run)
    #[arg(short, long, default_value = "sections")]
    pub output: PathBuf,

    /// Network timeout for each fetch
    #[arg(long, default_value = "20s", value_parser = humantime::parse_duration)]
    pub timeout: Duration,

    /// Echo the raw resume payload
    #[arg(long)]
    pub debug: bool,

    /// Any non-empty value turns on payload echo, like `--debug`
    #[arg(long = "debug-env", env = "RESUME_DEBUG", hide = true)]
    pub debug_env: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the template directory or a local resume file does not exist.
    pub fn validate(&self) -> Result<()> {
        if !self.templates.is_dir() {
            bail!(
                "Template directory does not exist: {}",
                self.templates.display()
            );
        }

        if let Some(path) = &self.resume
            && !path.is_file()
        {
            bail!("Resume file does not exist: {}", path.display());
        }

        Ok(())
    }

    /// Returns true if the raw payload should be echoed.
    pub fn debug_enabled(&self) -> bool {
        self.debug || self.debug_env.as_deref().is_some_and(|v| !v.is_empty())
    }
}

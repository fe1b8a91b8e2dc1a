//! The full run: load, resolve avatar, sanitize, render.

use crate::avatar::{AvatarOutcome, resolve_avatar};
use crate::config::Config;
use crate::fetch::Fetch;
use crate::loader::{ResumeSource, load_resume};
use crate::render::{RenderReport, Renderer, reset_output_dir};
use crate::sanitize::sanitize;
use anyhow::{Context, Result};

/// Everything a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub avatar: AvatarOutcome,
    pub report: RenderReport,
}

/// Context threaded through every stage of a run.
pub struct Pipeline<'a> {
    config: &'a Config,
    fetcher: &'a dyn Fetch,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a Config, fetcher: &'a dyn Fetch) -> Self {
        Self { config, fetcher }
    }

    /// The authoritative resume source for this run.
    pub fn source(&self) -> ResumeSource {
        match &self.config.resume {
            Some(path) => ResumeSource::Local(path.clone()),
            None => ResumeSource::Remote(self.config.url.clone()),
        }
    }

    /// Runs every stage once, in order.
    ///
    /// # Errors
    ///
    /// Returns error if the resume cannot be loaded, the avatar directory is
    /// unusable, or any section fails to render. Avatar download problems
    /// are not errors.
    pub fn run(&self) -> Result<RunSummary> {
        let resume = load_resume(self.fetcher, &self.source(), self.config.debug_enabled())?;

        let avatar = resolve_avatar(self.fetcher, &resume, &self.config.resources)
            .context("Failed to resolve avatar")?;

        let resume = sanitize(resume);

        let renderer = Renderer::new(&self.config.templates)?;
        reset_output_dir(&self.config.output)?;
        let report = renderer
            .render_all(&resume, &self.config.output)
            .context("Failed to render sections")?;

        Ok(RunSummary { avatar, report })
    }
}

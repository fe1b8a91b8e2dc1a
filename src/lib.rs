//! LaTeX section generator for JSON Resume documents.

pub mod avatar;
mod config;
mod fetch;
pub mod filters;
mod imagetype;
mod loader;
mod logging;
mod pipeline;
pub mod render;
mod sanitize;

pub use avatar::{AvatarOutcome, FallbackReason, resolve_avatar};
pub use config::{Config, DEFAULT_RESUME_URL};
pub use fetch::{Fetch, FetchError, HttpFetcher, Response};
pub use imagetype::ImageFormat;
pub use loader::{LoadError, ResumeSource, load_resume};
pub use logging::init_logging;
pub use pipeline::{Pipeline, RunSummary};
pub use render::{RenderReport, Renderer, SECTIONS, Section, reset_output_dir};
pub use sanitize::{RULES, escape, sanitize};

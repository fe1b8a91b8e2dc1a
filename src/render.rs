//! Section rendering.
//!
//! Every entry of [`SECTIONS`] whose resume key holds a truthy value is
//! rendered from `<template dir>/<name>.tex` into `<output>/<NN>-<name>.tex`.
//! Templates use LaTeX friendly delimiters:
//!
//! ```text
//! ((* for job in work *))   statements
//! ((( job.name )))          expressions
//! ((= note =))              comments
//! ```

use crate::filters::register_filters;
use anyhow::{Context, Result};
use minijinja::syntax::SyntaxConfig;
use minijinja::{AutoEscape, Environment};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of both templates and rendered sections.
pub const EXTENSION: &str = "tex";

/// Variables a section template sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The whole resume document.
    Document,
    /// Only the section's own key, e.g. `work` for the work section.
    Subtree,
}

/// One independently gated unit of output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    /// Template stem and resume key.
    pub name: &'static str,
    pub scope: Scope,
}

impl Section {
    pub fn template_name(&self) -> String {
        format!("{}.{}", self.name, EXTENSION)
    }

    /// Output file name, prefixed with the section's position.
    pub fn file_name(&self, ordinal: usize) -> String {
        format!("{:02}-{}.{}", ordinal, self.name, EXTENSION)
    }
}

/// Sections in output order.
pub const SECTIONS: &[Section] = &[
    Section {
        name: "basics",
        scope: Scope::Document,
    },
    Section {
        name: "education",
        scope: Scope::Subtree,
    },
    Section {
        name: "work",
        scope: Scope::Subtree,
    },
    Section {
        name: "volunteer",
        scope: Scope::Subtree,
    },
    Section {
        name: "projects",
        scope: Scope::Subtree,
    },
    Section {
        name: "awards",
        scope: Scope::Subtree,
    },
    Section {
        name: "skills",
        scope: Scope::Subtree,
    },
    Section {
        name: "languages",
        scope: Scope::Subtree,
    },
];

/// What a render pass produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<&'static str>,
}

/// JSON truthiness: null, false, zero and empty containers or strings are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Removes `dir` with everything in it, then creates it empty.
///
/// # Errors
///
/// Returns error if the directory exists but cannot be removed, or cannot be created.
pub fn reset_output_dir(dir: &Path) -> Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to remove {}", dir.display()));
        }
    }

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))
}

/// Section renderer bound to a template directory.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Creates a renderer loading templates from `template_dir`.
    ///
    /// # Errors
    ///
    /// Returns error if the delimiter configuration is rejected.
    pub fn new(template_dir: &Path) -> Result<Self> {
        let mut env = Environment::new();

        let syntax = SyntaxConfig::builder()
            .block_delimiters("((*", "*))")
            .variable_delimiters("(((", ")))")
            .comment_delimiters("((=", "=))")
            .build()
            .context("Invalid template syntax configuration")?;
        env.set_syntax(syntax);

        // Values are escaped by the sanitizer, never by the engine
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_loader(minijinja::path_loader(template_dir));
        register_filters(&mut env);

        Ok(Self { env })
    }

    /// Renders one section to a string.
    ///
    /// # Errors
    ///
    /// Returns error if the template is missing or fails to render.
    pub fn render_section(&self, section: &Section, resume: &Value) -> Result<String> {
        let template_name = section.template_name();
        let template = self
            .env
            .get_template(&template_name)
            .with_context(|| format!("Failed to load template {}", template_name))?;

        let rendered = match section.scope {
            Scope::Document => template.render(resume),
            Scope::Subtree => {
                let mut ctx = BTreeMap::new();
                ctx.insert(section.name, resume.get(section.name).unwrap_or(&Value::Null));
                template.render(ctx)
            }
        };

        rendered.with_context(|| format!("Failed to render template {}", template_name))
    }

    /// Renders every eligible section of [`SECTIONS`] into `output`.
    ///
    /// `output` must already exist; see [`reset_output_dir`].
    ///
    /// # Errors
    ///
    /// Stops at the first section that fails to render or write.
    pub fn render_all(&self, resume: &Value, output: &Path) -> Result<RenderReport> {
        let mut report = RenderReport::default();

        for (ordinal, section) in SECTIONS.iter().enumerate() {
            if !resume.get(section.name).is_some_and(is_truthy) {
                tracing::debug!(section = section.name, "section empty, skipping");
                report.skipped.push(section.name);
                continue;
            }

            let text = self.render_section(section, resume)?;
            let path = output.join(section.file_name(ordinal));
            fs::write(&path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;

            tracing::info!(section = section.name, path = %path.display(), "rendered");
            report.written.push(path);
        }

        Ok(report)
    }
}

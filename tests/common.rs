//! Shared test utilities for integration tests.
//!
//! Provides a scripted [`Fetch`] implementation and helpers for laying out
//! template and resource directories in a temporary workspace.

#![allow(dead_code)]

use anyhow::Result;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use texume::{Config, Fetch, FetchError, Response};

/// Bytes standing in for the bundled default avatar.
pub const DEFAULT_AVATAR_BYTES: &[u8] = b"\x89PNG\r\n\x1a\ndefault-avatar";

pub const RESUME_URL: &str = "https://resume.test/resume.json";
pub const IMAGE_URL: &str = "https://resume.test/me";

/// Answers GET requests from a fixed table; unknown URLs fail at transport level.
#[derive(Default)]
pub struct ScriptedFetcher {
    responses: HashMap<String, Response>,
    requests: RefCell<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a response for `url`.
    pub fn respond(
        mut self,
        url: &str,
        status: u16,
        content_type: Option<&str>,
        body: &[u8],
    ) -> Self {
        self.responses.insert(
            url.to_string(),
            Response {
                status,
                content_type: content_type.map(String::from),
                body: body.to_vec(),
            },
        );
        self
    }

    /// Registers a 200 JSON response for the resume URL.
    pub fn with_resume(self, json: &serde_json::Value) -> Self {
        let body = serde_json::to_vec(json).expect("resume serializes");
        self.respond(RESUME_URL, 200, Some("application/json"), &body)
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Fetch for ScriptedFetcher {
    fn get(&self, url: &str) -> Result<Response, FetchError> {
        self.requests.borrow_mut().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Other {
                url: url.to_string(),
                message: "operation timed out".to_string(),
            })
    }
}

/// Temporary workspace with `templates/`, `resources/` and an output path.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    /// Creates a workspace holding the bundled default avatar.
    ///
    /// # Errors
    ///
    /// Returns error if directory creation or file write fails
    pub fn new() -> Result<Self> {
        let dir = TempDir::new()?;
        std::fs::create_dir_all(dir.path().join("templates"))?;
        std::fs::create_dir_all(dir.path().join("resources"))?;
        std::fs::write(
            dir.path().join("resources").join("_avatar.png"),
            DEFAULT_AVATAR_BYTES,
        )?;
        Ok(Self { dir })
    }

    /// Creates a workspace whose templates are the ones shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns error if copying the templates fails
    pub fn with_shipped_templates() -> Result<Self> {
        let ws = Self::new()?;
        let shipped = Path::new(env!("CARGO_MANIFEST_DIR")).join("templates");
        for entry in std::fs::read_dir(shipped)? {
            let entry = entry?;
            std::fs::copy(entry.path(), ws.templates().join(entry.file_name()))?;
        }
        Ok(ws)
    }

    pub fn templates(&self) -> PathBuf {
        self.dir.path().join("templates")
    }

    pub fn resources(&self) -> PathBuf {
        self.dir.path().join("resources")
    }

    pub fn output(&self) -> PathBuf {
        self.dir.path().join("sections")
    }

    /// Writes a template file.
    ///
    /// # Errors
    ///
    /// Returns error if file write fails
    pub fn template(&self, name: &str, source: &str) -> Result<()> {
        std::fs::write(self.templates().join(name), source)?;
        Ok(())
    }

    /// Writes a one-line template for every known section.
    ///
    /// # Errors
    ///
    /// Returns error if file write fails
    pub fn simple_templates(&self) -> Result<()> {
        for section in texume::SECTIONS {
            self.template(
                &section.template_name(),
                &format!("section {}", section.name),
            )?;
        }
        Ok(())
    }

    /// Configuration pointing at this workspace and [`RESUME_URL`].
    pub fn config(&self) -> Config {
        Config {
            url: RESUME_URL.to_string(),
            resume: None,
            templates: self.templates(),
            resources: self.resources(),
            output: self.output(),
            timeout: Duration::from_secs(20),
            debug: false,
            debug_env: None,
            verbose: 0,
        }
    }

    /// Sorted file names in the output directory.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be read
    pub fn output_files(&self) -> Result<Vec<String>> {
        list_names(&self.output())
    }

    /// Sorted names of `avatar*` files in the resources directory.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be read
    pub fn avatar_files(&self) -> Result<Vec<String>> {
        Ok(list_names(&self.resources())?
            .into_iter()
            .filter(|name| name.starts_with("avatar"))
            .collect())
    }
}

fn list_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        names.push(entry?.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

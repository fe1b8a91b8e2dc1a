//! Profile image resolution.
//!
//! Leaves exactly one `avatar.<ext>` in the resources directory: the image
//! referenced by `basics.image` when it downloads with a known image type,
//! otherwise a copy of the bundled `_avatar.png`.

use crate::fetch::Fetch;
use crate::imagetype::ImageFormat;
use anyhow::{Context, Result};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Base name shared by every resolved avatar, whatever its extension.
pub const AVATAR_STEM: &str = "avatar";

/// Bundled fallback image inside the resources directory.
pub const DEFAULT_AVATAR: &str = "_avatar.png";

/// Extension of the bundled fallback.
pub const DEFAULT_EXTENSION: &str = "png";

/// Why the bundled default was used instead of a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The resume has no `basics.image`.
    NoImage,
    /// The image URL answered with a non-2xx status.
    Status(u16),
    /// The response declared a content type with no known extension.
    UnknownType(String),
    /// Timeout or connection failure.
    Transport(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoImage => f.write_str("no image in resume"),
            Self::Status(status) => write!(f, "image download returned HTTP {}", status),
            Self::UnknownType(ct) => write!(f, "unknown file type {:?}", ct),
            Self::Transport(msg) => write!(f, "image download failed: {}", msg),
        }
    }
}

/// Result of avatar resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarOutcome {
    Downloaded { path: PathBuf, format: ImageFormat },
    Default { path: PathBuf, reason: FallbackReason },
}

impl AvatarOutcome {
    /// Path of the avatar file now on disk.
    pub fn path(&self) -> &Path {
        match self {
            Self::Downloaded { path, .. } | Self::Default { path, .. } => path,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default { .. })
    }
}

/// Returns the image URL from `basics.image`, if present and non-empty.
pub fn image_url(resume: &Value) -> Option<&str> {
    resume
        .get("basics")?
        .get("image")?
        .as_str()
        .map(str::trim)
        .filter(|url| !url.is_empty())
}

/// Resolves the avatar into `resources`.
///
/// Network problems never fail this function; they select the default image.
///
/// # Errors
///
/// Returns error if old avatars cannot be removed, the bundled default is
/// missing, or the downloaded image cannot be written.
pub fn resolve_avatar(
    fetcher: &dyn Fetch,
    resume: &Value,
    resources: &Path,
) -> Result<AvatarOutcome> {
    fs::create_dir_all(resources).with_context(|| {
        format!(
            "Failed to create resources directory: {}",
            resources.display()
        )
    })?;
    remove_old_avatars(resources)?;

    let Some(url) = image_url(resume) else {
        return use_default(resources, FallbackReason::NoImage);
    };

    tracing::info!(%url, "downloading avatar");

    let response = match fetcher.get(url) {
        Ok(response) => response,
        Err(e) => {
            return use_default(resources, FallbackReason::Transport(format!("{:#}", e)));
        }
    };

    if !response.is_success() {
        return use_default(resources, FallbackReason::Status(response.status));
    }

    let content_type = response.content_type.unwrap_or_default();
    let Some(format) = ImageFormat::from_content_type(&content_type) else {
        return use_default(resources, FallbackReason::UnknownType(content_type));
    };

    let path = avatar_path(resources, format.extension());
    fs::write(&path, &response.body)
        .with_context(|| format!("Failed to write avatar: {}", path.display()))?;

    tracing::info!(path = %path.display(), mime = format.mime_type(), "avatar saved");
    Ok(AvatarOutcome::Downloaded { path, format })
}

/// Path of the avatar for a given extension.
pub fn avatar_path(resources: &Path, extension: &str) -> PathBuf {
    resources.join(format!("{}.{}", AVATAR_STEM, extension))
}

/// Deletes every `avatar*` file so extensions from earlier runs cannot linger.
fn remove_old_avatars(resources: &Path) -> Result<()> {
    let entries = fs::read_dir(resources)
        .with_context(|| format!("Failed to list {}", resources.display()))?;

    for entry in entries {
        let entry = entry?;
        let is_avatar = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with(AVATAR_STEM));

        if is_avatar && entry.file_type()?.is_file() {
            let path = entry.path();
            tracing::info!(path = %path.display(), "deleting old avatar");
            fs::remove_file(&path)
                .with_context(|| format!("Failed to delete {}", path.display()))?;
        }
    }

    Ok(())
}

fn use_default(resources: &Path, reason: FallbackReason) -> Result<AvatarOutcome> {
    match &reason {
        FallbackReason::NoImage => tracing::info!("using default avatar: {}", reason),
        _ => tracing::warn!("using default avatar: {}", reason),
    }

    let source = resources.join(DEFAULT_AVATAR);
    let path = avatar_path(resources, DEFAULT_EXTENSION);
    fs::copy(&source, &path).with_context(|| {
        format!(
            "Failed to copy default avatar {} to {}",
            source.display(),
            path.display()
        )
    })?;

    Ok(AvatarOutcome::Default { path, reason })
}

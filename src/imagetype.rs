//! Image content type classification for downloaded avatars.
//!
//! Maps a declared `Content-Type` header to a file extension using the
//! standard MIME table. The body is never sniffed; an undeclared or unknown
//! type means the default avatar is used.

/// Image formats accepted for the avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Portable Network Graphics
    Png,
    /// JPEG compressed image
    Jpeg,
    /// Graphics Interchange Format
    Gif,
    /// Scalable Vector Graphics
    Svg,
    /// WebP
    Webp,
    /// Bitmap image
    Bmp,
    /// Icon format
    Ico,
    /// Tagged Image File Format
    Tiff,
}

impl ImageFormat {
    /// Looks up a format from a `Content-Type` header value.
    ///
    /// Parameters after `;` are ignored and matching is case-insensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use texume::ImageFormat;
    ///
    /// assert_eq!(
    ///     ImageFormat::from_content_type("image/JPEG; charset=binary"),
    ///     Some(ImageFormat::Jpeg)
    /// );
    /// assert_eq!(ImageFormat::from_content_type("text/html"), None);
    /// ```
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "image/png" | "image/x-png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(Self::Jpeg),
            "image/gif" => Some(Self::Gif),
            "image/svg+xml" => Some(Self::Svg),
            "image/webp" => Some(Self::Webp),
            "image/bmp" | "image/x-ms-bmp" => Some(Self::Bmp),
            "image/x-icon" | "image/vnd.microsoft.icon" => Some(Self::Ico),
            "image/tiff" => Some(Self::Tiff),
            _ => None,
        }
    }

    /// Canonical MIME type
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Svg => "image/svg+xml",
            Self::Webp => "image/webp",
            Self::Bmp => "image/bmp",
            Self::Ico => "image/vnd.microsoft.icon",
            Self::Tiff => "image/tiff",
        }
    }

    /// File extension without dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::Svg => "svg",
            Self::Webp => "webp",
            Self::Bmp => "bmp",
            Self::Ico => "ico",
            Self::Tiff => "tiff",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ImageFormat; 8] = [
        ImageFormat::Png,
        ImageFormat::Jpeg,
        ImageFormat::Gif,
        ImageFormat::Svg,
        ImageFormat::Webp,
        ImageFormat::Bmp,
        ImageFormat::Ico,
        ImageFormat::Tiff,
    ];

    #[test]
    fn test_standard_extensions() {
        assert_eq!(ImageFormat::Png.extension(), "png");
        assert_eq!(ImageFormat::Jpeg.extension(), "jpg");
        assert_eq!(ImageFormat::Gif.extension(), "gif");
        assert_eq!(ImageFormat::Svg.extension(), "svg");
        assert_eq!(ImageFormat::Webp.extension(), "webp");
        assert_eq!(ImageFormat::Bmp.extension(), "bmp");
        assert_eq!(ImageFormat::Ico.extension(), "ico");
        assert_eq!(ImageFormat::Tiff.extension(), "tiff");
    }

    #[test]
    fn test_canonical_mime_maps_back() {
        for format in ALL {
            assert_eq!(
                ImageFormat::from_content_type(format.mime_type()),
                Some(format),
                "{:?} should round trip through its MIME type",
                format
            );
        }
    }

    #[test]
    fn test_parameters_and_case_ignored() {
        assert_eq!(
            ImageFormat::from_content_type("Image/PNG ; q=0.9"),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::from_content_type("  image/webp"),
            Some(ImageFormat::Webp)
        );
    }

    #[test]
    fn test_aliases() {
        assert_eq!(
            ImageFormat::from_content_type("image/jpg"),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_content_type("image/x-icon"),
            Some(ImageFormat::Ico)
        );
        assert_eq!(
            ImageFormat::from_content_type("image/x-ms-bmp"),
            Some(ImageFormat::Bmp)
        );
    }

    #[test]
    fn test_unknown_types() {
        assert_eq!(ImageFormat::from_content_type(""), None);
        assert_eq!(ImageFormat::from_content_type("text/html"), None);
        assert_eq!(ImageFormat::from_content_type("application/octet-stream"), None);
        assert_eq!(ImageFormat::from_content_type("image/unknown"), None);
    }
}

//! Extension based classification of image files.

use std::fmt;
use std::path::Path;

/// Image media types recognized by the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Jpeg,
    Png,
    Gif,
    Svg,
    Webp,
}

/// How file contents are read before being embedded in a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    Base64,
    Utf8,
}

impl MediaType {
    /// Looks up the media type for a file extension, including the leading dot.
    ///
    /// Matching is case-sensitive: `.PNG` is not recognized.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            ".jpg" | ".jpeg" => Some(MediaType::Jpeg),
            ".png" => Some(MediaType::Png),
            ".gif" => Some(MediaType::Gif),
            ".svg" => Some(MediaType::Svg),
            ".webp" => Some(MediaType::Webp),
            _ => None,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            MediaType::Jpeg => "image/jpeg",
            MediaType::Png => "image/png",
            MediaType::Gif => "image/gif",
            MediaType::Svg => "image/svg+xml",
            MediaType::Webp => "image/webp",
        }
    }

    /// SVG is the only text format; everything else is embedded as base64.
    pub fn source_format(&self) -> SourceFormat {
        match self {
            MediaType::Svg => SourceFormat::Utf8,
            _ => SourceFormat::Base64,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

impl SourceFormat {
    /// Tag used in the data URI, e.g. `data:image/png;base64,`
    pub fn tag(&self) -> &'static str {
        match self {
            SourceFormat::Base64 => "base64",
            SourceFormat::Utf8 => "utf-8",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Returns the extension of a module identifier, leading dot included.
///
/// File names that only start with a dot (`.png`) have no extension.
pub fn extension(id: &str) -> Option<String> {
    Path::new(id)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
}

/// Classifies a module identifier by its extension.
pub fn classify(id: &str) -> Option<MediaType> {
    extension(id).and_then(|ext| MediaType::from_extension(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/assets/photo.jpg", Some(MediaType::Jpeg))]
    #[case("/assets/photo.jpeg", Some(MediaType::Jpeg))]
    #[case("/assets/pixel.png", Some(MediaType::Png))]
    #[case("/assets/spinner.gif", Some(MediaType::Gif))]
    #[case("/assets/logo.svg", Some(MediaType::Svg))]
    #[case("/assets/hero.webp", Some(MediaType::Webp))]
    #[case("/assets/archive.tar.png", Some(MediaType::Png))]
    #[case("/assets/PIXEL.PNG", None)]
    #[case("/assets/.png", None)]
    #[case("/assets/file.", None)]
    #[case("/assets/main.js", None)]
    #[case("/assets/noext", None)]
    fn test_classify(#[case] id: &str, #[case] expected: Option<MediaType>) {
        assert_eq!(classify(id), expected);
    }

    #[test]
    fn test_only_svg_is_text() {
        for media_type in [
            MediaType::Jpeg,
            MediaType::Png,
            MediaType::Gif,
            MediaType::Webp,
        ] {
            assert_eq!(media_type.source_format(), SourceFormat::Base64);
        }
        assert_eq!(MediaType::Svg.source_format(), SourceFormat::Utf8);
    }

    #[test]
    fn test_mime_strings() {
        assert_eq!(MediaType::from_extension(".jpg"), MediaType::from_extension(".jpeg"));
        assert_eq!(MediaType::Svg.to_string(), "image/svg+xml");
        assert_eq!(SourceFormat::Utf8.to_string(), "utf-8");
    }
}

use std::fmt;

/// Image formats accepted by both AI backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Png,
    Jpeg,
    Webp,
    Gif,
}

impl MediaType {
    #[must_use]
    pub fn as_mime(self) -> &'static str {
        match self {
            MediaType::Png => "image/png",
            MediaType::Jpeg => "image/jpeg",
            MediaType::Webp => "image/webp",
            MediaType::Gif => "image/gif",
        }
    }

    fn from_content_type(value: &str) -> Option<Self> {
        let essence = value.split(';').next()?.trim().to_ascii_lowercase();
        match essence.as_str() {
            "image/png" => Some(MediaType::Png),
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(MediaType::Jpeg),
            "image/webp" => Some(MediaType::Webp),
            "image/gif" => Some(MediaType::Gif),
            _ => None,
        }
    }

    fn from_extension(url: &str) -> Option<Self> {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        let file = path.rsplit('/').next().unwrap_or(path);
        let (_, ext) = file.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(MediaType::Png),
            "jpg" | "jpeg" => Some(MediaType::Jpeg),
            "webp" => Some(MediaType::Webp),
            "gif" => Some(MediaType::Gif),
            _ => None,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_mime())
    }
}

/// Picks the media type for a downloaded screenshot.
///
/// A recognised `Content-Type` wins; otherwise the URL's file extension is
/// used, and JPEG is assumed when neither is conclusive.
#[must_use]
pub fn classify_media_type(content_type: Option<&str>, url: &str) -> MediaType {
    content_type
        .and_then(MediaType::from_content_type)
        .or_else(|| MediaType::from_extension(url))
        .unwrap_or(MediaType::Jpeg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_takes_precedence_over_extension() {
        assert_eq!(
            classify_media_type(Some("image/webp"), "https://cdn.example.com/a.png"),
            MediaType::Webp
        );
    }

    #[test]
    fn header_parameters_are_ignored() {
        assert_eq!(
            classify_media_type(Some("Image/PNG; charset=binary"), "https://x/a"),
            MediaType::Png
        );
    }

    #[test]
    fn falls_back_to_extension_for_generic_header() {
        assert_eq!(
            classify_media_type(
                Some("application/octet-stream"),
                "https://cdn.example.com/shot.GIF?w=300#frag"
            ),
            MediaType::Gif
        );
        assert_eq!(
            classify_media_type(None, "https://cdn.example.com/392x696bb.png"),
            MediaType::Png
        );
    }

    #[test]
    fn defaults_to_jpeg() {
        assert_eq!(
            classify_media_type(None, "https://cdn.example.com/image"),
            MediaType::Jpeg
        );
        assert_eq!(
            classify_media_type(Some("text/html"), "https://cdn.example.com/a.bmp"),
            MediaType::Jpeg
        );
    }

    #[test]
    fn dots_in_host_are_not_extensions() {
        assert_eq!(
            classify_media_type(None, "https://is1-ssl.mzstatic.com/"),
            MediaType::Jpeg
        );
    }
}

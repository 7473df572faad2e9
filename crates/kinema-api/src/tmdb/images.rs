//! Image CDN URL construction.
//!
//! Poster and backdrop paths returned by the API are relative; full URLs
//! are built from a fixed base, a size token, and the path.

/// Base URL for the TMDB image CDN.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Image size tokens supported by the CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// 185px wide.
    W185,
    /// 200px wide (thumbnails).
    W200,
    /// 342px wide.
    W342,
    /// 500px wide (cards).
    W500,
    /// 780px wide.
    W780,
    /// Original resolution (backdrops).
    Original,
}

impl ImageSize {
    /// Returns the CDN path token for this size.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::W185 => "w185",
            Self::W200 => "w200",
            Self::W342 => "w342",
            Self::W500 => "w500",
            Self::W780 => "w780",
            Self::Original => "original",
        }
    }
}

/// Builds a full image URL from a size token and a relative path.
///
/// The API returns paths with a leading slash (`/abc.jpg`); a missing
/// slash is tolerated.
#[must_use]
pub fn image_url(size: ImageSize, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}/{}{}", IMAGE_BASE_URL, size.as_str(), path)
    } else {
        format!("{}/{}/{}", IMAGE_BASE_URL, size.as_str(), path)
    }
}

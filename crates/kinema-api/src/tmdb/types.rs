//! TMDB API response types and request parameters.

use chrono::Datelike;
use serde::Deserialize;

// --- Paged movie lists ---

/// One page of movie results, as returned by `movie/popular`,
/// `search/movie`, and `discover/movie`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MoviePage {
    /// Current page number (1-based).
    pub page: u32,
    /// Movies on this page.
    pub results: Vec<MovieSummary>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of results.
    pub total_results: u32,
}

impl MoviePage {
    /// An empty first page (used for zero-favorite listings).
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            page: 1,
            results: Vec::new(),
            total_pages: 1,
            total_results: 0,
        }
    }
}

/// A single movie within a paged list.
///
/// Immutable once fetched; the catalogue is read-only.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieSummary {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Poster image path (relative, e.g. `/abc.jpg`).
    pub poster_path: Option<String>,
    /// Backdrop image path (relative).
    pub backdrop_path: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Release date (YYYY-MM-DD, possibly empty).
    pub release_date: Option<String>,
    /// Vote average (0.0 - 10.0).
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

impl MovieSummary {
    /// Four-digit release year, if the release date parses.
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        let date = self.release_date.as_deref()?;
        chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .map(|d| d.year())
    }
}

// --- Movie details ---

/// Response from `movie/{id}?append_to_response=videos`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieDetails {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Poster image path (relative).
    pub poster_path: Option<String>,
    /// Backdrop image path (relative).
    pub backdrop_path: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Release date (YYYY-MM-DD, possibly empty).
    pub release_date: Option<String>,
    /// Vote average (0.0 - 10.0).
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Trailer candidates (present only with `append_to_response=videos`).
    pub videos: Option<VideoList>,
}

impl MovieDetails {
    /// Release date formatted for display (e.g. "November 5, 2014").
    #[must_use]
    pub fn formatted_release_date(&self) -> Option<String> {
        let date = self.release_date.as_deref()?;
        chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .map(|d| d.format("%B %-d, %Y").to_string())
    }
}

/// Video list wrapper within movie details.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VideoList {
    /// Video entries.
    pub results: Vec<Video>,
}

/// A single video entry (trailer, teaser, clip, ...).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Video {
    /// Site-specific video key (YouTube watch key).
    pub key: String,
    /// Video title.
    pub name: String,
    /// Hosting site (e.g. "YouTube").
    pub site: String,
    /// Video type (e.g. "Trailer", "Teaser").
    #[serde(rename = "type")]
    pub kind: String,
    /// Whether the video is an official upload.
    #[serde(default)]
    pub official: bool,
}

// --- Genres ---

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Response from `genre/movie/list`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenreListResponse {
    /// All movie genres.
    pub genres: Vec<Genre>,
}

// --- Error response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    pub success: bool,
}

// --- Request parameters ---

/// Parameters for the `search/movie` endpoint.
#[derive(Debug, Clone)]
pub struct SearchMovieParams {
    /// Search query (required).
    pub query: String,
    /// Response language (default: "en-US").
    pub language: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchMovieParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: String::from("en-US"),
            page: 1,
            include_adult: false,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }
}

/// Parameters for the `discover/movie` endpoint.
#[derive(Debug, Clone)]
pub struct DiscoverMovieParams {
    /// Genre ID filter (required).
    pub genre_id: u32,
    /// Response language (default: "en-US").
    pub language: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Sort order (default: "popularity.desc").
    pub sort_by: String,
}

impl DiscoverMovieParams {
    /// Creates new discover params for the given genre.
    #[must_use]
    pub fn new(genre_id: u32) -> Self {
        Self {
            genre_id,
            language: String::from("en-US"),
            page: 1,
            sort_by: String::from("popularity.desc"),
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_release_year_parses_date() {
        // Arrange
        let movie = MovieSummary {
            id: 157_336,
            title: String::from("Interstellar"),
            poster_path: None,
            backdrop_path: None,
            overview: None,
            release_date: Some(String::from("2014-11-05")),
            vote_average: 8.4,
            vote_count: 36_000,
            popularity: 120.5,
            genre_ids: vec![12, 878],
        };

        // Act & Assert
        assert_eq!(movie.release_year(), Some(2014));
    }

    #[test]
    fn test_release_year_empty_date() {
        // Arrange
        let movie = MovieSummary {
            id: 1,
            title: String::from("Unknown"),
            poster_path: None,
            backdrop_path: None,
            overview: None,
            release_date: Some(String::new()),
            vote_average: 0.0,
            vote_count: 0,
            popularity: 0.0,
            genre_ids: vec![],
        };

        // Act & Assert
        assert_eq!(movie.release_year(), None);
    }

    #[test]
    fn test_empty_page() {
        // Arrange & Act
        let page = MoviePage::empty();

        // Assert
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_results, 0);
        assert!(page.results.is_empty());
    }

    #[test]
    fn test_search_params_builder() {
        // Arrange & Act
        let params = SearchMovieParams::new("dune").language("de-DE").page(3);

        // Assert
        assert_eq!(params.query, "dune");
        assert_eq!(params.language, "de-DE");
        assert_eq!(params.page, 3);
        assert!(!params.include_adult);
    }

    #[test]
    fn test_discover_params_defaults() {
        // Arrange & Act
        let params = DiscoverMovieParams::new(878);

        // Assert
        assert_eq!(params.genre_id, 878);
        assert_eq!(params.page, 1);
        assert_eq!(params.sort_by, "popularity.desc");
    }

    #[test]
    fn test_video_type_field_renamed() {
        // Arrange
        let json = r#"{"key":"zSWdZVtXT7E","name":"Official Trailer","site":"YouTube","type":"Trailer","official":true}"#;

        // Act
        let video: Video = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(video.kind, "Trailer");
        assert!(video.official);
    }
}

//! Helpers built on top of the `MovieApi` trait.

use anyhow::Result;

use super::api::MovieApi;
use super::types::{DiscoverMovieParams, MovieDetails, MoviePage, Video};

/// Fetches a page of movies for a genre, falling back to the popular list.
///
/// When the discover request fails for any reason, the unfiltered popular
/// page for the same page number is returned instead. The caller cannot
/// distinguish the fallback from a successful filtered fetch.
///
/// # Errors
///
/// Returns an error only when the fallback popular fetch fails as well.
pub async fn movies_for_genre(
    api: &(impl MovieApi + Sync),
    params: &DiscoverMovieParams,
) -> Result<MoviePage> {
    match api.discover_movies(params).await {
        Ok(page) => Ok(page),
        Err(err) => {
            tracing::warn!(
                genre_id = params.genre_id,
                page = params.page,
                error = %err,
                "discover request failed, falling back to popular movies"
            );
            api.popular_movies(params.page).await
        }
    }
}

/// Selects the trailer to offer for a movie.
///
/// Prefers an official YouTube video of type "Trailer"; falls back to any
/// YouTube trailer; returns `None` when no YouTube trailer exists.
#[must_use]
pub fn pick_trailer(videos: &[Video]) -> Option<&Video> {
    let is_youtube_trailer = |v: &&Video| v.site == "YouTube" && v.kind == "Trailer";

    videos
        .iter()
        .filter(is_youtube_trailer)
        .find(|v| v.official)
        .or_else(|| videos.iter().find(is_youtube_trailer))
}

/// Returns the trailer URL for a movie's details, if one qualifies.
#[must_use]
pub fn trailer_url(details: &MovieDetails) -> Option<String> {
    let videos = details.videos.as_ref()?;
    pick_trailer(&videos.results).map(|v| youtube_url(&v.key))
}

/// Builds a YouTube watch URL from a video key.
#[must_use]
pub fn youtube_url(key: &str) -> String {
    format!("https://www.youtube.com/watch?v={key}")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::bail;

    use super::super::types::{Genre, MovieSummary, SearchMovieParams};
    use super::*;

    fn make_video(name: &str, site: &str, kind: &str, official: bool) -> Video {
        Video {
            key: format!("key-{name}"),
            name: String::from(name),
            site: String::from(site),
            kind: String::from(kind),
            official,
        }
    }

    fn make_page(page: u32, titles: &[&str]) -> MoviePage {
        MoviePage {
            page,
            results: titles
                .iter()
                .enumerate()
                .map(|(i, t)| MovieSummary {
                    id: u64::try_from(i).unwrap().saturating_add(1),
                    title: String::from(*t),
                    poster_path: None,
                    backdrop_path: None,
                    overview: None,
                    release_date: None,
                    vote_average: 7.0,
                    vote_count: 100,
                    popularity: 10.0,
                    genre_ids: vec![],
                })
                .collect(),
            total_pages: 10,
            total_results: 200,
        }
    }

    /// Mock API whose discover endpoint always fails.
    struct FailingDiscoverApi {
        popular_calls: AtomicUsize,
    }

    impl MovieApi for FailingDiscoverApi {
        async fn popular_movies(&self, page: u32) -> Result<MoviePage> {
            self.popular_calls.fetch_add(1, Ordering::SeqCst);
            Ok(make_page(page, &["Popular One", "Popular Two"]))
        }

        async fn search_movies(&self, _params: &SearchMovieParams) -> Result<MoviePage> {
            bail!("not used")
        }

        async fn discover_movies(&self, _params: &DiscoverMovieParams) -> Result<MoviePage> {
            bail!("TMDB API error (HTTP 500 Internal Server Error)")
        }

        async fn movie_details(&self, _movie_id: u64) -> Result<MovieDetails> {
            bail!("not used")
        }

        async fn genre_list(&self) -> Result<Vec<Genre>> {
            bail!("not used")
        }
    }

    #[tokio::test]
    async fn test_genre_failure_falls_back_to_popular() {
        // Arrange
        let api = FailingDiscoverApi {
            popular_calls: AtomicUsize::new(0),
        };
        let params = DiscoverMovieParams::new(878).page(3);

        // Act
        let page = movies_for_genre(&api, &params).await.unwrap();

        // Assert: same shape as a successful popular fetch, no error visible
        assert_eq!(page.page, 3);
        assert_eq!(page.results.len(), 2);
        assert_eq!(api.popular_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_pick_trailer_prefers_official() {
        // Arrange
        let videos = vec![
            make_video("Teaser", "YouTube", "Teaser", true),
            make_video("Fan Cut", "YouTube", "Trailer", false),
            make_video("Official Trailer", "YouTube", "Trailer", true),
        ];

        // Act
        let trailer = pick_trailer(&videos).unwrap();

        // Assert
        assert_eq!(trailer.name, "Official Trailer");
    }

    #[test]
    fn test_pick_trailer_falls_back_to_unofficial() {
        // Arrange
        let videos = vec![
            make_video("Teaser", "YouTube", "Teaser", true),
            make_video("Fan Cut", "YouTube", "Trailer", false),
        ];

        // Act
        let trailer = pick_trailer(&videos).unwrap();

        // Assert
        assert_eq!(trailer.name, "Fan Cut");
        assert!(!trailer.official);
    }

    #[test]
    fn test_pick_trailer_ignores_other_sites() {
        // Arrange
        let videos = vec![
            make_video("Vimeo Trailer", "Vimeo", "Trailer", true),
            make_video("Clip", "YouTube", "Clip", true),
        ];

        // Act & Assert
        assert!(pick_trailer(&videos).is_none());
    }

    #[test]
    fn test_pick_trailer_empty_list() {
        // Arrange & Act & Assert
        assert!(pick_trailer(&[]).is_none());
    }

    #[test]
    fn test_youtube_url() {
        // Arrange & Act & Assert
        assert_eq!(
            youtube_url("zSWdZVtXT7E"),
            "https://www.youtube.com/watch?v=zSWdZVtXT7E"
        );
    }
}

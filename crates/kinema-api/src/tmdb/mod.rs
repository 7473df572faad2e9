//! TMDB v3 API client.
//!
//! Read-only access to the movie catalogue: popular movies, free-text
//! search, genre discovery, single-movie details (with trailer candidates),
//! and the genre reference list.

mod api;
mod client;
/// Image CDN URL construction.
pub mod images;
mod rate_limiter;
/// Response types and request parameters.
pub mod types;
/// Helpers built on top of the API trait.
pub mod util;

pub use api::{LocalMovieApi, MovieApi};
pub use client::{TmdbClient, TmdbClientBuilder};
pub use types::{
    DiscoverMovieParams, Genre, GenreListResponse, MovieDetails, MoviePage, MovieSummary,
    SearchMovieParams, TmdbErrorResponse, Video,
};
pub use util::{movies_for_genre, pick_trailer, trailer_url, youtube_url};

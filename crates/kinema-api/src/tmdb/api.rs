//! `MovieApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{
    DiscoverMovieParams, Genre, MovieDetails, MoviePage, SearchMovieParams,
};

/// TMDB movie API trait.
///
/// Abstracts the read-only catalogue operations for mock substitution in
/// tests and for the query orchestrator. Uses `trait_variant::make` to
/// generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(MovieApi: Send)]
pub trait LocalMovieApi {
    /// Fetches a page of currently popular movies.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn popular_movies(&self, page: u32) -> Result<MoviePage>;

    /// Searches for movies by free text.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_movies(&self, params: &SearchMovieParams) -> Result<MoviePage>;

    /// Fetches a page of movies for a single genre, sorted by popularity.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn discover_movies(&self, params: &DiscoverMovieParams) -> Result<MoviePage>;

    /// Fetches full details for one movie, including trailer candidates.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetails>;

    /// Fetches the movie genre reference list.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn genre_list(&self) -> Result<Vec<Genre>>;
}

//! API client library for kinema.
//!
//! Provides a typed client for the TMDB v3 movie API.

/// TMDB API client.
pub mod tmdb;

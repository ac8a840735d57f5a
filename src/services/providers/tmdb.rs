/// TMDB poster provider
///
/// API Flow:
/// 1. Details: /movie/{id}?api_key=..&language=en-US → JSON with optional `poster_path`
/// 2. Poster URL: {image_base_url}/{poster_path}
///
/// No caching and no retries: every call goes to the API once.
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{MovieId, PosterLookup, TmdbMovieDetails},
    services::providers::PosterResolver,
};

const LANGUAGE: &str = "en-US";

#[derive(Clone)]
pub struct TmdbPosterResolver {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_base_url: String,
    placeholder_url: String,
}

impl TmdbPosterResolver {
    pub fn new(
        api_key: String,
        api_url: String,
        image_base_url: String,
        placeholder_url: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
            image_base_url,
            placeholder_url,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_image_base_url.clone(),
            config.poster_placeholder_url.clone(),
            Duration::from_secs(config.tmdb_timeout_secs),
        )
    }

    /// Fetch the movie details document
    ///
    /// Transport errors are stripped of their URL before being returned since
    /// the URL carries the API key.
    async fn fetch_details(&self, movie_id: MovieId) -> AppResult<TmdbMovieDetails> {
        let url = format!("{}/movie/{}", self.api_url.trim_end_matches('/'), movie_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("language", LANGUAGE)])
            .send()
            .await
            .map_err(|e| AppError::HttpClient(e.without_url()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        response
            .json::<TmdbMovieDetails>()
            .await
            .map_err(|e| AppError::HttpClient(e.without_url()))
    }

    fn poster_url(&self, details: &TmdbMovieDetails) -> Option<String> {
        details
            .poster_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| join_image_url(&self.image_base_url, path))
    }
}

/// Joins the image base and a poster path with exactly one slash
///
/// TMDB poster paths start with `/`, so plain concatenation onto a base ending
/// in `/` would yield `.../w500//abc.jpg`. Both forms load, but the single
/// slash is what gets returned.
fn join_image_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[async_trait::async_trait]
impl PosterResolver for TmdbPosterResolver {
    async fn fetch_poster(&self, movie_id: MovieId) -> PosterLookup {
        match self.fetch_details(movie_id).await {
            Ok(details) => match self.poster_url(&details) {
                Some(url) => {
                    tracing::debug!(movie_id = %movie_id, url = %url, "Poster resolved");
                    PosterLookup::found(url)
                }
                None => {
                    tracing::debug!(movie_id = %movie_id, "No poster path, using placeholder");
                    PosterLookup::fallback(&self.placeholder_url, None)
                }
            },
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    movie_id = %movie_id,
                    provider = "tmdb",
                    "Poster fetch failed"
                );
                PosterLookup::fallback(
                    &self.placeholder_url,
                    Some(format!("Error fetching poster: {}", e)),
                )
            }
        }
    }

    fn placeholder_url(&self) -> &str {
        &self.placeholder_url
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

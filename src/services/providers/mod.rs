use std::sync::Arc;

/// Poster lookup abstraction
///
/// The recommender only needs an image URL per movie. Keeping the metadata
/// service behind a trait lets tests and alternative sources stand in for TMDB.
use crate::models::{MovieId, PosterLookup};

pub mod tmdb;

pub use tmdb::TmdbPosterResolver;

/// Trait for poster sources
///
/// Implementations are total: every failure is folded into a placeholder URL
/// plus an optional user-facing warning, never an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterResolver: Send + Sync {
    /// Resolve the display image for a movie
    async fn fetch_poster(&self, movie_id: MovieId) -> PosterLookup;

    /// Image returned when no poster can be resolved
    fn placeholder_url(&self) -> &str;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Fetch posters for several movies in parallel
///
/// Results come back in the same order as `movie_ids`. A task that fails to
/// join still yields the placeholder so one bad lookup never drops a movie.
pub async fn fetch_posters(
    resolver: Arc<dyn PosterResolver>,
    movie_ids: &[MovieId],
) -> Vec<PosterLookup> {
    let mut tasks = Vec::with_capacity(movie_ids.len());

    for &movie_id in movie_ids {
        let resolver = Arc::clone(&resolver);
        let task = tokio::spawn(async move { resolver.fetch_poster(movie_id).await });
        tasks.push((movie_id, task));
    }

    let mut results = Vec::with_capacity(tasks.len());
    for (movie_id, task) in tasks {
        match task.await {
            Ok(lookup) => results.push(lookup),
            Err(e) => {
                tracing::error!(error = %e, movie_id = %movie_id, "Poster task join error");
                results.push(PosterLookup::fallback(
                    resolver.placeholder_url(),
                    Some(format!("Error fetching poster: {}", e)),
                ));
            }
        }
    }

    let failures = results.iter().filter(|r| r.warning.is_some()).count();
    if failures > 0 {
        tracing::warn!(
            provider = resolver.name(),
            success_count = results.len() - failures,
            error_count = failures,
            "Partial poster fetch failure"
        );
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLACEHOLDER: &str = "https://placehold.co/500x750/333/FFFFFF?text=No+Poster";

    #[tokio::test]
    async fn test_fetch_posters_preserves_order() {
        let mut mock = MockPosterResolver::new();
        mock.expect_fetch_poster()
            .times(3)
            .returning(|id| PosterLookup::found(format!("https://img/{}.jpg", id)));
        mock.expect_placeholder_url().return_const(PLACEHOLDER.to_string());
        mock.expect_name().return_const("mock");

        let resolver: Arc<dyn PosterResolver> = Arc::new(mock);
        let ids = [MovieId(30), MovieId(10), MovieId(20)];
        let results = fetch_posters(resolver, &ids).await;

        let urls: Vec<&str> = results.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://img/30.jpg", "https://img/10.jpg", "https://img/20.jpg"]
        );
    }

    #[tokio::test]
    async fn test_fetch_posters_keeps_failed_lookups() {
        let mut mock = MockPosterResolver::new();
        mock.expect_fetch_poster().returning(|id| {
            if id == MovieId(2) {
                PosterLookup::fallback(PLACEHOLDER, Some("Error fetching poster: timeout".into()))
            } else {
                PosterLookup::found(format!("https://img/{}.jpg", id))
            }
        });
        mock.expect_placeholder_url().return_const(PLACEHOLDER.to_string());
        mock.expect_name().return_const("mock");

        let resolver: Arc<dyn PosterResolver> = Arc::new(mock);
        let results = fetch_posters(resolver, &[MovieId(1), MovieId(2), MovieId(3)]).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[1].url, PLACEHOLDER);
        assert!(results[1].warning.is_some());
        assert!(results[0].warning.is_none());
        assert!(results[2].warning.is_none());
    }

    #[tokio::test]
    async fn test_fetch_posters_empty() {
        let mut mock = MockPosterResolver::new();
        mock.expect_fetch_poster().never();
        mock.expect_name().return_const("mock");

        let resolver: Arc<dyn PosterResolver> = Arc::new(mock);
        assert!(fetch_posters(resolver, &[]).await.is_empty());
    }
}

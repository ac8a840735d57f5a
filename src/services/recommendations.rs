use std::cmp::Ordering;
use std::sync::Arc;

use crate::{
    data::{Catalog, SimilarityMatrix},
    error::{AppError, AppResult},
    models::{CatalogEntry, MovieId, Recommendation, Recommendations},
    services::providers::{fetch_posters, PosterResolver},
};

/// Number of recommendations returned per request
pub const TOP_K: usize = 5;

/// Content-based recommender over a precomputed similarity matrix
///
/// Catalog and matrix are loaded once at startup and shared read-only.
/// Rows of the matrix are indexed by catalog position.
pub struct Recommender {
    catalog: Arc<Catalog>,
    similarity: Arc<SimilarityMatrix>,
    posters: Arc<dyn PosterResolver>,
}

impl Recommender {
    pub fn new(
        catalog: Arc<Catalog>,
        similarity: Arc<SimilarityMatrix>,
        posters: Arc<dyn PosterResolver>,
    ) -> Self {
        Self {
            catalog,
            similarity,
            posters,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Recommends the `TOP_K` movies most similar to `title`
    ///
    /// Returns `AppError::NotFound` when `title` is not an exact catalog
    /// title; no poster lookups are made in that case. Poster failures never
    /// fail the request: the movie is kept with the placeholder image and the
    /// failure is reported in `warnings`.
    pub async fn recommend(&self, title: &str) -> AppResult<Recommendations> {
        let index = self.catalog.index_of(title).inspect_err(|_| {
            tracing::info!(title = %title, "Selected title not in catalog");
        })?;

        let row = self.similarity.row(index).ok_or_else(|| {
            AppError::Internal(format!("no similarity row for catalog index {}", index))
        })?;

        let candidates: Vec<(&CatalogEntry, f32)> = rank(row, index, TOP_K)
            .into_iter()
            .filter_map(|(j, score)| self.catalog.entry(j).map(|entry| (entry, score)))
            .collect();

        tracing::debug!(
            title = %title,
            index = index,
            candidates = candidates.len(),
            "Ranked similarity row"
        );

        let movie_ids: Vec<MovieId> = candidates.iter().map(|(entry, _)| entry.movie_id).collect();
        let posters = fetch_posters(Arc::clone(&self.posters), &movie_ids).await;

        let mut warnings = Vec::new();
        let recommendations: Vec<Recommendation> = candidates
            .into_iter()
            .zip(posters)
            .map(|((entry, score), lookup)| {
                if let Some(warning) = lookup.warning {
                    warnings.push(warning);
                }
                Recommendation::new(entry, score, lookup.url)
            })
            .collect();

        tracing::info!(
            title = %title,
            results = recommendations.len(),
            warnings = warnings.len(),
            "Recommendations computed"
        );

        Ok(Recommendations {
            selected: title.to_string(),
            recommendations,
            warnings,
        })
    }
}

/// Ranks a similarity row, best first, and keeps the top `k`
///
/// The sort is stable, so equal scores keep their column order. The queried
/// movie is excluded by index rather than by position, so it is dropped even
/// when another movie scores as high as (or higher than) its self-similarity.
pub fn rank(row: &[f32], exclude: usize, k: usize) -> Vec<(usize, f32)> {
    let mut scored: Vec<(usize, f32)> = row.iter().copied().enumerate().collect();
    // Scores are finite (checked at load), so only -0.0 vs 0.0 compare equal here
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    scored
        .into_iter()
        .filter(|&(j, _)| j != exclude)
        .take(k)
        .collect()
}

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Placeholder shown for fields the catalog has no data for
pub const NOT_AVAILABLE: &str = "N/A";

/// TMDB identifier for a movie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u64);

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of the catalog
///
/// `index` is the row and column this movie occupies in the similarity matrix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    pub index: usize,
    pub movie_id: MovieId,
    pub title: String,
}

/// A single recommended movie returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub movie_id: MovieId,
    pub poster_url: String,
    pub year: String,
    pub rating: String,
    pub score: f32,
}

impl Recommendation {
    pub fn new(entry: &CatalogEntry, score: f32, poster_url: String) -> Self {
        Self {
            title: entry.title.clone(),
            movie_id: entry.movie_id,
            poster_url,
            year: NOT_AVAILABLE.to_string(),
            rating: NOT_AVAILABLE.to_string(),
            score,
        }
    }
}

/// Response for a recommendation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendations {
    /// Title the recommendations were computed for
    pub selected: String,
    /// Most similar movies, best match first
    pub recommendations: Vec<Recommendation>,
    /// Non-fatal problems hit while resolving posters
    pub warnings: Vec<String>,
}

/// Outcome of a poster lookup. Always carries a usable URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterLookup {
    pub url: String,
    /// Set when the lookup failed and `url` is the placeholder
    pub warning: Option<String>,
}

impl PosterLookup {
    pub fn found(url: String) -> Self {
        Self { url, warning: None }
    }

    pub fn fallback(placeholder: &str, warning: Option<String>) -> Self {
        Self {
            url: placeholder.to_string(),
            warning,
        }
    }
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Subset of the TMDB `GET /movie/{id}` response we care about
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub poster_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_id_display() {
        assert_eq!(format!("{}", MovieId(19995)), "19995");
    }

    #[test]
    fn test_movie_id_serializes_as_number() {
        let json = serde_json::to_string(&MovieId(285)).unwrap();
        assert_eq!(json, "285");
    }

    #[test]
    fn test_recommendation_uses_placeholders() {
        let entry = CatalogEntry {
            index: 3,
            movie_id: MovieId(206647),
            title: "Spectre".to_string(),
        };

        let rec = Recommendation::new(&entry, 0.42, "https://img/p.jpg".to_string());
        assert_eq!(rec.title, "Spectre");
        assert_eq!(rec.movie_id, MovieId(206647));
        assert_eq!(rec.year, "N/A");
        assert_eq!(rec.rating, "N/A");
        assert_eq!(rec.poster_url, "https://img/p.jpg");
    }

    #[test]
    fn test_tmdb_details_deserialization() {
        let json = r#"{
            "id": 19995,
            "title": "Avatar",
            "poster_path": "/kyeqWdyUXW608qlYkRqosgbbJyK.jpg"
        }"#;

        let details: TmdbMovieDetails = serde_json::from_str(json).unwrap();
        assert_eq!(
            details.poster_path,
            Some("/kyeqWdyUXW608qlYkRqosgbbJyK.jpg".to_string())
        );
    }

    #[test]
    fn test_tmdb_details_null_or_missing_poster() {
        let null: TmdbMovieDetails = serde_json::from_str(r#"{"poster_path": null}"#).unwrap();
        assert_eq!(null.poster_path, None);

        let missing: TmdbMovieDetails = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(missing.poster_path, None);
    }

    #[test]
    fn test_poster_lookup_fallback() {
        let lookup = PosterLookup::fallback("https://placeholder", Some("boom".to_string()));
        assert_eq!(lookup.url, "https://placeholder");
        assert_eq!(lookup.warning.as_deref(), Some("boom"));
    }
}

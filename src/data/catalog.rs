/// Movie catalog
///
/// The catalog artifact is exported as parallel column maps keyed by row
/// position (`{"movie_id": {"0": ..}, "title": {"0": ..}}`). It is converted
/// once at load time into an ordered table of `CatalogEntry` records.
use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{CatalogEntry, MovieId},
};

/// Message shown when a selected title is not in the catalog
pub const TITLE_NOT_FOUND: &str = "Movie not found in the dataset. Please select another one.";

#[derive(Debug, Deserialize)]
struct RawCatalog {
    movie_id: HashMap<String, u64>,
    title: HashMap<String, String>,
}

/// Immutable table of recommendable movies in artifact order
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Loads the catalog artifact from disk
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let contents = super::read_artifact(path)?;
        let catalog = Self::from_json(&contents)?;

        tracing::info!(
            path = %path.display(),
            movies = catalog.len(),
            "Loaded catalog artifact"
        );

        Ok(catalog)
    }

    /// Parses the column-map representation of the catalog
    pub fn from_json(contents: &str) -> AppResult<Self> {
        let raw: RawCatalog = serde_json::from_str(contents)
            .map_err(|e| AppError::InvalidArtifact(format!("catalog: {}", e)))?;

        if raw.movie_id.len() != raw.title.len() {
            return Err(AppError::InvalidArtifact(format!(
                "catalog: {} movie ids but {} titles",
                raw.movie_id.len(),
                raw.title.len()
            )));
        }

        let len = raw.title.len();
        let mut movie_ids: Vec<Option<u64>> = vec![None; len];
        let mut titles: Vec<Option<String>> = vec![None; len];

        for (key, id) in raw.movie_id {
            let index = parse_row_key(&key, len)?;
            movie_ids[index] = Some(id);
        }
        for (key, title) in raw.title {
            let index = parse_row_key(&key, len)?;
            titles[index] = Some(title);
        }

        let entries = movie_ids
            .into_iter()
            .zip(titles)
            .enumerate()
            .map(|(index, pair)| match pair {
                (Some(id), Some(title)) => Ok(CatalogEntry {
                    index,
                    movie_id: MovieId(id),
                    title,
                }),
                _ => Err(AppError::InvalidArtifact(format!(
                    "catalog: row {} is missing a movie id or title",
                    index
                ))),
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self { entries })
    }

    /// Builds a catalog from `(movie_id, title)` pairs in row order
    pub fn from_rows<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = (u64, S)>,
        S: Into<String>,
    {
        let entries = rows
            .into_iter()
            .enumerate()
            .map(|(index, (id, title))| CatalogEntry {
                index,
                movie_id: MovieId(id),
                title: title.into(),
            })
            .collect();

        Self { entries }
    }

    /// Returns the index of the first movie whose title equals `title` exactly
    pub fn index_of(&self, title: &str) -> AppResult<usize> {
        self.entries
            .iter()
            .position(|entry| entry.title == title)
            .ok_or_else(|| AppError::NotFound(TITLE_NOT_FOUND.to_string()))
    }

    /// Titles in artifact order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.title.as_str())
    }

    pub fn entry(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_row_key(key: &str, len: usize) -> AppResult<usize> {
    match key.parse::<usize>() {
        Ok(index) if index < len => Ok(index),
        _ => Err(AppError::InvalidArtifact(format!(
            "catalog: row key {:?} is not in 0..{}",
            key, len
        ))),
    }
}

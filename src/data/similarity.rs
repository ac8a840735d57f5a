use std::path::Path;

use crate::error::{AppError, AppResult};

/// Precomputed pairwise similarity scores between catalog movies
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    rows: Vec<Vec<f32>>,
}

impl SimilarityMatrix {
    /// Loads the similarity artifact (a JSON array of rows) from disk
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let contents = super::read_artifact(path)?;
        let rows: Vec<Vec<f32>> = serde_json::from_str(&contents)
            .map_err(|e| AppError::InvalidArtifact(format!("similarity: {}", e)))?;
        let matrix = Self::new(rows)?;

        tracing::info!(
            path = %path.display(),
            dimension = matrix.len(),
            "Loaded similarity artifact"
        );

        Ok(matrix)
    }

    /// Wraps `rows`, rejecting anything that is not a square matrix of finite scores
    pub fn new(rows: Vec<Vec<f32>>) -> AppResult<Self> {
        let n = rows.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(AppError::InvalidArtifact(format!(
                    "similarity: row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            if let Some(j) = row.iter().position(|score| !score.is_finite()) {
                return Err(AppError::InvalidArtifact(format!(
                    "similarity: score at ({}, {}) is not finite",
                    i, j
                )));
            }
        }

        Ok(Self { rows })
    }

    /// Scores of movie `index` against every movie, in column order
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

use std::io::ErrorKind;
use std::path::Path;

use crate::error::{AppError, AppResult};

pub mod catalog;
pub mod similarity;

pub use catalog::Catalog;
pub use similarity::SimilarityMatrix;

/// Reads an artifact file into memory
///
/// A missing file is reported as `ArtifactMissing` so startup can tell the
/// operator which artifact to generate.
fn read_artifact(path: &Path) -> AppResult<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AppError::ArtifactMissing(path.to_path_buf()),
        _ => AppError::InvalidArtifact(format!("{}: {}", path.display(), e)),
    })
}

/// Loads both artifacts and checks they describe the same movies
pub fn load_artifacts(
    catalog_path: impl AsRef<Path>,
    similarity_path: impl AsRef<Path>,
) -> AppResult<(Catalog, SimilarityMatrix)> {
    let catalog = Catalog::load(catalog_path)?;
    let similarity = SimilarityMatrix::load(similarity_path)?;

    if catalog.len() != similarity.len() {
        return Err(AppError::InvalidArtifact(format!(
            "catalog has {} movies but similarity matrix is {}x{}",
            catalog.len(),
            similarity.len(),
            similarity.len()
        )));
    }

    Ok((catalog, similarity))
}

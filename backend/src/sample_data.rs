//! Optional startup seeding of the sample catalogue.

use serde_json::Value;
use tracing::info;

use crate::domain::ports::{EbookRepository, EbookRepositoryError};
use crate::domain::{Ebook, Error, validate_new_ebook};

const SAMPLE_EBOOKS: &str = include_str!("../data/sample_ebooks.json");

/// Errors returned while loading or storing the sample catalogue.
#[derive(Debug, thiserror::Error)]
pub enum SampleDataError {
    #[error("sample catalogue is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("sample ebook at index {index} failed validation: {source}")]
    Invalid {
        index: usize,
        #[source]
        source: Error,
    },
    #[error("failed to store sample ebook: {0}")]
    Store(#[from] EbookRepositoryError),
}

/// The bundled sample records, checked against the add-ebook schema.
pub fn sample_ebooks() -> Result<Vec<Ebook>, SampleDataError> {
    let raw: Vec<Value> = serde_json::from_str(SAMPLE_EBOOKS)?;
    raw.iter()
        .enumerate()
        .map(|(index, value)| {
            validate_new_ebook(value).map_err(|source| SampleDataError::Invalid { index, source })
        })
        .collect()
}

/// Upsert the sample records into `repo`, returning how many were written.
///
/// Existing records with the same ids are replaced, so repeated runs leave
/// the store in the same state.
pub async fn seed_sample_data<R>(repo: &R) -> Result<usize, SampleDataError>
where
    R: EbookRepository + ?Sized,
{
    let ebooks = sample_ebooks()?;
    for ebook in &ebooks {
        repo.put(ebook).await?;
    }
    info!(count = ebooks.len(), "sample catalogue seeded");
    Ok(ebooks.len())
}

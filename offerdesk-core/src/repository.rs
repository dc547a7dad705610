use async_trait::async_trait;
use crate::Offer;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("No offer found with id {0}")]
    NotFound(i32),
    #[error("Offer has no id")]
    MissingId,
    #[error("Storage backend failure: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository trait for offer data access, keyed by offer id.
///
/// Each call is atomic on its own. Nothing spans calls, so a concurrent
/// save and delete on the same id end in whichever state finished last.
#[async_trait]
pub trait OfferRepository: Send + Sync {
    /// All stored offers, in ascending id order.
    async fn find_all(&self) -> RepositoryResult<Vec<Offer>>;

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Offer>>;

    /// Inserts the offer, or overwrites every field of the one stored under the same id.
    async fn save(&self, offer: &Offer) -> RepositoryResult<Offer>;

    /// Fails with [`RepositoryError::NotFound`] when nothing is stored under `id`.
    async fn delete_by_id(&self, id: i32) -> RepositoryResult<()>;

    async fn count(&self) -> RepositoryResult<u64>;
}

use std::sync::Arc;
use offerdesk_core::{Offer, OfferRepository, RepositoryResult};

/// Keeps handlers unaware of the storage technology behind the repository.
#[derive(Clone)]
pub struct OfferService {
    repo: Arc<dyn OfferRepository>,
}

impl OfferService {
    pub fn new(repo: Arc<dyn OfferRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_all(&self) -> RepositoryResult<Vec<Offer>> {
        self.repo.find_all().await
    }

    pub async fn get_by_id(&self, id: i32) -> RepositoryResult<Option<Offer>> {
        self.repo.find_by_id(id).await
    }

    pub async fn save(&self, offer: &Offer) -> RepositoryResult<Offer> {
        self.repo.save(offer).await
    }

    pub async fn delete_by_id(&self, id: i32) -> RepositoryResult<()> {
        self.repo.delete_by_id(id).await
    }
}

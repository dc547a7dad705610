use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use offerdesk_core::{Offer, OfferRepository, RepositoryError, RepositoryResult};

/// Keeps offers in a map keyed by id, for development and tests.
#[derive(Default)]
pub struct InMemoryOfferRepository {
    offers: RwLock<BTreeMap<i32, Offer>>,
}

impl InMemoryOfferRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OfferRepository for InMemoryOfferRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Offer>> {
        Ok(self.offers.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Offer>> {
        Ok(self.offers.read().await.get(&id).cloned())
    }

    async fn save(&self, offer: &Offer) -> RepositoryResult<Offer> {
        let id = offer.id.ok_or(RepositoryError::MissingId)?;
        let replaced = self.offers.write().await.insert(id, offer.clone()).is_some();
        tracing::debug!(offer_id = id, replaced, "Saved offer");
        Ok(offer.clone())
    }

    async fn delete_by_id(&self, id: i32) -> RepositoryResult<()> {
        if self.offers.write().await.remove(&id).is_none() {
            return Err(RepositoryError::NotFound(id));
        }
        tracing::debug!(offer_id = id, "Deleted offer");
        Ok(())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.offers.read().await.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_save_and_update_offer() {
        let repo = InMemoryOfferRepository::new();
        let offer = Offer::default_offer().with_id(1);

        repo.save(&offer).await.unwrap();
        let mut fetched = repo.find_by_id(1).await.unwrap().expect("offer stored");
        assert_eq!(fetched, offer);

        fetched.price = Some(dec!(100));
        fetched.product = "smart".to_string();
        repo.save(&fetched).await.unwrap();

        let updated = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(updated.price, Some(dec!(100)));
        assert_eq!(updated.product, "smart");
        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_replaces_every_field() {
        let repo = InMemoryOfferRepository::new();
        repo.save(&Offer::default_offer().with_id(4)).await.unwrap();

        let replacement = Offer { id: Some(4), product: "bare".to_string(), ..Offer::default() };
        let saved = repo.save(&replacement).await.unwrap();

        assert_eq!(saved, replacement);
        assert_eq!(repo.find_by_id(4).await.unwrap(), Some(replacement));
    }

    #[tokio::test]
    async fn test_find_non_existent_id() {
        let repo = InMemoryOfferRepository::new();
        assert!(repo.find_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_delete_offer() {
        let repo = InMemoryOfferRepository::new();
        repo.save(&Offer::default_offer().with_id(7)).await.unwrap();

        repo.delete_by_id(7).await.unwrap();

        assert!(repo.find_by_id(7).await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_non_existent_id() {
        let repo = InMemoryOfferRepository::new();
        let err = repo.delete_by_id(1000).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(1000)));
    }

    #[tokio::test]
    async fn test_save_without_id() {
        let repo = InMemoryOfferRepository::new();
        let err = repo.save(&Offer::default_offer()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::MissingId));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_find_all_in_id_order() {
        let repo = InMemoryOfferRepository::new();
        for id in [3, 1, 2] {
            repo.save(&Offer::default_offer().with_id(id)).await.unwrap();
        }
        let ids: Vec<_> = repo.find_all().await.unwrap().into_iter().filter_map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_concurrent_saves() {
        let repo = Arc::new(InMemoryOfferRepository::new());
        let tasks: Vec<_> = (1..=50)
            .map(|id| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.save(&Offer::default_offer().with_id(id)).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }
        assert_eq!(repo.count().await.unwrap(), 50);
    }
}

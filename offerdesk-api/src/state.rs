use std::sync::Arc;
use offerdesk_core::{IdGenerator, OfferRepository};

use crate::service::OfferService;

#[derive(Clone)]
pub struct AppState {
    pub offers: OfferService,
    pub ids: Arc<IdGenerator>,
}

impl AppState {
    pub fn new(repo: Arc<dyn OfferRepository>) -> Self {
        Self {
            offers: OfferService::new(repo),
            ids: Arc::new(IdGenerator::new()),
        }
    }
}

pub mod offer;
pub mod validation;
pub mod repository;
pub mod identity;

pub use offer::Offer;
pub use identity::IdGenerator;
pub use repository::{OfferRepository, RepositoryError, RepositoryResult};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Offer is invalid: {0}")]
    Validation(String),
    #[error("Invalid id {0}")]
    InvalidIdentifier(i32),
    #[error("No offer found with id {0}")]
    NotFound(i32),
}

pub type CoreResult<T> = Result<T, CoreError>;

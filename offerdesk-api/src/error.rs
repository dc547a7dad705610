use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use offerdesk_core::{CoreError, RepositoryError};

/// Request failures. Everything a client can cause is a 400 with a plain-text reason.
#[derive(Debug)]
pub enum AppError {
    InvalidOffer,
    InvalidId(i32),
    NotFound(i32),
    DeleteFailed(i32),
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidOffer => (StatusCode::BAD_REQUEST, "Offer is invalid".to_string()),
            AppError::InvalidId(id) => (StatusCode::BAD_REQUEST, format!("Invalid id {}", id)),
            AppError::NotFound(id) => (StatusCode::BAD_REQUEST, format!("No offer found with id {}", id)),
            AppError::DeleteFailed(id) => {
                (StatusCode::BAD_REQUEST, format!("Problem to delete offer with id {}", id))
            }
            AppError::Internal(err) => {
                tracing::error!("Internal Server Error: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        (status, message).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(reason) => {
                tracing::debug!("Offer rejected: {}", reason);
                AppError::InvalidOffer
            }
            CoreError::InvalidIdentifier(id) => AppError::InvalidId(id),
            CoreError::NotFound(id) => AppError::NotFound(id),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => AppError::NotFound(id),
            other => AppError::Internal(anyhow::Error::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: AppError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_client_errors_are_bad_requests() {
        assert_eq!(
            render(AppError::InvalidOffer).await,
            (StatusCode::BAD_REQUEST, "Offer is invalid".to_string())
        );
        assert_eq!(
            render(AppError::InvalidId(-1)).await,
            (StatusCode::BAD_REQUEST, "Invalid id -1".to_string())
        );
        assert_eq!(
            render(AppError::NotFound(5)).await,
            (StatusCode::BAD_REQUEST, "No offer found with id 5".to_string())
        );
        assert_eq!(
            render(AppError::DeleteFailed(1000)).await,
            (StatusCode::BAD_REQUEST, "Problem to delete offer with id 1000".to_string())
        );
    }

    #[tokio::test]
    async fn test_backend_failure_is_hidden() {
        let err: AppError = RepositoryError::backend(std::io::Error::other("connection reset")).into();
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Internal Server Error");
    }

    #[test]
    fn test_core_errors_convert() {
        assert!(matches!(AppError::from(CoreError::InvalidIdentifier(0)), AppError::InvalidId(0)));
        assert!(matches!(AppError::from(CoreError::Validation("price".into())), AppError::InvalidOffer));
        assert!(matches!(AppError::from(RepositoryError::NotFound(3)), AppError::NotFound(3)));
    }
}

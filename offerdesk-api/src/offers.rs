use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use offerdesk_core::{validation, CoreError, Offer, RepositoryError};

use crate::{error::AppError, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct OfferListResponse {
    pub offers: Vec<Offer>,
    pub count: usize,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/offer", post(add_offer))
        .route("/offer/{id}", get(get_offer).put(update_offer).delete(delete_offer))
        .route("/offers", get(list_offers))
}

fn read_body(payload: Result<Json<Offer>, JsonRejection>) -> Result<Offer, AppError> {
    payload.map(|Json(offer)| offer).map_err(|rejection| {
        tracing::info!("Unreadable offer body: {}", rejection.body_text());
        AppError::InvalidOffer
    })
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /offer
/// Answers 200 rather than 201 on success.
pub async fn add_offer(
    State(state): State<AppState>,
    payload: Result<Json<Offer>, JsonRejection>,
) -> Result<Json<Offer>, AppError> {
    let mut offer = read_body(payload)?;
    validation::validate(&offer)?;

    offer.id = Some(state.ids.next_id());
    let saved = state.offers.save(&offer).await?;

    tracing::info!(offer_id = ?saved.id, "Offer created");
    Ok(Json(saved))
}

/// PUT /offer/{id}
///
/// The path id is only used to check that some offer exists; the body is
/// stored under its own id, which is never compared to the path.
pub async fn update_offer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<Offer>, JsonRejection>,
) -> Result<Json<Offer>, AppError> {
    let id = validation::check_id(id)?;
    let offer = read_body(payload)?;
    if !offer.is_storable() {
        return Err(AppError::InvalidOffer);
    }

    state
        .offers
        .get_by_id(id)
        .await?
        .ok_or(CoreError::NotFound(id))?;

    let saved = state.offers.save(&offer).await?;
    Ok(Json(saved))
}

/// GET /offer/{id}
pub async fn get_offer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Offer>, AppError> {
    let id = validation::check_id(id)?;
    let offer = state
        .offers
        .get_by_id(id)
        .await?
        .ok_or(CoreError::NotFound(id))?;

    Ok(Json(offer))
}

/// DELETE /offer/{id}
pub async fn delete_offer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<String, AppError> {
    let id = validation::check_id(id)?;
    match state.offers.delete_by_id(id).await {
        Ok(()) => Ok(format!("Offer with id {} deleted successfully", id)),
        Err(RepositoryError::NotFound(_)) => Err(AppError::DeleteFailed(id)),
        Err(err) => Err(err.into()),
    }
}

/// GET /offers
pub async fn list_offers(State(state): State<AppState>) -> Result<Json<OfferListResponse>, AppError> {
    let offers = state.offers.list_all().await?;
    let count = offers.len();
    Ok(Json(OfferListResponse { offers, count }))
}

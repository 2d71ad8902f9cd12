//! Customer Handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::dto::{customer_saved_message, CustomerDto, CustomerView};
use crate::application::services::CustomerError;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// Register a customer
pub async fn save_customer(
    State(state): State<AppState>,
    payload: Result<Json<CustomerDto>, JsonRejection>,
) -> Result<(StatusCode, String), AppError> {
    let Json(body) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    body.validate().map_err(validation_error)?;

    let customer = state
        .customer_service
        .save(body)
        .await
        .map_err(|e| match e {
            CustomerError::AlreadyRegistered => {
                AppError::Conflict("CPF or email already registered".into())
            }
            e => AppError::Internal(e.to_string()),
        })?;

    Ok((StatusCode::CREATED, customer_saved_message(&customer)))
}

/// Get customer by ID
pub async fn find_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<CustomerView>, AppError> {
    let customer_id: i64 = customer_id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid customer ID".into()))?;

    let customer = state
        .customer_service
        .find_by_id(customer_id)
        .await
        .map_err(|e| match e {
            CustomerError::NotFound(id) => AppError::NotFound(format!("Customer {} not found", id)),
            e => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(CustomerView::from(customer)))
}

//! Credit Handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::application::dto::{
    credit_saved_message, CreditDto, CreditView, CreditViewList, CustomerIdQuery,
};
use crate::application::services::CreditError;
use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

impl From<CreditError> for AppError {
    fn from(e: CreditError) -> Self {
        match e {
            CreditError::CustomerNotFound(id) => {
                AppError::NotFound(format!("Customer {} not found", id))
            }
            CreditError::CreditNotFound(code) => {
                AppError::NotFound(format!("Credit code {} not found", code))
            }
            CreditError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Apply for a credit
pub async fn save_credit(
    State(state): State<AppState>,
    payload: Result<Json<CreditDto>, JsonRejection>,
) -> Result<(StatusCode, String), AppError> {
    let Json(body) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    // Validate request
    body.validate().map_err(validation_error)?;

    let credit = body
        .to_entity()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let saved = state.credit_service.save(credit).await?;
    metrics::record_credit_created();

    Ok((StatusCode::CREATED, credit_saved_message(&saved)))
}

/// Unwrap the owner query, reporting a missing or malformed `customerId` as JSON
fn customer_query(
    query: Result<Query<CustomerIdQuery>, QueryRejection>,
) -> Result<CustomerIdQuery, AppError> {
    query
        .map(|Query(query)| query)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

/// List the credits of a customer
pub async fn find_all_by_customer_id(
    State(state): State<AppState>,
    query: Result<Query<CustomerIdQuery>, QueryRejection>,
) -> Result<Json<Vec<CreditViewList>>, AppError> {
    let query = customer_query(query)?;

    let credits = state
        .credit_service
        .find_all_by_customer(query.customer_id)
        .await?;

    let views: Vec<CreditViewList> = credits.into_iter().map(CreditViewList::from).collect();

    Ok(Json(views))
}

/// Get a credit by code, scoped to its owner
pub async fn find_by_credit_code(
    State(state): State<AppState>,
    Path(credit_code): Path<String>,
    query: Result<Query<CustomerIdQuery>, QueryRejection>,
) -> Result<Json<CreditView>, AppError> {
    let credit_code: Uuid = credit_code
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid credit code".into()))?;
    let query = customer_query(query)?;

    let credit = state
        .credit_service
        .find_by_credit_code(query.customer_id, credit_code)
        .await?;

    Ok(Json(CreditView::from(credit)))
}

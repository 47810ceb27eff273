use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::documents::ProfileDocument;
use super::domain::{ProgramId, UserId};
use super::listing::ListingQuery;
use super::repository::{CatalogStore, ProfileStore, StoreError};
use super::service::{EligibilityService, EligibilityServiceError};

/// Router builder exposing catalog browsing, profile storage, and eligibility checks.
pub fn eligibility_router<P, C>(service: Arc<EligibilityService<P, C>>) -> Router
where
    P: ProfileStore + 'static,
    C: CatalogStore + 'static,
{
    Router::new()
        .route("/api/v1/programs", get(list_programs_handler::<P, C>))
        .route(
            "/api/v1/programs/:program_id",
            get(program_handler::<P, C>),
        )
        .route(
            "/api/v1/profiles/:user_id",
            get(profile_handler::<P, C>).put(save_profile_handler::<P, C>),
        )
        .route(
            "/api/v1/profiles/:user_id/eligibility",
            get(eligibility_handler::<P, C>),
        )
        .route("/api/v1/eligibility/check", post(check_handler::<P, C>))
        .with_state(service)
}

pub(crate) async fn list_programs_handler<P, C>(
    State(service): State<Arc<EligibilityService<P, C>>>,
    Query(query): Query<ListingQuery>,
) -> Response
where
    P: ProfileStore + 'static,
    C: CatalogStore + 'static,
{
    match service.browse(&query) {
        Ok(programs) => (StatusCode::OK, axum::Json(programs)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn program_handler<P, C>(
    State(service): State<Arc<EligibilityService<P, C>>>,
    Path(program_id): Path<String>,
) -> Response
where
    P: ProfileStore + 'static,
    C: CatalogStore + 'static,
{
    match service.program(&ProgramId(program_id)) {
        Ok(program) => (StatusCode::OK, axum::Json(program)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn save_profile_handler<P, C>(
    State(service): State<Arc<EligibilityService<P, C>>>,
    Path(user_id): Path<String>,
    axum::Json(document): axum::Json<ProfileDocument>,
) -> Response
where
    P: ProfileStore + 'static,
    C: CatalogStore + 'static,
{
    match service.save_profile(UserId(user_id), document) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn profile_handler<P, C>(
    State(service): State<Arc<EligibilityService<P, C>>>,
    Path(user_id): Path<String>,
) -> Response
where
    P: ProfileStore + 'static,
    C: CatalogStore + 'static,
{
    match service.profile(&UserId(user_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn eligibility_handler<P, C>(
    State(service): State<Arc<EligibilityService<P, C>>>,
    Path(user_id): Path<String>,
) -> Response
where
    P: ProfileStore + 'static,
    C: CatalogStore + 'static,
{
    match service.eligibility_for(&UserId(user_id)) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn check_handler<P, C>(
    State(service): State<Arc<EligibilityService<P, C>>>,
    axum::Json(document): axum::Json<ProfileDocument>,
) -> Response
where
    P: ProfileStore + 'static,
    C: CatalogStore + 'static,
{
    let profile = document.to_profile();
    match service.check(&profile) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: EligibilityServiceError) -> Response {
    let status = match &error {
        EligibilityServiceError::ProfileNotFound(_)
        | EligibilityServiceError::ProgramNotFound(_) => StatusCode::NOT_FOUND,
        EligibilityServiceError::Store(StoreError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

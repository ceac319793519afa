//! Content and auth endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::error::ApiError;
use super::AppState;
use crate::auth::LoginRequest;
use crate::content::{select_for_audience, shuffle, Audience, ContentItem, ContentPatch, NewContent};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(rename = "type")]
    audience: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContentResponse {
    success: bool,
    content: ContentItem,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    success: bool,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    success: bool,
    authenticated: bool,
}

fn bad_query(rejection: QueryRejection) -> ApiError {
    ApiError::ValidationMissing(rejection.body_text())
}

fn bad_body(rejection: JsonRejection) -> ApiError {
    ApiError::ValidationMissing(rejection.body_text())
}

/// Required id: present and not blank
fn required_id(id: Option<String>) -> Result<String, ApiError> {
    id.filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::ValidationMissing("ID is required".to_string()))
}

/// `GET /content?type=couple|friends`
pub async fn list_content(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<ContentItem>>, ApiError> {
    let Query(params) = params.map_err(bad_query)?;

    let audience = match params.audience.filter(|t| !t.is_empty()) {
        Some(t) => Some(t.parse::<Audience>().map_err(ApiError::ValidationMissing)?),
        None => None,
    };

    let items = state.store.list_all()?;
    let items = match audience {
        Some(audience) => select_for_audience(audience, items),
        None => shuffle(items),
    };

    tracing::debug!("Serving {} content items", items.len());
    Ok(Json(items))
}

/// `POST /content`
pub async fn create_content(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewContent>, JsonRejection>,
) -> Result<Json<ContentResponse>, ApiError> {
    let Json(new) = payload.map_err(bad_body)?;
    let created = state.store.create(new.into_item())?;
    tracing::info!("Created content {} ({})", created.id, created.title);
    Ok(Json(ContentResponse {
        success: true,
        content: created,
    }))
}

/// `PUT /content` with `{id, ...fields}`
pub async fn update_content(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContentPatch>, JsonRejection>,
) -> Result<Json<ContentResponse>, ApiError> {
    let Json(mut patch) = payload.map_err(bad_body)?;
    let id = required_id(patch.id.take())?;

    let updated = state.store.update(&id, patch)?.ok_or(ApiError::NotFound)?;
    tracing::info!("Updated content {}", id);
    Ok(Json(ContentResponse {
        success: true,
        content: updated,
    }))
}

/// `DELETE /content?id=...`
pub async fn delete_content(
    State(state): State<Arc<AppState>>,
    params: Result<Query<DeleteParams>, QueryRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Query(params) = params.map_err(bad_query)?;
    let id = required_id(params.id)?;

    if !state.store.delete(&id)? {
        return Err(ApiError::NotFound);
    }
    tracing::info!("Deleted content {}", id);
    Ok(Json(SuccessResponse { success: true }))
}

/// `POST /auth`
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(login) = payload.map_err(bad_body)?;

    if state.auth.verify(&login) {
        tracing::info!("Admin login succeeded");
        Ok(Json(AuthResponse {
            success: true,
            authenticated: true,
        }))
    } else {
        tracing::warn!("Admin login rejected");
        Err(ApiError::AuthMismatch)
    }
}

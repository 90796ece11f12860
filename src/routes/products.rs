//! Product and supplier REST routes.
//!
//! Every handler requires an [`AuthUser`]. Saves kick off a detached
//! notification task when a mailer is configured.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use stockroom_client::net::types::{Product, ProductInput, Supplier};
use tokio::task::JoinHandle;

use super::auth::AuthUser;
use crate::services::notify::{self, ProductEvent};
use crate::services::product::{self, ProductError};
use crate::services::supplier;
use crate::state::AppState;

pub(crate) fn product_error_to_status(err: &ProductError) -> StatusCode {
    match err {
        ProductError::NotFound | ProductError::NoImage => StatusCode::NOT_FOUND,
        ProductError::Invalid(_) | ProductError::UnknownSupplier => StatusCode::BAD_REQUEST,
        ProductError::DuplicateSku => StatusCode::CONFLICT,
        ProductError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let status = product_error_to_status(&self);
        if status.is_server_error() {
            tracing::error!(error = %self, "product request failed");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// Start the detached notification task. `None` when mail is not configured.
fn spawn_notification(state: &AppState, event: ProductEvent, product: Product) -> Option<JoinHandle<()>> {
    let Some(mailer) = state.mailer.clone() else {
        tracing::debug!(product_id = product.id, ?event, "mail not configured; skipping notification");
        return None;
    };
    let pool = state.pool.clone();
    Some(tokio::spawn(async move {
        if let Err(e) = notify::notify_product_saved(&pool, mailer.as_ref(), event, &product).await {
            tracing::warn!(error = %e, product_id = product.id, ?event, "product notification failed");
        }
    }))
}

/// `GET /api/products`
pub async fn list_products(State(state): State<AppState>, _auth: AuthUser) -> Result<Json<Vec<Product>>, ProductError> {
    Ok(Json(product::list_products(&state.pool).await?))
}

/// `POST /api/products`
pub async fn create_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>), ProductError> {
    let created = product::create_product(&state.pool, &input).await?;
    tracing::info!(product_id = created.id, sku = %created.sku, user_id = auth.user.id, "product created");
    let _ = spawn_notification(&state, ProductEvent::Created, created.clone());
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/products/{id}`
pub async fn get_product(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(product_id): Path<i64>,
) -> Result<Json<Product>, ProductError> {
    Ok(Json(product::get_product(&state.pool, product_id).await?))
}

/// `PUT /api/products/{id}`
pub async fn update_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(product_id): Path<i64>,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>, ProductError> {
    let updated = product::update_product(&state.pool, product_id, &input).await?;
    tracing::info!(product_id, user_id = auth.user.id, "product updated");
    let _ = spawn_notification(&state, ProductEvent::Updated, updated.clone());
    Ok(Json(updated))
}

/// `GET /api/products/{id}/image`: raw bytes with the stored content type.
pub async fn get_product_image(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(product_id): Path<i64>,
) -> Result<Response, ProductError> {
    let (bytes, content_type) = product::get_product_image(&state.pool, product_id).await?;
    Ok((
        [(header::CONTENT_TYPE, content_type), (header::CACHE_CONTROL, "private, no-store".to_owned())],
        bytes,
    )
        .into_response())
}

/// `PUT /api/products/{id}/image`: replace the image with the request body.
pub async fn put_product_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(product_id): Path<i64>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Product>, ProductError> {
    let content_type = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok());
    let updated = product::set_product_image(&state.pool, product_id, &body, content_type).await?;
    tracing::info!(product_id, bytes = body.len(), user_id = auth.user.id, "product image replaced");
    Ok(Json(updated))
}

/// `GET /api/suppliers`
pub async fn list_suppliers(State(state): State<AppState>, _auth: AuthUser) -> Result<Json<Vec<Supplier>>, StatusCode> {
    supplier::list_suppliers(&state.pool).await.map(Json).map_err(|e| {
        tracing::error!(error = %e, "supplier list failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

#[cfg(test)]
#[path = "products_test.rs"]
mod tests;

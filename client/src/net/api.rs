//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`Result` outputs instead of panics so auth, product
//! and image fetch failures degrade UI behavior without crashing hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{ImagePayload, Product, ProductInput, Supplier, User};
#[cfg(feature = "hydrate")]
use serde::Deserialize;

#[cfg(any(test, feature = "hydrate"))]
const PRODUCTS_ENDPOINT: &str = "/api/products";

#[cfg(any(test, feature = "hydrate"))]
const SUPPLIERS_ENDPOINT: &str = "/api/suppliers";

#[cfg(any(test, feature = "hydrate"))]
fn product_endpoint(product_id: i64) -> String {
    format!("{PRODUCTS_ENDPOINT}/{product_id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn product_image_endpoint(product_id: i64) -> String {
    format!("{PRODUCTS_ENDPOINT}/{product_id}/image")
}

#[cfg(any(test, feature = "hydrate"))]
fn request_failed_message(what: &str, status: u16) -> String {
    format!("{what} failed: {status}")
}

/// Fetch the currently authenticated user from `/api/auth/me`.
/// Returns `None` if not authenticated or on the server.
pub async fn fetch_current_user() -> Option<User> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/auth/me")
            .send()
            .await
            .ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<User>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Log out the current user by calling `POST /api/auth/logout`.
pub async fn logout() {
    #[cfg(feature = "hydrate")]
    {
        let _ = gloo_net::http::Request::post("/api/auth/logout")
            .send()
            .await;
    }
}

#[cfg(feature = "hydrate")]
#[derive(Debug, Deserialize)]
struct RequestEmailCodeResponse {
    ok: bool,
    code: Option<String>,
}

/// Request a 6-character email login code via `POST /api/auth/email/request-code`.
///
/// Returns an optional code string when the server is configured to echo codes.
///
/// # Errors
///
/// Returns an error string if the HTTP request fails or the server responds with a non-OK status.
pub async fn request_email_login_code(email: &str) -> Result<Option<String>, String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "email": email });
        let resp = gloo_net::http::Request::post("/api/auth/email/request-code")
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("request code", resp.status()));
        }
        let body: RequestEmailCodeResponse = resp.json().await.map_err(|e| e.to_string())?;
        if !body.ok {
            return Err("request code failed".to_owned());
        }
        Ok(body.code)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = email;
        Err("not available on server".to_owned())
    }
}

/// Verify an email login code via `POST /api/auth/email/verify-code`.
/// On success the server sets the session cookie.
///
/// # Errors
///
/// Returns an error string if the HTTP request fails or the code is rejected.
pub async fn verify_email_login_code(email: &str, code: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "email": email, "code": code });
        let resp = gloo_net::http::Request::post("/api/auth/email/verify-code")
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("verify code", resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, code);
        Err("not available on server".to_owned())
    }
}

/// Fetch all products via `GET /api/products`.
///
/// # Errors
///
/// Returns an error string on transport failure, non-OK status, or a body
/// that does not decode as a product list.
pub async fn get_products() -> Result<Vec<Product>, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(PRODUCTS_ENDPOINT)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("product list", resp.status()));
        }
        resp.json::<Vec<Product>>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}

/// Fetch the supplier list via `GET /api/suppliers`.
///
/// # Errors
///
/// Returns an error string on transport failure, non-OK status, or an
/// undecodable body.
pub async fn get_suppliers() -> Result<Vec<Supplier>, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(SUPPLIERS_ENDPOINT)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("supplier list", resp.status()));
        }
        resp.json::<Vec<Supplier>>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}

/// Create (`POST /api/products`) or update (`PUT /api/products/{id}`) a product.
///
/// # Errors
///
/// Returns an error string if the request fails or the server rejects the input.
pub async fn save_product(product_id: Option<i64>, input: &ProductInput) -> Result<Product, String> {
    #[cfg(feature = "hydrate")]
    {
        let request = match product_id {
            Some(id) => gloo_net::http::Request::put(&product_endpoint(id)),
            None => gloo_net::http::Request::post(PRODUCTS_ENDPOINT),
        };
        let resp = request
            .json(input)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("save product", resp.status()));
        }
        resp.json::<Product>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (product_id, input);
        Err("not available on server".to_owned())
    }
}

/// Fetch a product image as raw bytes via `GET /api/products/{id}/image`.
///
/// The session cookie rides along with the request, which is why images are
/// loaded this way instead of through a plain `<img src>`.
///
/// # Errors
///
/// Returns an error string on transport failure or non-OK status.
pub async fn fetch_product_image(product_id: i64) -> Result<ImagePayload, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&product_image_endpoint(product_id))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("product image", resp.status()));
        }
        let content_type = resp.headers().get("content-type");
        let bytes = resp.binary().await.map_err(|e| e.to_string())?;
        Ok(ImagePayload { bytes, content_type })
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = product_id;
        Err("not available on server".to_owned())
    }
}

//! Product persistence and input validation.
//!
//! DESIGN
//! ======
//! Rows are mapped by hand into the shared `Product` DTO so the JSON the
//! client decodes is exactly what this module builds. Prices live in a
//! `NUMERIC` column and are cast to `float8` on the way out.

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use stockroom_client::net::types::{Product, ProductInput};

/// Largest accepted image upload.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Exclusive ceiling for `unit_price`, matching the `NUMERIC(10, 2)` column.
pub const MAX_UNIT_PRICE: f64 = 100_000_000.0;

const PRODUCT_COLUMNS: &str = "id, name, sku, category, unit_price::float8 AS unit_price, stock_quantity, \
                               min_stock_level, preferred_supplier, image IS NOT NULL AS has_image";

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("product not found")]
    NotFound,
    #[error("product has no image")]
    NoImage,
    #[error("invalid product: {0}")]
    Invalid(String),
    #[error("a product with this SKU already exists")]
    DuplicateSku,
    #[error("preferred supplier does not exist")]
    UnknownSupplier,
    #[error("database error: {0}")]
    Db(sqlx::Error),
}

impl From<sqlx::Error> for ProductError {
    fn from(err: sqlx::Error) -> Self {
        let code = match &err {
            sqlx::Error::Database(db) => db.code().map(|c| c.into_owned()),
            _ => None,
        };
        classify_db_code(code.as_deref()).unwrap_or(Self::Db(err))
    }
}

/// Map a Postgres SQLSTATE to a domain error where one applies.
pub(crate) fn classify_db_code(code: Option<&str>) -> Option<ProductError> {
    match code? {
        "23505" => Some(ProductError::DuplicateSku),
        "23503" => Some(ProductError::UnknownSupplier),
        "22003" => Some(ProductError::Invalid("numeric value out of range".into())),
        _ => None,
    }
}

/// Trim and check a create/update body.
///
/// # Errors
///
/// Returns [`ProductError::Invalid`] for empty name/SKU, negative numbers, or a
/// price the database column cannot hold.
pub fn validate_input(input: &ProductInput) -> Result<ProductInput, ProductError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(ProductError::Invalid("name is required".into()));
    }
    let sku = input.sku.trim();
    if sku.is_empty() {
        return Err(ProductError::Invalid("sku is required".into()));
    }
    if !input.unit_price.is_finite() || input.unit_price < 0.0 {
        return Err(ProductError::Invalid("unit_price must be a non-negative number".into()));
    }
    if input.unit_price >= MAX_UNIT_PRICE {
        return Err(ProductError::Invalid(format!("unit_price must be below {MAX_UNIT_PRICE:.0}")));
    }
    if input.stock_quantity < 0 {
        return Err(ProductError::Invalid("stock_quantity must not be negative".into()));
    }
    if input.min_stock_level < 0 {
        return Err(ProductError::Invalid("min_stock_level must not be negative".into()));
    }
    let category = input
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_owned);

    Ok(ProductInput {
        name: name.to_owned(),
        sku: sku.to_owned(),
        category,
        unit_price: input.unit_price,
        stock_quantity: input.stock_quantity,
        min_stock_level: input.min_stock_level,
        preferred_supplier: input.preferred_supplier,
    })
}

/// Accept only `image/*` uploads within [`MAX_IMAGE_BYTES`].
///
/// # Errors
///
/// Returns [`ProductError::Invalid`] for empty, oversized, or non-image bodies.
pub fn validate_image(bytes: &[u8], content_type: Option<&str>) -> Result<String, ProductError> {
    let content_type = content_type
        .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase())
        .filter(|ct| ct.starts_with("image/"))
        .ok_or_else(|| ProductError::Invalid("content type must be image/*".into()))?;
    if bytes.is_empty() {
        return Err(ProductError::Invalid("image body is empty".into()));
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(ProductError::Invalid(format!("image exceeds {MAX_IMAGE_BYTES} bytes")));
    }
    Ok(content_type)
}

fn product_from_row(row: &PgRow) -> Product {
    Product {
        id: row.get("id"),
        name: row.get("name"),
        sku: row.get("sku"),
        category: row.get("category"),
        unit_price: row.get("unit_price"),
        stock_quantity: row.get("stock_quantity"),
        min_stock_level: row.get("min_stock_level"),
        preferred_supplier: row.get("preferred_supplier"),
        has_image: row.get("has_image"),
    }
}

/// List all products ordered by name.
pub async fn list_products(pool: &PgPool) -> Result<Vec<Product>, ProductError> {
    let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY lower(name), id");
    let rows = sqlx::query(&sql).fetch_all(pool).await?;
    Ok(rows.iter().map(product_from_row).collect())
}

pub async fn get_product(pool: &PgPool, product_id: i64) -> Result<Product, ProductError> {
    let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
    let row = sqlx::query(&sql)
        .bind(product_id)
        .fetch_optional(pool)
        .await?
        .ok_or(ProductError::NotFound)?;
    Ok(product_from_row(&row))
}

pub async fn create_product(pool: &PgPool, input: &ProductInput) -> Result<Product, ProductError> {
    let input = validate_input(input)?;
    let sql = format!(
        "INSERT INTO products (name, sku, category, unit_price, stock_quantity, min_stock_level, preferred_supplier)
         VALUES ($1, $2, $3, $4::float8, $5, $6, $7)
         RETURNING {PRODUCT_COLUMNS}"
    );
    let row = sqlx::query(&sql)
        .bind(&input.name)
        .bind(&input.sku)
        .bind(&input.category)
        .bind(input.unit_price)
        .bind(input.stock_quantity)
        .bind(input.min_stock_level)
        .bind(input.preferred_supplier)
        .fetch_one(pool)
        .await?;
    Ok(product_from_row(&row))
}

pub async fn update_product(pool: &PgPool, product_id: i64, input: &ProductInput) -> Result<Product, ProductError> {
    let input = validate_input(input)?;
    let sql = format!(
        "UPDATE products
         SET name = $2, sku = $3, category = $4, unit_price = $5::float8, stock_quantity = $6,
             min_stock_level = $7, preferred_supplier = $8, updated_at = now()
         WHERE id = $1
         RETURNING {PRODUCT_COLUMNS}"
    );
    let row = sqlx::query(&sql)
        .bind(product_id)
        .bind(&input.name)
        .bind(&input.sku)
        .bind(&input.category)
        .bind(input.unit_price)
        .bind(input.stock_quantity)
        .bind(input.min_stock_level)
        .bind(input.preferred_supplier)
        .fetch_optional(pool)
        .await?
        .ok_or(ProductError::NotFound)?;
    Ok(product_from_row(&row))
}

/// Load the stored image bytes and content type.
pub async fn get_product_image(pool: &PgPool, product_id: i64) -> Result<(Vec<u8>, String), ProductError> {
    let row = sqlx::query("SELECT image, image_content_type FROM products WHERE id = $1")
        .bind(product_id)
        .fetch_optional(pool)
        .await?
        .ok_or(ProductError::NotFound)?;
    let image: Option<Vec<u8>> = row.get("image");
    let content_type: Option<String> = row.get("image_content_type");
    let image = image.ok_or(ProductError::NoImage)?;
    Ok((image, content_type.unwrap_or_else(|| "application/octet-stream".to_owned())))
}

/// Replace the product image.
pub async fn set_product_image(
    pool: &PgPool,
    product_id: i64,
    bytes: &[u8],
    content_type: Option<&str>,
) -> Result<Product, ProductError> {
    let content_type = validate_image(bytes, content_type)?;
    let sql = format!(
        "UPDATE products SET image = $2, image_content_type = $3, updated_at = now()
         WHERE id = $1
         RETURNING {PRODUCT_COLUMNS}"
    );
    let row = sqlx::query(&sql)
        .bind(product_id)
        .bind(bytes)
        .bind(content_type)
        .fetch_optional(pool)
        .await?
        .ok_or(ProductError::NotFound)?;
    Ok(product_from_row(&row))
}

#[cfg(test)]
#[path = "product_test.rs"]
mod tests;

//! Supplier lookups.

use sqlx::{PgPool, Row};
use stockroom_client::net::types::Supplier;

/// Supplier with contact details, used for low-stock suggestions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierContact {
    pub name: String,
    pub email: Option<String>,
}

/// List suppliers ordered by name.
pub async fn list_suppliers(pool: &PgPool) -> Result<Vec<Supplier>, sqlx::Error> {
    let rows = sqlx::query("SELECT id, name FROM suppliers ORDER BY lower(name), id")
        .fetch_all(pool)
        .await?;
    Ok(rows
        .iter()
        .map(|r| Supplier { id: r.get("id"), name: r.get("name") })
        .collect())
}

pub async fn get_supplier_contact(pool: &PgPool, supplier_id: i64) -> Result<Option<SupplierContact>, sqlx::Error> {
    let row = sqlx::query("SELECT name, email FROM suppliers WHERE id = $1")
        .bind(supplier_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|r| SupplierContact { name: r.get("name"), email: r.get("email") }))
}

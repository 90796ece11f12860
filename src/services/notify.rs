//! Product change notifications.
//!
//! SYSTEM CONTEXT
//! ==============
//! After a product is saved, `routes::products` hands the result to
//! [`notify_product_saved`] on a background task. Admins and managers get an
//! email when a product is created, and when an update leaves stock at or
//! below the minimum level. Failures are logged by the caller and never
//! affect the save response.

use sqlx::{PgPool, Row};
use stockroom_client::net::types::Product;

use super::mailer::{MailError, Mailer, OutgoingEmail};
use super::supplier::{self, SupplierContact};

const NO_SUPPLIER_SUGGESTION: &str = "No preferred supplier is set for this item.";

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error(transparent)]
    Mail(#[from] MailError),
}

/// What happened to the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductEvent {
    Created,
    Updated,
}

/// Build the email for a save event, or `None` when nobody should be told.
///
/// Creating a product that is already low on stock only sends the
/// new-product email.
#[must_use]
pub fn build_notification(
    event: ProductEvent,
    product: &Product,
    supplier: Option<&SupplierContact>,
    recipients: &[String],
) -> Option<OutgoingEmail> {
    if recipients.is_empty() {
        return None;
    }
    let (subject, text) = match event {
        ProductEvent::Created => (
            format!("New Product Added: {}", product.name),
            format!(
                "A new product has been added to the inventory:\n\n\
                 Product Name: {}\n\
                 SKU: {}\n\
                 Category: {}\n\
                 Unit Price: ${:.2}\n\
                 Initial Stock: {}\n",
                product.name,
                product.sku,
                product.category.as_deref().unwrap_or("None"),
                product.unit_price,
                product.stock_quantity,
            ),
        ),
        ProductEvent::Updated if product.is_low_stock() => (
            format!("Low Stock Alert: {}", product.name),
            format!(
                "The stock for product '{}' (SKU: {}) is running low.\n\n\
                 Current Stock: {}\n\
                 Minimum Stock Level: {}\n\n\
                 {}",
                product.name,
                product.sku,
                product.stock_quantity,
                product.min_stock_level,
                supplier_suggestion(supplier),
            ),
        ),
        ProductEvent::Updated => return None,
    };
    Some(OutgoingEmail { to: recipients.to_vec(), subject, text, html: None })
}

fn supplier_suggestion(supplier: Option<&SupplierContact>) -> String {
    match supplier {
        Some(s) => format!(
            "Consider creating a purchase order from the preferred supplier:\n\
             Supplier Name: {}\n\
             Supplier Email: {}",
            s.name,
            s.email.as_deref().unwrap_or("not on file"),
        ),
        None => NO_SUPPLIER_SUGGESTION.to_owned(),
    }
}

/// Emails of every admin or manager that has one on file.
pub async fn recipient_emails(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT email FROM users
         WHERE role IN ('admin', 'manager') AND email IS NOT NULL AND email <> ''
         ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(|r| r.get("email")).collect())
}

/// Look up recipients and the supplier, then send the notification if one applies.
///
/// Returns whether an email was sent.
pub async fn notify_product_saved(
    pool: &PgPool,
    mailer: &dyn Mailer,
    event: ProductEvent,
    product: &Product,
) -> Result<bool, NotifyError> {
    if event == ProductEvent::Updated && !product.is_low_stock() {
        return Ok(false);
    }
    let recipients = recipient_emails(pool).await?;
    let supplier = match product.preferred_supplier {
        Some(id) if event == ProductEvent::Updated => supplier::get_supplier_contact(pool, id).await?,
        _ => None,
    };
    let Some(email) = build_notification(event, product, supplier.as_ref(), &recipients) else {
        return Ok(false);
    };
    mailer.send(email).await?;
    tracing::info!(product_id = product.id, ?event, recipients = recipients.len(), "product notification sent");
    Ok(true)
}

#[cfg(test)]
#[path = "notify_test.rs"]
mod tests;

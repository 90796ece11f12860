//! Product-list state for the dashboard page.
//!
//! DESIGN
//! ======
//! The list is the page's own copy of server data. Saves patch it in place
//! from the server's response instead of refetching everything.

#[cfg(test)]
#[path = "products_test.rs"]
mod products_test;

use crate::net::types::Product;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductsState {
    pub items: Vec<Product>,
    pub loading: bool,
    /// Last list-load failure, shown above the table.
    pub error: Option<String>,
    /// Last save failure, shown inside the modal until the next save succeeds
    /// or the editor is closed or reopened.
    pub save_error: Option<String>,
}

/// Identity of a rendered table row. Changes whenever any displayed field
/// does, so an untouched row keeps its DOM and its thumbnail loader.
pub type RowKey = (i64, String, String, Option<String>, u64, i64, i64, Option<i64>, bool);

#[must_use]
pub fn row_key(product: &Product) -> RowKey {
    (
        product.id,
        product.name.clone(),
        product.sku.clone(),
        product.category.clone(),
        product.unit_price.to_bits(),
        product.stock_quantity,
        product.min_stock_level,
        product.preferred_supplier,
        product.has_image,
    )
}

impl ProductsState {
    pub fn finish_load(&mut self, result: Result<Vec<Product>, String>) {
        self.loading = false;
        match result {
            Ok(mut items) => {
                sort_by_name(&mut items);
                self.items = items;
                self.error = None;
            }
            Err(err) => self.error = Some(err),
        }
    }

    /// Insert a saved product or replace the row with the same id.
    pub fn upsert(&mut self, product: Product) {
        match self.items.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product,
            None => self.items.push(product),
        }
        sort_by_name(&mut self.items);
        self.save_error = None;
    }

    pub fn fail_save(&mut self, err: String) {
        self.save_error = Some(err);
    }

    /// Forget the last save failure when the editor closes or reopens.
    pub fn clear_save_error(&mut self) {
        self.save_error = None;
    }

    #[must_use]
    pub fn low_stock_count(&self) -> usize {
        self.items.iter().filter(|p| p.is_low_stock()).count()
    }
}

fn sort_by_name(items: &mut [Product]) {
    items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()).then(a.id.cmp(&b.id)));
}

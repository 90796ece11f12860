//! Draft state for the product create/edit modal.
//!
//! DESIGN
//! ======
//! The draft holds raw input text for every field so the form can show what
//! the user typed, including half-finished numbers. Parsing into a typed
//! `ProductInput` happens once, in the page that persists the draft.
//! Reopening the modal always builds a fresh draft; nothing is merged.

#[cfg(test)]
#[path = "product_form_test.rs"]
mod product_form_test;

use crate::net::types::{Product, ProductInput, Supplier};

/// Editable product fields, in form order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProductField {
    Name,
    Sku,
    Category,
    UnitPrice,
    StockQuantity,
    MinStockLevel,
    PreferredSupplier,
}

impl ProductField {
    pub const ALL: [Self; 7] = [
        Self::Name,
        Self::Sku,
        Self::Category,
        Self::UnitPrice,
        Self::StockQuantity,
        Self::MinStockLevel,
        Self::PreferredSupplier,
    ];

    /// Fields rendered as plain `<input>` elements.
    pub const INPUTS: [Self; 6] = [
        Self::Name,
        Self::Sku,
        Self::Category,
        Self::UnitPrice,
        Self::StockQuantity,
        Self::MinStockLevel,
    ];

    /// Form control `name`, matching the JSON field name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Sku => "sku",
            Self::Category => "category",
            Self::UnitPrice => "unit_price",
            Self::StockQuantity => "stock_quantity",
            Self::MinStockLevel => "min_stock_level",
            Self::PreferredSupplier => "preferred_supplier",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Sku => "SKU",
            Self::Category => "Category",
            Self::UnitPrice => "Unit Price",
            Self::StockQuantity => "Stock Quantity",
            Self::MinStockLevel => "Minimum Stock Level",
            Self::PreferredSupplier => "Preferred Supplier",
        }
    }

    #[must_use]
    pub fn input_type(self) -> &'static str {
        match self {
            Self::UnitPrice | Self::StockQuantity | Self::MinStockLevel => "number",
            _ => "text",
        }
    }

    /// `step` attribute for number inputs.
    #[must_use]
    pub fn step(self) -> Option<&'static str> {
        match self {
            Self::UnitPrice => Some("0.01"),
            Self::StockQuantity | Self::MinStockLevel => Some("1"),
            _ => None,
        }
    }

    #[must_use]
    pub fn required(self) -> bool {
        !matches!(self, Self::Category | Self::PreferredSupplier)
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

/// Local, unsaved copy of a product as form text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductDraft {
    /// Identifier of the product being edited; `None` in create mode.
    pub id: Option<i64>,
    pub name: String,
    pub sku: String,
    pub category: String,
    pub unit_price: String,
    pub stock_quantity: String,
    pub min_stock_level: String,
    /// Supplier id as text; empty means no preferred supplier.
    pub preferred_supplier: String,
}

impl ProductDraft {
    /// All-empty defaults for create mode.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Draft populated from an existing product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: Some(product.id),
            name: product.name.clone(),
            sku: product.sku.clone(),
            category: product.category.clone().unwrap_or_default(),
            unit_price: product.unit_price.to_string(),
            stock_quantity: product.stock_quantity.to_string(),
            min_stock_level: product.min_stock_level.to_string(),
            preferred_supplier: product
                .preferred_supplier
                .map(|id| id.to_string())
                .unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    #[must_use]
    pub fn get(&self, field: ProductField) -> &str {
        match field {
            ProductField::Name => &self.name,
            ProductField::Sku => &self.sku,
            ProductField::Category => &self.category,
            ProductField::UnitPrice => &self.unit_price,
            ProductField::StockQuantity => &self.stock_quantity,
            ProductField::MinStockLevel => &self.min_stock_level,
            ProductField::PreferredSupplier => &self.preferred_supplier,
        }
    }

    pub fn set(&mut self, field: ProductField, value: String) {
        let slot = match field {
            ProductField::Name => &mut self.name,
            ProductField::Sku => &mut self.sku,
            ProductField::Category => &mut self.category,
            ProductField::UnitPrice => &mut self.unit_price,
            ProductField::StockQuantity => &mut self.stock_quantity,
            ProductField::MinStockLevel => &mut self.min_stock_level,
            ProductField::PreferredSupplier => &mut self.preferred_supplier,
        };
        *slot = value;
    }

    /// Parse the draft into a request body.
    ///
    /// # Errors
    ///
    /// Returns a user-facing message naming the first field that is missing
    /// or not a valid number.
    pub fn to_input(&self) -> Result<ProductInput, String> {
        let name = required_text(ProductField::Name, &self.name)?;
        let sku = required_text(ProductField::Sku, &self.sku)?;
        let category = Some(self.category.trim().to_owned()).filter(|c| !c.is_empty());
        let unit_price = required_text(ProductField::UnitPrice, &self.unit_price)?
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite())
            .ok_or_else(|| not_a_number(ProductField::UnitPrice))?;
        let stock_quantity = parse_count(ProductField::StockQuantity, &self.stock_quantity)?;
        let min_stock_level = parse_count(ProductField::MinStockLevel, &self.min_stock_level)?;
        let preferred_supplier = match self.preferred_supplier.trim() {
            "" => None,
            raw => Some(
                raw.parse::<i64>()
                    .map_err(|_| not_a_number(ProductField::PreferredSupplier))?,
            ),
        };
        Ok(ProductInput { name, sku, category, unit_price, stock_quantity, min_stock_level, preferred_supplier })
    }
}

fn required_text(field: ProductField, raw: &str) -> Result<String, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(format!("{} is required.", field.label()));
    }
    Ok(value.to_owned())
}

fn parse_count(field: ProductField, raw: &str) -> Result<i64, String> {
    required_text(field, raw)?
        .parse::<i64>()
        .map_err(|_| not_a_number(field))
}

fn not_a_number(field: ProductField) -> String {
    format!("{} must be a number.", field.label())
}

/// Supplier dropdown contents for the open modal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SupplierList {
    pub loading: bool,
    pub items: Vec<Supplier>,
}

/// Everything the modal renders besides its props.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormModel {
    pub draft: ProductDraft,
    pub suppliers: SupplierList,
}

impl FormModel {
    /// Replace the draft for a (re)opened modal.
    pub fn reset(&mut self, product: Option<&Product>) {
        self.draft = product.map_or_else(ProductDraft::empty, ProductDraft::from_product);
    }

    /// Suppliers are never reused across opens.
    pub fn begin_supplier_fetch(&mut self) {
        self.suppliers = SupplierList { loading: true, items: Vec::new() };
    }

    pub fn finish_supplier_fetch(&mut self, result: Result<Vec<Supplier>, String>) {
        let items = result.unwrap_or_else(|err| {
            log::error!("failed to fetch suppliers: {err}");
            Vec::new()
        });
        self.suppliers = SupplierList { loading: false, items };
    }

    /// Hand the current draft to the save callback. Closing is the caller's job.
    pub fn submit<F>(&self, on_save: F)
    where
        F: FnOnce(ProductDraft),
    {
        on_save(self.draft.clone());
    }
}

/// `(value, label)` pairs for the supplier `<select>`, led by an empty choice.
#[must_use]
pub fn supplier_options(items: &[Supplier]) -> Vec<(String, String)> {
    std::iter::once((String::new(), "None".to_owned()))
        .chain(items.iter().map(|s| (s.id.to_string(), s.name.clone())))
        .collect()
}

use super::*;

fn widget() -> Product {
    Product {
        id: 11,
        name: "Widget".to_owned(),
        sku: "W1".to_owned(),
        category: Some("Tools".to_owned()),
        unit_price: 10.0,
        stock_quantity: 5,
        min_stock_level: 1,
        preferred_supplier: Some(3),
        has_image: false,
    }
}

fn gadget() -> Product {
    Product {
        id: 12,
        name: "Gadget".to_owned(),
        sku: "G1".to_owned(),
        category: None,
        unit_price: 2.5,
        stock_quantity: 40,
        min_stock_level: 10,
        preferred_supplier: None,
        has_image: true,
    }
}

#[test]
fn from_product_copies_exact_values() {
    let draft = ProductDraft::from_product(&widget());
    assert_eq!(draft.id, Some(11));
    assert_eq!(draft.name, "Widget");
    assert_eq!(draft.sku, "W1");
    assert_eq!(draft.category, "Tools");
    assert_eq!(draft.unit_price, "10");
    assert_eq!(draft.stock_quantity, "5");
    assert_eq!(draft.min_stock_level, "1");
    assert_eq!(draft.preferred_supplier, "3");
}

#[test]
fn missing_supplier_normalizes_to_empty() {
    let draft = ProductDraft::from_product(&gadget());
    assert_eq!(draft.preferred_supplier, "");
    assert_eq!(draft.category, "");
    assert_eq!(draft.unit_price, "2.5");
}

#[test]
fn reset_without_product_yields_empty_defaults() {
    let mut model = FormModel::default();
    model.reset(Some(&widget()));
    model.reset(None);
    assert_eq!(model.draft, ProductDraft::empty());
    assert!(!model.draft.is_edit());
    for field in ProductField::ALL {
        assert_eq!(model.draft.get(field), "", "{field:?} should be empty");
    }
}

#[test]
fn switching_product_replaces_instead_of_merging() {
    let mut model = FormModel::default();
    model.reset(Some(&widget()));
    model.draft.set(ProductField::Category, "Edited".to_owned());

    model.reset(Some(&gadget()));

    assert_eq!(model.draft, ProductDraft::from_product(&gadget()));
    assert_eq!(model.draft.category, "");
    assert_eq!(model.draft.preferred_supplier, "");
}

#[test]
fn set_and_get_round_through_every_field() {
    let mut draft = ProductDraft::empty();
    for (i, field) in ProductField::ALL.into_iter().enumerate() {
        draft.set(field, format!("v{i}"));
    }
    for (i, field) in ProductField::ALL.into_iter().enumerate() {
        assert_eq!(draft.get(field), format!("v{i}"));
    }
}

#[test]
fn submit_hands_over_exact_draft_once() {
    let mut model = FormModel::default();
    model.reset(Some(&widget()));
    model.draft.set(ProductField::StockQuantity, "7".to_owned());

    let mut saved = Vec::new();
    model.submit(|draft| saved.push(draft));

    assert_eq!(saved, vec![model.draft.clone()]);
    assert_eq!(saved[0].stock_quantity, "7");
}

#[test]
fn supplier_fetch_clears_previous_list_and_sets_loading() {
    let mut model = FormModel::default();
    model.finish_supplier_fetch(Ok(vec![Supplier { id: 1, name: "Acme".to_owned() }]));
    model.begin_supplier_fetch();
    assert!(model.suppliers.loading);
    assert!(model.suppliers.items.is_empty());
}

#[test]
fn supplier_fetch_failure_leaves_empty_list() {
    let mut model = FormModel::default();
    model.begin_supplier_fetch();
    model.finish_supplier_fetch(Err("503".to_owned()));
    assert_eq!(model.suppliers, SupplierList { loading: false, items: Vec::new() });
}

#[test]
fn supplier_options_lead_with_none() {
    let options = supplier_options(&[
        Supplier { id: 3, name: "Acme".to_owned() },
        Supplier { id: 9, name: "Globex".to_owned() },
    ]);
    assert_eq!(
        options,
        vec![
            (String::new(), "None".to_owned()),
            ("3".to_owned(), "Acme".to_owned()),
            ("9".to_owned(), "Globex".to_owned()),
        ]
    );
}

#[test]
fn field_metadata_matches_form_contract() {
    let required: Vec<_> = ProductField::ALL.into_iter().filter(|f| f.required()).collect();
    assert_eq!(
        required,
        vec![
            ProductField::Name,
            ProductField::Sku,
            ProductField::UnitPrice,
            ProductField::StockQuantity,
            ProductField::MinStockLevel,
        ]
    );
    assert_eq!(ProductField::UnitPrice.input_type(), "number");
    assert_eq!(ProductField::Category.input_type(), "text");
    assert_eq!(ProductField::from_name("min_stock_level"), Some(ProductField::MinStockLevel));
    assert_eq!(ProductField::from_name("price"), None);
}

#[test]
fn to_input_parses_typed_values() {
    let input = ProductDraft::from_product(&widget()).to_input().unwrap();
    assert_eq!(input.name, "Widget");
    assert_eq!(input.category.as_deref(), Some("Tools"));
    assert!((input.unit_price - 10.0).abs() < f64::EPSILON);
    assert_eq!(input.stock_quantity, 5);
    assert_eq!(input.min_stock_level, 1);
    assert_eq!(input.preferred_supplier, Some(3));
}

#[test]
fn to_input_treats_blank_optionals_as_none() {
    let input = ProductDraft::from_product(&gadget()).to_input().unwrap();
    assert_eq!(input.category, None);
    assert_eq!(input.preferred_supplier, None);
}

#[test]
fn to_input_reports_first_bad_field() {
    let mut draft = ProductDraft::from_product(&widget());
    draft.set(ProductField::Sku, "  ".to_owned());
    assert_eq!(draft.to_input(), Err("SKU is required.".to_owned()));

    let mut draft = ProductDraft::from_product(&widget());
    draft.set(ProductField::StockQuantity, "lots".to_owned());
    assert_eq!(draft.to_input(), Err("Stock Quantity must be a number.".to_owned()));
}

use super::*;

fn product(id: i64, name: &str, stock: i64, min: i64) -> Product {
    Product {
        id,
        name: name.to_owned(),
        sku: format!("SKU-{id}"),
        category: None,
        unit_price: 1.0,
        stock_quantity: stock,
        min_stock_level: min,
        preferred_supplier: None,
        has_image: false,
    }
}

#[test]
fn finish_load_sorts_case_insensitively() {
    let mut state = ProductsState { loading: true, ..ProductsState::default() };
    state.finish_load(Ok(vec![product(1, "washer", 5, 1), product(2, "Bolt", 5, 1), product(3, "nut", 5, 1)]));
    let names: Vec<_> = state.items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Bolt", "nut", "washer"]);
    assert!(!state.loading);
}

#[test]
fn finish_load_failure_keeps_previous_items() {
    let mut state = ProductsState::default();
    state.finish_load(Ok(vec![product(1, "Bolt", 5, 1)]));
    state.loading = true;
    state.finish_load(Err("product list failed: 500".to_owned()));
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.error.as_deref(), Some("product list failed: 500"));
    assert!(!state.loading);
}

#[test]
fn upsert_replaces_existing_row() {
    let mut state = ProductsState::default();
    state.finish_load(Ok(vec![product(1, "Bolt", 5, 1), product(2, "Nut", 5, 1)]));
    state.save_error = Some("stale".to_owned());

    state.upsert(product(1, "Bolt", 0, 1));

    assert_eq!(state.items.len(), 2);
    assert_eq!(state.items[0].stock_quantity, 0);
    assert_eq!(state.save_error, None);
}

#[test]
fn upsert_appends_new_row_in_order() {
    let mut state = ProductsState::default();
    state.finish_load(Ok(vec![product(1, "Bolt", 5, 1), product(2, "Washer", 5, 1)]));
    state.upsert(product(3, "Nut", 5, 1));
    let ids: Vec<_> = state.items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 3, 2]);
}

#[test]
fn low_stock_count_uses_inclusive_threshold() {
    let mut state = ProductsState::default();
    state.finish_load(Ok(vec![product(1, "A", 1, 1), product(2, "B", 0, 3), product(3, "C", 9, 3)]));
    assert_eq!(state.low_stock_count(), 2);
}

#[test]
fn save_error_survives_reload_until_success() {
    let mut state = ProductsState::default();
    state.finish_load(Ok(vec![product(1, "Bolt", 5, 1)]));
    state.fail_save("save product failed: 409".to_owned());

    state.finish_load(Ok(vec![product(1, "Bolt", 5, 1)]));
    assert_eq!(state.save_error.as_deref(), Some("save product failed: 409"));

    state.upsert(product(1, "Bolt", 4, 1));
    assert_eq!(state.save_error, None);
}

#[test]
fn save_error_cleared_when_editor_closes() {
    let mut state = ProductsState::default();
    state.fail_save("Unit Price must be a number.".to_owned());
    state.clear_save_error();
    assert_eq!(state.save_error, None);
}

#[test]
fn row_key_is_stable_for_unchanged_product() {
    assert_eq!(row_key(&product(1, "Bolt", 5, 1)), row_key(&product(1, "Bolt", 5, 1)));
}

#[test]
fn row_key_changes_with_displayed_fields() {
    let base = row_key(&product(1, "Bolt", 5, 1));
    assert_ne!(base, row_key(&product(1, "Bolt", 4, 1)));
    assert_ne!(base, row_key(&product(2, "Bolt", 5, 1)));

    let mut priced = product(1, "Bolt", 5, 1);
    priced.unit_price = 1.5;
    assert_ne!(base, row_key(&priced));

    let mut with_image = product(1, "Bolt", 5, 1);
    with_image.has_image = true;
    assert_ne!(base, row_key(&with_image));
}

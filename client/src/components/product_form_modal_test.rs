use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use leptos::reactive::owner::Owner;

use super::*;
use crate::net::types::Supplier;

fn with_owner(body: impl FnOnce()) {
    let owner = Owner::new();
    owner.with(body);
}

fn loaded_form() -> RwSignal<FormModel> {
    let mut model = FormModel::default();
    model.finish_supplier_fetch(Ok(vec![Supplier { id: 3, name: "Acme".to_owned() }]));
    RwSignal::new(model)
}

#[test]
fn supplier_choices_ignore_text_field_edits() {
    with_owner(|| {
        let form = loaded_form();
        let choices = supplier_choices(form);
        let renders = Arc::new(AtomicUsize::new(0));
        let counted = renders.clone();
        let rendered = Memo::new(move |_| {
            counted.fetch_add(1, Ordering::SeqCst);
            choices.with(Vec::len)
        });

        assert_eq!(rendered.get(), 2);
        form.update(|f| f.draft.set(ProductField::Name, "Widget".to_owned()));
        form.update(|f| f.draft.set(ProductField::Sku, "W1".to_owned()));
        assert_eq!(rendered.get(), 2);
        assert_eq!(renders.load(Ordering::SeqCst), 1);
    });
}

#[test]
fn supplier_choices_follow_supplier_list() {
    with_owner(|| {
        let form = loaded_form();
        let choices = supplier_choices(form);
        assert_eq!(choices.get().len(), 2);
        form.update(FormModel::begin_supplier_fetch);
        assert_eq!(choices.get(), vec![(String::new(), "None".to_owned())]);
    });
}

#[test]
fn selected_supplier_tracks_only_its_field() {
    with_owner(|| {
        let form = loaded_form();
        let selected = selected_supplier(form);
        let reads = Arc::new(AtomicUsize::new(0));
        let counted = reads.clone();
        let observed = Memo::new(move |_| {
            counted.fetch_add(1, Ordering::SeqCst);
            selected.get()
        });

        assert_eq!(observed.get(), "");
        form.update(|f| f.draft.set(ProductField::UnitPrice, "9.5".to_owned()));
        assert_eq!(observed.get(), "");
        assert_eq!(reads.load(Ordering::SeqCst), 1);

        form.update(|f| f.draft.set(ProductField::PreferredSupplier, "3".to_owned()));
        assert_eq!(observed.get(), "3");
        assert_eq!(reads.load(Ordering::SeqCst), 2);
    });
}

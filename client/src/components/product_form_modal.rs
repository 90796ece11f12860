//! Modal dialog for creating or editing a product.

#[cfg(test)]
#[path = "product_form_modal_test.rs"]
mod product_form_modal_test;

use leptos::prelude::*;

use crate::net::types::Product;
use crate::state::product_form::{FormModel, ProductDraft, ProductField, supplier_options};
use crate::util::task::{TaskSlot, guarded, spawn};

/// Product editor. `product = None` opens in create mode.
///
/// The draft is rebuilt whenever `show` or `product` changes, and suppliers
/// are fetched each time the modal is visible. Submitting passes the draft to
/// `on_save`; persisting and closing stay with the caller, which reports a
/// failed save back through `error`.
#[component]
pub fn ProductFormModal(
    #[prop(into)] show: Signal<bool>,
    on_close: Callback<()>,
    #[prop(into)] product: Signal<Option<Product>>,
    on_save: Callback<ProductDraft>,
    #[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView {
    let form = RwSignal::new(FormModel::default());
    let supplier_fetch = TaskSlot::default();

    let fetch_slot = supplier_fetch.clone();
    Effect::new(move || {
        let visible = show.get();
        let target = product.get();
        form.update(|f| f.reset(target.as_ref()));
        fetch_slot.clear();
        if !visible {
            return;
        }

        form.update(FormModel::begin_supplier_fetch);
        let (task, handle) = guarded(|live| async move {
            let result = crate::net::api::get_suppliers().await;
            if live.is_live() {
                form.update(|f| f.finish_supplier_fetch(result));
            } else if let Err(err) = result {
                log::error!("failed to fetch suppliers: {err}");
            }
        });
        fetch_slot.replace(handle);
        spawn(task);
    });

    on_cleanup(move || supplier_fetch.clear());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        form.with_untracked(|f| f.submit(|draft| on_save.run(draft)));
    };

    let title = move || if product.with(Option::is_some) { "Edit Product" } else { "Create Product" };

    view! {
        <Show when=move || show.get()>
            <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
                <div class="dialog dialog--product" on:click=move |ev| ev.stop_propagation()>
                    <div class="dialog__header">
                        <h2>{title}</h2>
                        <button
                            class="dialog__close"
                            type="button"
                            title="Close"
                            on:click=move |_| on_close.run(())
                        >
                            "✕"
                        </button>
                    </div>
                    <form class="dialog__form" on:submit=on_submit>
                        {ProductField::INPUTS
                            .into_iter()
                            .map(|field| view! { <DraftInput field=field form=form/> })
                            .collect_view()}
                        <label class="dialog__label">
                            {ProductField::PreferredSupplier.label()}
                            <Show
                                when=move || !form.with(|f| f.suppliers.loading)
                                fallback=|| view! { <span class="spinner spinner--sm" role="status"></span> }
                            >
                                <SupplierSelect form=form/>
                            </Show>
                        </label>
                        <Show when=move || error.with(Option::is_some)>
                            <p class="dialog__error" role="alert">
                                "Save failed: "
                                {move || error.get().unwrap_or_default()}
                            </p>
                        </Show>
                        <div class="dialog__actions">
                            <button class="btn" type="button" on:click=move |_| on_close.run(())>
                                "Close"
                            </button>
                            <button class="btn btn--primary" type="submit">
                                "Save Changes"
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </Show>
    }
}

/// Text or number input bound to one draft field.
#[component]
fn DraftInput(field: ProductField, form: RwSignal<FormModel>) -> impl IntoView {
    view! {
        <label class="dialog__label">
            {field.label()}
            <input
                class="dialog__input"
                type=field.input_type()
                name=field.name()
                step=field.step()
                required=field.required()
                prop:value=move || form.with(|f| f.draft.get(field).to_owned())
                on:input=move |ev| form.update(|f| f.draft.set(field, event_target_value(&ev)))
            />
        </label>
    }
}

/// Dropdown choices, recomputed only when the supplier list changes.
fn supplier_choices(form: RwSignal<FormModel>) -> Memo<Vec<(String, String)>> {
    Memo::new(move |_| form.with(|f| supplier_options(&f.suppliers.items)))
}

/// Selected supplier value, isolated from edits to the other draft fields.
fn selected_supplier(form: RwSignal<FormModel>) -> Memo<String> {
    Memo::new(move |_| form.with(|f| f.draft.get(ProductField::PreferredSupplier).to_owned()))
}

#[component]
fn SupplierSelect(form: RwSignal<FormModel>) -> impl IntoView {
    let field = ProductField::PreferredSupplier;
    let choices = supplier_choices(form);
    let selected = selected_supplier(form);

    view! {
        <select
            class="dialog__input"
            name=field.name()
            on:change=move |ev| form.update(|f| f.draft.set(field, event_target_value(&ev)))
        >
            {move || {
                choices
                    .get()
                    .into_iter()
                    .map(|(value, label)| {
                        let option_value = value.clone();
                        view! { <option value=value selected=move || selected.with(|s| *s == option_value)>{label}</option> }
                    })
                    .collect_view()
            }}
        </select>
    }
}

//! Product dashboard: inventory table plus the create/edit modal.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. It loads the product list once the
//! session is known, renders thumbnails through `AuthenticatedImage`, and owns
//! persistence for drafts coming out of `ProductFormModal`.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::authenticated_image::AuthenticatedImage;
use crate::components::product_form_modal::ProductFormModal;
use crate::net::types::Product;
use crate::state::auth::Session;
use crate::state::product_form::ProductDraft;
use crate::state::products::{ProductsState, row_key};
use crate::util::auth::install_unauth_redirect;
use crate::util::image_loader::ImageFetcher;
use crate::util::task::{TaskSlot, guarded, spawn};

const THUMBNAIL_STYLE: &str = "width: 48px; height: 48px; object-fit: cover;";

#[component]
pub fn ProductsPage() -> impl IntoView {
    let session = Session::expect();
    install_unauth_redirect(session, use_navigate());

    let products = RwSignal::new(ProductsState::default());
    let show_modal = RwSignal::new(false);
    let editing = RwSignal::new(None::<Product>);
    let list_fetch = TaskSlot::default();
    let save_request = TaskSlot::default();

    let list_slot = list_fetch.clone();
    Effect::new(move || {
        if !session.is_authenticated() {
            return;
        }
        products.update(|s| s.loading = true);
        let (task, handle) = guarded(|live| async move {
            let result = crate::net::api::get_products().await;
            if live.is_live() {
                products.update(|s| s.finish_load(result));
            }
        });
        list_slot.replace(handle);
        spawn(task);
    });

    let save_slot = save_request.clone();
    on_cleanup(move || {
        list_fetch.clear();
        save_request.clear();
    });

    let on_create = move |_| {
        editing.set(None);
        products.update(ProductsState::clear_save_error);
        show_modal.set(true);
    };
    let on_edit = Callback::new(move |product: Product| {
        editing.set(Some(product));
        products.update(ProductsState::clear_save_error);
        show_modal.set(true);
    });
    let on_close = Callback::new(move |()| {
        products.update(ProductsState::clear_save_error);
        show_modal.set(false);
    });
    let save_error = Signal::derive(move || products.with(|s| s.save_error.clone()));

    let on_save = Callback::new(move |draft: ProductDraft| {
        let input = match draft.to_input() {
            Ok(input) => input,
            Err(message) => {
                products.update(|s| s.fail_save(message));
                return;
            }
        };
        let (task, handle) = guarded(|live| async move {
            let result = crate::net::api::save_product(draft.id, &input).await;
            if !live.is_live() {
                return;
            }
            match result {
                Ok(saved) => {
                    products.update(|s| s.upsert(saved));
                    show_modal.set(false);
                }
                Err(err) => {
                    log::error!("failed to save product: {err}");
                    products.update(|s| s.fail_save(err));
                }
            }
        });
        save_slot.replace(handle);
        spawn(task);
    });

    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            crate::net::api::logout().await;
            session.sign_out();
        });
    };

    let self_name = move || session.user().map(|u| u.name).unwrap_or_default();

    view! {
        <Show
            when=move || session.is_authenticated()
            fallback=move || {
                view! {
                    <div class="products-page">
                        <p>{move || if session.is_loading() { "Loading..." } else { "Redirecting to login..." }}</p>
                    </div>
                }
            }
        >
            <div class="products-page">
                <header class="products-page__header toolbar">
                    <span class="toolbar__title">"Products"</span>
                    <span class="toolbar__divider" aria-hidden="true"></span>
                    <button class="btn toolbar__new-product" on:click=on_create>
                        "+ New Product"
                    </button>
                    <span class="toolbar__spacer"></span>
                    <span class="toolbar__low-stock">
                        {move || format!("{} low on stock", products.with(ProductsState::low_stock_count))}
                    </span>
                    <span class="toolbar__self">{self_name}</span>
                    <button class="btn toolbar__logout" on:click=on_logout title="Logout">
                        "Logout"
                    </button>
                </header>

                <Show when=move || products.with(|s| s.error.is_some())>
                    <p class="products-page__error">{move || products.with(|s| s.error.clone().unwrap_or_default())}</p>
                </Show>

                <Show
                    when=move || !products.with(|s| s.loading)
                    fallback=|| view! { <p>"Loading products..."</p> }
                >
                    <table class="products-table">
                        <thead>
                            <tr>
                                <th>"Image"</th>
                                <th>"Name"</th>
                                <th>"SKU"</th>
                                <th>"Category"</th>
                                <th>"Unit Price"</th>
                                <th>"Stock"</th>
                                <th>"Min"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || products.with(|s| s.items.clone())
                                key=row_key
                                children=move |product| view! { <ProductRow product=product on_edit=on_edit/> }
                            />
                        </tbody>
                    </table>
                </Show>

                <ProductFormModal
                    show=show_modal
                    on_close=on_close
                    product=editing
                    on_save=on_save
                    error=save_error
                />
            </div>
        </Show>
    }
}

#[component]
fn ProductRow(product: Product, on_edit: Callback<Product>) -> impl IntoView {
    let low = product.is_low_stock();
    let id = product.id;
    let thumbnail = product.has_image.then(|| {
        let fetcher = ImageFetcher::new(move || crate::net::api::fetch_product_image(id));
        view! { <AuthenticatedImage fetch_image=fetcher alt=product.name.clone() style=THUMBNAIL_STYLE/> }
    });
    let edit_target = product.clone();

    view! {
        <tr class="products-table__row" class:products-table__row--low=low>
            <td>{thumbnail}</td>
            <td>{product.name}</td>
            <td class="products-table__mono">{product.sku}</td>
            <td>{product.category.unwrap_or_default()}</td>
            <td>{format!("{:.2}", product.unit_price)}</td>
            <td>{product.stock_quantity}</td>
            <td>{product.min_stock_level}</td>
            <td>
                <button class="btn" on:click=move |_| on_edit.run(edit_target.clone())>
                    "Edit"
                </button>
            </td>
        </tr>
    }
}

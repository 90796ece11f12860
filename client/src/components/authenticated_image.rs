//! Image backed by an authenticated fetch instead of a public URL.

use leptos::prelude::*;

use crate::util::image_loader::{ImageFetcher, ImageLoader, ImageStatus};
use crate::util::object_url::browser_table;
use crate::util::task::spawn;

/// Renders `Loading...`, `Error`, or an `<img>` bound to a local object URL.
///
/// A new fetch starts on mount and whenever `fetch_image` yields a different
/// fetcher. The object URL from the previous cycle is revoked first, and the
/// live one is revoked on unmount.
#[component]
pub fn AuthenticatedImage(
    #[prop(into)] fetch_image: Signal<ImageFetcher>,
    #[prop(into)] alt: String,
    #[prop(into, optional)] style: String,
) -> impl IntoView {
    let status = RwSignal::new(ImageStatus::Loading);
    let loader = ImageLoader::new(browser_table());

    // Memo dedupes re-notifications that carry the same fetcher.
    let fetcher = Memo::new(move |_| fetch_image.get());

    let cycle_loader = loader.clone();
    Effect::new(move || {
        let current = fetcher.get();
        let task = cycle_loader.start(&current, move |next| status.set(next));
        spawn(task);
    });

    on_cleanup(move || loader.dispose());

    move || match status.get() {
        ImageStatus::Loading => view! { <span class="auth-image auth-image--loading">"Loading..."</span> }.into_any(),
        ImageStatus::Failed => view! { <span class="auth-image auth-image--error">"Error"</span> }.into_any(),
        ImageStatus::Ready(src) => view! { <img class="auth-image" src=src alt=alt.clone() style=style.clone()/> }.into_any(),
    }
}

//! Load cycle for images served from authenticated endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthenticatedImage` cannot point an `<img>` at a protected URL, so it
//! fetches the bytes itself and displays them through an object URL. This
//! module owns that cycle independently of Leptos so it can be driven from
//! native tests.
//!
//! INVARIANTS
//! ==========
//! - At most one cycle is live per loader; starting a new one disposes the old.
//! - A cycle that is no longer live never creates an object URL and never
//!   reports a status.
//! - Every created URL is revoked exactly once: on the next `start`, or on
//!   `dispose`.

#[cfg(test)]
#[path = "image_loader_test.rs"]
mod image_loader_test;

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::object_url::{ObjectUrl, SharedUrlTable};
use super::task::{TaskHandle, guarded};
use crate::net::types::ImagePayload;

pub type ImageFuture = Pin<Box<dyn Future<Output = Result<ImagePayload, String>>>>;

/// Zero-argument async image source. Two fetchers are equal only when they
/// share the same underlying closure.
#[derive(Clone)]
pub struct ImageFetcher(Arc<dyn Fn() -> ImageFuture + Send + Sync>);

impl ImageFetcher {
    pub fn new<F, Fut>(fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ImagePayload, String>> + 'static,
    {
        Self(Arc::new(move || Box::pin(fetch())))
    }

    #[must_use]
    pub fn fetch(&self) -> ImageFuture {
        (self.0)()
    }
}

impl PartialEq for ImageFetcher {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for ImageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ImageFetcher").field(&Arc::as_ptr(&self.0)).finish()
    }
}

/// What the image component should render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageStatus {
    Loading,
    /// Object URL to bind as the image source.
    Ready(String),
    Failed,
}

struct Cycle {
    // Field order matters: the handle's cleanup empties `slot` before it drops.
    handle: TaskHandle,
    slot: Arc<Mutex<Option<ObjectUrl>>>,
}

/// Drives fetch cycles for one image component instance.
#[derive(Clone)]
pub struct ImageLoader {
    table: SharedUrlTable,
    current: Arc<Mutex<Option<Cycle>>>,
}

impl ImageLoader {
    #[must_use]
    pub fn new(table: SharedUrlTable) -> Self {
        Self { table, current: Arc::default() }
    }

    /// Dispose any previous cycle and begin a new one.
    ///
    /// `sink` immediately receives [`ImageStatus::Loading`], then exactly one
    /// terminal status if the cycle is still live when the fetch settles. The
    /// returned future performs the fetch and must be spawned by the caller.
    pub fn start<S>(&self, fetcher: &ImageFetcher, sink: S) -> impl Future<Output = ()> + 'static
    where
        S: Fn(ImageStatus) + 'static,
    {
        self.dispose();
        sink(ImageStatus::Loading);

        let slot: Arc<Mutex<Option<ObjectUrl>>> = Arc::default();
        let table = self.table.clone();
        let request = fetcher.fetch();
        let task_slot = slot.clone();

        let (task, mut handle) = guarded(move |live| async move {
            let result = request.await;
            let status = {
                let mut held = lock(&task_slot);
                if !live.is_live() {
                    if let Err(err) = &result {
                        log::error!("failed to load authenticated image: {err}");
                    }
                    return;
                }
                match result.and_then(|payload| ObjectUrl::acquire(&table, &payload)) {
                    Ok(url) => {
                        let src = url.as_str().to_owned();
                        *held = Some(url);
                        ImageStatus::Ready(src)
                    }
                    Err(err) => {
                        log::error!("failed to load authenticated image: {err}");
                        ImageStatus::Failed
                    }
                }
            };
            if live.is_live() {
                sink(status);
            }
        });

        let cleanup_slot = slot.clone();
        handle.on_dispose(move || {
            lock(&cleanup_slot).take();
        });
        *lock(&self.current) = Some(Cycle { handle, slot });
        task
    }

    /// Kill the live cycle, if any, releasing its object URL.
    pub fn dispose(&self) {
        let cycle = lock(&self.current).take();
        drop(cycle);
    }

    /// Number of object URLs currently held (0 or 1).
    #[must_use]
    pub fn live_handles(&self) -> usize {
        lock(&self.current)
            .as_ref()
            .map_or(0, |cycle| usize::from(lock(&cycle.slot).is_some()))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

//! Browser object URLs as owned, self-revoking handles.
//!
//! SYSTEM CONTEXT
//! ==============
//! `URL.createObjectURL` pins the blob in the page's object-URL table until it
//! is revoked. `ObjectUrl` ties that revocation to `Drop`, so a handle is
//! released exactly once no matter which path discards it.

use std::sync::Arc;

use crate::net::types::ImagePayload;

/// The table object URLs are created in and revoked from.
pub trait ObjectUrlTable: Send + Sync {
    /// Register `payload` and return a URL usable as an `<img src>`.
    ///
    /// # Errors
    ///
    /// Returns an error string when the blob or URL cannot be created.
    fn create(&self, payload: &ImagePayload) -> Result<String, String>;

    /// Release a URL previously returned by [`ObjectUrlTable::create`].
    fn revoke(&self, url: &str);
}

pub type SharedUrlTable = Arc<dyn ObjectUrlTable>;

/// An acquired object URL. Revoked when dropped.
pub struct ObjectUrl {
    url: String,
    table: SharedUrlTable,
}

impl ObjectUrl {
    /// Create a URL for `payload` in `table`.
    ///
    /// # Errors
    ///
    /// Propagates the table's creation error.
    pub fn acquire(table: &SharedUrlTable, payload: &ImagePayload) -> Result<Self, String> {
        let url = table.create(payload)?;
        Ok(Self { url, table: table.clone() })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        self.table.revoke(&self.url);
    }
}

impl std::fmt::Debug for ObjectUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ObjectUrl").field(&self.url).finish()
    }
}

/// `web_sys::Url`-backed table. Creation fails outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserObjectUrls;

impl ObjectUrlTable for BrowserObjectUrls {
    fn create(&self, payload: &ImagePayload) -> Result<String, String> {
        #[cfg(feature = "hydrate")]
        {
            let parts = js_sys::Array::new();
            parts.push(&js_sys::Uint8Array::from(payload.bytes.as_slice()));
            let options = web_sys::BlobPropertyBag::new();
            if let Some(content_type) = payload.content_type.as_deref() {
                options.set_type(content_type);
            }
            let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
                .map_err(|e| format!("blob creation failed: {e:?}"))?;
            web_sys::Url::create_object_url_with_blob(&blob).map_err(|e| format!("object url creation failed: {e:?}"))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = payload;
            Err("object urls are only available in the browser".to_owned())
        }
    }

    fn revoke(&self, url: &str) {
        #[cfg(feature = "hydrate")]
        {
            let _ = web_sys::Url::revoke_object_url(url);
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = url;
        }
    }
}

/// Shared handle to the browser table.
#[must_use]
pub fn browser_table() -> SharedUrlTable {
    Arc::new(BrowserObjectUrls)
}

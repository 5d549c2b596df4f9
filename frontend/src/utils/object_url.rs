use std::{cell::RefCell, rc::Rc};

/// Creates and revokes `blob:` URLs.
pub trait BlobUrls {
    fn create(&self, bytes: &[u8], content_type: &str) -> Result<String, String>;
    fn revoke(&self, url: &str);
}

/// Browser implementation over `URL.createObjectURL`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserBlobUrls;

impl BlobUrls for BrowserBlobUrls {
    fn create(&self, bytes: &[u8], content_type: &str) -> Result<String, String> {
        let array = js_sys::Array::new();
        array.push(&js_sys::Uint8Array::from(bytes));
        let props = web_sys::BlobPropertyBag::new();
        props.set_type(content_type);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&array, &props)
            .map_err(|_| "Failed to create blob".to_string())?;
        web_sys::Url::create_object_url_with_blob(&blob)
            .map_err(|_| "Failed to create object URL".to_string())
    }

    fn revoke(&self, url: &str) {
        let _ = web_sys::Url::revoke_object_url(url);
    }
}

#[derive(Clone)]
struct BlobUrlContext(Rc<dyn BlobUrls>);

/// Makes `urls` the object URL source for the views below.
pub fn provide_blob_urls(urls: Rc<dyn BlobUrls>) {
    leptos::provide_context(BlobUrlContext(urls));
}

pub fn use_blob_urls() -> Rc<dyn BlobUrls> {
    leptos::use_context::<BlobUrlContext>()
        .map(|ctx| ctx.0)
        .unwrap_or_else(|| Rc::new(BrowserBlobUrls))
}

/// Owned object URL, revoked on drop.
pub struct ObjectUrl {
    url: String,
    urls: Rc<dyn BlobUrls>,
}

impl ObjectUrl {
    pub fn create(urls: Rc<dyn BlobUrls>, bytes: &[u8], content_type: &str) -> Result<Self, String> {
        let url = urls.create(bytes, content_type)?;
        Ok(Self { url, urls })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        self.urls.revoke(&self.url);
    }
}

impl std::fmt::Debug for ObjectUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ObjectUrl").field(&self.url).finish()
    }
}

/// Holds the object URL for one identifier at a time. Switching identifier
/// or dropping the slot revokes the previous URL.
pub struct PreviewSlot {
    urls: Rc<dyn BlobUrls>,
    current: RefCell<Option<(String, ObjectUrl)>>,
}

impl PreviewSlot {
    pub fn new(urls: Rc<dyn BlobUrls>) -> Self {
        Self {
            urls,
            current: RefCell::new(None),
        }
    }

    pub fn replace(&self, id: &str, bytes: &[u8], content_type: &str) -> Result<String, String> {
        let url = ObjectUrl::create(Rc::clone(&self.urls), bytes, content_type)?;
        let href = url.as_str().to_string();
        // The old URL is dropped, and so revoked, here.
        self.current.replace(Some((id.to_string(), url)));
        Ok(href)
    }

    pub fn current_id(&self) -> Option<String> {
        self.current.borrow().as_ref().map(|(id, _)| id.clone())
    }

    pub fn current_url(&self) -> Option<String> {
        self.current
            .borrow()
            .as_ref()
            .map(|(_, url)| url.as_str().to_string())
    }

    pub fn clear(&self) {
        self.current.replace(None);
    }
}

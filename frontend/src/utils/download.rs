use std::rc::Rc;
use wasm_bindgen::JsCast;

use super::object_url::{BrowserBlobUrls, ObjectUrl};

/// Offers `bytes` as a file download. The temporary object URL is revoked
/// as soon as the click has been dispatched.
pub fn trigger_blob_download(filename: &str, content_type: &str, bytes: &[u8]) -> Result<(), String> {
    let url = ObjectUrl::create(Rc::new(BrowserBlobUrls), bytes, content_type)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("No document")?;
    let element = document
        .create_element("a")
        .map_err(|_| "Failed to create link".to_string())?;
    let a = element
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "Failed to cast anchor".to_string())?;
    a.set_href(url.as_str());
    a.set_download(filename);
    a.style().set_property("display", "none").ok();
    document
        .body()
        .ok_or("No body")?
        .append_child(&a)
        .map_err(|_| "Append failed".to_string())?;
    a.click();
    a.remove();
    Ok(())
}

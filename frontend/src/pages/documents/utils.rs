use crate::{
    api::{ApiError, BlobData, Document, UpdateDocument, UploadDocument},
    utils::{
        lifetime::Lifetime,
        object_url::{BlobUrls, PreviewSlot},
        search::{parse_labels, SearchQuery},
        size::{sort_documents, SortDirection, SortField},
    },
};
use leptos::*;
use std::{cell::RefCell, future::Future, rc::Rc};
use wasm_bindgen_futures::JsFuture;

/// Filtered and sorted projection of the retained documents.
pub fn visible_documents(
    items: &[Document],
    query: &SearchQuery,
    field: SortField,
    direction: SortDirection,
) -> Vec<Document> {
    let mut visible = query.apply(items);
    sort_documents(&mut visible, field, direction);
    visible
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub async fn read_picked_file(file: web_sys::File) -> Result<PickedFile, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| format!("Could not read {}", file.name()))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let content_type = match file.type_() {
        t if t.is_empty() => "application/octet-stream".to_string(),
        t => t,
    };
    Ok(PickedFile {
        file_name: file.name(),
        content_type,
        bytes,
    })
}

#[derive(Clone, Copy)]
pub struct UploadFormState {
    pub file: RwSignal<Option<PickedFile>>,
    pub description: RwSignal<String>,
    pub labels: RwSignal<String>,
}

impl Default for UploadFormState {
    fn default() -> Self {
        Self {
            file: create_rw_signal(None),
            description: create_rw_signal(String::new()),
            labels: create_rw_signal(String::new()),
        }
    }
}

impl UploadFormState {
    pub fn to_upload(&self) -> Result<UploadDocument, String> {
        let file = self
            .file
            .get_untracked()
            .ok_or_else(|| "Choose a file to upload".to_string())?;
        if file.bytes.is_empty() {
            return Err(format!("{} is empty", file.file_name));
        }
        Ok(UploadDocument {
            file_name: file.file_name,
            content_type: file.content_type,
            bytes: file.bytes,
            description: self.description.get_untracked().trim().to_string(),
            labels: parse_labels(&self.labels.get_untracked()),
        })
    }

    pub fn reset(&self) {
        self.file.set(None);
        self.description.set(String::new());
        self.labels.set(String::new());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditFormState {
    pub id: String,
    pub description: String,
    pub labels: String,
}

impl EditFormState {
    pub fn from_document(document: &Document) -> Self {
        Self {
            id: document.id.clone(),
            description: document.description.clone(),
            labels: document.labels.join(", "),
        }
    }

    pub fn to_update(&self) -> UpdateDocument {
        UpdateDocument {
            id: self.id.clone(),
            description: self.description.trim().to_string(),
            labels: parse_labels(&self.labels),
        }
    }
}

/// Owns the preview URL of the selected document. Only the most recently
/// requested document may fill the slot.
#[derive(Clone)]
pub struct PreviewController {
    slot: Rc<PreviewSlot>,
    requested: Rc<RefCell<Option<String>>>,
    lifetime: Lifetime,
}

impl PreviewController {
    pub fn new(urls: Rc<dyn BlobUrls>, lifetime: Lifetime) -> Self {
        Self {
            slot: Rc::new(PreviewSlot::new(urls)),
            requested: Rc::new(RefCell::new(None)),
            lifetime,
        }
    }

    /// Fetches and shows `id`. Returns `Ok(None)` when the result arrived
    /// too late to be shown.
    pub async fn show<F, Fut>(&self, id: &str, fetch: F) -> Result<Option<String>, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<BlobData, ApiError>>,
    {
        *self.requested.borrow_mut() = Some(id.to_string());
        if self.slot.current_id().as_deref() == Some(id) {
            return Ok(self.slot.current_url());
        }
        let blob = fetch().await?;
        let still_wanted = self.requested.borrow().as_deref() == Some(id);
        if self.lifetime.is_cancelled() || !still_wanted {
            log::debug!("dropping stale preview for {}", id);
            return Ok(None);
        }
        self.slot
            .replace(id, &blob.bytes, &blob.content_type)
            .map(Some)
            .map_err(ApiError::unknown)
    }

    pub fn close(&self) {
        self.requested.borrow_mut().take();
        self.slot.clear();
    }

    pub fn current_id(&self) -> Option<String> {
        self.slot.current_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::document;
    use crate::utils::object_url::fake::FakeBlobUrls;

    fn sample() -> Vec<Document> {
        vec![
            document("d1", "scan.pdf", "1 MB", &["tax"]),
            document("d2", "notes.txt", "500 B", &["tax", "draft"]),
            document("d3", "photo.png", "2 KB", &[]),
        ]
    }

    #[test]
    fn visible_documents_filters_then_sorts() {
        let items = sample();
        let visible = visible_documents(
            &items,
            &SearchQuery::default().with_label("tax"),
            SortField::Size,
            SortDirection::Ascending,
        );
        let ids: Vec<_> = visible.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["d2", "d1"]);
        assert_eq!(items, sample());
    }

    #[test]
    fn edit_form_round_trips_labels() {
        let mut doc = document("d1", "scan.pdf", "1 MB", &["tax", "2024"]);
        doc.description = "  March scan ".into();
        let form = EditFormState::from_document(&doc);
        assert_eq!(form.labels, "tax, 2024");
        let update = form.to_update();
        assert_eq!(update.labels, vec!["tax", "2024"]);
        assert_eq!(update.description, "March scan");
    }

    fn blob(bytes: &[u8]) -> Result<BlobData, ApiError> {
        Ok(BlobData {
            content_type: "application/pdf".into(),
            bytes: bytes.to_vec(),
        })
    }

    #[test]
    fn preview_switches_documents_without_leaking() {
        futures::executor::block_on(async {
            let urls = Rc::new(FakeBlobUrls::default());
            let preview = PreviewController::new(urls.clone(), Lifetime::new());

            let first = preview.show("d1", || async { blob(b"one") }).await.unwrap();
            assert!(first.is_some());
            let again = preview.show("d1", || async { blob(b"unused") }).await.unwrap();
            assert_eq!(again, first);
            assert_eq!(urls.created(), 1);

            preview.show("d2", || async { blob(b"two") }).await.unwrap();
            assert_eq!(urls.live(), 1);
            assert_eq!(preview.current_id().as_deref(), Some("d2"));

            preview.close();
            assert_eq!(urls.live(), 0);
        });
    }

    #[test]
    fn reselecting_the_shown_document_discards_a_pending_switch() {
        futures::executor::block_on(async {
            let urls = Rc::new(FakeBlobUrls::default());
            let preview = PreviewController::new(urls.clone(), Lifetime::new());
            let first = preview.show("d1", || async { blob(b"one") }).await.unwrap();

            let back = preview.clone();
            let late = preview
                .show("d2", || async move {
                    let again = back.show("d1", || async { blob(b"unused") }).await;
                    assert_eq!(again.unwrap(), first);
                    blob(b"two")
                })
                .await
                .unwrap();

            assert_eq!(late, None);
            assert_eq!(preview.current_id().as_deref(), Some("d1"));
            assert_eq!(urls.created(), 1);
            assert_eq!(urls.live(), 1);
        });
    }

    #[test]
    fn preview_ignores_results_after_close() {
        futures::executor::block_on(async {
            let urls = Rc::new(FakeBlobUrls::default());
            let preview = PreviewController::new(urls.clone(), Lifetime::new());
            let closer = preview.clone();
            let shown = preview
                .show("d1", || async move {
                    closer.close();
                    blob(b"late")
                })
                .await
                .unwrap();
            assert_eq!(shown, None);
            assert_eq!(urls.created(), 0);
        });
    }

    #[test]
    fn preview_ignores_results_after_teardown() {
        futures::executor::block_on(async {
            let urls = Rc::new(FakeBlobUrls::default());
            let lifetime = Lifetime::new();
            let preview = PreviewController::new(urls.clone(), lifetime.clone());
            let shown = preview
                .show("d1", || async move {
                    lifetime.cancel();
                    blob(b"late")
                })
                .await
                .unwrap();
            assert_eq!(shown, None);
            assert_eq!(urls.live(), 0);
        });
    }

    #[test]
    fn preview_surfaces_fetch_errors() {
        futures::executor::block_on(async {
            let urls = Rc::new(FakeBlobUrls::default());
            let preview = PreviewController::new(urls, Lifetime::new());
            let err = preview
                .show("d1", || async { Err(ApiError::request_failed("offline")) })
                .await
                .unwrap_err();
            assert_eq!(err.code, "REQUEST_FAILED");
        });
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn upload_form_requires_a_non_empty_file() {
        with_runtime(|| {
            let form = UploadFormState::default();
            assert_eq!(form.to_upload().unwrap_err(), "Choose a file to upload");

            form.file.set(Some(PickedFile {
                file_name: "empty.pdf".into(),
                content_type: "application/pdf".into(),
                bytes: vec![],
            }));
            assert_eq!(form.to_upload().unwrap_err(), "empty.pdf is empty");
        });
    }

    #[test]
    fn upload_form_builds_the_payload() {
        with_runtime(|| {
            let form = UploadFormState::default();
            form.file.set(Some(PickedFile {
                file_name: "scan.pdf".into(),
                content_type: "application/pdf".into(),
                bytes: b"%PDF".to_vec(),
            }));
            form.description.set(" March ".into());
            form.labels.set("tax, 2024, tax".into());

            let upload = form.to_upload().unwrap();
            assert_eq!(upload.description, "March");
            assert_eq!(upload.labels, vec!["tax", "2024"]);
            assert_eq!(upload.bytes, b"%PDF".to_vec());

            form.reset();
            assert!(form.file.get_untracked().is_none());
        });
    }
}

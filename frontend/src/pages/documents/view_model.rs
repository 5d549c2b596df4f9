use super::{
    repository::DocumentsRepository,
    utils::{visible_documents, EditFormState, PreviewController, UploadFormState},
};
use crate::{
    api::{ApiClient, Document, UpdateDocument, UploadDocument},
    state::{
        auth::use_api_client,
        list::ListController,
        notify::{use_notifier, Notifier},
    },
    utils::{
        download::trigger_blob_download,
        lifetime::Lifetime,
        object_url::{use_blob_urls, BlobUrls},
        search::{available_labels, SearchQuery},
        size::{SortDirection, SortField},
    },
};
use leptos::*;
use std::rc::Rc;

#[derive(Clone)]
pub struct DocumentsViewModel {
    pub repository: DocumentsRepository,
    pub list: ListController<Document>,
    pub notifier: Notifier,
    pub query: RwSignal<SearchQuery>,
    pub sort_field: RwSignal<SortField>,
    pub sort_direction: RwSignal<SortDirection>,
    pub visible: Memo<Vec<Document>>,
    pub labels: Memo<Vec<String>>,
    pub upload_form: UploadFormState,
    pub editing: RwSignal<Option<EditFormState>>,
    pub pending_delete: RwSignal<Option<Document>>,
    pub preview: PreviewController,
    pub preview_url: RwSignal<Option<String>>,
    pub selected: RwSignal<Option<Document>>,
}

impl DocumentsViewModel {
    pub fn new(
        api: ApiClient,
        notifier: Notifier,
        urls: Rc<dyn BlobUrls>,
        lifetime: Lifetime,
    ) -> Self {
        let repository = DocumentsRepository::new_with_client(Rc::new(api));
        let list = ListController::new(Rc::new(repository.clone()), lifetime.clone());
        let query = create_rw_signal(SearchQuery::default());
        let sort_field = create_rw_signal(SortField::default());
        let sort_direction = create_rw_signal(SortDirection::default());

        let state = list.state();
        let visible = create_memo(move |_| {
            let query = query.get();
            let field = sort_field.get();
            let direction = sort_direction.get();
            state.with(|s| visible_documents(&s.items, &query, field, direction))
        });
        let labels = create_memo(move |_| state.with(|s| available_labels(&s.items)));

        Self {
            repository,
            list,
            notifier,
            query,
            sort_field,
            sort_direction,
            visible,
            labels,
            upload_form: UploadFormState::default(),
            editing: create_rw_signal(None),
            pending_delete: create_rw_signal(None),
            preview: PreviewController::new(urls, lifetime),
            preview_url: create_rw_signal(None),
            selected: create_rw_signal(None),
        }
    }

    pub async fn load_more(&self) {
        self.list.load_or_notify(false, &self.notifier).await;
    }

    pub async fn upload(&self, upload: UploadDocument) -> bool {
        let result = self.repository.upload(upload).await;
        let ok = self
            .list
            .finish_mutation(result, &self.notifier, "Document uploaded")
            .await;
        if ok {
            self.upload_form.reset();
        }
        ok
    }

    pub async fn update(&self, update: UpdateDocument) -> bool {
        let result = self.repository.update(update).await;
        let ok = self
            .list
            .finish_mutation(result, &self.notifier, "Document updated")
            .await;
        if ok {
            self.editing.set(None);
        }
        ok
    }

    pub async fn delete(&self, id: &str) -> bool {
        if self.preview.current_id().as_deref() == Some(id) {
            self.close_preview();
        }
        let result = self.repository.delete(id).await;
        self.pending_delete.set(None);
        self.list
            .finish_mutation(result, &self.notifier, "Document deleted")
            .await
    }

    pub async fn open_preview(&self, document: Document) {
        self.selected.set(Some(document.clone()));
        let repository = self.repository.clone();
        let id = document.id.clone();
        match self
            .preview
            .show(&document.id, move || async move { repository.content(&id).await })
            .await
        {
            Ok(Some(url)) => self.preview_url.set(Some(url)),
            Ok(None) => {}
            Err(err) => {
                self.notifier
                    .error(format!("Could not open {}: {}", document.file_name, err.error));
            }
        }
    }

    pub fn close_preview(&self) {
        self.preview.close();
        self.preview_url.set(None);
        self.selected.set(None);
    }

    pub async fn download(&self, document: &Document) {
        let outcome = match self.repository.content(&document.id).await {
            Ok(blob) => trigger_blob_download(&document.file_name, &blob.content_type, &blob.bytes),
            Err(err) => Err(err.error),
        };
        if let Err(message) = outcome {
            self.notifier
                .error(format!("Could not download {}: {}", document.file_name, message));
        }
    }

    pub fn toggle_sort(&self, field: SortField) {
        if self.sort_field.get_untracked() == field {
            self.sort_direction.update(|d| *d = d.toggled());
        } else {
            self.sort_field.set(field);
            self.sort_direction.set(SortDirection::Ascending);
        }
    }
}

pub fn use_documents_view_model() -> DocumentsViewModel {
    let lifetime = Lifetime::bound_to_owner();
    let vm = DocumentsViewModel::new(
        use_api_client(),
        use_notifier(),
        use_blob_urls(),
        lifetime,
    );

    let preview = vm.preview.clone();
    on_cleanup(move || preview.close());

    let initial = vm.clone();
    create_effect(move |_| {
        let vm = initial.clone();
        spawn_local(async move { vm.load_more().await });
    });
    vm
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use crate::config::ApiEndpoints;
    use crate::state::session::Session;
    use crate::test_support::helpers::standard_login;
    use crate::utils::object_url::fake::FakeBlobUrls;
    use serde_json::json;

    fn document_json(id: &str, name: &str, size: &str, labels: &[&str]) -> serde_json::Value {
        json!({
            "id": id,
            "fileName": name,
            "size": size,
            "uploadedAt": "2024-03-01T10:00:00Z",
            "uploadedBy": "alice",
            "labels": labels,
            "description": "",
            "contentType": "application/pdf"
        })
    }

    fn view_model(server: &MockTransport, urls: Rc<FakeBlobUrls>) -> DocumentsViewModel {
        let session = Session::new();
        session.establish(&standard_login());
        let api = ApiClient::with_transport(Rc::new(server.clone()), session)
            .with_base_url(BASE_URL)
            .with_endpoints(ApiEndpoints::default());
        DocumentsViewModel::new(api, Notifier::new(), urls, Lifetime::new())
    }

    fn mock_listing(server: &MockTransport) {
        server.mock(|when, then| {
            when.method(POST).path("/pdfs/getAll");
            then.status(200).json_body(json!([
                document_json("d1", "b-scan.pdf", "1 MB", &["tax"]),
                document_json("d2", "a-notes.pdf", "500 B", &["tax", "draft"]),
                document_json("d3", "c-photo.pdf", "2 KB", &[])
            ]));
        });
    }

    #[tokio::test]
    async fn visible_list_follows_query_and_sort() {
        let server = MockTransport::new();
        mock_listing(&server);
        let runtime = create_runtime();
        let vm = view_model(&server, Rc::new(FakeBlobUrls::default()));
        vm.load_more().await;

        assert_eq!(vm.visible.get_untracked().len(), 3);
        assert_eq!(vm.labels.get_untracked(), vec!["draft", "tax"]);
        assert!(!vm.list.snapshot().has_more);

        vm.toggle_sort(SortField::Size);
        let sizes: Vec<_> = vm
            .visible
            .get_untracked()
            .into_iter()
            .map(|d| d.size)
            .collect();
        assert_eq!(sizes, vec!["500 B", "2 KB", "1 MB"]);

        vm.toggle_sort(SortField::Size);
        assert_eq!(vm.visible.get_untracked()[0].size, "1 MB");

        vm.query.update(|q| q.toggle_label("draft"));
        let visible = vm.visible.get_untracked();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "d2");
        assert_eq!(server.hits("/pdfs/getAll"), 1);
        runtime.dispose();
    }

    #[tokio::test]
    async fn delete_notifies_and_reloads() {
        let server = MockTransport::new();
        mock_listing(&server);
        server.mock(|when, then| {
            when.method(POST).path("/pdfs/delete");
            then.status(200);
        });
        let runtime = create_runtime();
        let vm = view_model(&server, Rc::new(FakeBlobUrls::default()));
        vm.load_more().await;

        assert!(vm.delete("d1").await);
        assert_eq!(
            vm.notifier.toasts().get_untracked()[0].message,
            "Document deleted"
        );
        assert_eq!(server.hits("/pdfs/getAll"), 2);
        let last = server.calls_to("/pdfs/getAll").pop().unwrap();
        assert!(last.request.query.contains(&("page".to_string(), "1".to_string())));
        runtime.dispose();
    }

    #[tokio::test]
    async fn rejected_update_shows_server_message() {
        let server = MockTransport::new();
        mock_listing(&server);
        server.mock(|when, then| {
            when.method(POST).path("/pdfs/update");
            then.status(422)
                .json_body(json!({ "message": "Labels must be unique" }));
        });
        let runtime = create_runtime();
        let vm = view_model(&server, Rc::new(FakeBlobUrls::default()));
        vm.editing.set(Some(EditFormState {
            id: "d1".into(),
            description: String::new(),
            labels: "tax".into(),
        }));

        let ok = vm
            .update(UpdateDocument {
                id: "d1".into(),
                description: String::new(),
                labels: vec!["tax".into()],
            })
            .await;
        assert!(!ok);
        assert!(vm.editing.get_untracked().is_some());
        let toasts = vm.notifier.toasts().get_untracked();
        assert_eq!(toasts[0].message, "Labels must be unique");
        runtime.dispose();
    }

    #[tokio::test]
    async fn preview_owns_a_single_url() {
        let server = MockTransport::new();
        mock_listing(&server);
        server.mock(|when, then| {
            when.method(POST).path("/pdfs/content");
            then.status(200).bytes_body("application/pdf", b"%PDF-1.7");
        });
        server.mock(|when, then| {
            when.method(POST).path("/pdfs/delete");
            then.status(200);
        });
        let runtime = create_runtime();
        let urls = Rc::new(FakeBlobUrls::default());
        let vm = view_model(&server, urls.clone());
        vm.load_more().await;
        let docs = vm.list.snapshot().items;

        vm.open_preview(docs[0].clone()).await;
        vm.open_preview(docs[1].clone()).await;
        assert_eq!(urls.live(), 1);
        assert!(vm.preview_url.get_untracked().is_some());

        vm.delete(&docs[1].id).await;
        assert_eq!(urls.live(), 0);
        assert!(vm.selected.get_untracked().is_none());
        runtime.dispose();
    }
}

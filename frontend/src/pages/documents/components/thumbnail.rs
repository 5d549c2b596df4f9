use crate::{
    api::{ApiError, BlobData},
    pages::documents::repository::DocumentsRepository,
    utils::{
        lifetime::Lifetime,
        object_url::{use_blob_urls, BlobUrls, ObjectUrl},
    },
};
use leptos::*;
use std::{future::Future, rc::Rc};

/// Object URL of one thumbnail. The URL is stored under the current owner,
/// so it is revoked when that owner is disposed.
#[derive(Clone, Copy)]
pub struct ThumbnailSlot {
    held: StoredValue<Option<ObjectUrl>>,
    lifetime: StoredValue<Lifetime>,
    src: RwSignal<Option<String>>,
}

impl ThumbnailSlot {
    pub fn new() -> Self {
        let held = store_value(None::<ObjectUrl>);
        on_cleanup(move || {
            held.try_update_value(|url| url.take());
        });
        Self {
            held,
            lifetime: store_value(Lifetime::bound_to_owner()),
            src: create_rw_signal(None),
        }
    }

    pub fn src(&self) -> RwSignal<Option<String>> {
        self.src
    }

    /// Fetches the thumbnail and keeps its URL. Returns whether it is shown.
    pub async fn fill<Fut>(&self, id: &str, urls: Rc<dyn BlobUrls>, fetch: Fut) -> bool
    where
        Fut: Future<Output = Result<BlobData, ApiError>>,
    {
        let blob = match fetch.await {
            Ok(blob) => blob,
            Err(err) => {
                log::debug!("no thumbnail for {}: {}", id, err);
                return false;
            }
        };
        let alive = self
            .lifetime
            .try_with_value(Lifetime::is_alive)
            .unwrap_or(false);
        if !alive {
            return false;
        }
        match ObjectUrl::create(urls, &blob.bytes, &blob.content_type) {
            Ok(url) => {
                let href = url.as_str().to_string();
                if self.held.try_set_value(Some(url)).is_some() {
                    return false;
                }
                self.src.try_set(Some(href));
                true
            }
            Err(err) => {
                log::warn!("thumbnail for {} not shown: {}", id, err);
                false
            }
        }
    }
}

/// Thumbnail for one row. The object URL lives exactly as long as the row.
#[component]
pub fn DocumentThumbnail(
    repository: DocumentsRepository,
    document_id: String,
    #[prop(into)] alt: String,
) -> impl IntoView {
    let slot = ThumbnailSlot::new();
    let urls = use_blob_urls();

    create_effect(move |_| {
        let repository = repository.clone();
        let id = document_id.clone();
        let urls = Rc::clone(&urls);
        spawn_local(async move {
            slot.fill(&id, urls, repository.thumbnail(&id)).await;
        });
    });

    let src = slot.src();
    view! {
        <div class="h-12 w-10 shrink-0 rounded bg-surface-muted overflow-hidden">
            {move || src.get().map(|src| view! {
                <img src=src alt=alt.clone() class="h-full w-full object-cover" />
            })}
        </div>
    }
}

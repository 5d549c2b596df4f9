use super::thumbnail::DocumentThumbnail;
use crate::{
    api::Document,
    components::common::{EmptyState, LoadMore},
    pages::documents::repository::DocumentsRepository,
};
use leptos::*;

#[component]
pub fn DocumentList(
    repository: DocumentsRepository,
    visible: Memo<Vec<Document>>,
    #[prop(into)] has_more: Signal<bool>,
    #[prop(into)] loading: Signal<bool>,
    on_load_more: Callback<()>,
    on_preview: Callback<Document>,
    on_download: Callback<Document>,
    on_edit: Callback<Document>,
    on_delete: Callback<Document>,
) -> impl IntoView {
    view! {
        <div class="space-y-2">
            <Show
                when=move || !visible.with(Vec::is_empty)
                fallback=move || view! {
                    <Show when=move || !loading.get()>
                        <EmptyState title="No documents" hint="Upload a file or clear the filters" />
                    </Show>
                }
            >
                <ul class="divide-y divide-border bg-surface-elevated rounded-lg border border-border">
                    <For
                        each=move || visible.get()
                        key=|doc| doc.id.clone()
                        children={
                            let repository = repository.clone();
                            move |doc: Document| {
                                let preview_doc = doc.clone();
                                let download_doc = doc.clone();
                                let edit_doc = doc.clone();
                                let delete_doc = doc.clone();
                                view! {
                                    <li class="flex items-center gap-3 px-4 py-3">
                                        <DocumentThumbnail
                                            repository=repository.clone()
                                            document_id=doc.id.clone()
                                            alt=doc.file_name.clone()
                                        />
                                        <button
                                            type="button"
                                            class="flex-1 min-w-0 text-left"
                                            on:click=move |_| on_preview.call(preview_doc.clone())
                                        >
                                            <p class="text-sm font-medium text-fg truncate">{doc.file_name.clone()}</p>
                                            <p class="text-xs text-fg-muted">
                                                {format!(
                                                    "{} · {} · {}",
                                                    doc.size,
                                                    doc.uploaded_by,
                                                    doc.uploaded_at.format("%Y-%m-%d %H:%M")
                                                )}
                                            </p>
                                            <div class="flex flex-wrap gap-1 mt-1">
                                                {doc.labels.iter().map(|label| view! {
                                                    <span class="px-2 rounded-full text-xs bg-surface-muted">{label.clone()}</span>
                                                }).collect_view()}
                                            </div>
                                        </button>
                                        <div class="flex gap-2 text-xs">
                                            <button type="button" on:click=move |_| on_download.call(download_doc.clone())>"Download"</button>
                                            <button type="button" on:click=move |_| on_edit.call(edit_doc.clone())>"Edit"</button>
                                            <button type="button" class="text-status-error-text" on:click=move |_| on_delete.call(delete_doc.clone())>"Delete"</button>
                                        </div>
                                    </li>
                                }
                            }
                        }
                    />
                </ul>
            </Show>
            <LoadMore has_more=has_more loading=loading on_load=on_load_more />
        </div>
    }
}

use super::{
    components::{
        edit_form::EditDocumentForm, list::DocumentList, preview::DocumentPreview,
        toolbar::DocumentToolbar, upload_form::UploadForm,
    },
    utils::EditFormState,
    view_model::use_documents_view_model,
};
use crate::{
    api::{Document, UploadDocument},
    components::{confirm_dialog::ConfirmDialog, layout::Layout},
};
use leptos::*;

#[component]
pub fn DocumentsPage() -> impl IntoView {
    let vm = use_documents_view_model();
    let state = vm.list.state();
    let has_more = Signal::derive(move || state.with(|s| s.has_more));
    let loading = Signal::derive(move || state.with(|s| s.loading));

    let upload_action = create_action({
        let vm = vm.clone();
        move |upload: &UploadDocument| {
            let vm = vm.clone();
            let upload = upload.clone();
            async move { vm.upload(upload).await }
        }
    });
    let update_action = create_action({
        let vm = vm.clone();
        move |form: &EditFormState| {
            let vm = vm.clone();
            let update = form.to_update();
            async move { vm.update(update).await }
        }
    });
    let delete_action = create_action({
        let vm = vm.clone();
        move |id: &String| {
            let vm = vm.clone();
            let id = id.clone();
            async move { vm.delete(&id).await }
        }
    });

    let on_load_more = Callback::new({
        let vm = vm.clone();
        move |_| {
            let vm = vm.clone();
            spawn_local(async move { vm.load_more().await });
        }
    });
    let on_preview = Callback::new({
        let vm = vm.clone();
        move |doc: Document| {
            let vm = vm.clone();
            spawn_local(async move { vm.open_preview(doc).await });
        }
    });
    let on_download = Callback::new({
        let vm = vm.clone();
        move |doc: Document| {
            let vm = vm.clone();
            spawn_local(async move { vm.download(&doc).await });
        }
    });
    let editing = vm.editing;
    let on_edit = Callback::new(move |doc: Document| {
        editing.set(Some(EditFormState::from_document(&doc)));
    });
    let pending_delete = vm.pending_delete;
    let on_delete = Callback::new(move |doc: Document| pending_delete.set(Some(doc)));
    let on_close_preview = Callback::new({
        let vm = vm.clone();
        move |_| vm.close_preview()
    });

    let delete_message = Signal::derive(move || {
        pending_delete.with(|d| {
            d.as_ref()
                .map(|d| format!("Delete {}? This cannot be undone.", d.file_name))
                .unwrap_or_default()
        })
    });

    view! {
        <Layout>
            <div class="space-y-6 px-4 sm:px-0">
                <h2 class="text-2xl font-bold text-fg">"Documents"</h2>
                <UploadForm
                    form=vm.upload_form
                    on_submit=Callback::new(move |upload| upload_action.dispatch(upload))
                    pending=upload_action.pending()
                />
                <EditDocumentForm
                    editing=editing
                    on_save=Callback::new(move |form| update_action.dispatch(form))
                    pending=update_action.pending()
                />
                <DocumentToolbar
                    query=vm.query
                    labels=vm.labels
                    sort_field=vm.sort_field
                    sort_direction=vm.sort_direction
                />
                <div class="grid gap-6 lg:grid-cols-2">
                    <DocumentList
                        repository=vm.repository.clone()
                        visible=vm.visible
                        has_more=has_more
                        loading=loading
                        on_load_more=on_load_more
                        on_preview=on_preview
                        on_download=on_download
                        on_edit=on_edit
                        on_delete=on_delete
                    />
                    <DocumentPreview selected=vm.selected url=vm.preview_url on_close=on_close_preview />
                </div>
            </div>
            <ConfirmDialog
                is_open=Signal::derive(move || pending_delete.with(Option::is_some))
                message=delete_message
                busy=delete_action.pending()
                on_confirm=Callback::new(move |_| {
                    if let Some(doc) = pending_delete.get_untracked() {
                        delete_action.dispatch(doc.id);
                    }
                })
                on_cancel=Callback::new(move |_| pending_delete.set(None))
            />
        </Layout>
    }
}

use crate::{
    api::{ApiError, UploadDocument},
    components::error::InlineErrorMessage,
    pages::documents::utils::{read_picked_file, UploadFormState},
};
use leptos::*;
use wasm_bindgen::JsCast;

#[component]
pub fn UploadForm(
    form: UploadFormState,
    on_submit: Callback<UploadDocument>,
    #[prop(into)] pending: Signal<bool>,
) -> impl IntoView {
    let error = create_rw_signal(None::<ApiError>);

    let on_file = move |ev: ev::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        let Some(file) = file else {
            form.file.set(None);
            return;
        };
        spawn_local(async move {
            match read_picked_file(file).await {
                Ok(picked) => {
                    error.set(None);
                    form.file.set(Some(picked));
                }
                Err(message) => error.set(Some(ApiError::validation(message))),
            }
        });
    };

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        match form.to_upload() {
            Ok(upload) => {
                error.set(None);
                on_submit.call(upload);
            }
            Err(message) => error.set(Some(ApiError::validation(message))),
        }
    };

    view! {
        <form class="space-y-3 bg-surface-elevated border border-border rounded-lg p-4" on:submit=submit>
            <h3 class="text-sm font-semibold text-fg">"Upload a document"</h3>
            <input type="file" class="block text-sm" on:change=on_file />
            <input
                type="text"
                class="block w-full px-3 py-2 border border-border rounded-md text-sm"
                placeholder="Description"
                prop:value=move || form.description.get()
                on:input=move |ev| form.description.set(event_target_value(&ev))
            />
            <input
                type="text"
                class="block w-full px-3 py-2 border border-border rounded-md text-sm"
                placeholder="Labels, comma separated"
                prop:value=move || form.labels.get()
                on:input=move |ev| form.labels.set(event_target_value(&ev))
            />
            <InlineErrorMessage error=error />
            <button
                type="submit"
                class="px-4 py-2 rounded-md text-sm font-semibold bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                disabled=move || pending.get()
            >
                {move || if pending.get() { "Uploading..." } else { "Upload" }}
            </button>
        </form>
    }
}

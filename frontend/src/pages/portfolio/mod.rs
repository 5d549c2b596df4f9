use crate::{
    api::{ApiClient, BlobData},
    state::{
        auth::use_api_client,
        notify::{use_notifier, Notifier},
    },
    components::layout::ToastStack,
    utils::download::trigger_blob_download,
};
use leptos::*;

pub const CV_FILE_NAME: &str = "cv.pdf";

/// Fetches the CV and hands it to `deliver`. Failures become a toast.
pub async fn fetch_and_deliver_cv(
    api: &ApiClient,
    notifier: &Notifier,
    deliver: impl FnOnce(&BlobData) -> Result<(), String>,
) -> bool {
    let outcome = match api.fetch_cv().await {
        Ok(blob) => deliver(&blob),
        Err(err) => Err(err.error),
    };
    match outcome {
        Ok(()) => true,
        Err(message) => {
            notifier.error(format!("Could not download the CV: {}", message));
            false
        }
    }
}

#[component]
pub fn PortfolioPage() -> impl IntoView {
    let api = use_api_client();
    let notifier = use_notifier();
    let download = create_action(move |_: &()| {
        let api = api.clone();
        async move {
            fetch_and_deliver_cv(&api, &notifier, |blob| {
                trigger_blob_download(CV_FILE_NAME, &blob.content_type, &blob.bytes)
            })
            .await
        }
    });

    view! {
        <div class="min-h-screen bg-surface">
            <div class="max-w-3xl mx-auto py-12 px-4 text-center space-y-6">
                <h1 class="text-4xl font-extrabold text-fg">"Who am I"</h1>
                <p class="text-fg-muted">
                    "Software engineer. Builder of small, sturdy tools for documents and data."
                </p>
                <button
                    type="button"
                    class="px-6 py-3 rounded-md font-medium bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                    disabled=move || download.pending().get()
                    on:click=move |_| download.dispatch(())
                >
                    {move || if download.pending().get() { "Preparing..." } else { "Download CV" }}
                </button>
                <p class="text-sm">
                    <a href="/login" class="text-action-primary-bg">"Sign in to your documents"</a>
                </p>
            </div>
            <ToastStack/>
        </div>
    }
}

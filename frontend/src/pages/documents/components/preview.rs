use crate::api::Document;
use leptos::*;

#[component]
pub fn DocumentPreview(
    selected: RwSignal<Option<Document>>,
    url: RwSignal<Option<String>>,
    on_close: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || selected.with(Option::is_some)>
            <section class="bg-surface-elevated border border-border rounded-lg p-4 space-y-3">
                <div class="flex items-center justify-between">
                    <h3 class="text-sm font-semibold text-fg truncate">
                        {move || selected.with(|d| d.as_ref().map(|d| d.file_name.clone()).unwrap_or_default())}
                    </h3>
                    <button type="button" class="text-xs text-fg-muted" on:click=move |_| on_close.call(())>
                        "Close"
                    </button>
                </div>
                <p class="text-xs text-fg-muted">
                    {move || selected.with(|d| d.as_ref().map(|d| d.description.clone()).unwrap_or_default())}
                </p>
                {move || match url.get() {
                    Some(src) => view! {
                        <iframe src=src title="Document preview" class="w-full h-[32rem] rounded border border-border"></iframe>
                    }
                    .into_view(),
                    None => view! { <crate::components::layout::LoadingSpinner /> }.into_view(),
                }}
            </section>
        </Show>
    }
}

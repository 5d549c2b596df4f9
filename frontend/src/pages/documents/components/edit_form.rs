use crate::pages::documents::utils::EditFormState;
use leptos::*;

#[component]
pub fn EditDocumentForm(
    editing: RwSignal<Option<EditFormState>>,
    on_save: Callback<EditFormState>,
    #[prop(into)] pending: Signal<bool>,
) -> impl IntoView {
    let description = move || editing.with(|e| e.as_ref().map(|e| e.description.clone()).unwrap_or_default());
    let labels = move || editing.with(|e| e.as_ref().map(|e| e.labels.clone()).unwrap_or_default());

    view! {
        <Show when=move || editing.with(Option::is_some)>
            <form
                class="space-y-3 bg-surface-elevated border border-border rounded-lg p-4"
                on:submit=move |ev| {
                    ev.prevent_default();
                    if let Some(state) = editing.get_untracked() {
                        on_save.call(state);
                    }
                }
            >
                <h3 class="text-sm font-semibold text-fg">"Edit document"</h3>
                <input
                    type="text"
                    class="block w-full px-3 py-2 border border-border rounded-md text-sm"
                    placeholder="Description"
                    prop:value=description
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        editing.update(|e| if let Some(e) = e { e.description = value });
                    }
                />
                <input
                    type="text"
                    class="block w-full px-3 py-2 border border-border rounded-md text-sm"
                    placeholder="Labels, comma separated"
                    prop:value=labels
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        editing.update(|e| if let Some(e) = e { e.labels = value });
                    }
                />
                <div class="flex gap-2">
                    <button
                        type="submit"
                        class="px-4 py-2 rounded-md text-sm font-semibold bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                        disabled=move || pending.get()
                    >
                        "Save"
                    </button>
                    <button type="button" class="px-4 py-2 text-sm" on:click=move |_| editing.set(None)>
                        "Cancel"
                    </button>
                </div>
            </form>
        </Show>
    }
}

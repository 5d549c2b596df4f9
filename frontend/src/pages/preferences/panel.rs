use super::view_model::{use_preferences_view_model, PreferenceDraft};
use crate::{
    api::Preference,
    components::{
        common::{EmptyState, LoadMore},
        error::InlineErrorMessage,
        layout::Layout,
    },
    utils::search::SearchQuery,
};
use leptos::*;

#[component]
pub fn PreferencesPage() -> impl IntoView {
    let vm = use_preferences_view_model();
    let state = vm.list.state();
    let has_more = Signal::derive(move || state.with(|s| s.has_more));
    let loading = Signal::derive(move || state.with(|s| s.loading));
    let draft = vm.draft;
    let editing = vm.editing;
    let query = vm.query;
    let visible = vm.visible;

    let save_action = create_action({
        let vm = vm.clone();
        move |draft: &PreferenceDraft| {
            let vm = vm.clone();
            let draft = draft.clone();
            async move { vm.create(draft).await }
        }
    });
    let update_action = create_action({
        let vm = vm.clone();
        move |(id, value): &(String, String)| {
            let vm = vm.clone();
            let (id, value) = (id.clone(), value.clone());
            async move { vm.update(id, value).await }
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

    view! {
        <Layout>
            <div class="space-y-6 px-4 sm:px-0">
                <h2 class="text-2xl font-bold text-fg">"Preferences"</h2>
                <form
                    class="flex flex-wrap gap-3 bg-surface-elevated border border-border rounded-lg p-4"
                    on:submit=move |ev| {
                        ev.prevent_default();
                        save_action.dispatch(draft.get_untracked());
                    }
                >
                    <input type="text" placeholder="Key" class="px-3 py-2 border border-border rounded-md text-sm"
                        prop:value=move || draft.with(|d| d.key.clone())
                        on:input=move |ev| draft.update(|d| d.key = event_target_value(&ev)) />
                    <input type="text" placeholder="Value" class="flex-1 px-3 py-2 border border-border rounded-md text-sm"
                        prop:value=move || draft.with(|d| d.value.clone())
                        on:input=move |ev| draft.update(|d| d.value = event_target_value(&ev)) />
                    <button type="submit"
                        class="px-4 py-2 rounded-md text-sm font-semibold bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                        disabled=move || save_action.pending().get()>
                        "Add preference"
                    </button>
                </form>
                <InlineErrorMessage error=vm.form_error />

                <input
                    type="search"
                    class="w-full px-3 py-2 border border-border rounded-md text-sm"
                    placeholder="Search preferences"
                    on:input=move |ev| query.set(SearchQuery::text(event_target_value(&ev)))
                />
                <Show
                    when=move || !visible.with(Vec::is_empty)
                    fallback=move || view! { <EmptyState title="No preferences" /> }
                >
                    <ul class="divide-y divide-border bg-surface-elevated rounded-lg border border-border">
                        <For
                            each=move || visible.get()
                            key=|pref| (pref.id.clone(), pref.value.clone())
                            children=move |pref: Preference| {
                                let id = pref.id.clone();
                                let is_editing = {
                                    let id = id.clone();
                                    move || editing.with(|e| e.as_ref().is_some_and(|(current, _)| *current == id))
                                };
                                let start_edit = {
                                    let id = id.clone();
                                    let value = pref.value.clone();
                                    move |_| editing.set(Some((id.clone(), value.clone())))
                                };
                                let delete_id = id.clone();
                                view! {
                                    <li class="flex items-center gap-3 px-4 py-3 text-sm">
                                        <span class="font-medium w-40 truncate">{pref.key.clone()}</span>
                                        <Show
                                            when=is_editing
                                            fallback={
                                                let value = pref.value.clone();
                                                move || view! { <span class="flex-1 text-fg-muted">{value.clone()}</span> }
                                            }
                                        >
                                            <input type="text" class="flex-1 px-2 py-1 border border-border rounded"
                                                prop:value=move || editing.with(|e| e.as_ref().map(|(_, v)| v.clone()).unwrap_or_default())
                                                on:input=move |ev| {
                                                    let value = event_target_value(&ev);
                                                    editing.update(|e| if let Some((_, v)) = e { *v = value });
                                                } />
                                            <button type="button" on:click=move |_| {
                                                if let Some(edit) = editing.get_untracked() {
                                                    update_action.dispatch(edit);
                                                }
                                            }>"Save"</button>
                                        </Show>
                                        <button type="button" on:click=start_edit>"Edit"</button>
                                        <button type="button" class="text-status-error-text"
                                            on:click=move |_| delete_action.dispatch(delete_id.clone())>
                                            "Delete"
                                        </button>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>
                <LoadMore has_more=has_more loading=loading on_load=on_load_more />
            </div>
        </Layout>
    }
}

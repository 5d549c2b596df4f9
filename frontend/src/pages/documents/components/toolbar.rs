use crate::utils::{
    search::SearchQuery,
    size::{SortDirection, SortField},
};
use leptos::*;

#[component]
pub fn DocumentToolbar(
    query: RwSignal<SearchQuery>,
    labels: Memo<Vec<String>>,
    sort_field: RwSignal<SortField>,
    sort_direction: RwSignal<SortDirection>,
) -> impl IntoView {
    let arrow = move || match sort_direction.get() {
        SortDirection::Ascending => "↑",
        SortDirection::Descending => "↓",
    };

    view! {
        <div class="space-y-3">
            <div class="flex flex-col sm:flex-row gap-3">
                <input
                    type="search"
                    class="flex-1 px-3 py-2 border border-border rounded-md text-sm"
                    placeholder="Search documents"
                    prop:value=move || query.with(|q| q.text.clone())
                    on:input=move |ev| {
                        let text = event_target_value(&ev);
                        query.update(|q| q.text = text);
                    }
                />
                <select
                    class="px-3 py-2 border border-border rounded-md text-sm"
                    on:change=move |ev| sort_field.set(SortField::from_key(&event_target_value(&ev)))
                >
                    {[SortField::UploadedAt, SortField::Name, SortField::Size]
                        .into_iter()
                        .map(|field| view! {
                            <option value=field.key() selected=move || sort_field.get() == field>
                                {field.label()}
                            </option>
                        })
                        .collect_view()}
                </select>
                <button
                    type="button"
                    class="px-3 py-2 border border-border rounded-md text-sm"
                    aria-label="Toggle sort direction"
                    on:click=move |_| sort_direction.update(|d| *d = d.toggled())
                >
                    {arrow}
                </button>
            </div>
            <div class="flex flex-wrap gap-2">
                <For
                    each=move || labels.get()
                    key=|label| label.clone()
                    children=move |label| {
                        let name = label.clone();
                        let active = create_memo(move |_| query.with(|q| q.labels.contains(&name)));
                        let toggle = label.clone();
                        view! {
                            <button
                                type="button"
                                class=move || if active.get() {
                                    "px-2 py-1 rounded-full text-xs bg-action-primary-bg text-action-primary-text"
                                } else {
                                    "px-2 py-1 rounded-full text-xs bg-surface-muted text-fg-muted"
                                }
                                aria-pressed=move || active.get().to_string()
                                on:click=move |_| query.update(|q| q.toggle_label(&toggle))
                            >
                                {label}
                            </button>
                        }
                    }
                />
            </div>
        </div>
    }
}

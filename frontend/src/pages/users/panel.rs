use super::{
    utils::{parse_user_type, CreateUserForm, EditUserForm},
    view_model::use_users_view_model,
};
use crate::{
    api::{User, UserType},
    components::{
        common::{EmptyState, LoadMore},
        confirm_dialog::ConfirmDialog,
        error::InlineErrorMessage,
        layout::Layout,
    },
    utils::search::SearchQuery,
};
use leptos::*;

#[component]
fn UserTypeSelect(value: Signal<UserType>, on_change: Callback<UserType>) -> impl IntoView {
    view! {
        <select
            class="px-3 py-2 border border-border rounded-md text-sm"
            on:change=move |ev| on_change.call(parse_user_type(&event_target_value(&ev)))
        >
            {[UserType::Standard, UserType::Admin]
                .into_iter()
                .map(|t| view! {
                    <option value=t.as_str() selected=move || value.get() == t>{t.as_str()}</option>
                })
                .collect_view()}
        </select>
    }
}

#[component]
pub fn UsersPage() -> impl IntoView {
    let vm = use_users_view_model();
    let state = vm.list.state();
    let has_more = Signal::derive(move || state.with(|s| s.has_more));
    let loading = Signal::derive(move || state.with(|s| s.loading));
    let create_form = vm.create_form;
    let editing = vm.editing;
    let pending_delete = vm.pending_delete;
    let query = vm.query;
    let visible = vm.visible;

    let create_user_action = create_action({
        let vm = vm.clone();
        move |form: &CreateUserForm| {
            let vm = vm.clone();
            let form = form.clone();
            async move { vm.create(form).await }
        }
    });
    let update_action = create_action({
        let vm = vm.clone();
        move |form: &EditUserForm| {
            let vm = vm.clone();
            let form = form.clone();
            async move { vm.update(form).await }
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

    let create_type = Signal::derive(move || create_form.with(|f| f.user_type));
    let edit_type = Signal::derive(move || {
        editing.with(|e| e.as_ref().map(|e| e.user_type).unwrap_or_default())
    });

    view! {
        <Layout>
            <div class="space-y-6 px-4 sm:px-0">
                <h2 class="text-2xl font-bold text-fg">"Users"</h2>
                <form
                    class="grid gap-3 sm:grid-cols-5 bg-surface-elevated border border-border rounded-lg p-4"
                    on:submit=move |ev| {
                        ev.prevent_default();
                        create_user_action.dispatch(create_form.get_untracked());
                    }
                >
                    <input type="text" placeholder="Username" class="px-3 py-2 border border-border rounded-md text-sm"
                        prop:value=move || create_form.with(|f| f.user_name.clone())
                        on:input=move |ev| create_form.update(|f| f.user_name = event_target_value(&ev)) />
                    <input type="email" placeholder="Email" class="px-3 py-2 border border-border rounded-md text-sm"
                        prop:value=move || create_form.with(|f| f.email.clone())
                        on:input=move |ev| create_form.update(|f| f.email = event_target_value(&ev)) />
                    <input type="password" placeholder="Password" class="px-3 py-2 border border-border rounded-md text-sm"
                        prop:value=move || create_form.with(|f| f.password.clone())
                        on:input=move |ev| create_form.update(|f| f.password = event_target_value(&ev)) />
                    <UserTypeSelect
                        value=create_type
                        on_change=Callback::new(move |t| create_form.update(|f| f.user_type = t))
                    />
                    <button type="submit"
                        class="px-4 py-2 rounded-md text-sm font-semibold bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                        disabled=move || create_user_action.pending().get()>
                        "Create user"
                    </button>
                </form>
                <InlineErrorMessage error=vm.form_error />

                <Show when=move || editing.with(Option::is_some)>
                    <form
                        class="flex flex-wrap items-center gap-3 bg-surface-elevated border border-border rounded-lg p-4"
                        on:submit=move |ev| {
                            ev.prevent_default();
                            if let Some(form) = editing.get_untracked() {
                                update_action.dispatch(form);
                            }
                        }
                    >
                        <span class="text-sm font-semibold">
                            {move || editing.with(|e| e.as_ref().map(|e| e.user_name.clone()).unwrap_or_default())}
                        </span>
                        <input type="email" class="px-3 py-2 border border-border rounded-md text-sm"
                            prop:value=move || editing.with(|e| e.as_ref().map(|e| e.email.clone()).unwrap_or_default())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                editing.update(|e| if let Some(e) = e { e.email = value });
                            } />
                        <UserTypeSelect
                            value=edit_type
                            on_change=Callback::new(move |t| editing.update(|e| if let Some(e) = e { e.user_type = t }))
                        />
                        <button type="submit" class="px-4 py-2 rounded-md text-sm font-semibold bg-action-primary-bg text-action-primary-text">"Save"</button>
                        <button type="button" class="px-4 py-2 text-sm" on:click=move |_| editing.set(None)>"Cancel"</button>
                    </form>
                </Show>

                <input
                    type="search"
                    class="w-full px-3 py-2 border border-border rounded-md text-sm"
                    placeholder="Search users"
                    on:input=move |ev| query.set(SearchQuery::text(event_target_value(&ev)))
                />
                <Show
                    when=move || !visible.with(Vec::is_empty)
                    fallback=move || view! { <EmptyState title="No users" /> }
                >
                    <table class="min-w-full divide-y divide-border bg-surface-elevated rounded-lg border border-border text-sm">
                        <thead>
                            <tr class="text-left text-fg-muted">
                                <th class="px-4 py-2">"Username"</th>
                                <th class="px-4 py-2">"Email"</th>
                                <th class="px-4 py-2">"Type"</th>
                                <th class="px-4 py-2"></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || visible.get()
                                key=|user| user.id.clone()
                                children=move |user: User| {
                                    let edit_user = user.clone();
                                    let delete_user = user.clone();
                                    view! {
                                        <tr>
                                            <td class="px-4 py-2">{user.user_name.clone()}</td>
                                            <td class="px-4 py-2">{user.email.clone()}</td>
                                            <td class="px-4 py-2">{user.user_type.as_str()}</td>
                                            <td class="px-4 py-2 space-x-2 text-right">
                                                <button type="button" on:click=move |_| editing.set(Some(EditUserForm::from_user(&edit_user)))>"Edit"</button>
                                                <button type="button" class="text-status-error-text" on:click=move |_| pending_delete.set(Some(delete_user.clone()))>"Delete"</button>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </Show>
                <LoadMore has_more=has_more loading=loading on_load=on_load_more />
            </div>
            <ConfirmDialog
                is_open=Signal::derive(move || pending_delete.with(Option::is_some))
                message=Signal::derive(move || pending_delete.with(|u| {
                    u.as_ref().map(|u| format!("Delete user {}?", u.user_name)).unwrap_or_default()
                }))
                busy=delete_action.pending()
                on_confirm=Callback::new(move |_| {
                    if let Some(user) = pending_delete.get_untracked() {
                        delete_action.dispatch(user.id);
                    }
                })
                on_cancel=Callback::new(move |_| pending_delete.set(None))
            />
        </Layout>
    }
}

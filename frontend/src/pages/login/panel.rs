use super::view_model::use_login_view_model;
use crate::components::error::InlineErrorMessage;
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn LoginPanel(#[prop(optional_no_strip)] next: Option<String>) -> impl IntoView {
    let vm = use_login_view_model(next);
    let form = vm.form;
    let pending = vm.login_action.pending();
    let error = vm.error;
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-surface py-12 px-4">
            <div class="max-w-md w-full space-y-8">
                <h2 class="text-center text-3xl font-extrabold text-fg">"Sign in to Folio"</h2>
                <form class="space-y-6" on:submit=on_submit>
                    <div class="rounded-md shadow-sm -space-y-px">
                        <label for="user_name" class="sr-only">"Username"</label>
                        <input
                            id="user_name"
                            name="user_name"
                            type="text"
                            autocomplete="username"
                            class="appearance-none relative block w-full px-3 py-2 border border-border rounded-t-md sm:text-sm"
                            placeholder="Username"
                            prop:value=move || form.user_name.get()
                            on:input=move |ev| form.user_name.set(event_target_value(&ev))
                        />
                        <label for="password" class="sr-only">"Password"</label>
                        <input
                            id="password"
                            name="password"
                            type="password"
                            autocomplete="current-password"
                            class="appearance-none relative block w-full px-3 py-2 border border-border rounded-b-md sm:text-sm"
                            placeholder="Password"
                            prop:value=move || form.password.get()
                            on:input=move |ev| form.password.set(event_target_value(&ev))
                        />
                    </div>

                    <InlineErrorMessage error=error />

                    <button
                        type="submit"
                        disabled=move || pending.get()
                        class="w-full flex justify-center py-2 px-4 text-sm font-medium rounded-md bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50"
                    >
                        {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}

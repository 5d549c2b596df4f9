use crate::{
    components::drawer::Drawer,
    state::{
        auth::{self, use_api_client, use_auth},
        notify::{use_notifier, ToastKind},
    },
};
use leptos::*;

#[component]
pub fn Header() -> impl IntoView {
    let snapshot = use_auth().snapshot;
    let api = use_api_client();
    let user_name = move || snapshot.with(|s| s.user_name.clone());
    let role = move || snapshot.with(|s| s.user_type.as_str());
    let on_logout = move |_| auth::logout(&api);

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <h1 class="text-xl font-semibold text-fg">"Folio"</h1>
                    <div class="flex items-center gap-4">
                        <span class="text-sm text-fg-muted">
                            {user_name}
                            <span class="ml-2 text-xs uppercase tracking-wide">{role}</span>
                        </span>
                        <button
                            on:click=on_logout
                            class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover"
                        >
                            "Log out"
                        </button>
                    </div>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface flex">
            <Drawer/>
            <div class="flex-1 min-w-0">
                <Header/>
                <main class="max-w-7xl mx-auto py-6 sm:px-6 lg:px-8">
                    {children()}
                </main>
            </div>
            <ToastStack/>
        </div>
    }
}

#[component]
pub fn ToastStack() -> impl IntoView {
    let notifier = use_notifier();
    let toasts = notifier.toasts();
    view! {
        <div class="fixed bottom-4 right-4 z-50 space-y-2" aria-live="polite">
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let class = match toast.kind {
                        ToastKind::Success => "bg-status-success-bg border-status-success-border text-status-success-text",
                        ToastKind::Error => "bg-status-error-bg border-status-error-border text-status-error-text",
                    };
                    let id = toast.id;
                    view! {
                        <div class=format!("flex items-start gap-3 border px-4 py-3 rounded shadow {}", class) role="status">
                            <p class="text-sm flex-1">{toast.message}</p>
                            <button
                                type="button"
                                aria-label="Dismiss"
                                class="text-xs opacity-75 hover:opacity-100"
                                on:click=move |_| notifier.dismiss(id)
                            >
                                "✕"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

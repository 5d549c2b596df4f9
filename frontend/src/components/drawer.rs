use crate::{
    api::{ApiClient, ApiError},
    state::{
        auth::{use_api_client, use_auth},
        notify::{use_notifier, Notifier},
    },
};
use leptos::*;

pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
    pub admin_only: bool,
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        href: "/documents",
        label: "Documents",
        admin_only: false,
    },
    NavItem {
        href: "/preferences",
        label: "Preferences",
        admin_only: false,
    },
    NavItem {
        href: "/users",
        label: "Users",
        admin_only: true,
    },
    NavItem {
        href: "/portfolio",
        label: "Portfolio",
        admin_only: false,
    },
];

/// Flips the pinned flag in the session and persists it. The session is
/// rolled back when the backend rejects the change, unless the failure
/// already signed the user out.
pub async fn toggle_drawer_pin(api: &ApiClient, notifier: &Notifier) -> Result<bool, ApiError> {
    let session = api.session();
    let previous = session.drawer_pinned();
    let next = !previous;
    session.set_drawer_pinned(next);
    match api.save_drawer_pinned(next).await {
        Ok(()) => Ok(next),
        Err(err) => {
            if session.is_authenticated() {
                session.set_drawer_pinned(previous);
            }
            notifier.error(format!("Could not save drawer preference: {}", err.error));
            Err(err)
        }
    }
}

#[component]
pub fn Drawer() -> impl IntoView {
    let snapshot = use_auth().snapshot;
    let api = use_api_client();
    let notifier = use_notifier();
    let pinned = create_memo(move |_| snapshot.with(|s| s.drawer_pinned));
    let is_admin = create_memo(move |_| snapshot.with(|s| s.user_type.is_admin()));
    let (open, set_open) = create_signal(false);

    let toggle_pin = create_action(move |_: &()| {
        let api = api.clone();
        async move { toggle_drawer_pin(&api, &notifier).await }
    });

    let expanded = move || pinned.get() || open.get();

    view! {
        <aside
            class=move || {
                if expanded() {
                    "w-56 shrink-0 border-r border-border bg-surface-elevated"
                } else {
                    "w-14 shrink-0 border-r border-border bg-surface-elevated"
                }
            }
            on:mouseenter=move |_| set_open.set(true)
            on:mouseleave=move |_| set_open.set(false)
        >
            <div class="flex items-center justify-end p-2">
                <button
                    type="button"
                    class="text-xs text-fg-muted hover:text-fg disabled:opacity-50"
                    aria-pressed=move || pinned.get().to_string()
                    disabled=move || toggle_pin.pending().get()
                    on:click=move |_| toggle_pin.dispatch(())
                >
                    {move || if pinned.get() { "Unpin" } else { "Pin" }}
                </button>
            </div>
            <nav class="px-2 space-y-1">
                {NAV_ITEMS
                    .iter()
                    .map(|item| {
                        let admin_only = item.admin_only;
                        view! {
                            <Show when=move || !admin_only || is_admin.get()>
                                <a
                                    href=item.href
                                    class="block px-3 py-2 rounded-md text-sm font-medium text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover truncate"
                                >
                                    {item.label}
                                </a>
                            </Show>
                        }
                    })
                    .collect_view()}
            </nav>
        </aside>
    }
}

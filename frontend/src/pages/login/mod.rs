use leptos::*;
use leptos_router::use_query_map;

pub mod utils;
pub mod view_model;

mod panel;

pub use panel::LoginPanel;

#[component]
pub fn LoginPage() -> impl IntoView {
    let next = use_query_map().with_untracked(|q| q.get("next").cloned());
    view! { <LoginPanel next=next /> }
}

use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

use crate::{
    api::ApiClient,
    components::guard::{RequireAdmin, RequireAuth},
    pages::{DocumentsPage, LoginPage, PortfolioPage, PreferencesPage, UsersPage},
    state::{auth::AuthProvider, notify::provide_notifier, session::Session},
    utils::browser::{redirect_to_login, HOME_PATH},
};

pub const ROUTE_PATHS: &[&str] = &[
    "/",
    "/login",
    "/documents",
    "/preferences",
    "/users",
    "/portfolio",
];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &["/documents", "/preferences", "/users"];

pub const ADMIN_ROUTE_PATHS: &[&str] = &["/users"];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &["/", "/login", "/portfolio"];

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    let api = ApiClient::new(Session::new());
    api.set_on_session_expired(redirect_to_login);
    provide_context(api);
    provide_notifier();
    provide_meta_context();

    view! {
        <Title text="Folio"/>
        <AuthProvider>
            <Router>
                <Routes>
                    <Route path="/" view=|| view! { <Redirect path=HOME_PATH/> }/>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/documents" view=ProtectedDocuments/>
                    <Route path="/preferences" view=ProtectedPreferences/>
                    <Route path="/users" view=AdminUsers/>
                    <Route path="/portfolio" view=PortfolioPage/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}

#[component]
fn ProtectedDocuments() -> impl IntoView {
    view! { <RequireAuth><DocumentsPage/></RequireAuth> }
}

#[component]
fn ProtectedPreferences() -> impl IntoView {
    view! { <RequireAuth><PreferencesPage/></RequireAuth> }
}

#[component]
fn AdminUsers() -> impl IntoView {
    view! { <RequireAdmin><UsersPage/></RequireAdmin> }
}

use crate::{
    api::{ApiClient, ApiError, LoginRequest, LoginResponse},
    state::session::{Session, SessionSnapshot},
    utils::browser,
};
use leptos::*;

/// Reactive view of the session. The signal mirrors every session mutation.
#[derive(Clone)]
pub struct AuthContext {
    pub session: Session,
    pub snapshot: RwSignal<SessionSnapshot>,
}

impl AuthContext {
    pub fn is_authenticated(&self) -> bool {
        self.snapshot.with(SessionSnapshot::is_authenticated)
    }

    pub fn is_admin(&self) -> bool {
        self.snapshot.with(|s| s.user_type.is_admin())
    }
}

pub fn create_auth_context(session: Session) -> AuthContext {
    let snapshot = create_rw_signal(session.snapshot());
    let listener = session.subscribe(move |next| {
        let _ = snapshot.try_set(next.clone());
    });
    let handle = session.clone();
    on_cleanup(move || handle.unsubscribe(listener));
    AuthContext { session, snapshot }
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let session = use_context::<ApiClient>()
        .map(|client| client.session().clone())
        .unwrap_or_default();
    provide_context(create_auth_context(session));
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_auth_context(Session::new()))
}

pub fn use_api_client() -> ApiClient {
    use_context::<ApiClient>().unwrap_or_else(|| ApiClient::new(use_auth().session))
}

pub fn use_login_action() -> Action<LoginRequest, Result<LoginResponse, ApiError>> {
    let api = use_api_client();
    create_action(move |request: &LoginRequest| {
        let payload = request.clone();
        let api = api.clone();
        async move { api.login(payload).await }
    })
}

/// Clears the session and returns to the login page.
pub fn logout(api: &ApiClient) {
    api.logout();
    browser::navigate_to(browser::LOGIN_PATH);
}

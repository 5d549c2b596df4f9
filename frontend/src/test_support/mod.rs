#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::{token, Document, LoginResponse, UserType};
    use crate::state::auth::{create_auth_context, AuthContext};
    use crate::state::session::Session;
    use chrono::{TimeZone, Utc};
    use leptos::*;

    pub fn admin_login() -> LoginResponse {
        LoginResponse {
            token: token::token_expiring_in(3600),
            user_name: "admin".into(),
            user_type: UserType::Admin,
            user_id: "u-admin".into(),
            drawer_pinned: true,
        }
    }

    pub fn standard_login() -> LoginResponse {
        LoginResponse {
            token: token::token_expiring_in(3600),
            user_name: "member".into(),
            user_type: UserType::Standard,
            user_id: "u-standard".into(),
            drawer_pinned: false,
        }
    }

    /// Provides an auth context signed in as `login`, or signed out.
    pub fn provide_session(login: Option<LoginResponse>) -> AuthContext {
        let session = Session::new();
        if let Some(login) = login {
            session.establish(&login);
        }
        let auth = create_auth_context(session);
        provide_context(auth.clone());
        auth
    }

    pub fn document(id: &str, name: &str, size: &str, labels: &[&str]) -> Document {
        Document {
            id: id.into(),
            file_name: name.into(),
            size: size.into(),
            uploaded_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
            uploaded_by: "alice".into(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            description: String::new(),
            content_type: "application/pdf".into(),
        }
    }
}

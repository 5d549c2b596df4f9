use super::utils::LoginFormState;
use crate::{
    api::{ApiError, LoginRequest, LoginResponse},
    state::auth,
    utils::browser,
};
use leptos::*;

#[derive(Clone)]
pub struct LoginViewModel {
    pub form: LoginFormState,
    pub error: RwSignal<Option<ApiError>>,
    pub login_action: Action<LoginRequest, Result<LoginResponse, ApiError>>,
    pub target: String,
}

impl LoginViewModel {
    pub fn submit(&self) {
        if self.login_action.pending().get_untracked() {
            return;
        }
        match self.form.to_request() {
            Ok(request) => {
                self.error.set(None);
                self.login_action.dispatch(request);
            }
            Err(message) => self.error.set(Some(ApiError::validation(message))),
        }
    }
}

/// `next` is the location the guard bounced the user from, if any.
pub fn use_login_view_model(next: Option<String>) -> LoginViewModel {
    let form = LoginFormState::default();
    let error = create_rw_signal(None::<ApiError>);
    let login_action = auth::use_login_action();
    let target = browser::post_login_target(next.as_deref());

    let redirect = target.clone();
    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(_) => {
                    error.set(None);
                    form.password.set(String::new());
                    browser::navigate_to(&redirect);
                }
                Err(err) => error.set(Some(err)),
            }
        }
    });

    LoginViewModel {
        form,
        error,
        login_action,
        target,
    }
}

use crate::api::LoginRequest;
use leptos::*;

#[derive(Clone, Copy)]
pub struct LoginFormState {
    pub user_name: RwSignal<String>,
    pub password: RwSignal<String>,
}

impl Default for LoginFormState {
    fn default() -> Self {
        Self {
            user_name: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
        }
    }
}

impl LoginFormState {
    pub fn to_request(&self) -> Result<LoginRequest, String> {
        let user_name = self.user_name.get_untracked().trim().to_string();
        let password = self.password.get_untracked();
        validate_credentials(&user_name, &password)?;
        Ok(LoginRequest {
            user_name,
            password,
        })
    }
}

pub fn validate_credentials(user_name: &str, password: &str) -> Result<(), String> {
    if user_name.trim().is_empty() {
        return Err("Enter your username".into());
    }
    if password.is_empty() {
        return Err("Enter your password".into());
    }
    Ok(())
}

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use web_sys::Window;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/documents";

pub fn window() -> Result<Window, String> {
    web_sys::window().ok_or_else(|| "No window object".to_string())
}

pub fn current_path() -> String {
    window()
        .ok()
        .map(|w| {
            let location = w.location();
            let path = location.pathname().unwrap_or_default();
            let search = location.search().unwrap_or_default();
            format!("{}{}", path, search)
        })
        .unwrap_or_default()
}

/// `/login?next=<path>`, or plain `/login` when there is nothing to return to.
pub fn login_url_for(attempted: &str) -> String {
    if attempted.is_empty() || attempted == "/" || attempted.starts_with(LOGIN_PATH) {
        return LOGIN_PATH.to_string();
    }
    format!(
        "{}?next={}",
        LOGIN_PATH,
        utf8_percent_encode(attempted, NON_ALPHANUMERIC)
    )
}

/// Where to go after login. Only same-site absolute paths are honoured.
pub fn post_login_target(next: Option<&str>) -> String {
    match next.map(str::trim) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.starts_with(LOGIN_PATH) => {
            path.to_string()
        }
        _ => HOME_PATH.to_string(),
    }
}

pub fn navigate_to(href: &str) {
    if let Ok(w) = window() {
        let _ = w.location().set_href(href);
    }
}

pub fn redirect_to_login() {
    let attempted = current_path();
    if attempted.starts_with(LOGIN_PATH) {
        return;
    }
    navigate_to(&login_url_for(&attempted));
}

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const LOCAL_API_BASE_URL: &str = "http://localhost:8080/api";
pub const PRODUCTION_API_BASE_URL: &str = "/api";

/// Backend paths, relative to the API base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiEndpoints {
    pub login: String,
    pub refresh: String,
    pub documents_list: String,
    pub documents_upload: String,
    pub documents_update: String,
    pub documents_delete: String,
    pub documents_content: String,
    pub documents_thumbnail: String,
    pub users_list: String,
    pub users_create: String,
    pub users_update: String,
    pub users_delete: String,
    pub preferences_list: String,
    pub preferences_create: String,
    pub preferences_update: String,
    pub preferences_delete: String,
    pub preferences_drawer: String,
    pub portfolio_cv: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            login: "/auth/login".into(),
            refresh: "/auth/refresh".into(),
            documents_list: "/pdfs/getAll".into(),
            documents_upload: "/pdfs/upload".into(),
            documents_update: "/pdfs/update".into(),
            documents_delete: "/pdfs/delete".into(),
            documents_content: "/pdfs/content".into(),
            documents_thumbnail: "/pdfs/thumbnail".into(),
            users_list: "/users/getAll".into(),
            users_create: "/users/create".into(),
            users_update: "/users/update".into(),
            users_delete: "/users/delete".into(),
            preferences_list: "/preferences/getAll".into(),
            preferences_create: "/preferences/create".into(),
            preferences_update: "/preferences/update".into(),
            preferences_delete: "/preferences/delete".into(),
            preferences_drawer: "/preferences/drawer".into(),
            portfolio_cv: "/portfolio/cv".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub endpoints: Option<ApiEndpoints>,
}

static API_BASE_URL: OnceLock<String> = OnceLock::new();
static ENDPOINTS: OnceLock<ApiEndpoints> = OnceLock::new();

/// Origin compiled in: production when `FOLIO_ENV=production` at build time
/// or for release builds, local development otherwise.
pub fn build_default_base_url() -> &'static str {
    default_base_url_for(option_env!("FOLIO_ENV"), cfg!(debug_assertions))
}

fn default_base_url_for(env: Option<&str>, debug_build: bool) -> &'static str {
    match env.map(str::trim) {
        Some(value) if value.eq_ignore_ascii_case("production") => PRODUCTION_API_BASE_URL,
        Some(value) if value.eq_ignore_ascii_case("development") => LOCAL_API_BASE_URL,
        _ if debug_build => LOCAL_API_BASE_URL,
        _ => PRODUCTION_API_BASE_URL,
    }
}

fn get_from_env_js() -> Option<String> {
    // Optional global: window.__FOLIO_ENV = { API_BASE_URL: "..." }
    let w = web_sys::window()?;
    let any = js_sys::Reflect::get(&w, &"__FOLIO_ENV".into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let obj = js_sys::Object::from(any);
    let val = js_sys::Reflect::get(&obj, &"API_BASE_URL".into())
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
        .or_else(|| js_sys::Reflect::get(&obj, &"api_base_url".into()).ok());
    val.and_then(|v| v.as_string())
        .filter(|v| !v.trim().is_empty())
}

fn cache_base_url(value: &str) -> String {
    let value = value.trim_end_matches('/').to_string();
    let _ = API_BASE_URL.set(value.clone());
    API_BASE_URL.get().cloned().unwrap_or(value)
}

async fn fetch_runtime_config() -> anyhow::Result<RuntimeConfig> {
    let resp = reqwest::get(runtime_config_url()?)
        .await
        .context("fetching config.json")?;
    if !resp.status().is_success() {
        return Err(anyhow!("config.json returned {}", resp.status()));
    }
    resp.json::<RuntimeConfig>()
        .await
        .context("parsing config.json")
}

fn runtime_config_url() -> anyhow::Result<String> {
    let origin = web_sys::window()
        .ok_or_else(|| anyhow!("no window"))?
        .location()
        .origin()
        .map_err(|_| anyhow!("no location origin"))?;
    Ok(format!("{}/config.json", origin))
}

pub async fn await_api_base_url() -> String {
    if let Some(cached) = API_BASE_URL.get() {
        return cached.clone();
    }
    if let Some(existing) = get_from_env_js() {
        return cache_base_url(&existing);
    }
    match fetch_runtime_config().await {
        Ok(cfg) => {
            if let Some(endpoints) = cfg.endpoints {
                let _ = ENDPOINTS.set(endpoints);
            }
            if let Some(url) = cfg.api_base_url {
                return cache_base_url(&url);
            }
        }
        Err(err) => log::debug!("runtime config unavailable: {:#}", err),
    }
    cache_base_url(build_default_base_url())
}

/// Endpoint paths from `config.json`, or the defaults.
pub fn endpoints() -> ApiEndpoints {
    ENDPOINTS.get().cloned().unwrap_or_default()
}

pub async fn init() {
    let base = await_api_base_url().await;
    log::info!("API base URL: {}", base);
}

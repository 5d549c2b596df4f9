use serde::de::DeserializeOwned;
use std::{cell::RefCell, rc::Rc};

use super::{
    single_flight::SingleFlight,
    token::{self, needs_refresh},
    transport::{ApiRequest, HttpResponse, ReqwestTransport, Transport},
    types::{ApiError, BlobData, IdentityPayload, LoginRequest, LoginResponse, RefreshResponse},
};
use crate::{
    config::{self, ApiEndpoints},
    state::session::Session,
};

/// Whether the request in flight has already been resubmitted after a 401.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Attempt {
    Initial,
    Retried { token: String },
}

type ExpiryHook = Rc<dyn Fn()>;

/// The single request pipeline for every backend call.
#[derive(Clone)]
pub struct ApiClient {
    transport: Rc<dyn Transport>,
    session: Session,
    endpoints: Rc<ApiEndpoints>,
    base_url: Option<String>,
    refresh: SingleFlight<Option<String>>,
    on_session_expired: Rc<RefCell<Option<ExpiryHook>>>,
}

impl ApiClient {
    pub fn new(session: Session) -> Self {
        Self::with_transport(Rc::new(ReqwestTransport::new()), session)
    }

    pub fn new_with_base_url(session: Session, base_url: impl Into<String>) -> Self {
        let mut client = Self::new(session);
        client.base_url = Some(base_url.into());
        client
    }

    pub fn with_transport(transport: Rc<dyn Transport>, session: Session) -> Self {
        Self {
            transport,
            session,
            endpoints: Rc::new(config::endpoints()),
            base_url: None,
            refresh: SingleFlight::new(),
            on_session_expired: Rc::new(RefCell::new(None)),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_endpoints(mut self, endpoints: ApiEndpoints) -> Self {
        self.endpoints = Rc::new(endpoints);
        self
    }

    /// Called after a failed refresh has cleared the session.
    pub fn set_on_session_expired(&self, hook: impl Fn() + 'static) {
        *self.on_session_expired.borrow_mut() = Some(Rc::new(hook));
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }

    pub fn identity(&self) -> IdentityPayload {
        IdentityPayload {
            user_id: self.session.user_id(),
            user_type: self.session.user_type(),
        }
    }

    async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    async fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.resolved_base_url().await, path)
    }

    /// Token to attach, refreshed first when it is about to expire.
    async fn bearer_for(&self, request: &ApiRequest) -> Option<String> {
        let current = self.session.token();
        if current.is_empty() {
            return None;
        }
        if !request.skip_auth_refresh && needs_refresh(token::seconds_until_expiry(&current)) {
            log::debug!("token close to expiry, refreshing before {}", request.path);
            if let Some(fresh) = self.refresh_token().await {
                return Some(fresh);
            }
        }
        let token = self.session.token();
        (!token.is_empty()).then_some(token)
    }

    /// Refreshes the bearer token. Concurrent callers share one backend call.
    /// On failure the previous token is left untouched.
    pub async fn refresh_token(&self) -> Option<String> {
        let client = self.clone();
        self.refresh
            .run(move || async move { client.request_new_token().await })
            .await
    }

    async fn request_new_token(&self) -> Option<String> {
        let current = self.session.token();
        if current.is_empty() {
            return None;
        }
        let request = ApiRequest::post(self.endpoints.refresh.clone())
            .json(&serde_json::json!({}))
            .ok()?
            .skip_auth_refresh();
        let url = self.url_for(&request.path).await;
        let response = match self.transport.send(&url, &request, Some(&current)).await {
            Ok(response) => response,
            Err(err) => {
                log::warn!("token refresh failed: {}", err);
                return None;
            }
        };
        if !response.is_success() {
            log::warn!("token refresh rejected with status {}", response.status);
            return None;
        }
        match serde_json::from_slice::<RefreshResponse>(&response.body) {
            Ok(parsed) if !parsed.token.is_empty() => {
                self.session.set_token(parsed.token.clone());
                log::debug!("token refreshed");
                Some(parsed.token)
            }
            Ok(_) => {
                log::warn!("token refresh returned an empty token");
                None
            }
            Err(err) => {
                log::warn!("failed to parse refresh response: {}", err);
                None
            }
        }
    }

    fn expire_session(&self) {
        self.session.clear();
        let hook = self.on_session_expired.borrow().clone();
        if let Some(hook) = hook {
            hook();
        }
    }

    /// Sends `request`, resubmitting it once with a refreshed token after a
    /// 401. Non-2xx responses are returned as they are.
    pub async fn send(&self, request: ApiRequest) -> Result<HttpResponse, ApiError> {
        let url = self.url_for(&request.path).await;
        let mut attempt = Attempt::Initial;
        loop {
            let bearer = match &attempt {
                Attempt::Initial => self.bearer_for(&request).await,
                Attempt::Retried { token } => Some(token.clone()),
            };
            let response = self
                .transport
                .send(&url, &request, bearer.as_deref())
                .await?;
            if response.status != 401 || request.skip_auth_refresh {
                return Ok(response);
            }
            if let Attempt::Retried { .. } = attempt {
                log::warn!("{} still unauthorized after refresh", request.path);
                return Ok(response);
            }
            match self.refresh_token().await {
                Some(token) => {
                    log::debug!("retrying {} with refreshed token", request.path);
                    attempt = Attempt::Retried { token };
                }
                None => {
                    log::info!("refresh failed after 401 on {}, logging out", request.path);
                    self.expire_session();
                    return Ok(response);
                }
            }
        }
    }

    pub(crate) async fn send_checked(&self, request: ApiRequest) -> Result<HttpResponse, ApiError> {
        let response = self.send(request).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::from_status(response.status, &response.body))
        }
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ApiError> {
        let response = self.send_checked(request).await?;
        serde_json::from_slice(&response.body)
            .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
    }

    pub(crate) async fn send_empty(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.send_checked(request).await.map(|_| ())
    }

    pub(crate) async fn send_blob(&self, request: ApiRequest) -> Result<BlobData, ApiError> {
        let response = self.send_checked(request).await?;
        Ok(BlobData {
            content_type: response
                .content_type
                .unwrap_or_else(|| "application/octet-stream".to_string()),
            bytes: response.body,
        })
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        if request.user_name.trim().is_empty() || request.password.is_empty() {
            return Err(ApiError::validation("Username and password are required"));
        }
        let call = ApiRequest::post(self.endpoints.login.clone())
            .json(&request)?
            .skip_auth_refresh();
        let response: LoginResponse = self.send_json(call).await?;
        self.session.establish(&response);
        Ok(response)
    }

    /// Local logout: the backend keeps no session to tear down.
    pub fn logout(&self) {
        self.session.clear();
    }
}

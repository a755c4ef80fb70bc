use std::sync::Arc;

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    error::{ApiError, ApiResult},
    hooks::UiHooks,
    middleware_layer::auth::catch_auth_error,
    store::{FileStorage, MemoryStorage, SessionStore},
    transport::{self, HttpFacade},
};

/// The client for one user of the platform.
///
/// Owns the session and the HTTP facade, so every call that can change the
/// session takes `&mut self`. Dropping an in-flight call future cancels it
/// before it can touch the session.
pub struct RasdClient {
    pub(crate) http: HttpFacade,
    pub(crate) session: SessionStore,
    pub(crate) hooks: Arc<dyn UiHooks>,
}

impl RasdClient {
    /// Builds a client from `config`, persisting the session to the configured
    /// file or keeping it in memory.
    pub fn new(config: &Config, hooks: Arc<dyn UiHooks>) -> ApiResult<Self> {
        let store = match &config.session_file {
            Some(path) => SessionStore::open(FileStorage::new(path)),
            None => SessionStore::open(MemoryStorage::new()),
        };
        Self::with_store(config, store, hooks)
    }

    /// Builds a client around an existing store. A rehydrated token is
    /// attached to outgoing requests straight away.
    pub fn with_store(
        config: &Config,
        store: SessionStore,
        hooks: Arc<dyn UiHooks>,
    ) -> ApiResult<Self> {
        let mut http = HttpFacade::new(config.api_base_url.clone())?;
        if let Some(token) = store.id_token() {
            http.set_auth_header(token);
        }

        tracing::info!("✅ Client ready for {}", config.api_base_url);
        Ok(Self {
            http,
            session: store,
            hooks,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn http(&self) -> &HttpFacade {
        &self.http
    }

    pub fn hooks(&self) -> &dyn UiHooks {
        self.hooks.as_ref()
    }

    /// Sends a request and runs the response through the auth interceptor.
    ///
    /// Success statuses are returned as-is; 401/403 become
    /// `ApiError::Unauthenticated` after the interceptor has run; everything
    /// else becomes `ApiError::NotFound` or `ApiError::Rejected`.
    pub(crate) async fn execute(&mut self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!("❌ Request could not be sent: {}", e);
            ApiError::Network(e)
        })?;

        let status = response.status();
        if let Some(err) =
            catch_auth_error(status, &mut self.session, &mut self.http, self.hooks.as_ref())
        {
            return Err(err);
        }
        if !status.is_success() {
            return Err(transport::rejection(response).await);
        }

        tracing::debug!("✅ {} {}", status, response.url().path());
        Ok(response)
    }

    /// Sends a request and decodes the JSON body of the response.
    pub(crate) async fn fetch<T: DeserializeOwned>(&mut self, request: RequestBuilder) -> ApiResult<T> {
        let response = self.execute(request).await?;
        transport::decode(response).await
    }

    /// Sends a request whose response body is not needed.
    pub(crate) async fn send_unit(&mut self, request: RequestBuilder) -> ApiResult<()> {
        self.execute(request).await.map(drop)
    }
}

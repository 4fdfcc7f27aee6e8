//! Typed REST client for the yoga API.
//!
//! Every call goes through [`AuthenticatedTransport`], so requests carry the
//! stored bearer token whenever one exists. Non-2xx answers become
//! [`ApiError::Status`]; nothing here retries or recovers.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::http::{ApiRequest, Transport};
use super::interceptor::AuthenticatedTransport;
use super::types::{LoginRequest, RegisterRequest, Session, SessionForm, SessionInformation, Teacher, User};
use crate::state::session::SessionStore;

fn login_endpoint(base: &str) -> String {
    format!("{base}/auth/login")
}

fn register_endpoint(base: &str) -> String {
    format!("{base}/auth/register")
}

fn sessions_endpoint(base: &str) -> String {
    format!("{base}/session")
}

fn session_endpoint(base: &str, id: i64) -> String {
    format!("{base}/session/{id}")
}

fn participation_endpoint(base: &str, session_id: i64, user_id: i64) -> String {
    format!("{base}/session/{session_id}/participate/{user_id}")
}

fn teachers_endpoint(base: &str) -> String {
    format!("{base}/teacher")
}

fn teacher_endpoint(base: &str, id: i64) -> String {
    format!("{base}/teacher/{id}")
}

fn user_endpoint(base: &str, id: i64) -> String {
    format!("{base}/user/{id}")
}

/// Calls the session-detail view depends on.
///
/// Implemented by [`ApiClient`]; tests substitute fakes with controllable
/// completion order.
#[allow(async_fn_in_trait)]
pub trait SessionDetailApi {
    async fn session_detail(&self, id: i64) -> Result<Session, ApiError>;
    async fn teacher_detail(&self, id: i64) -> Result<Teacher, ApiError>;
    async fn participate(&self, session_id: i64, user_id: i64) -> Result<(), ApiError>;
    async fn un_participate(&self, session_id: i64, user_id: i64) -> Result<(), ApiError>;
    async fn delete_session(&self, id: i64) -> Result<(), ApiError>;
}

/// REST client bound to a base URL and the session store's credential.
#[derive(Clone, Debug)]
pub struct ApiClient<T> {
    transport: AuthenticatedTransport<T>,
    base_url: String,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, session: SessionStore, base_url: impl Into<String>) -> Self {
        Self { transport: AuthenticatedTransport::new(transport, session), base_url: base_url.into() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        self.transport.inner()
    }

    async fn execute(&self, request: ApiRequest) -> Result<String, ApiError> {
        let response = self.transport.send(&request).await?;
        if !response.is_success() {
            log::warn!(
                "api: {} {} failed with {}",
                request.method.as_str(),
                request.url,
                response.status
            );
            return Err(ApiError::from_status(response.status, &response.body));
        }
        Ok(response.body)
    }

    async fn fetch_json<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let body = self.execute(request).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error; bad credentials arrive as a 401.
    pub async fn login(&self, request: &LoginRequest) -> Result<SessionInformation, ApiError> {
        self.fetch_json(ApiRequest::post(login_endpoint(&self.base_url)).json(request)?)
            .await
    }

    /// `POST /auth/register`.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error (e.g. email already taken).
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.execute(ApiRequest::post(register_endpoint(&self.base_url)).json(request)?)
            .await
            .map(drop)
    }

    /// `GET /session`.
    ///
    /// # Errors
    ///
    /// Returns the transport, status or decode error.
    pub async fn sessions(&self) -> Result<Vec<Session>, ApiError> {
        self.fetch_json(ApiRequest::get(sessions_endpoint(&self.base_url))).await
    }

    /// `POST /session`.
    ///
    /// # Errors
    ///
    /// Returns the transport, status or decode error.
    pub async fn create_session(&self, form: &SessionForm) -> Result<Session, ApiError> {
        self.fetch_json(ApiRequest::post(sessions_endpoint(&self.base_url)).json(form)?)
            .await
    }

    /// `PUT /session/{id}`.
    ///
    /// # Errors
    ///
    /// Returns the transport, status or decode error.
    pub async fn update_session(&self, id: i64, form: &SessionForm) -> Result<Session, ApiError> {
        self.fetch_json(ApiRequest::put(session_endpoint(&self.base_url, id)).json(form)?)
            .await
    }

    /// `GET /teacher`.
    ///
    /// # Errors
    ///
    /// Returns the transport, status or decode error.
    pub async fn teachers(&self) -> Result<Vec<Teacher>, ApiError> {
        self.fetch_json(ApiRequest::get(teachers_endpoint(&self.base_url))).await
    }

    /// `GET /user/{id}`.
    ///
    /// # Errors
    ///
    /// Returns the transport, status or decode error.
    pub async fn user(&self, id: i64) -> Result<User, ApiError> {
        self.fetch_json(ApiRequest::get(user_endpoint(&self.base_url, id))).await
    }

    /// `DELETE /user/{id}`.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error.
    pub async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        self.execute(ApiRequest::delete(user_endpoint(&self.base_url, id)))
            .await
            .map(drop)
    }
}

impl<T: Transport> SessionDetailApi for ApiClient<T> {
    async fn session_detail(&self, id: i64) -> Result<Session, ApiError> {
        self.fetch_json(ApiRequest::get(session_endpoint(&self.base_url, id))).await
    }

    async fn teacher_detail(&self, id: i64) -> Result<Teacher, ApiError> {
        self.fetch_json(ApiRequest::get(teacher_endpoint(&self.base_url, id))).await
    }

    async fn participate(&self, session_id: i64, user_id: i64) -> Result<(), ApiError> {
        let url = participation_endpoint(&self.base_url, session_id, user_id);
        self.execute(ApiRequest::post(url)).await.map(drop)
    }

    async fn un_participate(&self, session_id: i64, user_id: i64) -> Result<(), ApiError> {
        let url = participation_endpoint(&self.base_url, session_id, user_id);
        self.execute(ApiRequest::delete(url)).await.map(drop)
    }

    async fn delete_session(&self, id: i64) -> Result<(), ApiError> {
        self.execute(ApiRequest::delete(session_endpoint(&self.base_url, id)))
            .await
            .map(drop)
    }
}

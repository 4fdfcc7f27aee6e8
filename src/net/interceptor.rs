//! Bearer-token request authenticator.
//!
//! Every outgoing API call passes through [`AuthenticatedTransport`], which
//! asks the session store for the current credential on each request. With a
//! token present the request is copied and stamped with
//! `Authorization: Bearer <token>`; without one the original request is
//! forwarded as-is. Downstream failures (including 401) pass straight through.

#[cfg(test)]
#[path = "interceptor_test.rs"]
mod interceptor_test;

use std::borrow::Cow;

use super::error::ApiError;
use super::http::{ApiRequest, ApiResponse, Transport};
use crate::state::session::SessionStore;

/// Reads the stored credential and stamps requests with it.
#[derive(Clone, Debug)]
pub struct RequestAuthenticator {
    session: SessionStore,
}

impl RequestAuthenticator {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }

    /// Return `request` stamped with the bearer header, or borrowed untouched
    /// when no token is stored.
    pub fn authenticate<'a>(&self, request: &'a ApiRequest) -> Cow<'a, ApiRequest> {
        match self.session.session_information() {
            Some(info) if !info.token.is_empty() => {
                Cow::Owned(request.clone().with_header("Authorization", &format!("Bearer {}", info.token)))
            }
            _ => Cow::Borrowed(request),
        }
    }
}

/// Transport decorator applying [`RequestAuthenticator`] to every request.
#[derive(Clone, Debug)]
pub struct AuthenticatedTransport<T> {
    inner: T,
    authenticator: RequestAuthenticator,
}

impl<T> AuthenticatedTransport<T> {
    pub fn new(inner: T, session: SessionStore) -> Self {
        Self { inner, authenticator: RequestAuthenticator::new(session) }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T: Transport> Transport for AuthenticatedTransport<T> {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let request = self.authenticator.authenticate(request);
        self.inner.send(&request).await
    }
}

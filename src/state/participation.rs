//! Refresh-on-mutation controller behind the session detail view.
//!
//! SYSTEM CONTEXT
//! ==============
//! One controller exists per mounted detail view. The view spawns [`run`]
//! on activation and calls [`deactivate`] on cleanup; buttons call
//! [`participate`], [`un_participate`] and [`delete`].
//!
//! DESIGN
//! ======
//! - The detail stream fetches once on activation and again on every refresh
//!   event. Each request claims a new generation number at the moment it is
//!   requested (in [`refresh`], not when the driver gets to it); only a result
//!   whose generation is still the latest is emitted, so a slow older fetch can
//!   never overwrite a newer one.
//! - Each emitted detail triggers a teacher fetch under the same generation.
//! - Membership is projected synchronously from each emitted detail and the
//!   current identity; nothing is flipped optimistically.
//!
//! [`run`]: ParticipationController::run
//! [`refresh`]: ParticipationController::refresh
//! [`deactivate`]: ParticipationController::deactivate
//! [`participate`]: ParticipationController::participate
//! [`un_participate`]: ParticipationController::un_participate
//! [`delete`]: ParticipationController::delete

#[cfg(test)]
#[path = "participation_test.rs"]
mod participation_test;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::future::LocalBoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use leptos_router::NavigateOptions;

use super::broadcast::Broadcast;
use super::session::SessionStore;
use crate::net::api::SessionDetailApi;
use crate::net::error::ApiError;
use crate::net::types::{Session, Teacher};

/// Where the view goes after deleting its session.
pub const SESSIONS_ROUTE: &str = "/sessions";

/// Generation of the fetch started on activation.
const INITIAL_GENERATION: u64 = 1;

enum Completion {
    Detail { generation: u64, result: Result<Session, ApiError> },
    Teacher { generation: u64, result: Result<Teacher, ApiError> },
}

/// Per-view pipeline keeping a session's detail, teacher and membership in
/// step with the server.
pub struct ParticipationController<A> {
    api: A,
    session: SessionStore,
    session_id: i64,
    generation: AtomicU64,
    active: AtomicBool,
    refresh_tx: UnboundedSender<u64>,
    refresh_rx: Mutex<Option<UnboundedReceiver<u64>>>,
    detail: Broadcast<Result<Session, ApiError>>,
    teacher: Broadcast<Result<Teacher, ApiError>>,
    participating: Broadcast<bool>,
}

impl<A: SessionDetailApi> ParticipationController<A> {
    pub fn new(api: A, session: SessionStore, session_id: i64) -> Self {
        let (refresh_tx, refresh_rx) = mpsc::unbounded();
        Self {
            api,
            session,
            session_id,
            generation: AtomicU64::new(INITIAL_GENERATION),
            active: AtomicBool::new(true),
            refresh_tx,
            refresh_rx: Mutex::new(Some(refresh_rx)),
            detail: Broadcast::new(),
            teacher: Broadcast::new(),
            participating: Broadcast::new(),
        }
    }

    pub fn session_id(&self) -> i64 {
        self.session_id
    }

    /// Latest session detail (or fetch failure).
    pub fn detail(&self) -> &Broadcast<Result<Session, ApiError>> {
        &self.detail
    }

    /// Teacher of the latest emitted detail.
    pub fn teacher(&self) -> &Broadcast<Result<Teacher, ApiError>> {
        &self.teacher
    }

    /// Whether the current user is in the latest emitted detail's participants.
    pub fn participating(&self) -> &Broadcast<bool> {
        &self.participating
    }

    pub fn is_admin(&self) -> bool {
        self.session.is_admin()
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Request a re-fetch of the detail.
    ///
    /// The request supersedes every earlier fetch immediately, even ones that
    /// complete before the driver starts the new fetch.
    pub fn refresh(&self) {
        let generation = self.next_generation();
        if self.refresh_tx.unbounded_send(generation).is_err() {
            log::debug!("participation: refresh after teardown ignored (session {})", self.session_id);
        }
    }

    /// Stop the pipeline. Results arriving afterwards are dropped and
    /// [`run`](Self::run) returns.
    pub fn deactivate(&self) {
        self.active.store(false, Ordering::Release);
        self.refresh_tx.close_channel();
    }

    /// Drive the pipeline until [`deactivate`](Self::deactivate).
    ///
    /// Fetches the detail immediately, then once per refresh event. Only the
    /// first call does anything; the view spawns it once.
    pub async fn run(&self) {
        let receiver = self.refresh_rx.lock().unwrap_or_else(PoisonError::into_inner).take();
        let Some(mut refresh) = receiver else {
            log::warn!("participation: driver already started for session {}", self.session_id);
            return;
        };
        if !self.is_active() {
            log::debug!("participation: deactivated before start (session {})", self.session_id);
            return;
        }

        let mut in_flight = FuturesUnordered::new();
        in_flight.push(self.fetch_detail(INITIAL_GENERATION));

        loop {
            futures::select! {
                trigger = refresh.next() => {
                    let Some(generation) = trigger else {
                        break;
                    };
                    in_flight.push(self.fetch_detail(generation));
                }
                completion = in_flight.select_next_some() => {
                    if let Some(follow_up) = self.settle(completion) {
                        in_flight.push(follow_up);
                    }
                }
                complete => break,
            }
        }
        log::debug!("participation: driver stopped for session {}", self.session_id);
    }

    /// Join the session, then refresh once the server acknowledged.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotAuthenticated`] without a stored identity, otherwise the
    /// mutation's own error. No refresh is requested on failure.
    pub async fn participate(&self) -> Result<(), ApiError> {
        let user_id = self.session.user_id().ok_or(ApiError::NotAuthenticated)?;
        self.api.participate(self.session_id, user_id).await?;
        self.refresh();
        Ok(())
    }

    /// Leave the session, then refresh once the server acknowledged.
    ///
    /// # Errors
    ///
    /// Same as [`participate`](Self::participate).
    pub async fn un_participate(&self) -> Result<(), ApiError> {
        let user_id = self.session.user_id().ok_or(ApiError::NotAuthenticated)?;
        self.api.un_participate(self.session_id, user_id).await?;
        self.refresh();
        Ok(())
    }

    /// Delete the session and leave the view.
    ///
    /// # Errors
    ///
    /// Returns the delete call's error; no navigation happens in that case.
    pub async fn delete<F>(&self, navigate: F) -> Result<(), ApiError>
    where
        F: Fn(&str, NavigateOptions),
    {
        self.api.delete_session(self.session_id).await?;
        navigate(SESSIONS_ROUTE, NavigateOptions::default());
        Ok(())
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.is_active() && self.generation.load(Ordering::Acquire) == generation
    }

    fn fetch_detail(&self, generation: u64) -> LocalBoxFuture<'_, Completion> {
        async move {
            let result = self.api.session_detail(self.session_id).await;
            Completion::Detail { generation, result }
        }
        .boxed_local()
    }

    fn fetch_teacher(&self, generation: u64, teacher_id: i64) -> LocalBoxFuture<'_, Completion> {
        async move {
            let result = self.api.teacher_detail(teacher_id).await;
            Completion::Teacher { generation, result }
        }
        .boxed_local()
    }

    /// Publish a finished fetch if it is still current; returns the teacher
    /// fetch to start after a fresh detail.
    fn settle(&self, completion: Completion) -> Option<LocalBoxFuture<'_, Completion>> {
        match completion {
            Completion::Detail { generation, result } => {
                if !self.is_current(generation) {
                    log::debug!("participation: dropping superseded detail (generation {generation})");
                    return None;
                }
                let follow_up = match &result {
                    Ok(session) => {
                        let participating = self.session.user_id().is_some_and(|id| session.has_participant(id));
                        Some((participating, self.fetch_teacher(generation, session.teacher_id)))
                    }
                    Err(e) => {
                        log::warn!("participation: detail fetch for session {} failed: {e}", self.session_id);
                        None
                    }
                };
                self.detail.emit(result);
                let (participating, teacher) = follow_up?;
                self.participating.emit(participating);
                Some(teacher)
            }
            Completion::Teacher { generation, result } => {
                if self.is_current(generation) {
                    self.teacher.emit(result);
                } else {
                    log::debug!("participation: dropping superseded teacher (generation {generation})");
                }
                None
            }
        }
    }
}

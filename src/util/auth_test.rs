use super::*;
use std::cell::RefCell;
use std::sync::Arc;

use crate::state::session::SessionStore;
use crate::util::storage::MemoryStorage;

// =============================================================
// Helpers
// =============================================================

#[derive(Default)]
struct NavigationLog {
    calls: RefCell<Vec<(String, bool)>>,
}

impl NavigationLog {
    fn sink(&self) -> impl Fn(&str, NavigateOptions) + '_ {
        move |path, options| self.calls.borrow_mut().push((path.to_owned(), options.replace))
    }

    fn calls(&self) -> Vec<(String, bool)> {
        self.calls.borrow().clone()
    }
}

fn logged_in_store() -> SessionStore {
    let store = SessionStore::new(Arc::new(MemoryStorage::new()));
    let info = crate::net::types::SessionInformation {
        token: "t1".into(),
        kind: "Bearer".into(),
        id: 1,
        username: "yogi@studio.com".into(),
        first_name: "Yo".into(),
        last_name: "Gi".into(),
        admin: false,
    };
    store.log_in(&info).expect("memory storage accepts writes");
    store
}

// =============================================================
// Authenticated-only guard
// =============================================================

#[test]
fn logged_in_guard_allows_without_navigating() {
    let signal = Broadcast::with_value(true);
    let log = NavigationLog::default();

    assert_eq!(require_logged_in(&signal, log.sink()), GuardOutcome::Allowed);
    assert!(log.calls().is_empty());
}

#[test]
fn logged_in_guard_redirects_to_login_once_when_logged_out() {
    let signal = Broadcast::with_value(false);
    let log = NavigationLog::default();

    assert_eq!(require_logged_in(&signal, log.sink()), GuardOutcome::Denied);
    assert_eq!(log.calls(), vec![("/login".to_owned(), true)]);
}

#[test]
fn logged_in_guard_treats_missing_value_as_logged_out() {
    let signal = Broadcast::<bool>::new();
    let log = NavigationLog::default();

    assert_eq!(require_logged_in(&signal, log.sink()), GuardOutcome::Denied);
    assert_eq!(log.calls().len(), 1);
}

// =============================================================
// Guest-only guard
// =============================================================

#[test]
fn logged_out_guard_allows_guests() {
    let signal = Broadcast::with_value(false);
    let log = NavigationLog::default();

    assert_eq!(require_logged_out(&signal, log.sink()), GuardOutcome::Allowed);
    assert!(log.calls().is_empty());
}

#[test]
fn logged_out_guard_redirects_home_once_when_logged_in() {
    let signal = Broadcast::with_value(true);
    let log = NavigationLog::default();

    assert_eq!(require_logged_out(&signal, log.sink()), GuardOutcome::Denied);
    assert_eq!(log.calls(), vec![("/".to_owned(), true)]);
}

// =============================================================
// One-shot evaluation
// =============================================================

#[test]
fn guard_leaves_no_subscription_behind() {
    let signal = Broadcast::with_value(false);
    let log = NavigationLog::default();

    let _ = require_logged_in(&signal, log.sink());
    let _ = require_logged_out(&signal, log.sink());

    assert_eq!(signal.observer_count(), 0);
}

#[test]
fn later_signal_changes_do_not_renavigate() {
    let signal = Broadcast::with_value(false);
    let log = NavigationLog::default();

    let _ = require_logged_in(&signal, log.sink());
    signal.emit(true);
    signal.emit(false);

    assert_eq!(log.calls().len(), 1);
}

#[test]
fn guards_follow_the_session_store() {
    let store = logged_in_store();
    assert!(decide_logged_in(store.is_logged()).is_allowed());
    assert_eq!(decide_logged_out(store.is_logged()).redirect_to, Some(HOME_ROUTE));

    store.log_out().expect("memory storage accepts removals");
    assert_eq!(decide_logged_in(store.is_logged()).redirect_to, Some(LOGIN_ROUTE));
    assert!(decide_logged_out(store.is_logged()).is_allowed());
}

//! Integration tests for the session context
//!
//! Teardown must clear both the persisted row and the in-memory state, and
//! notify anyone watching the session.

use imgtui::api::User;
use imgtui::model::{Model, Screen};
use imgtui::session::{Session, SessionContext, SessionEvent, SessionStore};

fn session() -> Session {
    Session {
        token: "tok-123".to_string(),
        user: User {
            id: "u1".to_string(),
            username: Some("ana".to_string()),
            email: Some("ana@example.com".to_string()),
        },
    }
}

#[test]
fn test_begin_and_teardown() {
    let ctx = SessionContext::new(SessionStore::new_in_memory().expect("store"));
    assert_eq!(ctx.init().expect("init"), None);
    assert!(!ctx.is_authenticated());

    ctx.begin(session()).expect("begin");
    assert!(ctx.is_authenticated());
    assert_eq!(ctx.token().as_deref(), Some("tok-123"));

    assert!(ctx.teardown(SessionEvent::Expired));
    assert!(!ctx.is_authenticated());
    assert_eq!(ctx.token(), None);
    assert_eq!(ctx.user(), None);

    // Nothing left to tear down
    assert!(!ctx.teardown(SessionEvent::Expired));
}

#[test]
fn test_teardown_notifies_watchers() {
    let ctx = SessionContext::new(SessionStore::new_in_memory().expect("store"));
    let mut rx = ctx.subscribe();

    ctx.begin(session()).expect("begin");
    assert!(rx.has_changed().expect("sender alive"));
    assert_eq!(*rx.borrow_and_update(), SessionEvent::SignedIn);

    ctx.teardown(SessionEvent::Expired);
    assert!(rx.has_changed().expect("sender alive"));
    assert_eq!(*rx.borrow_and_update(), SessionEvent::Expired);
}

#[test]
fn test_clone_shares_state() {
    let ctx = SessionContext::new(SessionStore::new_in_memory().expect("store"));
    let client_side = ctx.clone();

    ctx.begin(session()).expect("begin");
    assert_eq!(client_side.token().as_deref(), Some("tok-123"));

    client_side.teardown(SessionEvent::Expired);
    assert!(!ctx.is_authenticated());
}

#[test]
fn test_update_user_refreshes_record() {
    let ctx = SessionContext::new(SessionStore::new_in_memory().expect("store"));
    ctx.begin(session()).expect("begin");

    let renamed = User {
        id: "u1".to_string(),
        username: Some("ana.b".to_string()),
        email: None,
    };
    ctx.update_user(renamed.clone()).expect("update");
    assert_eq!(ctx.user(), Some(renamed));
    assert_eq!(ctx.token().as_deref(), Some("tok-123"));
}

/// Test: expiry returns the UI to login with the expiry notice
#[test]
fn test_expired_session_returns_to_login() {
    let mut model = Model::new(false);
    model.sign_in(session().user);
    model.open_upload();

    model.sign_out(SessionEvent::Expired);

    assert_eq!(model.screen, Screen::Login);
    assert!(model.user.is_none());
    assert!(!model.has_modal());
    assert_eq!(
        model.auth.notice.as_deref(),
        Some("Session expired, please log in again")
    );
    assert!(!model.needs_reload());
}

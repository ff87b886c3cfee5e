//! Test for out-of-order content loads
//!
//! Bug being guarded against: the user opens folder A, then quickly folder
//! B. Both listings are requested concurrently; if A's response is slower
//! it arrives last and, applied naively, shows A's contents under B's
//! breadcrumb.
//!
//! Every load carries a generation; only the newest one issued is applied.

use anyhow::anyhow;
use imgtui::api::{ApiError, Folder, FolderContents, Image};
use imgtui::model::{Model, Outcome};

fn folder(id: &str, name: &str) -> Folder {
    Folder {
        id: id.to_string(),
        name: name.to_string(),
        parent_folder: None,
    }
}

fn image(id: &str, name: &str) -> Image {
    Image {
        id: id.to_string(),
        name: name.to_string(),
        size: 1024,
        created_at: "2025-03-01T12:00:00Z".to_string(),
        folder: None,
        url: format!("/uploads/{}.png", id),
    }
}

fn signed_in_model() -> Model {
    let mut model = Model::new(false);
    model.sign_in(Default::default());
    model
}

/// Test: A issued first, B second; B applied, then A arrives and is dropped
#[test]
fn test_late_response_does_not_overwrite_newer_state() {
    let mut model = signed_in_model();

    model.navigation.enter_folder(&folder("a", "A"));
    let ticket_a = model.begin_reload();

    model.navigation.jump_to_breadcrumb(0);
    model.navigation.enter_folder(&folder("b", "B"));
    let ticket_b = model.begin_reload();

    let contents_b = FolderContents {
        folders: vec![folder("b-child", "In B")],
        images: vec![image("ib", "b.png")],
    };
    assert_eq!(model.apply_load(&ticket_b, Ok(contents_b.clone())), Outcome::Applied);

    let contents_a = FolderContents {
        folders: vec![folder("a-child", "In A")],
        images: vec![image("ia", "a.png")],
    };
    assert_eq!(model.apply_load(&ticket_a, Ok(contents_a)), Outcome::Stale);

    assert_eq!(model.content.folders, contents_b.folders);
    assert_eq!(model.content.images, contents_b.images);
    assert_eq!(model.content.shown_key.as_ref(), Some(&ticket_b.key));
    assert!(!model.content.loading);
}

/// Test: A arriving before B is also not shown once B was issued
#[test]
fn test_early_response_for_outdated_load_is_dropped() {
    let mut model = signed_in_model();

    model.navigation.enter_folder(&folder("a", "A"));
    let ticket_a = model.begin_reload();
    model.navigation.set_search_term("cat");
    let ticket_b = model.begin_reload();

    assert_eq!(
        model.apply_load(&ticket_a, Ok(FolderContents::default())),
        Outcome::Stale
    );
    assert!(model.content.loading, "B is still outstanding");

    assert_eq!(
        model.apply_load(&ticket_b, Ok(FolderContents::default())),
        Outcome::Applied
    );
    assert!(!model.content.loading);
}

/// Test: a stale failure neither records an error nor ends the newer load
#[test]
fn test_stale_failure_is_ignored() {
    let mut model = signed_in_model();
    let ticket_a = model.begin_reload();
    model.navigation.enter_folder(&folder("b", "B"));
    let _ticket_b = model.begin_reload();

    let outcome = model.apply_load(&ticket_a, Err(anyhow!("connection reset")));

    assert_eq!(outcome, Outcome::Stale);
    assert!(model.content.last_error.is_none());
    assert!(model.content.loading);
}

/// Test: a failed load keeps the previously shown lists
#[test]
fn test_failed_load_keeps_previous_lists() {
    let mut model = signed_in_model();
    let first = model.begin_reload();
    let contents = FolderContents {
        folders: vec![folder("v1", "Vacation")],
        images: vec![image("i1", "cat.png")],
    };
    model.apply_load(&first, Ok(contents.clone()));

    let second = model.begin_reload();
    let error = ApiError::Status {
        status: 500,
        message: "Server error".to_string(),
    };
    assert_eq!(model.apply_load(&second, Err(error.into())), Outcome::Failed);

    assert_eq!(model.content.folders, contents.folders);
    assert_eq!(model.content.images, contents.images);
    assert!(model.content.last_error.is_some());
    assert!(!model.content.loading);
}

/// Test: a 401 on a load asks for session teardown
#[test]
fn test_unauthorized_load_requests_teardown() {
    let mut model = signed_in_model();
    let ticket = model.begin_reload();
    let error = ApiError::Unauthorized {
        message: "Token expired".to_string(),
    };
    assert_eq!(
        model.apply_load(&ticket, Err(error.into())),
        Outcome::SessionExpired
    );
}

/// Test: a listing requested by the previous user arrives after a new sign-in
#[test]
fn test_load_from_previous_session_is_dropped() {
    use imgtui::api::User;
    use imgtui::session::SessionEvent;

    let mut model = Model::new(false);
    model.sign_in(User {
        id: "u1".to_string(),
        username: Some("alice".to_string()),
        email: None,
    });
    let alice_ticket = model.begin_reload();

    model.sign_out(SessionEvent::SignedOut);
    model.sign_in(User {
        id: "u2".to_string(),
        username: Some("bob".to_string()),
        email: None,
    });
    let bob_ticket = model.begin_reload();
    assert!(bob_ticket.generation > alice_ticket.generation);

    let alice_contents = FolderContents {
        folders: vec![folder("p1", "alice-private")],
        images: vec![],
    };
    assert_eq!(model.apply_load(&alice_ticket, Ok(alice_contents)), Outcome::Stale);
    assert!(model.content.folders.is_empty());
    assert!(model.content.loading, "bob's load is still outstanding");
}

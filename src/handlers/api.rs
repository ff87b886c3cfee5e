//! API Response Handler
//!
//! Applies responses from the background API service to the model and
//! issues the follow-up requests they call for (reload after a mutation,
//! teardown after a 401).

use imgtui::log_debug;
use imgtui::logic::errors;
use imgtui::model::Outcome;
use imgtui::services::api::ApiResponse;
use imgtui::session::Session;

use crate::App;

/// Handle API response from background service
///
/// Response types:
/// - AuthResult: Login or registration reply
/// - CurrentUserResult: `/auth/me` confirming a restored session
/// - ContentResult: Folder listing for one load ticket
/// - MutationResult: Create/upload/delete outcome
pub fn handle_api_response(app: &mut App, response: ApiResponse) {
    match response {
        ApiResponse::AuthResult { result } => match result {
            Ok(auth) => {
                let user = auth.user.clone();
                let session = Session {
                    token: auth.token,
                    user: auth.user,
                };
                if let Err(e) = app.session.begin(session) {
                    log_debug(&format!("Failed to persist session: {:#}", e));
                    app.model.auth.submitting = false;
                    app.model.auth.error = Some("Could not save session".to_string());
                    return;
                }
                log_debug(&format!("Signed in as {}", user.display_name()));
                app.model.sign_in(user);
            }
            Err(e) => {
                log_debug(&format!("Authentication failed: {:#}", e));
                app.model.apply_auth_failure(&e);
            }
        },

        ApiResponse::CurrentUserResult { result } => match result {
            Ok(user) => {
                if let Err(e) = app.session.update_user(user.clone()) {
                    log_debug(&format!("Failed to store refreshed user: {:#}", e));
                }
                app.model.user = Some(user);
            }
            Err(e) if errors::is_unauthorized(&e) => app.expire_session(),
            Err(e) => {
                // Keep the restored user; the next call will tell if the token is bad
                log_debug(&format!(
                    "Could not confirm session: {}",
                    errors::format_error_message(&e)
                ));
            }
        },

        ApiResponse::ContentResult { ticket, result } => {
            match app.model.apply_load(&ticket, result) {
                Outcome::SessionExpired => app.expire_session(),
                Outcome::Stale => log_debug(&format!(
                    "DEBUG [ContentResult]: Dropped stale gen={} (latest={})",
                    ticket.generation,
                    app.model.content.latest_generation()
                )),
                Outcome::Failed => log_debug(&format!(
                    "DEBUG [ContentResult]: gen={} failed: {}",
                    ticket.generation,
                    app.model.content.last_error.as_deref().unwrap_or("")
                )),
                Outcome::Applied | Outcome::Reload => {}
            }
        }

        ApiResponse::MutationResult { kind, result } => {
            match app.model.apply_mutation_result(kind, result) {
                Outcome::Reload => app.reload_content(),
                Outcome::SessionExpired => app.expire_session(),
                _ => {}
            }
        }
    }
}

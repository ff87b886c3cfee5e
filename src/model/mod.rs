//! Pure Application Model - Elm Architecture
//!
//! This module defines the pure, cloneable state for the application.
//! The Model is organized into focused sub-models for maintainability:
//!
//! - **NavigationModel**: Breadcrumb trail, current folder, search term
//! - **ContentModel**: Folder/image listing and load ordering
//! - **UiModel**: Focus, selection, forms, dialogs, popups
//! - **LoginForm**: Login/register screen state
//!
//! Key principles:
//! - No services: All I/O lives in the runtime (`App` in main.rs)
//! - Results from the backend are applied through methods returning an
//!   `Outcome` that tells the runtime what to do next

pub mod auth;
pub mod content;
pub mod navigation;
pub mod types;
pub mod ui;

pub use auth::{LoginForm, Screen};
pub use content::ContentModel;
pub use navigation::NavigationModel;
pub use types::*;
pub use ui::UiModel;

use crate::api::{Folder, FolderContents, Image, User};
use crate::logic::{errors, forms, selection};
use crate::session::SessionEvent;
use ui::{ConfirmAction, CreateFolderForm, UploadForm};

/// Root application model composed of focused sub-models
#[derive(Clone, Debug)]
pub struct Model {
    pub screen: Screen,

    /// Signed-in user (header greeting)
    pub user: Option<User>,

    pub auth: LoginForm,
    pub navigation: NavigationModel,
    pub content: ContentModel,
    pub ui: UiModel,
}

impl Model {
    /// Create initial model on the login screen
    pub fn new(vim_mode: bool) -> Self {
        Self {
            screen: Screen::Login,
            user: None,
            auth: LoginForm::new(),
            navigation: NavigationModel::new(),
            content: ContentModel::new(),
            ui: UiModel::new(vim_mode),
        }
    }

    // ============================================
    // SESSION
    // ============================================

    /// Switch to the dashboard at the root folder
    pub fn sign_in(&mut self, user: User) {
        self.screen = Screen::Dashboard;
        self.user = Some(user);
        self.auth = LoginForm::new();
        self.navigation.reset();
        self.content.clear();
        self.ui.close_all_modals();
        self.ui.reset_selection();
        self.ui.search_input.clear();
    }

    /// Return to the login screen, dropping everything user-specific
    pub fn sign_out(&mut self, event: SessionEvent) {
        self.screen = Screen::Login;
        self.user = None;
        self.auth = LoginForm::new();
        if event == SessionEvent::Expired {
            self.auth.notice = Some("Session expired, please log in again".to_string());
        }
        self.navigation.reset();
        self.content.clear();
        self.ui.close_all_modals();
        self.ui.reset_selection();
        self.ui.search_input.clear();
    }

    /// Login/register failed; show why in the form
    pub fn apply_auth_failure(&mut self, error: &anyhow::Error) {
        let fallback = match self.auth.mode {
            auth::AuthMode::Login => "Login failed",
            auth::AuthMode::Register => "Registration failed",
        };
        self.auth.submitting = false;
        self.auth.error = Some(errors::user_message(error, fallback));
    }

    // ============================================
    // CONTENT LOADING
    // ============================================

    /// True when the dashboard shows a folder/search that was not requested yet
    pub fn needs_reload(&self) -> bool {
        self.screen == Screen::Dashboard && self.content.needs_reload(&self.navigation.load_key())
    }

    /// Issue a load for the current navigation state
    pub fn begin_reload(&mut self) -> LoadTicket {
        self.content.begin_load(self.navigation.load_key())
    }

    pub fn apply_load(
        &mut self,
        ticket: &LoadTicket,
        result: Result<FolderContents, anyhow::Error>,
    ) -> Outcome {
        let outcome = self.content.apply_load(ticket, result);
        if outcome == Outcome::Applied {
            self.ui.folder_selection =
                selection::clamp_selection(self.ui.folder_selection, self.content.folders.len());
            self.ui.image_selection =
                selection::clamp_selection(self.ui.image_selection, self.content.images.len());
        }
        outcome
    }

    // ============================================
    // NAVIGATION
    // ============================================

    pub fn selected_folder(&self) -> Option<&Folder> {
        self.ui
            .folder_selection
            .and_then(|idx| self.content.folders.get(idx))
    }

    pub fn selected_image(&self) -> Option<&Image> {
        self.ui
            .image_selection
            .and_then(|idx| self.content.images.get(idx))
    }

    /// Enter the highlighted folder; returns false when none is highlighted
    pub fn enter_selected_folder(&mut self) -> bool {
        let Some(folder) = self.selected_folder().cloned() else {
            return false;
        };
        self.navigation.enter_folder(&folder);
        self.ui.reset_selection();
        self.ui.search_input.clear();
        true
    }

    pub fn jump_to_breadcrumb(&mut self, index: usize) {
        self.navigation.jump_to_breadcrumb(index);
        self.ui.reset_selection();
        self.ui.search_input.clear();
    }

    pub fn go_up(&mut self) -> bool {
        if !self.navigation.go_up() {
            return false;
        }
        self.ui.reset_selection();
        self.ui.search_input.clear();
        true
    }

    /// Apply the typed search text as the active filter
    pub fn apply_search(&mut self) {
        let term = self.ui.search_input.value.clone();
        self.navigation.set_search_term(&term);
        self.ui.search_input = types::TextInput::with_value(self.navigation.search_term());
        self.ui.search_mode = false;
        self.ui.image_selection = None;
    }

    pub fn clear_search(&mut self) {
        self.navigation.set_search_term("");
        self.ui.search_input.clear();
        self.ui.search_mode = false;
        self.ui.image_selection = None;
    }

    pub fn move_selection(&mut self, delta: isize) {
        match self.ui.focus {
            FocusPane::Folders => {
                self.ui.folder_selection = selection::move_selection(
                    self.ui.folder_selection,
                    self.content.folders.len(),
                    delta,
                );
            }
            FocusPane::Images => {
                self.ui.image_selection = selection::move_selection(
                    self.ui.image_selection,
                    self.content.images.len(),
                    delta,
                );
            }
        }
    }

    // ============================================
    // MUTATIONS
    // ============================================

    pub fn open_create_folder(&mut self) {
        self.ui.create_folder = Some(CreateFolderForm::default());
    }

    pub fn open_upload(&mut self) {
        self.ui.upload = Some(UploadForm::new());
    }

    /// Ask for confirmation before deleting the highlighted item
    pub fn request_delete_selected(&mut self) -> bool {
        let action = match self.ui.focus {
            FocusPane::Folders => self.selected_folder().map(|f| ConfirmAction::DeleteFolder {
                id: f.id.clone(),
                name: f.name.clone(),
            }),
            FocusPane::Images => self.selected_image().map(|i| ConfirmAction::DeleteImage {
                id: i.id.clone(),
                name: i.name.clone(),
            }),
        };
        let requested = action.is_some();
        self.ui.confirm = action;
        requested
    }

    /// Validate the create-folder form
    ///
    /// Returns (name, parent folder) to send, or `None` when the form is
    /// invalid (error shown in the form) or already submitting.
    pub fn submit_create_folder(&mut self) -> Option<(String, Option<String>)> {
        let parent = self.navigation.current_folder().map(str::to_string);
        let form = self.ui.create_folder.as_mut()?;
        if form.submitting {
            return None;
        }

        match forms::validate_folder_name(&form.name.value) {
            Ok(name) => {
                form.error = None;
                form.submitting = true;
                Some((name, parent))
            }
            Err(message) => {
                form.error = Some(message.to_string());
                None
            }
        }
    }

    /// Validate the upload form's text fields
    ///
    /// Returns (image name, file path). The file itself is checked by the
    /// caller, which reports problems through `reject_upload`.
    pub fn submit_upload(&mut self) -> Option<(String, String)> {
        let form = self.ui.upload.as_mut()?;
        if form.submitting {
            return None;
        }

        if form.path.is_blank() {
            form.error = Some(crate::logic::upload::UploadValidationError::MissingFile.to_string());
            return None;
        }
        if form.name.is_blank() {
            // Same auto-fill as when tabbing out of the path field
            if form.focus == ui::UploadField::Path {
                form.switch_field();
            }
        }

        match forms::validate_image_name(&form.name.value) {
            Ok(name) => {
                form.error = None;
                form.submitting = true;
                Some((name, form.path.value.trim().to_string()))
            }
            Err(message) => {
                form.error = Some(message.to_string());
                None
            }
        }
    }

    /// Local file validation failed; keep the form open with the reason
    pub fn reject_upload(&mut self, message: String) {
        if let Some(form) = self.ui.upload.as_mut() {
            form.submitting = false;
            form.error = Some(message);
        }
    }

    /// Apply the result of a create/upload/delete call
    ///
    /// Success closes the associated form and asks for a reload. Failure
    /// keeps the form open with the backend's message (create/upload) or
    /// raises a blocking alert (delete). A 401 supersedes both. Results
    /// that arrive after the session ended are dropped as stale.
    pub fn apply_mutation_result(
        &mut self,
        kind: MutationKind,
        result: Result<(), anyhow::Error>,
    ) -> Outcome {
        if self.screen != Screen::Dashboard {
            crate::log_debug(&format!("Dropping {:?} result after sign-out", kind));
            return Outcome::Stale;
        }

        match result {
            Ok(()) => {
                match kind {
                    MutationKind::CreateFolder => self.ui.create_folder = None,
                    MutationKind::UploadImage => self.ui.upload = None,
                    MutationKind::DeleteFolder | MutationKind::DeleteImage => {}
                }
                self.ui.show_toast(kind.success_message().to_string());
                Outcome::Reload
            }
            Err(e) => {
                crate::log_debug(&format!("Error in {:?}: {:#}", kind, e));
                if errors::is_unauthorized(&e) {
                    return Outcome::SessionExpired;
                }

                let message = errors::user_message(&e, kind.failure_fallback());
                match kind {
                    MutationKind::CreateFolder => {
                        if let Some(form) = self.ui.create_folder.as_mut() {
                            form.submitting = false;
                            form.error = Some(message);
                        }
                    }
                    MutationKind::UploadImage => {
                        if let Some(form) = self.ui.upload.as_mut() {
                            form.submitting = false;
                            form.error = Some(message);
                        }
                    }
                    MutationKind::DeleteFolder | MutationKind::DeleteImage => {
                        self.ui.alert = Some(message);
                    }
                }
                Outcome::Failed
            }
        }
    }

    // ============================================
    // MISC
    // ============================================

    pub fn has_modal(&self) -> bool {
        self.ui.has_modal()
    }

    pub fn show_toast(&mut self, message: String) {
        self.ui.show_toast(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            username: Some("ana".to_string()),
            email: None,
        }
    }

    #[test]
    fn test_model_creation() {
        let model = Model::new(false);
        assert_eq!(model.screen, Screen::Login);
        assert!(model.user.is_none());
        assert!(!model.needs_reload(), "login screen never loads content");
    }

    #[test]
    fn test_sign_in_triggers_initial_root_load() {
        let mut model = Model::new(false);
        model.sign_in(user());
        assert_eq!(model.screen, Screen::Dashboard);
        assert!(model.needs_reload());

        let ticket = model.begin_reload();
        assert_eq!(ticket.key.folder_id, None);
        assert_eq!(ticket.key.search, "");
        assert!(!model.needs_reload());
    }

    #[test]
    fn test_sign_out_expired_sets_notice() {
        let mut model = Model::new(false);
        model.sign_in(user());
        model.open_create_folder();
        model.sign_out(SessionEvent::Expired);
        assert_eq!(model.screen, Screen::Login);
        assert!(model.ui.create_folder.is_none());
        assert!(model.auth.notice.is_some());

        model.sign_in(user());
        model.sign_out(SessionEvent::SignedOut);
        assert!(model.auth.notice.is_none());
    }

    #[test]
    fn test_submit_create_folder_requires_name() {
        let mut model = Model::new(false);
        model.sign_in(user());
        model.open_create_folder();
        assert_eq!(model.submit_create_folder(), None);
        assert_eq!(
            model.ui.create_folder.as_ref().unwrap().error.as_deref(),
            Some("Folder name is required")
        );
    }

    #[test]
    fn test_submit_create_folder_single_flight() {
        let mut model = Model::new(false);
        model.sign_in(user());
        model.open_create_folder();
        model.ui.create_folder.as_mut().unwrap().name = TextInput::with_value(" Work ");
        assert_eq!(model.submit_create_folder(), Some(("Work".to_string(), None)));
        assert_eq!(model.submit_create_folder(), None);
    }

    #[test]
    fn test_submit_upload_requires_file() {
        let mut model = Model::new(false);
        model.sign_in(user());
        model.open_upload();
        assert_eq!(model.submit_upload(), None);
        assert_eq!(
            model.ui.upload.as_ref().unwrap().error.as_deref(),
            Some("Please select an image file")
        );
    }

    #[test]
    fn test_submit_upload_autofills_name() {
        let mut model = Model::new(false);
        model.sign_in(user());
        model.open_upload();
        model.ui.upload.as_mut().unwrap().path = TextInput::with_value("/tmp/cat.png");
        assert_eq!(
            model.submit_upload(),
            Some(("cat".to_string(), "/tmp/cat.png".to_string()))
        );
    }

    #[test]
    fn test_reject_upload_reopens_form() {
        let mut model = Model::new(false);
        model.open_upload();
        model.ui.upload.as_mut().unwrap().submitting = true;
        model.reject_upload("Please select a valid image file".to_string());
        let form = model.ui.upload.as_ref().unwrap();
        assert!(!form.submitting);
        assert_eq!(form.error.as_deref(), Some("Please select a valid image file"));
    }

    #[test]
    fn test_request_delete_needs_selection() {
        let mut model = Model::new(false);
        model.sign_in(user());
        assert!(!model.request_delete_selected());
        assert!(model.ui.confirm.is_none());
    }
}

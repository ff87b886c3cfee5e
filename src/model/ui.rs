//! UI Model
//!
//! This sub-model contains all state related to the dashboard interface:
//! focus and selection, search input, forms, dialogs and popups.

use std::time::Instant;

use super::types::{FocusPane, TextInput};

/// How long a toast stays on screen
pub const TOAST_DURATION_MS: u128 = 1500;

#[derive(Clone, Debug, Default)]
pub struct CreateFolderForm {
    pub name: TextInput,
    pub error: Option<String>,
    pub submitting: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadField {
    Name,
    Path,
}

#[derive(Clone, Debug)]
pub struct UploadForm {
    pub name: TextInput,
    /// Local path of the file to upload
    pub path: TextInput,
    pub focus: UploadField,
    pub error: Option<String>,
    pub submitting: bool,
}

impl UploadForm {
    pub fn new() -> Self {
        Self {
            name: TextInput::new(),
            path: TextInput::new(),
            focus: UploadField::Path,
            error: None,
            submitting: false,
        }
    }

    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            UploadField::Name => &mut self.name,
            UploadField::Path => &mut self.path,
        }
    }

    /// Move focus to the other field, auto-filling the name from the file
    /// name when leaving the path field with no name typed yet
    pub fn switch_field(&mut self) {
        if self.focus == UploadField::Path && self.name.is_blank() && !self.path.is_blank() {
            let path = crate::logic::upload::expand_user_path(&self.path.value);
            if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
                self.name = TextInput::with_value(&crate::logic::upload::default_image_name(file_name));
            }
        }
        self.focus = match self.focus {
            UploadField::Name => UploadField::Path,
            UploadField::Path => UploadField::Name,
        };
    }
}

impl Default for UploadForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Action awaiting an explicit y/n
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteFolder { id: String, name: String },
    DeleteImage { id: String, name: String },
    Logout,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PreviewStatus {
    Loading,
    Ready {
        dimensions: (u32, u32),
        format: String,
    },
    Failed(String),
}

/// Image preview popup
///
/// The decoded terminal protocol lives in the runtime (it is not cloneable);
/// this only tracks which image is shown and how far loading got.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewState {
    pub image_id: String,
    pub name: String,
    pub size: u64,
    pub status: PreviewStatus,
}

#[derive(Clone, Debug)]
pub struct UiModel {
    // ============================================
    // PREFERENCES
    // ============================================
    /// Whether vim keybindings are enabled
    pub vim_mode: bool,

    // ============================================
    // FOCUS & SELECTION
    // ============================================
    pub focus: FocusPane,
    pub folder_selection: Option<usize>,
    pub image_selection: Option<usize>,

    // ============================================
    // SEARCH
    // ============================================
    /// Whether search input is active (receiving keystrokes)
    pub search_mode: bool,

    /// Text being typed; applied to navigation on Enter
    pub search_input: TextInput,

    // ============================================
    // DIALOGS & POPUPS
    // ============================================
    pub create_folder: Option<CreateFolderForm>,
    pub upload: Option<UploadForm>,
    pub confirm: Option<ConfirmAction>,

    /// Blocking error alert (dismissed with Enter/Esc)
    pub alert: Option<String>,

    pub preview: Option<PreviewState>,

    /// Toast message (text, timestamp)
    pub toast_message: Option<(String, Instant)>,

    /// Whether app should quit
    pub should_quit: bool,
}

impl UiModel {
    pub fn new(vim_mode: bool) -> Self {
        Self {
            vim_mode,
            focus: FocusPane::Folders,
            folder_selection: None,
            image_selection: None,
            search_mode: false,
            search_input: TextInput::new(),
            create_folder: None,
            upload: None,
            confirm: None,
            alert: None,
            preview: None,
            toast_message: None,
            should_quit: false,
        }
    }

    /// Check if any modal dialog is currently showing
    pub fn has_modal(&self) -> bool {
        self.create_folder.is_some()
            || self.upload.is_some()
            || self.confirm.is_some()
            || self.alert.is_some()
            || self.preview.is_some()
            || self.search_mode
    }

    pub fn close_all_modals(&mut self) {
        self.create_folder = None;
        self.upload = None;
        self.confirm = None;
        self.alert = None;
        self.preview = None;
        self.search_mode = false;
    }

    /// Forget per-folder selection state (after navigating)
    pub fn reset_selection(&mut self) {
        self.folder_selection = None;
        self.image_selection = None;
        self.focus = FocusPane::Folders;
    }

    pub fn show_toast(&mut self, message: String) {
        self.toast_message = Some((message, Instant::now()));
    }

    pub fn should_dismiss_toast(&self) -> bool {
        match &self.toast_message {
            Some((_, timestamp)) => timestamp.elapsed().as_millis() >= TOAST_DURATION_MS,
            None => false,
        }
    }

    pub fn dismiss_toast(&mut self) {
        self.toast_message = None;
    }
}

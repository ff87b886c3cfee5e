//! Shared types for the Model
//!
//! These types are used across multiple sub-models and represent
//! fundamental domain concepts.

/// A single level in the breadcrumb trail
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BreadcrumbEntry {
    pub name: String,
    /// `None` for the root ("Home")
    pub folder_id: Option<String>,
}

impl BreadcrumbEntry {
    pub fn root() -> Self {
        Self {
            name: "Home".to_string(),
            folder_id: None,
        }
    }
}

/// The navigation state a content load is issued for
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LoadKey {
    pub folder_id: Option<String>,
    /// Empty means no filter
    pub search: String,
}

/// Tag attached to every content load; only the latest generation is applied
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub key: LoadKey,
}

/// Backend write operations triggered from the dashboard
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationKind {
    CreateFolder,
    UploadImage,
    DeleteFolder,
    DeleteImage,
}

impl MutationKind {
    /// Message used when the backend gives no message of its own
    pub fn failure_fallback(&self) -> &'static str {
        match self {
            MutationKind::CreateFolder => "Error creating folder",
            MutationKind::UploadImage => "Error uploading image",
            MutationKind::DeleteFolder => "Error deleting folder",
            MutationKind::DeleteImage => "Error deleting image",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            MutationKind::CreateFolder => "Folder created",
            MutationKind::UploadImage => "Image uploaded",
            MutationKind::DeleteFolder => "Folder deleted",
            MutationKind::DeleteImage => "Image deleted",
        }
    }
}

/// What the caller must do after a backend result was applied
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Result applied; reload the current folder
    Reload,
    /// Result applied; nothing further
    Applied,
    /// Result belonged to an outdated request and was dropped
    Stale,
    /// Failure surfaced to the user
    Failed,
    /// 401: the session must be torn down
    SessionExpired,
}

/// Which list has keyboard focus on the dashboard
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusPane {
    Folders,
    Images,
}

impl FocusPane {
    pub fn toggle(self) -> Self {
        match self {
            FocusPane::Folders => FocusPane::Images,
            FocusPane::Images => FocusPane::Folders,
        }
    }
}

/// Single-line text input
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextInput {
    pub value: String,
    /// Render as bullets (passwords)
    pub masked: bool,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn masked() -> Self {
        Self {
            value: String::new(),
            masked: true,
        }
    }

    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            masked: false,
        }
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

//! Navigation Model
//!
//! Current folder, breadcrumb trail and search term, kept as one unit.
//! The current folder is always the last breadcrumb entry, so the two can
//! never disagree. Every transition here is a pure state update; the run
//! loop compares `load_key()` with the last requested key to decide when
//! to reload.

use super::types::{BreadcrumbEntry, LoadKey};
use crate::api::Folder;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationModel {
    /// Path from root to the current folder; never empty
    breadcrumb: Vec<BreadcrumbEntry>,

    /// Active image filter (empty = none)
    search_term: String,
}

impl Default for NavigationModel {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationModel {
    /// Start at the root with no filter
    pub fn new() -> Self {
        Self {
            breadcrumb: vec![BreadcrumbEntry::root()],
            search_term: String::new(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn breadcrumb(&self) -> &[BreadcrumbEntry] {
        &self.breadcrumb
    }

    /// Current folder id (`None` = root)
    pub fn current_folder(&self) -> Option<&str> {
        self.breadcrumb
            .last()
            .and_then(|entry| entry.folder_id.as_deref())
    }

    pub fn current_name(&self) -> &str {
        self.breadcrumb
            .last()
            .map(|entry| entry.name.as_str())
            .unwrap_or("Home")
    }

    pub fn depth(&self) -> usize {
        self.breadcrumb.len() - 1
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn load_key(&self) -> LoadKey {
        LoadKey {
            folder_id: self.current_folder().map(str::to_string),
            search: self.search_term.clone(),
        }
    }

    /// Descend into a child of the current folder
    ///
    /// The folder must be one of the currently listed children, otherwise
    /// the trail no longer mirrors the backend tree.
    pub fn enter_folder(&mut self, folder: &Folder) {
        self.breadcrumb.push(BreadcrumbEntry {
            name: folder.name.clone(),
            folder_id: Some(folder.id.clone()),
        });
        self.search_term.clear();
    }

    /// Return to a breadcrumb entry, dropping everything after it
    ///
    /// # Panics
    /// Panics if `index` is not a valid breadcrumb index.
    pub fn jump_to_breadcrumb(&mut self, index: usize) {
        assert!(
            index < self.breadcrumb.len(),
            "breadcrumb index {} out of range (len {})",
            index,
            self.breadcrumb.len()
        );
        self.breadcrumb.truncate(index + 1);
        self.search_term.clear();
    }

    /// Go to the parent folder; returns false at the root
    pub fn go_up(&mut self) -> bool {
        if self.depth() == 0 {
            return false;
        }
        self.jump_to_breadcrumb(self.breadcrumb.len() - 2);
        true
    }

    /// Replace the search term; whitespace-only means no filter
    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.trim().to_string();
    }
}

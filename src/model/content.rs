//! Content Model
//!
//! Folder and image lists of the current folder plus the bookkeeping that
//! keeps concurrent loads ordered. Each load gets a fresh generation; a
//! result is applied only if its generation is the latest one issued, so a
//! slow response for a folder the user already left can never overwrite
//! the listing of the folder they are looking at now.

use super::types::{LoadKey, LoadTicket, Outcome};
use crate::api::{Folder, FolderContents, Image};
use crate::logic::errors;

#[derive(Clone, Debug, Default)]
pub struct ContentModel {
    pub folders: Vec<Folder>,
    pub images: Vec<Image>,

    /// Key of the listing currently displayed (None before the first load)
    pub shown_key: Option<LoadKey>,

    /// Key of the most recently issued load
    requested_key: Option<LoadKey>,

    /// Generation of the most recently issued load
    latest_generation: u64,

    /// True while the latest load is outstanding
    pub loading: bool,

    /// Diagnostic from the last failed load (cleared by the next success)
    pub last_error: Option<String>,
}

impl ContentModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the navigation state differs from what was last requested
    pub fn needs_reload(&self, key: &LoadKey) -> bool {
        self.requested_key.as_ref() != Some(key)
    }

    pub fn requested_key(&self) -> Option<&LoadKey> {
        self.requested_key.as_ref()
    }

    pub fn latest_generation(&self) -> u64 {
        self.latest_generation
    }

    /// Issue a new load for `key`; every earlier ticket becomes stale
    pub fn begin_load(&mut self, key: LoadKey) -> LoadTicket {
        self.latest_generation += 1;
        self.requested_key = Some(key.clone());
        self.loading = true;
        LoadTicket {
            generation: self.latest_generation,
            key,
        }
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.latest_generation
    }

    /// Apply the result of a load
    ///
    /// Stale tickets are dropped untouched. A failure keeps the previous
    /// lists on screen.
    pub fn apply_load(
        &mut self,
        ticket: &LoadTicket,
        result: Result<FolderContents, anyhow::Error>,
    ) -> Outcome {
        if !self.is_current(ticket) {
            crate::log_debug(&format!(
                "DEBUG [Content]: Dropping stale load gen={} (latest={}) folder={:?} search={:?}",
                ticket.generation, self.latest_generation, ticket.key.folder_id, ticket.key.search
            ));
            return Outcome::Stale;
        }

        self.loading = false;

        match result {
            Ok(contents) => {
                self.folders = contents.folders;
                self.images = contents.images;
                self.shown_key = Some(ticket.key.clone());
                self.last_error = None;
                Outcome::Applied
            }
            Err(e) => {
                let message = errors::format_error_message(&e);
                crate::log_debug(&format!(
                    "Error loading folder contents (folder={:?} search={:?}): {:#}",
                    ticket.key.folder_id, ticket.key.search, e
                ));
                if errors::is_unauthorized(&e) {
                    return Outcome::SessionExpired;
                }
                self.last_error = Some(message);
                Outcome::Failed
            }
        }
    }

    /// Drop lists and load state; the generation keeps counting so a load
    /// issued before the reset can never match a later ticket
    pub fn clear(&mut self) {
        *self = Self {
            latest_generation: self.latest_generation,
            ..Self::new()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(folder: Option<&str>, search: &str) -> LoadKey {
        LoadKey {
            folder_id: folder.map(str::to_string),
            search: search.to_string(),
        }
    }

    fn contents(folder_names: &[&str]) -> FolderContents {
        FolderContents {
            folders: folder_names
                .iter()
                .map(|name| Folder {
                    id: format!("id-{}", name),
                    name: name.to_string(),
                    parent_folder: None,
                })
                .collect(),
            images: Vec::new(),
        }
    }

    #[test]
    fn test_initial_state_needs_reload() {
        let content = ContentModel::new();
        assert!(content.needs_reload(&key(None, "")));
        assert!(!content.loading);
    }

    #[test]
    fn test_begin_load_records_key() {
        let mut content = ContentModel::new();
        let ticket = content.begin_load(key(None, ""));
        assert_eq!(ticket.generation, 1);
        assert!(content.loading);
        assert!(!content.needs_reload(&key(None, "")));
        assert!(content.needs_reload(&key(None, "cat")));
    }

    #[test]
    fn test_apply_current_load() {
        let mut content = ContentModel::new();
        let ticket = content.begin_load(key(None, ""));
        let outcome = content.apply_load(&ticket, Ok(contents(&["Vacation", "Work"])));
        assert_eq!(outcome, Outcome::Applied);
        assert!(!content.loading);
        assert_eq!(content.folders.len(), 2);
        assert_eq!(content.shown_key, Some(key(None, "")));
    }

    #[test]
    fn test_failure_keeps_previous_lists() {
        let mut content = ContentModel::new();
        let first = content.begin_load(key(None, ""));
        content.apply_load(&first, Ok(contents(&["Vacation"])));

        let second = content.begin_load(key(None, ""));
        let outcome = content.apply_load(&second, Err(anyhow::anyhow!("connection refused")));
        assert_eq!(outcome, Outcome::Failed);
        assert!(!content.loading);
        assert_eq!(content.folders.len(), 1);
        assert_eq!(content.last_error.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_clear_keeps_generation_counting() {
        let mut content = ContentModel::new();
        let before = content.begin_load(key(None, ""));
        content.clear();
        assert!(!content.loading);
        assert!(content.needs_reload(&key(None, "")));

        let after = content.begin_load(key(None, ""));
        assert!(after.generation > before.generation);
        assert_eq!(content.apply_load(&before, Ok(contents(&["Old"]))), Outcome::Stale);
        assert!(content.folders.is_empty());
    }

    #[test]
    fn test_stale_failure_does_not_stop_loading() {
        let mut content = ContentModel::new();
        let old = content.begin_load(key(None, ""));
        let _new = content.begin_load(key(Some("v1"), ""));

        assert_eq!(content.apply_load(&old, Err(anyhow::anyhow!("boom"))), Outcome::Stale);
        assert!(content.loading);
        assert!(content.last_error.is_none());
    }
}

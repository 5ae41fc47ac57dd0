//! Tab manager holding an ordered tab strip with one active tab

use super::{Tab, TabId};
use crate::host::{Host, HostError};
use crate::position::target_index;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tabshift_config::{DocumentInfo, MoveDirection, TabDescriptor};
use tabshift_filters::{DocumentResolver, VariableContext};

/// Manages an ordered strip of tabs and the documents behind them
#[derive(Debug, Default)]
pub struct TabManager {
    /// All tabs, in display order
    tabs: Vec<Tab>,
    /// Currently active tab ID
    active_tab_id: Option<TabId>,
    /// Counter for generating unique tab IDs
    next_tab_id: TabId,
    /// Open documents by resource path
    documents: HashMap<PathBuf, DocumentInfo>,
    /// Workspace folders, first is primary
    workspace_folders: Vec<PathBuf>,
    /// Messages passed to `notify`, oldest first
    notifications: Vec<String>,
}

impl TabManager {
    /// Create a new empty tab manager
    pub fn new() -> Self {
        Self {
            next_tab_id: 1,
            ..Self::default()
        }
    }

    /// Append a tab and return its ID
    ///
    /// A descriptor marked active becomes the active tab, as does the first tab.
    pub fn new_tab(&mut self, descriptor: TabDescriptor) -> TabId {
        let id = self.next_tab_id.max(1);
        self.next_tab_id = id + 1;

        if descriptor.is_active || self.active_tab_id.is_none() {
            self.active_tab_id = Some(id);
        }
        self.tabs.push(Tab::new(id, descriptor));
        log::debug!("Created tab {}", id);
        id
    }

    /// Close a tab by ID
    /// Returns true if the tab was found
    pub fn close_tab(&mut self, id: TabId) -> bool {
        let Some(index) = self.tabs.iter().position(|t| t.id == id) else {
            return false;
        };
        self.tabs.remove(index);

        if self.active_tab_id == Some(id) {
            // Focus moves to the neighbour that took the closed tab's place
            self.active_tab_id = self
                .tabs
                .get(index)
                .or_else(|| self.tabs.last())
                .map(|t| t.id);
        }
        log::debug!("Closed tab {}", id);
        true
    }

    /// Get a reference to the active tab
    pub fn active_tab(&self) -> Option<&Tab> {
        self.active_tab_id
            .and_then(|id| self.tabs.iter().find(|t| t.id == id))
    }

    /// Switch to a tab by ID
    pub fn switch_to(&mut self, id: TabId) {
        if self.tabs.iter().any(|t| t.id == id) {
            self.active_tab_id = Some(id);
            log::debug!("Switched to tab {}", id);
        }
    }

    /// Move a tab to a specific index
    /// Returns true if the tab was actually moved, false if not found or already at target
    pub fn move_tab_to_index(&mut self, id: TabId, target_index: usize) -> bool {
        let current_idx = match self.tabs.iter().position(|t| t.id == id) {
            Some(idx) => idx,
            None => return false,
        };

        let clamped_target = target_index.min(self.tabs.len().saturating_sub(1));
        if clamped_target == current_idx {
            return false;
        }

        let tab = self.tabs.remove(current_idx);
        self.tabs.insert(clamped_target, tab);
        log::debug!(
            "Moved tab {} from index {} to {}",
            id,
            current_idx,
            clamped_target
        );
        true
    }

    /// Register the document behind a resource
    pub fn open_document(&mut self, resource: impl Into<PathBuf>, info: DocumentInfo) {
        self.documents.insert(resource.into(), info);
    }

    /// Set the workspace folders used for variable expansion
    pub fn set_workspace_folders(&mut self, folders: Vec<PathBuf>) {
        self.workspace_folders = folders;
    }

    /// Get the number of tabs
    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    /// Get the active tab ID
    pub fn active_tab_id(&self) -> Option<TabId> {
        self.active_tab_id
    }

    /// Get index of active tab (0-based)
    pub fn active_tab_index(&self) -> Option<usize> {
        self.active_tab_id
            .and_then(|id| self.tabs.iter().position(|t| t.id == id))
    }

    /// Get all tabs as a slice
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Labels in display order
    pub fn labels(&self) -> Vec<&str> {
        self.tabs.iter().map(Tab::label).collect()
    }

    /// Documents by resource path
    pub fn documents(&self) -> &HashMap<PathBuf, DocumentInfo> {
        &self.documents
    }

    pub fn workspace_folders(&self) -> &[PathBuf] {
        &self.workspace_folders
    }

    /// Messages received through `notify`
    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }
}

impl DocumentResolver for TabManager {
    fn resolve_document(&self, resource: &Path) -> Option<DocumentInfo> {
        self.documents.get(resource).cloned()
    }
}

impl Host for TabManager {
    fn active_tab_sequence(&self) -> Option<Vec<TabDescriptor>> {
        if self.tabs.is_empty() {
            return None;
        }
        Some(
            self.tabs
                .iter()
                .map(|tab| TabDescriptor {
                    is_active: Some(tab.id) == self.active_tab_id,
                    ..tab.descriptor.clone()
                })
                .collect(),
        )
    }

    fn variable_context(&self) -> VariableContext {
        // Untitled documents have no file on disk to expand against
        let active_file = self
            .active_tab()
            .and_then(|tab| tab.descriptor.resource())
            .filter(|resource| {
                self.resolve_document(resource)
                    .is_none_or(|doc| !doc.is_untitled)
            })
            .map(Path::to_path_buf);
        VariableContext::new(active_file, self.workspace_folders.clone())
    }

    fn move_active_tab(
        &mut self,
        direction: MoveDirection,
        distance: usize,
    ) -> Result<(), HostError> {
        let (Some(id), Some(from)) = (self.active_tab_id, self.active_tab_index()) else {
            return Err(HostError::NoActiveTab);
        };

        let in_range = match direction {
            MoveDirection::Left => distance <= from,
            MoveDirection::Right => from + distance < self.tabs.len(),
        };
        if !in_range {
            return Err(HostError::OutOfRange {
                from,
                distance,
                direction,
                len: self.tabs.len(),
            });
        }

        self.move_tab_to_index(id, target_index(from, direction, distance));
        Ok(())
    }

    fn notify(&mut self, message: &str) {
        log::info!("{}", message);
        self.notifications.push(message.to_string());
    }
}

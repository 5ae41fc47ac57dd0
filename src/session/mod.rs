//! Session snapshots for the command-line host
//!
//! A session file describes one focused tab group as JSON:
//!
//! ```json
//! {
//!   "workspace_folders": ["/home/me/proj"],
//!   "tabs": [
//!     { "label": "README.md", "is_pinned": true, "resource": "/home/me/proj/README.md" },
//!     { "label": "main.rs", "is_active": true, "resource": "/home/me/proj/src/main.rs" }
//!   ],
//!   "documents": {
//!     "/home/me/proj/src/main.rs": { "language_id": "rust" }
//!   }
//! }
//! ```

pub mod storage;

use crate::tab::TabManager;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tabshift_config::{DocumentInfo, TabDescriptor};

/// One focused tab group and its surroundings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Tabs in display order; at most one should be active
    #[serde(default)]
    pub tabs: Vec<TabDescriptor>,
    /// Workspace folders, first is primary
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub workspace_folders: Vec<PathBuf>,
    /// Open documents by resource path
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub documents: BTreeMap<PathBuf, DocumentInfo>,
}

impl SessionState {
    /// Build a tab manager holding this session
    pub fn restore(&self) -> TabManager {
        let mut manager = TabManager::new();
        manager.set_workspace_folders(self.workspace_folders.clone());
        for (resource, info) in &self.documents {
            manager.open_document(resource.clone(), info.clone());
        }
        for tab in &self.tabs {
            manager.new_tab(tab.clone());
        }
        if self.tabs.iter().filter(|t| t.is_active).count() > 1 {
            log::warn!("Session marks several tabs active; using the last one");
        }
        manager
    }

    /// Snapshot a tab manager
    pub fn capture(manager: &TabManager) -> Self {
        let active = manager.active_tab_id();
        Self {
            tabs: manager
                .tabs()
                .iter()
                .map(|tab| TabDescriptor {
                    is_active: Some(tab.id) == active,
                    ..tab.descriptor.clone()
                })
                .collect(),
            workspace_folders: manager.workspace_folders().to_vec(),
            documents: manager
                .documents()
                .iter()
                .map(|(path, info)| (path.clone(), info.clone()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_then_capture() {
        let json = r#"{
            "workspace_folders": ["/w"],
            "tabs": [
                { "label": "a", "is_pinned": true },
                { "label": "b", "is_active": true, "resource": "/w/b.rs" },
                { "label": "c", "kind": "terminal" }
            ],
            "documents": { "/w/b.rs": { "language_id": "rust" } }
        }"#;
        let state: SessionState = serde_json::from_str(json).expect("valid session");
        let manager = state.restore();

        assert_eq!(manager.labels(), vec!["a", "b", "c"]);
        assert_eq!(manager.active_tab_index(), Some(1));
        assert_eq!(SessionState::capture(&manager), state);
    }

    #[test]
    fn test_first_tab_active_when_none_marked() {
        let state = SessionState {
            tabs: vec![TabDescriptor::new("a"), TabDescriptor::new("b")],
            ..SessionState::default()
        };
        assert_eq!(state.restore().active_tab_index(), Some(0));
    }
}

//! In-memory tab strip.
//!
//! This module provides:
//! - `Tab`: One entry of the strip, a stable id plus its descriptor
//! - `TabManager`: An ordered strip implementing [`crate::host::Host`]
//! - `TabId`: Unique identifier for each tab

mod manager;

pub use manager::TabManager;

use tabshift_config::TabDescriptor;

/// Unique identifier for a tab within a manager
pub type TabId = usize;

/// One entry of the tab strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: TabId,
    pub descriptor: TabDescriptor,
}

impl Tab {
    pub fn new(id: TabId, descriptor: TabDescriptor) -> Self {
        Self { id, descriptor }
    }

    /// Tab label
    pub fn label(&self) -> &str {
        &self.descriptor.label
    }
}

// Library exports for testing and embedding in other hosts
//
// The decision pipeline runs leaf-first:
//
//   tabshift-config   Options for the active tab's scope
//   tabshift-filters  BlockingPredicate built from those options
//   position          distance to the nearest blocking tab
//   engine            Repositioner tying them together against a Host

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod debug;
pub mod engine;
pub mod host;
pub mod position;
pub mod session;
pub mod tab;

pub use engine::{NoMoveReason, RepositionOutcome, Repositioner, TabReport, is_blocking};
pub use host::{CachingResolver, DocumentCache, Host, HostError};
pub use position::compute_position;
pub use tab::{Tab, TabId, TabManager};

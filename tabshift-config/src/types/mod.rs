//! Host-supplied data types and direction settings.

mod direction;
mod tab;

pub use direction::{Direction, MoveDirection};
pub use tab::{ContentKind, DocumentInfo, TabDescriptor};

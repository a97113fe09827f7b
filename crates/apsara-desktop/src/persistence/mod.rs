//! Persistence module for layout serialization
//!
//! Provides the versioned snapshot format and the storage seam it is written
//! through.

mod snapshot;
mod store;

pub use snapshot::{PersistedWindow, Snapshot};
pub use store::{LayoutStore, MemoryStore};

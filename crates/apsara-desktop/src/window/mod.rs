//! Window management module
//!
//! Provides window records, the copy-on-write collection, focus, and z-order.

#[allow(clippy::module_inception)]
mod window;
mod config;
mod manager;

pub use window::{Interaction, Window, WindowState};
pub use config::OpenOptions;
pub use manager::{NewWindow, WindowManager, WindowSnapshot, MAX_RESTORED_ID};
pub(crate) use manager::Draft;

/// Unique window identifier
pub type WindowId = u64;

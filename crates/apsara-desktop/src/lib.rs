//! Window Management for the Apsara Desktop
//!
//! This crate provides the core of a macOS-style desktop that runs in a
//! browser viewport:
//! - Window management (open, move, resize, focus, close, minimize, maximize)
//! - Placement bounds that keep windows clear of the menu bar and dock
//! - Pointer gestures for dragging and resizing
//! - Dock, desktop shortcuts, and layout persistence
//!
//! ## Architecture
//!
//! The crate is organized into focused modules:
//!
//! - [`math`]: Core geometry types (`Vec2`, `Size`, `Rect`) and `clamp`
//! - [`viewport`]: Viewport measurement and placement bounds
//! - [`window`]: Window records and the copy-on-write window collection
//! - [`input`]: Drag and resize state machine
//! - [`session`]: The desktop session tying everything together
//! - [`shell`]: Projection of a session into menu bar, dock, and windows
//! - [`persistence`]: Layout snapshots and storage
//!
//! ## Example
//!
//! ```rust
//! use apsara_desktop::{AppDef, AppRegistry, DesktopConfig, DesktopSession, FixedViewport, OpenOptions, Size};
//!
//! let apps = AppRegistry::from_apps([AppDef::new("notes", "Notes")]).unwrap();
//! let viewport = FixedViewport(Size::new(1280.0, 720.0));
//! let mut session = DesktopSession::new(DesktopConfig::default(), apps, &viewport);
//!
//! let id = session.open("notes", OpenOptions::at(-50.0, -50.0)).unwrap();
//! let window = session.window(id).unwrap();
//! assert_eq!((window.position.x, window.position.y), (8.0, 36.0));
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: All state management is pure Rust, testable without browser
//! 2. **Injected Environment**: Viewport size and storage come in through traits
//! 3. **All or Nothing**: A failed operation leaves the session untouched

pub mod app;
pub mod config;
pub mod dock;
pub mod error;
pub mod input;
pub mod math;
pub mod persistence;
pub mod portal;
pub mod session;
pub mod shell;
pub mod shortcuts;
pub mod viewport;
pub mod window;

// WASM exports (only available with "wasm" feature)
#[cfg(feature = "wasm")]
mod wasm;
#[cfg(feature = "wasm")]
pub use wasm::*;

// Re-export core types for convenience
pub use app::{AppDef, AppRegistry};
pub use config::{CascadeConfig, ChromeMetrics, DesktopConfig};
pub use dock::Dock;
pub use error::{DesktopError, DesktopResult};
pub use input::{DragState, InputResult, InputRouter, ResizeEdge};
pub use math::{clamp, Rect, Size, Vec2};
pub use persistence::{LayoutStore, MemoryStore, PersistedWindow, Snapshot};
pub use portal::PortalTarget;
pub use session::DesktopSession;
pub use shell::{AppComponent, DesktopShell, DockItem, MenuBar, RenderContext, ShellFrame, WindowFrame};
pub use shortcuts::{DesktopItem, Group, Shortcut};
pub use viewport::{
    measure_viewport, placement_area, viewport_bounds, work_area, FixedViewport, Headless,
    ViewportBounds, ViewportProvider,
};
pub use window::{
    Interaction, OpenOptions, Window, WindowId, WindowManager, WindowSnapshot, WindowState,
};

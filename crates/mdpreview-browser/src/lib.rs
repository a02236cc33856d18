//! Browser layer for the markdown previewer.
//!
//! Everything here touches `web_sys` and assumes a `wasm32-unknown-unknown`
//! target with a live `window`.
//!
//! # Architecture
//!
//! - `storage`: `KeyValueStore` over `window.localStorage`
//! - `textarea`: reading and restoring the edit surface selection
//! - `theme`: toggling the theme class on the document root
//!
//! # Re-exports
//!
//! This crate re-exports `mdpreview-core` for convenience, so consumers
//! only need to depend on `mdpreview-browser`.

pub use mdpreview_core;
pub use mdpreview_core::*;

pub mod error;
pub mod storage;
pub mod textarea;
pub mod theme;

pub use error::DomError;
pub use storage::BrowserStore;
pub use textarea::{EditSurface, read_selection, restore_selection};
pub use theme::apply_theme_class;

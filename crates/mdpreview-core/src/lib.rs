//! mdpreview-core: markdown previewer logic without framework dependencies.
//!
//! This crate provides:
//! - `Converter` / `MarkdownConverter` - markdown to preview HTML
//! - `apply_format` - pure selection-wrapping for the toolbar actions
//! - `KeyValueStore` - persistence port, with an in-memory implementation
//! - `Previewer` - the state owner the UI drives

pub mod config;
pub mod convert;
pub mod error;
pub mod format;
pub mod html;
pub mod previewer;
pub mod sequence;
pub mod store;
pub mod theme;

pub use config::{PreviewerConfig, StorageKeys};
pub use convert::{
    ConvertOptions, Converter, ERROR_PLACEHOLDER, MarkdownConverter, RawHtml,
    render_or_placeholder,
};
pub use error::{ConfigError, ConvertError, StoreError};
pub use format::{FormatAction, FormatEdit, Selection, apply_format, shortcut_for};
pub use previewer::{FormatOutcome, Previewer, RenderOutput, RenderRequest};
pub use sequence::{RenderSequencer, RequestId};
pub use smol_str::SmolStr;
pub use store::{KeyValueStore, MemoryStore};
pub use theme::Theme;

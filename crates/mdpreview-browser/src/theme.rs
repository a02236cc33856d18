//! Theme class on the document root.

use mdpreview_core::Theme;

use crate::error::DomError;
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
use crate::error::document;

/// Add `class` to `<html>` for the dark theme, remove it for light.
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub fn apply_theme_class(class: &str, theme: Theme) -> Result<(), DomError> {
    let root = document()?
        .document_element()
        .ok_or(DomError::MissingElement("documentElement".to_string()))?;
    root.class_list().toggle_with_force(class, theme.is_dark())?;
    tracing::debug!(class, dark = theme.is_dark(), "applied theme class");
    Ok(())
}

/// No-op on non-WASM targets.
#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
pub fn apply_theme_class(_class: &str, _theme: Theme) -> Result<(), DomError> {
    Ok(())
}

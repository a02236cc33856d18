//! The text area edit surface.
//!
//! Selection offsets come straight from `selectionStart`/`selectionEnd`,
//! which count UTF-16 code units, the same unit `mdpreview_core::format`
//! works in.

use mdpreview_core::Selection;
use wasm_bindgen::JsCast;
use web_sys::HtmlTextAreaElement;

use crate::error::{DomError, document};

/// Handle to the live `<textarea>`.
pub struct EditSurface {
    element: HtmlTextAreaElement,
}

impl EditSurface {
    pub fn find(id: &str) -> Result<Self, DomError> {
        let element = document()?
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok())
            .ok_or_else(|| DomError::MissingElement(id.to_string()))?;
        Ok(Self { element })
    }

    pub fn value(&self) -> String {
        self.element.value()
    }

    /// Current selection. A surface without a selection reports a caret at 0.
    pub fn selection(&self) -> Result<Selection, DomError> {
        let start = self.element.selection_start()?.unwrap_or(0) as usize;
        let end = self.element.selection_end()?.unwrap_or(start as u32) as usize;
        Ok(Selection::new(start, end))
    }

    /// Put `text` into the surface, focus it and select `selection`.
    ///
    /// The value is written before the selection so a later re-render with
    /// the same value leaves the selection alone.
    pub fn restore(&self, text: &str, selection: Selection) -> Result<(), DomError> {
        if self.element.value() != text {
            self.element.set_value(text);
        }
        self.element.focus()?;
        self.element
            .set_selection_range(to_dom_offset(selection.start), to_dom_offset(selection.end))?;
        Ok(())
    }
}

fn to_dom_offset(offset: usize) -> u32 {
    u32::try_from(offset).unwrap_or(u32::MAX)
}

/// Read the selection of the text area with `id`.
///
/// `None` means the surface is not in the DOM; callers treat the formatting
/// action as a no-op then.
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub fn read_selection(id: &str) -> Option<Selection> {
    match EditSurface::find(id).and_then(|surface| surface.selection()) {
        Ok(selection) => Some(selection),
        Err(e) => {
            tracing::debug!(id, error = %e, "no edit surface, skipping format");
            None
        }
    }
}

/// Focus the text area with `id` and restore `selection` over `text`.
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub fn restore_selection(id: &str, text: &str, selection: Selection) {
    if let Err(e) = EditSurface::find(id).and_then(|surface| surface.restore(text, selection)) {
        tracing::warn!(id, error = %e, "could not restore selection");
    }
}

/// No DOM off wasm: there is never an edit surface.
#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
pub fn read_selection(_id: &str) -> Option<Selection> {
    None
}

/// No-op on non-WASM targets.
#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
pub fn restore_selection(_id: &str, _text: &str, _selection: Selection) {}

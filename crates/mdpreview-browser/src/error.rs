use gloo_utils::errors::JsError;
use miette::Diagnostic;
use wasm_bindgen::JsValue;

/// Failure touching the DOM.
#[derive(thiserror::Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("no global window")]
    #[diagnostic(code(mdpreview::dom::no_window))]
    NoWindow,

    #[error("no document on window")]
    #[diagnostic(code(mdpreview::dom::no_document))]
    NoDocument,

    #[error("element `{0}` not found or has the wrong type")]
    #[diagnostic(code(mdpreview::dom::missing_element))]
    MissingElement(String),

    #[error("{0}")]
    #[diagnostic(code(mdpreview::dom::js))]
    Js(String),
}

/// Render a thrown JS value as a message.
pub(crate) fn describe(value: JsValue) -> String {
    match JsError::try_from(value) {
        Ok(e) => e.to_string(),
        Err(e) => e.to_string(),
    }
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        DomError::Js(describe(value))
    }
}

pub(crate) fn document() -> Result<web_sys::Document, DomError> {
    web_sys::window()
        .ok_or(DomError::NoWindow)?
        .document()
        .ok_or(DomError::NoDocument)
}

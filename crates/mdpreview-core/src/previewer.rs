//! Previewer state and its transitions.
//!
//! [`Previewer`] owns the document text, the rendered output and the theme.
//! Every change to text or theme is written through to the injected
//! [`KeyValueStore`]. Rendering is split into a request/completion pair so
//! the UI can run conversions off the input path; completions for anything
//! but the latest request are dropped.

use crate::config::StorageKeys;
use crate::convert::{Converter, render_or_placeholder};
use crate::format::{FormatAction, Selection, apply_format};
use crate::sequence::{RenderSequencer, RequestId};
use crate::store::KeyValueStore;
use crate::theme::Theme;

/// A pending conversion of a snapshot of the document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub id: RequestId,
    pub text: String,
}

impl RenderRequest {
    pub fn render<C: Converter + ?Sized>(self, converter: &C) -> RenderOutput {
        RenderOutput {
            id: self.id,
            html: render_or_placeholder(converter, &self.text),
        }
    }
}

/// A finished conversion, ready to hand back to [`Previewer::complete_render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    pub id: RequestId,
    pub html: String,
}

/// Outcome of a formatting action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOutcome {
    /// Selection to restore in the edit surface.
    pub selection: Selection,
    pub request: RenderRequest,
}

pub struct Previewer<S> {
    store: S,
    keys: StorageKeys,
    text: String,
    rendered: String,
    theme: Theme,
    sequencer: RenderSequencer,
}

impl<S: KeyValueStore> Previewer<S> {
    /// Restore state from `store` and issue the initial render.
    ///
    /// Missing or unreadable entries fall back to empty text and the light
    /// theme. Both values are written back so the store always holds the
    /// state the previewer started with.
    pub fn load(store: S, keys: StorageKeys) -> (Self, RenderRequest) {
        let text = match store.get(&keys.markdown_key) {
            Ok(text) => text.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read saved markdown");
                String::new()
            }
        };
        let theme = match store.get(&keys.theme_key) {
            Ok(Some(value)) => Theme::from_stored(&value).unwrap_or_else(|e| {
                tracing::warn!(value = %value, error = %e, "ignoring malformed theme flag");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read saved theme");
                Theme::default()
            }
        };
        tracing::debug!(len = text.len(), ?theme, "previewer loaded");

        let mut previewer = Self {
            store,
            keys,
            text,
            rendered: String::new(),
            theme,
            sequencer: RenderSequencer::new(),
        };
        previewer.persist_text();
        previewer.persist_theme();
        let request = previewer.request_render();
        (previewer, request)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Replace the document text with the edit surface's full value.
    ///
    /// Returns `None` when the value didn't change.
    pub fn edit(&mut self, text: impl Into<String>) -> Option<RenderRequest> {
        let text = text.into();
        if text == self.text {
            return None;
        }
        Some(self.replace_text(text))
    }

    /// Apply a finished conversion if it is still the latest one.
    pub fn complete_render(&mut self, output: RenderOutput) -> bool {
        if !self.sequencer.is_current(output.id) {
            tracing::trace!(id = output.id.get(), "dropping stale render");
            return false;
        }
        self.rendered = output.html;
        true
    }

    /// Issue and immediately complete a render for the current text.
    pub fn render_now<C: Converter + ?Sized>(&mut self, converter: &C) {
        let output = self.request_render().render(converter);
        self.complete_render(output);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        tracing::debug!(theme = ?self.theme, "theme toggled");
        self.persist_theme();
        self.theme
    }

    /// Wrap `selection` in the markers for `action`.
    pub fn format(&mut self, selection: Selection, action: FormatAction) -> FormatOutcome {
        let edit = apply_format(&self.text, selection, action);
        tracing::debug!(?action, ?selection, "applying format");
        let request = self.replace_text(edit.text);
        FormatOutcome {
            selection: edit.selection,
            request,
        }
    }

    fn replace_text(&mut self, text: String) -> RenderRequest {
        self.text = text;
        self.persist_text();
        self.request_render()
    }

    fn request_render(&mut self) -> RenderRequest {
        RenderRequest {
            id: self.sequencer.issue(),
            text: self.text.clone(),
        }
    }

    fn persist_text(&self) {
        if let Err(e) = self.store.set(&self.keys.markdown_key, &self.text) {
            tracing::warn!(error = %e, "failed to save markdown");
        }
    }

    fn persist_theme(&self) {
        if let Err(e) = self.store.set(&self.keys.theme_key, self.theme.to_stored()) {
            tracing::warn!(error = %e, "failed to save theme");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{ERROR_PLACEHOLDER, MarkdownConverter};
    use crate::error::{ConvertError, StoreError};
    use crate::store::MemoryStore;

    fn load(store: &MemoryStore) -> (Previewer<MemoryStore>, RenderRequest) {
        Previewer::load(store.clone(), StorageKeys::default())
    }

    fn stored(store: &MemoryStore, key: &str) -> Option<String> {
        store.get(key).unwrap()
    }

    struct AlwaysFails;

    impl Converter for AlwaysFails {
        fn convert(&self, _: &str) -> Result<String, ConvertError> {
            Err(ConvertError::Markdown("unterminated construct".into()))
        }
    }

    /// Store whose writes always fail, reads report nothing saved.
    struct FullStore;

    impl KeyValueStore for FullStore {
        fn get(&self, _: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn set(&self, key: &str, _: &str) -> Result<(), StoreError> {
            Err(StoreError::Write {
                key: key.to_string(),
                reason: "QuotaExceededError".to_string(),
            })
        }
    }

    #[test]
    fn fresh_store_starts_empty_and_light() {
        let store = MemoryStore::new();
        let (previewer, request) = load(&store);
        assert_eq!(previewer.text(), "");
        assert_eq!(previewer.theme(), Theme::Light);
        assert_eq!(request.text, "");
        assert_eq!(stored(&store, "markdown").as_deref(), Some(""));
        assert_eq!(stored(&store, "darkMode").as_deref(), Some("false"));
    }

    #[test]
    fn restores_saved_state() {
        let store = MemoryStore::with_entries([("markdown", "# saved"), ("darkMode", "true")]);
        let (mut previewer, request) = load(&store);
        assert_eq!(previewer.text(), "# saved");
        assert_eq!(previewer.theme(), Theme::Dark);

        let output = request.render(&MarkdownConverter::default());
        assert!(previewer.complete_render(output));
        assert_eq!(previewer.rendered(), "<h1>saved</h1>\n");
    }

    #[test]
    fn malformed_theme_falls_back_to_light() {
        let store = MemoryStore::with_entries([("darkMode", "yes please")]);
        let (previewer, _) = load(&store);
        assert_eq!(previewer.theme(), Theme::Light);
        assert_eq!(stored(&store, "darkMode").as_deref(), Some("false"));
    }

    #[test]
    fn numeric_theme_flag_is_truthy() {
        let (previewer, _) = load(&MemoryStore::with_entries([("darkMode", "1")]));
        assert_eq!(previewer.theme(), Theme::Dark);
    }

    #[test]
    fn edits_are_persisted() {
        let store = MemoryStore::new();
        let (mut previewer, _) = load(&store);
        for s in ["a", "ab", "", "🦀 **crab**\nnext line", "ab"] {
            previewer.edit(s);
            assert_eq!(previewer.text(), s);
            assert_eq!(stored(&store, "markdown").as_deref(), Some(s));
        }
    }

    #[test]
    fn unchanged_edit_is_a_no_op() {
        let store = MemoryStore::with_entries([("markdown", "same")]);
        let (mut previewer, _) = load(&store);
        assert!(previewer.edit("same").is_none());
        assert!(previewer.edit("different").is_some());
    }

    #[test]
    fn stale_completion_is_dropped() {
        let store = MemoryStore::new();
        let converter = MarkdownConverter::default();
        let (mut previewer, _) = load(&store);

        let first = previewer.edit("*old*").unwrap();
        let second = previewer.edit("**new**").unwrap();

        // The newer conversion finishes first.
        assert!(previewer.complete_render(second.render(&converter)));
        assert!(!previewer.complete_render(first.render(&converter)));
        assert_eq!(previewer.rendered(), "<p><strong>new</strong></p>\n");
    }

    #[test]
    fn failed_conversion_shows_placeholder() {
        let (mut previewer, _) = load(&MemoryStore::new());
        previewer.edit("anything");
        previewer.render_now(&AlwaysFails);
        assert_eq!(previewer.rendered(), ERROR_PLACEHOLDER);
    }

    #[test]
    fn same_text_renders_identically() {
        let converter = MarkdownConverter::default();
        let (mut previewer, _) = load(&MemoryStore::new());
        previewer.edit("- a\n- b\n\n> quote");
        previewer.render_now(&converter);
        let first = previewer.rendered().to_string();
        previewer.render_now(&converter);
        assert_eq!(previewer.rendered(), first);
    }

    #[test]
    fn theme_toggle_round_trip() {
        let store = MemoryStore::new();
        let (mut previewer, _) = load(&store);
        assert_eq!(previewer.toggle_theme(), Theme::Dark);
        assert_eq!(stored(&store, "darkMode").as_deref(), Some("true"));
        assert_eq!(previewer.toggle_theme(), Theme::Light);
        assert_eq!(stored(&store, "darkMode").as_deref(), Some("false"));
    }

    #[test]
    fn format_updates_text_and_store() {
        let store = MemoryStore::with_entries([("markdown", "hello world")]);
        let (mut previewer, _) = load(&store);
        let outcome = previewer.format(Selection::new(0, 5), FormatAction::Bold);
        assert_eq!(previewer.text(), "**hello** world");
        assert_eq!(outcome.selection, Selection::new(2, 7));
        assert_eq!(outcome.request.text, "**hello** world");
        assert_eq!(stored(&store, "markdown").as_deref(), Some("**hello** world"));
    }

    #[test]
    fn link_at_end_of_text() {
        let (mut previewer, _) = load(&MemoryStore::with_entries([("markdown", "docs: ")]));
        let end = previewer.text().len();
        previewer.format(Selection::caret(end), FormatAction::Link);
        assert_eq!(previewer.text(), "docs: [](url)");
    }

    #[test]
    fn custom_storage_keys() {
        let store = MemoryStore::new();
        let keys = StorageKeys {
            markdown_key: "draft".into(),
            theme_key: "theme".into(),
        };
        let (mut previewer, _) = Previewer::load(store.clone(), keys);
        previewer.edit("x");
        assert_eq!(stored(&store, "draft").as_deref(), Some("x"));
        assert_eq!(stored(&store, "theme").as_deref(), Some("false"));
        assert_eq!(stored(&store, "markdown"), None);
    }

    #[test]
    fn write_failures_do_not_lose_state() {
        let (mut previewer, _) = Previewer::load(FullStore, StorageKeys::default());
        previewer.edit("still here");
        assert_eq!(previewer.toggle_theme(), Theme::Dark);
        assert_eq!(previewer.text(), "still here");
    }
}

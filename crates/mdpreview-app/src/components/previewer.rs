//! The markdown previewer: input, toolbar, theme toggle and preview pane.

use std::rc::Rc;

use dioxus::prelude::keyboard_types::Key;
use dioxus::prelude::*;
use mdpreview_browser::{
    FormatAction, KeyValueStore, MemoryStore, Previewer, RenderRequest, apply_theme_class,
    read_selection, restore_selection, shortcut_for,
};

use super::{PreviewToolbar, ThemeToggle};
use crate::config::{CONFIG, CONVERTER};

type AppStore = Rc<dyn KeyValueStore>;

/// Local storage when the page has it, otherwise state lives for the session only.
fn open_store() -> AppStore {
    #[cfg(all(target_family = "wasm", target_os = "unknown"))]
    match mdpreview_browser::BrowserStore::local() {
        Ok(store) => return Rc::new(store),
        Err(e) => tracing::warn!(error = %e, "local storage unavailable, state will not persist"),
    }
    Rc::new(MemoryStore::new())
}

/// Convert off the input path and hand the result back to the previewer.
fn schedule_render(mut previewer: Signal<Previewer<AppStore>>, request: RenderRequest) {
    spawn(async move {
        let output = request.render(&*CONVERTER);
        previewer.write().complete_render(output);
    });
}

#[component]
pub fn MarkdownPreviewer() -> Element {
    let mut previewer = use_hook(|| {
        let (previewer, initial) = Previewer::load(open_store(), CONFIG.storage.clone());
        let previewer = Signal::new(previewer);
        schedule_render(previewer, initial);
        previewer
    });

    let theme = use_memo(move || previewer.read().theme());
    use_effect(move || {
        if let Err(e) = apply_theme_class(&CONFIG.dark_class, theme()) {
            tracing::warn!(error = %e, "could not apply theme class");
        }
    });

    // No-op when the text area isn't mounted.
    let mut format = move |action: FormatAction| {
        let Some(selection) = read_selection(&CONFIG.editor_id) else {
            return;
        };
        let outcome = previewer.write().format(selection, action);
        restore_selection(&CONFIG.editor_id, &outcome.request.text, outcome.selection);
        schedule_render(previewer, outcome.request);
    };

    let state = previewer.read();
    let text = state.text().to_string();
    let html = state.rendered().to_string();
    let dark = theme().is_dark();
    let editor_id = CONFIG.editor_id.to_string();
    drop(state);

    rsx! {
        div { class: if dark { "previewer dark" } else { "previewer" },
            div { class: "previewer-header",
                h1 { class: "previewer-title", "Markdown Previewer" }
                ThemeToggle {
                    theme: theme(),
                    on_toggle: move |_| {
                        previewer.write().toggle_theme();
                    },
                }
            }

            PreviewToolbar { on_format: move |action| format(action) }

            div { class: "previewer-panes",
                div { class: "previewer-pane",
                    h2 { class: "pane-title", "Input" }
                    textarea {
                        id: "{editor_id}",
                        class: "markdown-input",
                        placeholder: "Enter your markdown here...",
                        value: "{text}",
                        oninput: move |e| {
                            let request = previewer.write().edit(e.value());
                            if let Some(request) = request {
                                schedule_render(previewer, request);
                            }
                        },
                        onkeydown: move |e| {
                            let Key::Character(ch) = e.key() else {
                                return;
                            };
                            let mods = e.modifiers();
                            if let Some(action) = shortcut_for(&ch, mods.ctrl(), mods.meta()) {
                                e.prevent_default();
                                format(action);
                            }
                        },
                    }
                }
                div { class: "previewer-pane",
                    h2 { class: "pane-title", "Preview" }
                    div { class: "markdown-preview", dangerous_inner_html: "{html}" }
                }
            }
        }
    }
}

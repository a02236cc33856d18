//! Formatting toolbar.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::fa_solid_icons::{FaBold, FaItalic, FaLink, FaListUl};
use mdpreview_browser::FormatAction;

fn action_icon(action: FormatAction) -> Element {
    match action {
        FormatAction::Bold => rsx! { Icon { width: 16, height: 16, icon: FaBold } },
        FormatAction::Italic => rsx! { Icon { width: 16, height: 16, icon: FaItalic } },
        FormatAction::ListItem => rsx! { Icon { width: 16, height: 16, icon: FaListUl } },
        FormatAction::Link => rsx! { Icon { width: 16, height: 16, icon: FaLink } },
    }
}

/// Editor toolbar with one button per formatting action.
#[component]
pub fn PreviewToolbar(on_format: EventHandler<FormatAction>) -> Element {
    rsx! {
        div { class: "preview-toolbar",
            for (i, action) in FormatAction::ALL.into_iter().enumerate() {
                button {
                    key: "{i}",
                    class: "toolbar-button",
                    title: action.title().to_string(),
                    onclick: move |_| on_format.call(action),
                    {action_icon(action)}
                }
            }
        }
    }
}

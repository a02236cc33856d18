use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::fa_solid_icons::{FaMoon, FaSun};
use mdpreview_browser::Theme;

/// Light/dark switch. Shows the moon while light, the sun while dark.
#[component]
pub fn ThemeToggle(theme: Theme, on_toggle: EventHandler<()>) -> Element {
    let label = if theme.is_dark() {
        "Switch to light theme"
    } else {
        "Switch to dark theme"
    };
    rsx! {
        button {
            class: "theme-toggle",
            title: label,
            aria_label: label,
            onclick: move |_| on_toggle.call(()),
            if theme.is_dark() {
                span { class: "icon-sun", Icon { width: 20, height: 20, icon: FaSun } }
            } else {
                span { class: "icon-moon", Icon { width: 20, height: 20, icon: FaMoon } }
            }
        }
    }
}

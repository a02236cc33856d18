mod previewer;
mod theme_toggle;
mod toolbar;

pub use previewer::MarkdownPreviewer;
pub use theme_toggle::ThemeToggle;
pub use toolbar::PreviewToolbar;

use std::sync::LazyLock;

use mdpreview_browser::{MarkdownConverter, PreviewerConfig};

/// App configuration: defaults, overridden by the JSON in `MDPREVIEW_CONFIG`
/// at build time.
pub static CONFIG: LazyLock<PreviewerConfig> = LazyLock::new(|| {
    PreviewerConfig::from_override(option_env!("MDPREVIEW_CONFIG")).unwrap_or_else(|e| {
        tracing::error!(error = %e, "invalid MDPREVIEW_CONFIG, using defaults");
        PreviewerConfig::default()
    })
});

pub static CONVERTER: LazyLock<MarkdownConverter> =
    LazyLock::new(|| MarkdownConverter::new(CONFIG.convert.clone()));

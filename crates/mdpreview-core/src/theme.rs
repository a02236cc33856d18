//! Light/dark theme flag.

use serde_json::Value;

/// Preview theme. Stored as the JSON booleans `"true"` (dark) / `"false"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark { Theme::Dark } else { Theme::Light }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Stored representation.
    pub fn to_stored(self) -> &'static str {
        if self.is_dark() { "true" } else { "false" }
    }

    /// Parse a stored value.
    ///
    /// Any JSON value is accepted and read by truthiness: `false`, `null`,
    /// `0` and `""` are light, everything else dark. Only text that isn't
    /// JSON at all is an error.
    pub fn from_stored(value: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(value)?;
        let dark = match value {
            Value::Null => false,
            Value::Bool(b) => b,
            Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        };
        Ok(Self::from_dark(dark))
    }
}

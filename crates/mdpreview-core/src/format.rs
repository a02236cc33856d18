//! Formatting actions and the text transformation behind them.
//!
//! Offsets are UTF-16 code units, the unit the browser reports for
//! `selectionStart`/`selectionEnd` on a text area.

use smol_str::SmolStr;

/// A selection in the edit surface. `start == end` is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    /// Normalize so start <= end.
    pub fn normalize(self) -> Self {
        if self.start <= self.end {
            self
        } else {
            Self::new(self.end, self.start)
        }
    }
}

/// Formatting actions available from the toolbar and shortcuts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormatAction {
    Bold,
    Italic,
    ListItem,
    Link,
}

impl FormatAction {
    /// Toolbar order.
    pub const ALL: [FormatAction; 4] = [
        FormatAction::Bold,
        FormatAction::Italic,
        FormatAction::ListItem,
        FormatAction::Link,
    ];

    /// Markers inserted before and after the selection.
    pub fn markers(self) -> (&'static str, &'static str) {
        match self {
            FormatAction::Bold => ("**", "**"),
            FormatAction::Italic => ("*", "*"),
            FormatAction::ListItem => ("- ", ""),
            FormatAction::Link => ("[", "](url)"),
        }
    }

    pub fn title(self) -> SmolStr {
        match self {
            FormatAction::Bold => SmolStr::new_static("Bold (Ctrl+B)"),
            FormatAction::Italic => SmolStr::new_static("Italic (Ctrl+I)"),
            FormatAction::ListItem => SmolStr::new_static("List item"),
            FormatAction::Link => SmolStr::new_static("Link (Ctrl+K)"),
        }
    }
}

/// Result of applying a formatting action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatEdit {
    pub text: String,
    /// Selection to restore, covering the originally selected text.
    pub selection: Selection,
}

/// Wrap the selected part of `text` in the markers for `action`.
///
/// Reversed bounds are normalized and bounds past the end are clamped. An
/// offset landing between the halves of a surrogate pair snaps back to the
/// start of that character.
pub fn apply_format(text: &str, selection: Selection, action: FormatAction) -> FormatEdit {
    let selection = selection.normalize();
    let start = utf16_to_byte(text, selection.start);
    let end = utf16_to_byte(text, selection.end).max(start);
    let (open, close) = action.markers();

    let mut out = String::with_capacity(text.len() + open.len() + close.len());
    out.push_str(&text[..start]);
    out.push_str(open);
    out.push_str(&text[start..end]);
    out.push_str(close);
    out.push_str(&text[end..]);

    let shift = open.encode_utf16().count();
    let start16 = byte_to_utf16(text, start);
    let end16 = start16 + text[start..end].encode_utf16().count();

    FormatEdit {
        text: out,
        selection: Selection::new(start16 + shift, end16 + shift),
    }
}

/// Map a UTF-16 offset to a byte index on a char boundary of `text`.
pub fn utf16_to_byte(text: &str, offset: usize) -> usize {
    let mut units = 0;
    for (idx, ch) in text.char_indices() {
        if units >= offset {
            return idx;
        }
        units += ch.len_utf16();
        if units > offset {
            return idx;
        }
    }
    text.len()
}

pub fn byte_to_utf16(text: &str, byte: usize) -> usize {
    text[..byte].encode_utf16().count()
}

/// Keyboard shortcut lookup. `key` is the DOM `KeyboardEvent.key` value.
pub fn shortcut_for(key: &str, ctrl: bool, meta: bool) -> Option<FormatAction> {
    if !(ctrl || meta) {
        return None;
    }
    match key {
        k if k.eq_ignore_ascii_case("b") => Some(FormatAction::Bold),
        k if k.eq_ignore_ascii_case("i") => Some(FormatAction::Italic),
        k if k.eq_ignore_ascii_case("k") => Some(FormatAction::Link),
        _ => None,
    }
}

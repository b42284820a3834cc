//! Optional post-processing of spans before they are printed.

use std::borrow::Cow;

use log::debug;
use serde_json::Value;

/// How spans are turned into output lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct Render {
    /// Drop spans that are not valid JSON.
    pub valid_only: bool,
    /// Re-serialize spans as single-line JSON.
    pub compact: bool,
    /// Print decoded text for string spans.
    pub unwrap_strings: bool,
}

impl Render {
    fn needs_parse(self) -> bool {
        self.valid_only || self.compact || self.unwrap_strings
    }

    /// Output text for `span`, or `None` when it is dropped.
    pub fn apply(self, span: &str) -> Option<Cow<'_, str>> {
        if !self.needs_parse() {
            return Some(Cow::Borrowed(span));
        }
        let value = match serde_json::from_str::<Value>(span) {
            Ok(value) => value,
            Err(err) if self.valid_only || self.compact => {
                debug!("dropping span of {} bytes: {err}", span.len());
                return None;
            }
            Err(_) => return Some(Cow::Borrowed(span)),
        };
        match value {
            Value::String(text) if self.unwrap_strings => Some(Cow::Owned(text)),
            value if self.compact => Some(Cow::Owned(value.to_string())),
            _ => Some(Cow::Borrowed(span)),
        }
    }
}

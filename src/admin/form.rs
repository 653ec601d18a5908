//! `application/x-www-form-urlencoded` bodies for the admin API.
//!
//! Kong accepts the same bodies `curl --data` sends, where `/`, `:` and
//! brackets go over the wire untouched (`paths[]=/portal`). Only bytes that
//! would change how the form splits or decodes are escaped.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

const FORM_COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

pub const CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Ordered list of form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormBody {
    fields: Vec<(String, String)>,
}

impl FormBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. Repeated keys are kept in order (`paths[]`).
    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn encode(&self) -> String {
        self.fields
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(key, FORM_COMPONENT),
                    utf8_percent_encode(value, FORM_COMPONENT)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

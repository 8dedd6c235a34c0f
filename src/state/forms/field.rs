//! Form field value objects

use serde::{Deserialize, Serialize};

/// How a field is edited and rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Multiline,
    /// Never rendered and never focusable
    Hidden,
}

/// Represents a single form field with its value and inline error state
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    /// Caption text as displayed next to the input, if any
    pub caption: Option<String>,
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
    /// Text of the `<name>Error` region
    pub error: String,
    pub error_visible: bool,
    pub invalid: bool,
}

impl FormField {
    pub fn new(name: &str, caption: Option<&str>, kind: FieldKind, required: bool) -> Self {
        Self {
            name: name.to_string(),
            caption: caption.map(str::to_string),
            kind,
            required,
            value: String::new(),
            error: String::new(),
            error_visible: false,
            invalid: false,
        }
    }

    pub fn is_multiline(&self) -> bool {
        self.kind == FieldKind::Multiline
    }

    pub fn is_hidden(&self) -> bool {
        self.kind == FieldKind::Hidden
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        self.value.push(c);
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    pub fn show_error(&mut self, message: &str) {
        self.error = message.to_string();
        self.error_visible = true;
    }

    pub fn clear_error(&mut self) {
        self.error.clear();
        self.error_visible = false;
    }

    /// Title for the rendered block: caption or field name
    pub fn display_label(&self) -> &str {
        self.caption.as_deref().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_field_is_empty_and_valid() {
        let field = FormField::new("email", Some("Email:"), FieldKind::Email, true);
        assert!(field.value.is_empty());
        assert!(!field.error_visible);
        assert!(!field.invalid);
        assert!(field.required);
    }

    #[test]
    fn test_push_and_pop_char() {
        let mut field = FormField::new("name", None, FieldKind::Text, false);
        field.push_char('a');
        field.push_char('b');
        field.pop_char();
        assert_eq!(field.value, "a");
        field.pop_char();
        field.pop_char();
        assert_eq!(field.value, "");
    }

    #[test]
    fn test_error_region_round() {
        let mut field = FormField::new("name", None, FieldKind::Text, true);
        field.show_error("Name is required.");
        assert!(field.error_visible);
        assert_eq!(field.error, "Name is required.");
        field.clear_error();
        assert!(!field.error_visible);
        assert!(field.error.is_empty());
    }

    #[test]
    fn test_display_label_falls_back_to_name() {
        let field = FormField::new("message", None, FieldKind::Multiline, true);
        assert_eq!(field.display_label(), "message");
        assert!(field.is_multiline());
    }

    #[test]
    fn test_kind_deserializes_lowercase() {
        let kind: FieldKind = serde_json::from_str("\"multiline\"").unwrap();
        assert_eq!(kind, FieldKind::Multiline);
    }
}

//! In-memory form model the controller is bound to

use super::field::{FieldKind, FormField};
use crate::controller::FormView;
use std::sync::{Arc, Mutex, MutexGuard};

/// Error region id reserved for the anti-bot widget
pub const CAPTCHA_REGION: &str = "captcha";

/// Visual category of the result banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BannerKind {
    #[default]
    Neutral,
    Success,
    Error,
}

/// The single aggregate status message region
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Banner {
    pub text: String,
    pub kind: BannerKind,
    pub visible: bool,
}

/// Fields plus the UI controls that surround them
#[derive(Debug, Clone)]
pub struct SubmissionForm {
    pub fields: Vec<FormField>,
    pub captcha_error: String,
    pub captcha_error_visible: bool,
    pub submit_label: String,
    pub submit_enabled: bool,
    pub progress_visible: bool,
    pub banner: Banner,
}

impl SubmissionForm {
    pub fn new(fields: Vec<FormField>, submit_label: &str) -> Self {
        Self {
            fields,
            captcha_error: String::new(),
            captcha_error_visible: false,
            submit_label: submit_label.to_string(),
            submit_enabled: true,
            progress_visible: false,
            banner: Banner::default(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Fields a person can see and edit, in form order
    pub fn visible_fields(&self) -> impl Iterator<Item = &FormField> {
        self.fields.iter().filter(|f| !f.is_hidden())
    }

    pub fn visible_field_names(&self) -> Vec<String> {
        self.visible_fields().map(|f| f.name.clone()).collect()
    }

    pub fn set_value(&mut self, name: &str, value: &str) {
        if let Some(field) = self.field_mut(name) {
            field.value = value.to_string();
        }
    }
}

impl FormView for SubmissionForm {
    fn field_value(&self, id: &str) -> Option<String> {
        self.field(id).map(|f| f.value.clone())
    }

    fn required_field_ids(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.clone())
            .collect()
    }

    fn caption(&self, id: &str) -> Option<String> {
        self.field(id).and_then(|f| f.caption.clone())
    }

    fn show_error(&mut self, id: &str, message: &str) {
        if id == CAPTCHA_REGION {
            self.captcha_error = message.to_string();
            self.captcha_error_visible = true;
        } else if let Some(field) = self.field_mut(id) {
            field.show_error(message);
        }
    }

    fn clear_error(&mut self, id: &str) {
        if id == CAPTCHA_REGION {
            self.captcha_error.clear();
            self.captcha_error_visible = false;
        } else if let Some(field) = self.field_mut(id) {
            field.clear_error();
        }
    }

    fn error_visible(&self, id: &str) -> bool {
        if id == CAPTCHA_REGION {
            self.captcha_error_visible
        } else {
            self.field(id).is_some_and(|f| f.error_visible)
        }
    }

    fn set_invalid(&mut self, id: &str, invalid: bool) {
        if let Some(field) = self.field_mut(id) {
            field.invalid = invalid;
        }
    }

    fn clear_all_errors(&mut self) {
        for field in &mut self.fields {
            field.clear_error();
            field.invalid = false;
        }
        self.captcha_error.clear();
        self.captcha_error_visible = false;
    }

    fn entries(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }

    fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
    }

    fn submit_label(&self) -> String {
        self.submit_label.clone()
    }

    fn set_submit_label(&mut self, label: &str) {
        self.submit_label = label.to_string();
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    fn set_progress_visible(&mut self, visible: bool) {
        self.progress_visible = visible;
    }

    fn set_banner(&mut self, text: &str, kind: BannerKind) {
        self.banner.text = text.to_string();
        self.banner.kind = kind;
    }

    fn set_banner_visible(&mut self, visible: bool) {
        self.banner.visible = visible;
    }
}

/// Handle shared between the controller and the renderer.
///
/// Each trait call takes the lock for its own duration only.
#[derive(Debug, Clone)]
pub struct SharedForm(Arc<Mutex<SubmissionForm>>);

impl SharedForm {
    pub fn new(form: SubmissionForm) -> Self {
        Self(Arc::new(Mutex::new(form)))
    }

    pub fn lock(&self) -> MutexGuard<'_, SubmissionForm> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl FormView for SharedForm {
    fn field_value(&self, id: &str) -> Option<String> {
        self.lock().field_value(id)
    }

    fn required_field_ids(&self) -> Vec<String> {
        self.lock().required_field_ids()
    }

    fn caption(&self, id: &str) -> Option<String> {
        self.lock().caption(id)
    }

    fn show_error(&mut self, id: &str, message: &str) {
        self.lock().show_error(id, message)
    }

    fn clear_error(&mut self, id: &str) {
        self.lock().clear_error(id)
    }

    fn error_visible(&self, id: &str) -> bool {
        self.lock().error_visible(id)
    }

    fn set_invalid(&mut self, id: &str, invalid: bool) {
        self.lock().set_invalid(id, invalid)
    }

    fn clear_all_errors(&mut self) {
        self.lock().clear_all_errors()
    }

    fn entries(&self) -> Vec<(String, String)> {
        self.lock().entries()
    }

    fn reset(&mut self) {
        self.lock().reset()
    }

    fn submit_label(&self) -> String {
        self.lock().submit_label()
    }

    fn set_submit_label(&mut self, label: &str) {
        self.lock().set_submit_label(label)
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.lock().set_submit_enabled(enabled)
    }

    fn set_progress_visible(&mut self, visible: bool) {
        self.lock().set_progress_visible(visible)
    }

    fn set_banner(&mut self, text: &str, kind: BannerKind) {
        self.lock().set_banner(text, kind)
    }

    fn set_banner_visible(&mut self, visible: bool) {
        self.lock().set_banner_visible(visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_test_form() -> SubmissionForm {
        SubmissionForm::new(
            vec![
                FormField::new("fullName", Some("Full Name:"), FieldKind::Text, true),
                FormField::new("email", Some("Email:"), FieldKind::Email, true),
                FormField::new("honeypot_field", None, FieldKind::Hidden, false),
            ],
            "Submit Application",
        )
    }

    mod view {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_required_ids_in_form_order() {
            let form = create_test_form();
            assert_eq!(form.required_field_ids(), vec!["fullName", "email"]);
        }

        #[test]
        fn test_entries_include_hidden_fields() {
            let mut form = create_test_form();
            form.set_value("fullName", "Ada");
            assert_eq!(
                form.entries(),
                vec![
                    ("fullName".to_string(), "Ada".to_string()),
                    ("email".to_string(), String::new()),
                    ("honeypot_field".to_string(), String::new()),
                ]
            );
        }

        #[test]
        fn test_visible_fields_skip_honeypot() {
            let form = create_test_form();
            assert_eq!(form.visible_field_names(), vec!["fullName", "email"]);
        }

        #[test]
        fn test_captcha_region_is_not_a_field() {
            let mut form = create_test_form();
            form.show_error(CAPTCHA_REGION, "Please complete the CAPTCHA verification.");
            assert!(form.error_visible(CAPTCHA_REGION));
            assert!(form.fields.iter().all(|f| !f.error_visible));

            form.clear_all_errors();
            assert!(!form.error_visible(CAPTCHA_REGION));
            assert!(form.captcha_error.is_empty());
        }

        #[test]
        fn test_reset_clears_values_only() {
            let mut form = create_test_form();
            form.set_value("fullName", "Ada");
            form.set_banner("Thanks", BannerKind::Success);
            form.reset();
            assert_eq!(form.field_value("fullName"), Some(String::new()));
            assert_eq!(form.banner.text, "Thanks");
        }

        #[test]
        fn test_unknown_field_is_ignored() {
            let mut form = create_test_form();
            form.show_error("nope", "x");
            form.set_invalid("nope", true);
            assert_eq!(form.field_value("nope"), None);
            assert!(!form.error_visible("nope"));
        }
    }

    mod shared {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_clones_observe_same_form() {
            let mut writer = SharedForm::new(create_test_form());
            let reader = writer.clone();
            writer.set_banner("Submitting", BannerKind::Neutral);
            writer.set_progress_visible(true);

            let form = reader.lock();
            assert_eq!(form.banner.text, "Submitting");
            assert!(form.progress_visible);
        }
    }
}

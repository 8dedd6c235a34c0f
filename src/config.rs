//! Configuration handling for the form submitter

use crate::controller::ControllerSettings;
use crate::state::{FieldKind, FormField, SubmissionForm};
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Endpoint value shipped in the default config; submissions stay disabled until replaced
pub const PLACEHOLDER_ENDPOINT: &str = "YOUR_APPS_SCRIPT_WEB_APP_URL";

/// Environment variable that overrides the configured endpoint
const ENDPOINT_ENV: &str = "FORM_SUBMITTER_ENDPOINT";

/// One field of the form as described in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    /// Caption shown next to the input; also used in "is required" messages
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
}

impl FieldSpec {
    fn new(name: &str, label: &str, kind: FieldKind, required: bool) -> Self {
        Self {
            name: name.to_string(),
            label: Some(label.to_string()),
            kind,
            required,
        }
    }
}

/// User configuration for the form submitter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// URL the form is POSTed to
    pub endpoint: Option<String>,
    /// Title shown above the form
    pub title: String,
    /// Label of the submit control when idle
    pub submit_label: String,
    /// Field checked against the email pattern
    pub email_field: String,
    /// Hidden field that must stay empty
    pub honeypot_field: String,
    /// Field name the widget token is posted under
    pub captcha_field: String,
    /// Whether the challenge widget is shown at all
    pub captcha_enabled: bool,
    pub fields: Vec<FieldSpec>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: Some(PLACEHOLDER_ENDPOINT.to_string()),
            title: "Application Form".to_string(),
            submit_label: "Submit Application".to_string(),
            email_field: "email".to_string(),
            honeypot_field: "honeypot_field".to_string(),
            captcha_field: "g-recaptcha-response".to_string(),
            captcha_enabled: true,
            fields: vec![
                FieldSpec::new("fullName", "Full Name:", FieldKind::Text, true),
                FieldSpec::new("email", "Email:", FieldKind::Email, true),
                FieldSpec::new("phone", "Phone:", FieldKind::Text, false),
                FieldSpec::new("message", "Tell us about yourself:", FieldKind::Multiline, true),
            ],
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "form-submitter", "form-submitter")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for the log file
    pub fn log_dir() -> Option<PathBuf> {
        ProjectDirs::from("io", "form-submitter", "form-submitter")
            .map(|dirs| dirs.data_local_dir().to_path_buf())
    }

    /// Load configuration from file, then apply the environment override
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            config.endpoint = Some(endpoint);
        }
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: AppConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        // Write the defaults out so there is a file to edit
        let config = Self::default();
        if let Err(e) = config.save() {
            tracing::warn!("Could not write default config: {e}");
        }
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    /// Build the empty form, appending the honeypot if no field already uses its name
    pub fn build_form(&self) -> SubmissionForm {
        let mut fields: Vec<FormField> = self
            .fields
            .iter()
            .map(|spec| FormField::new(&spec.name, spec.label.as_deref(), spec.kind, spec.required))
            .collect();
        if !fields.iter().any(|f| f.name == self.honeypot_field) {
            fields.push(FormField::new(&self.honeypot_field, None, FieldKind::Hidden, false));
        }
        SubmissionForm::new(fields, &self.submit_label)
    }

    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            endpoint: self.endpoint.clone(),
            email_field: self.email_field.clone(),
            honeypot_field: self.honeypot_field.clone(),
            captcha_field: self.captcha_field.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::FormView;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.endpoint.as_deref(), Some(PLACEHOLDER_ENDPOINT));
        assert_eq!(config.submit_label, "Submit Application");
        assert_eq!(config.email_field, "email");
        assert!(config.captcha_enabled);
        assert_eq!(config.fields.len(), 4);
    }

    #[test]
    fn test_partial_deserialization_keeps_defaults() {
        let json = r#"{"endpoint": "https://script.example.com/exec"}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.endpoint.as_deref(),
            Some("https://script.example.com/exec")
        );
        assert_eq!(parsed.honeypot_field, "honeypot_field");
        assert_eq!(parsed.fields, AppConfig::default().fields);
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"title": "Volunteer signup", "unknown_field": "value"}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.title, "Volunteer signup");
    }

    #[test]
    fn test_field_spec_defaults() {
        let json = r#"{"fields": [{"name": "notes"}]}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.fields,
            vec![FieldSpec {
                name: "notes".to_string(),
                label: None,
                kind: FieldKind::Text,
                required: false,
            }]
        );
    }

    #[test]
    fn test_build_form_appends_honeypot() {
        let form = AppConfig::default().build_form();
        let honeypot = form.field("honeypot_field").unwrap();
        assert!(honeypot.is_hidden());
        assert_eq!(
            form.required_field_ids(),
            vec!["fullName", "email", "message"]
        );
        assert_eq!(form.submit_label, "Submit Application");
    }

    #[test]
    fn test_build_form_does_not_duplicate_honeypot() {
        let mut config = AppConfig::default();
        config
            .fields
            .push(FieldSpec::new("honeypot_field", "Website", FieldKind::Hidden, false));
        let form = config.build_form();
        assert_eq!(
            form.fields
                .iter()
                .filter(|f| f.name == "honeypot_field")
                .count(),
            1
        );
    }

    #[test]
    fn test_controller_settings_mirror_config() {
        let config = AppConfig {
            endpoint: Some("https://script.example.com/exec".to_string()),
            ..Default::default()
        };
        let settings = config.controller_settings();
        assert_eq!(settings.endpoint, config.endpoint);
        assert_eq!(settings.captcha_field, "g-recaptcha-response");
    }

    #[test]
    fn test_config_path_points_at_json_file() {
        if let Some(path) = AppConfig::config_path() {
            assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("config.json"));
            assert!(path.is_absolute());
        }
    }
}

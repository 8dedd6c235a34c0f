//! Terminal challenge widget: retype a short code to obtain a completion token

use crate::controller::CaptchaWidget;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// Length of the code a person has to retype
const CODE_LEN: usize = 6;

/// Challenge state shown next to the form
#[derive(Debug, Clone)]
pub struct ChallengeWidget {
    /// Code displayed to the user
    pub code: String,
    /// What the user has typed so far
    pub input: String,
    token: Option<String>,
}

impl ChallengeWidget {
    pub fn new() -> Self {
        Self::with_code(fresh_code())
    }

    pub fn with_code(code: String) -> Self {
        Self {
            code,
            input: String::new(),
            token: None,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.token.is_some()
    }

    /// Push a character to the answer, issuing a token once it matches
    pub fn push_char(&mut self, c: char) {
        if self.is_solved() || self.input.chars().count() >= CODE_LEN {
            return;
        }
        self.input.push(c.to_ascii_uppercase());
        if self.input == self.code {
            self.token = Some(Uuid::new_v4().to_string());
            tracing::debug!("Challenge solved");
        }
    }

    /// Remove the last character from the answer
    pub fn pop_char(&mut self) {
        if !self.is_solved() {
            self.input.pop();
        }
    }
}

impl Default for ChallengeWidget {
    fn default() -> Self {
        Self::new()
    }
}

fn fresh_code() -> String {
    Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(CODE_LEN)
        .collect::<String>()
        .to_ascii_uppercase()
}

impl CaptchaWidget for ChallengeWidget {
    fn token(&self) -> Option<String> {
        self.token.clone()
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Handle shared between the controller and the key handler
#[derive(Debug, Clone, Default)]
pub struct SharedCaptcha(Arc<Mutex<ChallengeWidget>>);

impl SharedCaptcha {
    pub fn new(widget: ChallengeWidget) -> Self {
        Self(Arc::new(Mutex::new(widget)))
    }

    pub fn lock(&self) -> MutexGuard<'_, ChallengeWidget> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CaptchaWidget for SharedCaptcha {
    fn token(&self) -> Option<String> {
        self.lock().token()
    }

    fn reset(&mut self) {
        self.lock().reset()
    }
}

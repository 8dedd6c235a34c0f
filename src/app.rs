//! Application state and core logic

use crate::config::AppConfig;
use crate::controller::{
    CaptchaWidget, FormSubmissionController, SubmissionOutcome, SubmitReport, SubmitTransport,
};
use crate::state::{
    AppState, ChallengeWidget, Focus, FocusRing, SharedCaptcha, SharedForm, CAPTCHA_REGION,
};
use crate::transport::HttpTransport;
use crate::ui::Screen;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

/// How often the spinner is redrawn while a request is in flight
const SUBMIT_REDRAW_INTERVAL: Duration = Duration::from_millis(80);

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Renderer's handle on the form
    pub form: SharedForm,
    /// Renderer's handle on the challenge widget, if shown
    pub captcha: Option<SharedCaptcha>,
    controller: FormSubmissionController<SharedForm>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App posting over HTTP
    pub fn new(config: &AppConfig) -> Self {
        Self::with_transport(config, Box::new(HttpTransport::new()))
    }

    pub fn with_transport(config: &AppConfig, transport: Box<dyn SubmitTransport>) -> Self {
        let form = SharedForm::new(config.build_form());
        let captcha = config
            .captcha_enabled
            .then(|| SharedCaptcha::new(ChallengeWidget::new()));

        let focus = FocusRing::new(form.lock().visible_field_names(), captcha.is_some());
        let widget = captcha
            .clone()
            .map(|c| Box::new(c) as Box<dyn CaptchaWidget>);
        let controller = FormSubmissionController::attach(
            form.clone(),
            widget,
            transport,
            config.controller_settings(),
        );

        Self {
            state: AppState::new(&config.title, focus),
            form,
            captcha,
            controller,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Borrow everything the renderer needs for one frame
    pub fn with_screen<R>(&self, f: impl FnOnce(&Screen<'_>) -> R) -> R {
        let form = self.form.lock();
        let captcha = self.captcha.as_ref().map(|c| c.lock());
        f(&Screen {
            state: &self.state,
            form: &form,
            captcha: captcha.as_deref(),
        })
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.quit = true;
            return Ok(());
        }

        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.request_submit();
            return Ok(());
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.state.focus.next();
                return Ok(());
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.state.focus.prev();
                return Ok(());
            }
            _ => {}
        }

        match self.state.focus.current().clone() {
            Focus::Field(name) => self.handle_field_key(&name, key),
            Focus::Captcha => self.handle_captcha_key(key),
            Focus::Submit => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.request_submit();
                }
            }
        }

        Ok(())
    }

    /// Keys typed into a form field
    fn handle_field_key(&mut self, name: &str, key: KeyEvent) {
        let edited = {
            let mut form = self.form.lock();
            let Some(field) = form.field_mut(name) else {
                return;
            };
            match key.code {
                // Control chords are commands, not text
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    field.push_char(c);
                    true
                }
                KeyCode::Backspace => {
                    field.pop_char();
                    true
                }
                KeyCode::Enter if field.is_multiline() => {
                    field.push_char('\n');
                    true
                }
                KeyCode::Enter => {
                    self.state.focus.next();
                    false
                }
                _ => false,
            }
        };

        if edited {
            self.controller.on_field_input(name);
        }
    }

    /// Keys typed into the challenge widget
    fn handle_captcha_key(&mut self, key: KeyEvent) {
        let Some(captcha) = self.captcha.as_ref() else {
            return;
        };
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                captcha.lock().push_char(c)
            }
            KeyCode::Backspace => captcha.lock().pop_char(),
            KeyCode::Enter => self.state.focus.next(),
            _ => {}
        }
    }

    /// Press the submit control; ignored while it is disabled
    fn request_submit(&mut self) {
        if self.form.lock().submit_enabled && !self.controller.is_submitting() {
            self.state.submit_requested = true;
        }
    }

    /// Run a requested submission, calling `redraw` periodically until it settles
    pub async fn run_submit(
        &mut self,
        mut redraw: impl FnMut(&Screen<'_>) -> Result<()>,
    ) -> Result<Option<SubmitReport>> {
        if !self.state.submit_requested {
            return Ok(None);
        }
        self.state.submit_requested = false;

        let report = {
            let Self {
                state,
                form,
                captcha,
                controller,
                ..
            } = self;

            let submit = controller.submit();
            tokio::pin!(submit);
            let mut ticker = tokio::time::interval(SUBMIT_REDRAW_INTERVAL);

            loop {
                tokio::select! {
                    report = &mut submit => break report,
                    _ = ticker.tick() => {
                        state.spinner_tick = state.spinner_tick.wrapping_add(1);
                        let form = form.lock();
                        let captcha = captcha.as_ref().map(|c| c.lock());
                        redraw(&Screen {
                            state,
                            form: &form,
                            captcha: captcha.as_deref(),
                        })?;
                    }
                }
            }
        };

        self.record(&report);
        Ok(Some(report))
    }

    fn record(&mut self, report: &SubmitReport) {
        match report {
            SubmitReport::Completed(outcome) => {
                tracing::info!(
                    success = outcome.is_success(),
                    message = outcome.message(),
                    "Submission settled"
                );
                if let SubmissionOutcome::Success { submitted_at, .. } = outcome {
                    self.state.last_submitted = Some(*submitted_at);
                    self.state.focus.first();
                }
            }
            SubmitReport::Invalid(result) => {
                // Jump to the first field that needs fixing
                if let Some((id, _)) = result.errors().first() {
                    let target = if id == CAPTCHA_REGION {
                        Focus::Captcha
                    } else {
                        Focus::Field(id.clone())
                    };
                    self.state.focus.focus(&target);
                }
            }
            _ => {}
        }
    }
}

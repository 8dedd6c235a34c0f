//! Application state definitions

use chrono::{DateTime, Utc};

/// What currently receives key presses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Focus {
    /// A visible form field, by name
    Field(String),
    Captcha,
    Submit,
}

/// Ordered focus ring plus the current position in it
#[derive(Debug, Clone)]
pub struct FocusRing {
    stops: Vec<Focus>,
    index: usize,
}

impl FocusRing {
    /// Fields first, then the widget (if shown), then the submit control
    pub fn new(field_names: Vec<String>, with_captcha: bool) -> Self {
        let mut stops: Vec<Focus> = field_names.into_iter().map(Focus::Field).collect();
        if with_captcha {
            stops.push(Focus::Captcha);
        }
        stops.push(Focus::Submit);
        Self { stops, index: 0 }
    }

    pub fn current(&self) -> &Focus {
        // The ring always ends with Submit, so it is never empty
        &self.stops[self.index]
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.stops.len();
    }

    pub fn prev(&mut self) {
        if self.index == 0 {
            self.index = self.stops.len() - 1;
        } else {
            self.index -= 1;
        }
    }

    /// Jump back to the first stop
    pub fn first(&mut self) {
        self.index = 0;
    }

    /// Move to `target` if it is on the ring
    pub fn focus(&mut self, target: &Focus) -> bool {
        match self.stops.iter().position(|stop| stop == target) {
            Some(index) => {
                self.index = index;
                true
            }
            None => false,
        }
    }

    pub fn is_field(&self, name: &str) -> bool {
        matches!(self.current(), Focus::Field(f) if f == name)
    }
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub title: String,
    pub focus: FocusRing,
    /// Time of the last accepted submission
    pub last_submitted: Option<DateTime<Utc>>,
    /// Whether a submit was requested and not yet run
    pub submit_requested: bool,
    /// Advances on every redraw while submitting; drives the spinner
    pub spinner_tick: usize,
}

impl AppState {
    pub fn new(title: &str, focus: FocusRing) -> Self {
        Self {
            title: title.to_string(),
            focus,
            last_submitted: None,
            submit_requested: false,
            spinner_tick: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> FocusRing {
        FocusRing::new(vec!["name".to_string(), "email".to_string()], true)
    }

    #[test]
    fn test_ring_order() {
        let mut focus = ring();
        assert!(focus.is_field("name"));
        focus.next();
        assert!(focus.is_field("email"));
        focus.next();
        assert_eq!(focus.current(), &Focus::Captcha);
        focus.next();
        assert_eq!(focus.current(), &Focus::Submit);
        focus.next();
        assert!(focus.is_field("name"));
    }

    #[test]
    fn test_prev_wraps_to_submit() {
        let mut focus = ring();
        focus.prev();
        assert_eq!(focus.current(), &Focus::Submit);
    }

    #[test]
    fn test_focus_jumps_to_known_stop_only() {
        let mut focus = ring();
        assert!(focus.focus(&Focus::Field("email".to_string())));
        assert!(focus.is_field("email"));
        assert!(!focus.focus(&Focus::Field("missing".to_string())));
        assert!(focus.is_field("email"));
    }

    #[test]
    fn test_ring_without_captcha() {
        let mut focus = FocusRing::new(vec!["name".to_string()], false);
        focus.next();
        assert_eq!(focus.current(), &Focus::Submit);
        focus.first();
        assert!(focus.is_field("name"));
    }
}

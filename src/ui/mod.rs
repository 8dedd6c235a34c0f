//! UI module for rendering the TUI

mod components;
mod forms;

use crate::state::{AppState, ChallengeWidget, SubmissionForm};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Everything one frame is drawn from
pub struct Screen<'a> {
    pub state: &'a AppState,
    pub form: &'a SubmissionForm,
    pub captcha: Option<&'a ChallengeWidget>,
}

/// Main draw function
pub fn draw(frame: &mut Frame, screen: &Screen<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Form
            Constraint::Length(1), // Help line
        ])
        .split(frame.area());

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", screen.state.title),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(chunks[0]);
    frame.render_widget(block, chunks[0]);

    forms::draw_form(frame, inner, screen);
    draw_help_line(frame, chunks[1]);
}

fn draw_help_line(frame: &mut Frame, area: ratatui::layout::Rect) {
    let key = Style::default().fg(Color::Cyan);
    let text = Style::default().fg(Color::DarkGray);
    let line = Line::from(vec![
        Span::styled("Tab", key),
        Span::styled(" next  ", text),
        Span::styled("Shift+Tab", key),
        Span::styled(" previous  ", text),
        Span::styled("Ctrl+S", key),
        Span::styled(" submit  ", text),
        Span::styled("Esc", key),
        Span::styled(" quit", text),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

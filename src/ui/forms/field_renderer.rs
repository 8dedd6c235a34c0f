//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows a field occupies, borders included
pub fn field_height(field: &FormField) -> u16 {
    if field.is_multiline() {
        6
    } else {
        3
    }
}

fn border_style(is_active: bool, is_invalid: bool) -> Style {
    if is_invalid {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Draw a form field using FormField from the domain layer
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let display_str = if field.value.is_empty() && !is_active {
        "(empty)"
    } else {
        field.value.as_str()
    };

    let cursor = if is_active { "▌" } else { "" };

    let content = if field.is_multiline() {
        let mut lines: Vec<Line> = display_str
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), style)))
            .collect();
        if is_active {
            if let Some(last) = lines.last_mut() {
                last.spans
                    .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
            }
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_str, style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]))
    };

    let required = if field.required { " *" } else { "" };
    let block = Block::default()
        .title(format!(" {}{required} ", field.display_label()))
        .borders(Borders::ALL)
        .border_style(border_style(is_active, field.invalid));

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

/// Draw a single-line inline error region; blank when hidden
pub fn draw_error_line(frame: &mut Frame, area: Rect, message: &str, visible: bool) {
    if !visible {
        return;
    }
    let paragraph = Paragraph::new(format!("  {message}")).style(Style::default().fg(Color::Red));
    frame.render_widget(paragraph, area);
}

//! Challenge widget rendering

use crate::state::ChallengeWidget;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const CAPTCHA_HEIGHT: u16 = 3;

pub fn draw_captcha(frame: &mut Frame, area: Rect, widget: &ChallengeWidget, is_active: bool) {
    let border_color = if is_active { Color::Cyan } else { Color::DarkGray };

    let line = if widget.is_solved() {
        Line::from(Span::styled(
            "✓ Verified",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ))
    } else {
        let cursor = if is_active { "▌" } else { "" };
        Line::from(vec![
            Span::raw("Type "),
            Span::styled(
                widget.code.as_str(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(": "),
            Span::styled(widget.input.as_str(), Style::default().fg(Color::Cyan)),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ])
    };

    let block = Block::default()
        .title(" I'm not a robot ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

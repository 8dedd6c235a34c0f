//! Result banner rendering

use crate::state::BannerKind;
use crate::ui::Screen;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows reserved for the banner; zero when it is hidden
pub fn banner_height(screen: &Screen<'_>) -> u16 {
    if screen.form.banner.visible {
        4
    } else {
        0
    }
}

pub fn draw_banner(frame: &mut Frame, area: Rect, screen: &Screen<'_>) {
    let banner = &screen.form.banner;
    if !banner.visible || area.height == 0 {
        return;
    }

    let color = match banner.kind {
        BannerKind::Success => Color::Green,
        BannerKind::Error => Color::Red,
        BannerKind::Neutral => Color::Gray,
    };

    let mut lines = vec![Line::from(banner.text.as_str())];
    if let Some(at) = screen.state.last_submitted {
        lines.push(Line::styled(
            format!("Last submitted at {}", at.format("%H:%M:%S UTC")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
        .block(block);

    frame.render_widget(paragraph, area);
}

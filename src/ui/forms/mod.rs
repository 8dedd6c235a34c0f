//! Form rendering module
//!
//! - `field_renderer`: field and inline error rendering
//! - `captcha`: the challenge widget block
//! - `banner`: the aggregate result message

mod banner;
mod captcha;
mod field_renderer;

use super::components::{render_submit_button, BUTTON_HEIGHT};
use super::Screen;
use crate::state::Focus;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use banner::{banner_height, draw_banner};
use captcha::{draw_captcha, CAPTCHA_HEIGHT};
use field_renderer::{draw_error_line, draw_field, field_height};

/// Draw every visible field, the widget, the submit control and the banner
pub fn draw_form(frame: &mut Frame, area: Rect, screen: &Screen<'_>) {
    let form = screen.form;
    let fields: Vec<_> = form.visible_fields().collect();

    let mut constraints: Vec<Constraint> = Vec::new();
    for field in &fields {
        constraints.push(Constraint::Length(field_height(field)));
        constraints.push(Constraint::Length(1)); // Error region
    }
    if screen.captcha.is_some() {
        constraints.push(Constraint::Length(CAPTCHA_HEIGHT));
    }
    // Captcha error region, shown even when no widget is attached
    let captcha_error_row = screen.captcha.is_some() || form.captcha_error_visible;
    if captcha_error_row {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(BUTTON_HEIGHT));
    constraints.push(Constraint::Length(banner_height(screen)));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(area);

    let mut slot = 0;
    for field in &fields {
        let is_active = screen.state.focus.is_field(&field.name);
        draw_field(frame, chunks[slot], field, is_active);
        draw_error_line(frame, chunks[slot + 1], &field.error, field.error_visible);
        slot += 2;
    }

    if let Some(widget) = screen.captcha {
        let is_active = *screen.state.focus.current() == Focus::Captcha;
        draw_captcha(frame, chunks[slot], widget, is_active);
        slot += 1;
    }
    if captcha_error_row {
        draw_error_line(
            frame,
            chunks[slot],
            &form.captcha_error,
            form.captcha_error_visible,
        );
        slot += 1;
    }

    // Keep the button narrow like a real control
    let button_width = (form.submit_label.chars().count() as u16 + 8).min(chunks[slot].width);
    let button_area = Rect {
        width: button_width,
        ..chunks[slot]
    };
    render_submit_button(
        frame,
        button_area,
        &form.submit_label,
        form.progress_visible.then_some(screen.state.spinner_tick),
        *screen.state.focus.current() == Focus::Submit,
        form.submit_enabled,
    );
    slot += 1;

    draw_banner(frame, chunks[slot], screen);
}

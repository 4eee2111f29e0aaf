//! Input line and settings button.

use crate::app::App;
use crate::colors;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::time::Instant;

/// Part of `hint` that extends the typed text, shown after it
fn hint_suffix<'a>(text: &str, hint: &'a str) -> Option<&'a str> {
    if text.is_empty() {
        return None;
    }
    hint.strip_prefix(text).filter(|rest| !rest.is_empty())
}

pub fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let input = &app.launcher.view().input;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Boxmodel ")
        .style(Style::default().bg(colors::SURFACE))
        .border_style(Style::default().fg(colors::OUTLINE));

    let text_style = if input.select_all {
        Style::default()
            .fg(colors::ON_SURFACE)
            .bg(colors::SURFACE_HIGH)
    } else {
        Style::default().fg(colors::ON_SURFACE)
    };

    let line = if input.text.is_empty() {
        Line::from(Span::styled(
            input.hint.as_str(),
            Style::default().fg(colors::OUTLINE),
        ))
    } else {
        let mut spans = vec![Span::styled(input.text.as_str(), text_style)];
        if let Some(suffix) = hint_suffix(&input.text, &input.hint) {
            spans.push(Span::styled(suffix, Style::default().fg(colors::OUTLINE)));
        }
        Line::from(spans)
    };

    f.render_widget(Paragraph::new(line).block(block), area);

    let before_cursor: String = input.text.chars().take(app.cursor).collect();
    let offset = u16::try_from(Span::raw(before_cursor).width()).unwrap_or(u16::MAX);
    f.set_cursor_position((
        area.x.saturating_add(1).saturating_add(offset),
        area.y + 1,
    ));
}

/// The settings button, drawn at the opacity of its current fade
pub fn render_button(f: &mut Frame, app: &App, area: Rect, now: Instant) {
    let opacity = app.launcher.view().button.opacity(now);

    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(colors::BG))
        .border_style(Style::default().fg(colors::blend(colors::BG, colors::OUTLINE, opacity)));

    let button = Paragraph::new(Span::styled(
        "⚙",
        Style::default()
            .fg(colors::blend(colors::BG, colors::PRIMARY, opacity))
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(block);

    f.render_widget(button, area);
}

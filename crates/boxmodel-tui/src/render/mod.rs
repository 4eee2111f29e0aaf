//! Rendering of the launcher window.

mod input;
mod results;

pub use input::{render_button, render_input};
pub use results::{render_actions, render_results};

use crate::app::{App, Areas};
use crate::colors;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use std::time::Instant;

pub fn render_ui(f: &mut Frame, app: &mut App, now: Instant) {
    let bg_block = Block::default().style(Style::default().bg(colors::BG));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(5)])
        .split(chunks[0]);

    // The results list shows at most `itemCount` rows and scrolls the rest
    let body_area = Rect {
        height: chunks[1].height.min(list_height(app.launcher.config().item_count)),
        ..chunks[1]
    };

    let actions_visible = app.launcher.view().actions.visible;
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(if actions_visible {
            vec![Constraint::Percentage(65), Constraint::Percentage(35)]
        } else {
            vec![Constraint::Percentage(100)]
        })
        .split(body_area);

    app.areas = Areas {
        input: top[0],
        button: top[1],
        results: body[0],
    };

    render_input(f, app, top[0]);
    render_button(f, app, top[1], now);
    render_results(f, app, body[0]);
    if actions_visible {
        render_actions(f, app, body[1]);
    }
    render_help(f, app, chunks[2]);
}

/// Height of a bordered list showing `rows` rows
fn list_height(rows: usize) -> u16 {
    u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2)
}

fn render_help(f: &mut Frame, app: &App, area: Rect) {
    let config = app.launcher.config();
    let key = |text: String| Span::styled(text, Style::default().fg(colors::PRIMARY));
    let label = |text: &'static str| Span::styled(text, Style::default().fg(colors::OUTLINE));

    let help = Line::from(vec![
        key("Enter".to_string()),
        label(" run  "),
        key("Tab".to_string()),
        label(" complete  "),
        key(config.mod_actions.to_string()),
        label(" actions  "),
        key(config.mod_fallback.to_string()),
        label(" fallbacks  "),
        key("Esc".to_string()),
        label(" close"),
    ]);
    f.render_widget(Paragraph::new(help), area);
}

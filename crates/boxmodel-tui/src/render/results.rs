//! Results and actions lists.

use crate::app::App;
use crate::colors;
use boxmodel_core::Model;
use boxmodel_types::ResultItem;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

/// Build a single result list item with its subtext
fn build_result_item<'a>(result: &'a ResultItem, is_selected: bool, enabled: bool) -> ListItem<'a> {
    let (text_style, bg) = match (enabled, is_selected) {
        (false, _) => (Style::default().fg(colors::DISABLED), colors::SURFACE),
        (true, true) => (
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
            colors::SURFACE_HIGH,
        ),
        (true, false) => (Style::default().fg(colors::ON_SURFACE), colors::SURFACE),
    };
    let subtext_fg = if enabled { colors::SUBTEXT } else { colors::DISABLED };

    let mut spans = vec![Span::styled(result.text.as_str(), text_style)];
    if let Some(subtext) = &result.subtext {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            subtext.as_str(),
            Style::default().fg(subtext_fg),
        ));
    }

    ListItem::new(Line::from(spans)).style(Style::default().bg(bg))
}

pub fn render_results(f: &mut Frame, app: &mut App, area: Rect) {
    let view = &app.launcher.view().results;
    if !view.visible {
        return;
    }

    let title = match view.binding.map(|b| b.model) {
        Some(Model::Fallbacks) => " Fallbacks ".to_string(),
        _ => format!(" Results ({}) ", app.launcher.results().len()),
    };
    let enabled = view.enabled;
    let current = view.current;

    let items: Vec<ListItem> = app
        .launcher
        .results()
        .iter()
        .enumerate()
        .map(|(i, result)| build_result_item(result, current == Some(i), enabled))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().bg(colors::SURFACE))
        .border_style(Style::default().fg(colors::OUTLINE));

    app.list_state.select(current);
    f.render_stateful_widget(List::new(items).block(block), area, &mut app.list_state);
}

pub fn render_actions(f: &mut Frame, app: &App, area: Rect) {
    let actions = &app.launcher.view().actions;

    let items: Vec<ListItem> = actions
        .items
        .iter()
        .enumerate()
        .map(|(i, action)| {
            let style = if actions.current == Some(i) {
                Style::default()
                    .fg(colors::PRIMARY)
                    .bg(colors::SURFACE_HIGH)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors::ON_SURFACE)
            };
            ListItem::new(Span::styled(action.text.as_str(), style))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Actions ")
        .style(Style::default().bg(colors::SURFACE))
        .border_style(Style::default().fg(colors::PRIMARY));

    f.render_widget(List::new(items).block(block), area);
}

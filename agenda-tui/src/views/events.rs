//! Events page: title, date filter bar, event list and detail panel.

use crate::state::App;
use crate::theme::fetch_status_color;
use crate::widgets::{time_slot, DateFieldView, DateFilterBar, EventDetail, StatusIndicator};
use agenda_core::DateField;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let title = Paragraph::new("All Events").style(
        Style::default()
            .fg(app.theme.primary)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(title, rows[0]);

    render_filter_bar(f, app, rows[1]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[2]);
    render_list(f, app, columns[0]);
    if let Some(event) = app.selected_event() {
        let detail = EventDetail {
            event,
            label_style: Style::default().fg(app.theme.secondary),
            avatar_style: Style::default().fg(app.theme.tertiary),
        };
        detail.render(f, columns[1]);
    } else {
        f.render_widget(
            Block::default().title("Details").borders(Borders::ALL),
            columns[1],
        );
    }

    let status = StatusIndicator {
        status: app.page.status(),
        style: Style::default().fg(fetch_status_color(app.page.status(), &app.theme)),
    };
    status.render(f, rows[3]);
}

fn render_filter_bar(f: &mut Frame<'_>, app: &App, area: Rect) {
    let dates = app.page.dates();
    let fields: Vec<DateFieldView> = [DateField::StartDate, DateField::EndDate]
        .into_iter()
        .map(|field| {
            let editing = app.picker.editing() == Some(field);
            let value = if editing {
                app.picker.buffer().to_string()
            } else {
                dates
                    .get(field)
                    .map(|date| date.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "--".to_string())
            };
            DateFieldView {
                label: field.label(),
                value,
                editing,
            }
        })
        .collect();

    let meta_style = if app.page.error().is_some() {
        Style::default().fg(app.theme.error)
    } else {
        Style::default().fg(app.theme.text_dim)
    };
    let bar = DateFilterBar {
        meta: app.meta_line(),
        meta_style,
        fields: &fields,
        active_style: Style::default().fg(app.theme.bg).bg(app.theme.primary),
        inactive_style: Style::default().fg(app.theme.text),
    };
    bar.render(f, area);
}

fn render_list(f: &mut Frame<'_>, app: &App, area: Rect) {
    let mut items: Vec<ListItem> = app
        .page
        .items()
        .iter()
        .map(|event| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    event.title.clone(),
                    Style::default().fg(app.theme.text),
                )),
                Line::from(Span::styled(
                    time_slot(event),
                    Style::default().fg(app.theme.text_dim),
                )),
            ])
        })
        .collect();

    if app.page.loading() {
        items.push(ListItem::new(Span::styled(
            "Loading...",
            Style::default().fg(app.theme.tertiary),
        )));
    } else if app.page.pagination().is_some_and(|p| p.has_more()) {
        items.push(ListItem::new(Span::styled(
            "[m] load more",
            Style::default().fg(app.theme.primary_dim),
        )));
    }

    let mut state = ListState::default();
    state.select(app.selected);

    let list = List::new(items)
        .block(
            Block::default()
                .title("Events")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .highlight_style(
            Style::default()
                .fg(app.theme.primary)
                .bg(app.theme.bg_highlight),
        );
    f.render_stateful_widget(list, area, &mut state);
}

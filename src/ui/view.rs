//! Rendering for the task viewer.

use chrono::Utc;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::task::{Filter, Priority, Task};

use super::app::AppState;

/// Theme-dependent color set. Which palette is active follows the
/// persisted dark-mode flag, so `t` flips the whole screen.
pub(crate) struct Palette {
    text: Color,
    muted: Color,
    accent: Color,
    success: Color,
    warning: Color,
    error: Color,
    highlight_bg: Color,
}

impl Palette {
    fn dark() -> Self {
        Self {
            text: Color::Rgb(234, 236, 239),
            muted: Color::Rgb(140, 146, 152),
            accent: Color::Rgb(122, 170, 255),
            success: Color::Rgb(126, 210, 146),
            warning: Color::Rgb(244, 200, 98),
            error: Color::Rgb(255, 107, 107),
            highlight_bg: Color::Rgb(52, 56, 60),
        }
    }

    fn light() -> Self {
        Self {
            text: Color::Rgb(28, 30, 33),
            muted: Color::Rgb(110, 116, 122),
            accent: Color::Rgb(32, 98, 214),
            success: Color::Rgb(22, 130, 62),
            warning: Color::Rgb(158, 110, 10),
            error: Color::Rgb(188, 36, 36),
            highlight_bg: Color::Rgb(216, 222, 230),
        }
    }

    fn for_app(app: &AppState) -> Self {
        if app.store.dark_mode() {
            Self::dark()
        } else {
            Self::light()
        }
    }

    fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::Low => self.success,
            Priority::Medium => self.warning,
            Priority::High => self.error,
        }
    }
}

pub fn render(frame: &mut Frame, app: &mut AppState) {
    let palette = Palette::for_app(app);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(frame.size());

    render_tabs(frame, app, &palette, chunks[0]);
    render_list(frame, app, &palette, chunks[1]);
    render_footer(frame, app, &palette, chunks[2]);
}

fn render_tabs(frame: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    let mut spans = Vec::new();
    for filter in [Filter::All, Filter::Active, Filter::Completed] {
        let label = super::model::tab_label(filter, app.tasks());
        let style = if filter == app.filter {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        };
        spans.push(Span::styled(format!(" {label} "), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_list(frame: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    let now = Utc::now();
    let items: Vec<ListItem> = app
        .visible
        .iter()
        .filter_map(|&index| app.tasks().get(index))
        .map(|task| ListItem::new(task_line(task, palette, now)))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Tasks ")
        .border_style(Style::default().fg(palette.muted));

    if items.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No tasks found - press 'a' to add one",
            Style::default().fg(palette.muted),
        )))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(palette.highlight_bg));

    let mut state = ListState::default();
    state.select(app.selected);
    frame.render_stateful_widget(list, area, &mut state);
}

fn task_line<'a>(task: &'a Task, palette: &Palette, now: chrono::DateTime<Utc>) -> Line<'a> {
    let mut spans = Vec::new();

    let marker = if task.completed { "[x] " } else { "[ ] " };
    spans.push(Span::styled(marker, Style::default().fg(palette.muted)));

    spans.push(Span::styled(
        format!("{:<6} ", task.priority),
        Style::default().fg(palette.priority_color(task.priority)),
    ));

    let title_style = if task.completed {
        Style::default()
            .fg(palette.muted)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(palette.text)
    };
    spans.push(Span::styled(task.title.as_str(), title_style));

    if let Some(due) = task.due_date {
        spans.push(Span::styled(
            format!("  due {}", due.format("%Y-%m-%d %H:%M")),
            Style::default().fg(palette.muted),
        ));
        if task.due_soon(now) {
            spans.push(Span::styled(
                "  due soon",
                Style::default().fg(palette.warning),
            ));
        }
        // Data-wise a completed task can still be overdue; the badge is
        // suppressed because it no longer calls for action.
        if task.is_overdue(now) && !task.completed {
            spans.push(Span::styled(
                "  overdue",
                Style::default().fg(palette.error),
            ));
        }
    }

    Line::from(spans)
}

fn render_footer(frame: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.muted));

    let line = if let Some(input) = app.input.as_ref() {
        Line::from(vec![
            Span::styled("New task: ", Style::default().fg(palette.accent)),
            Span::styled(input.as_str(), Style::default().fg(palette.text)),
            Span::styled("_", Style::default().fg(palette.accent)),
        ])
    } else if let Some(confirm) = app.confirm_delete.as_ref() {
        Line::from(Span::styled(
            format!("Delete '{}'? {}", confirm.title, app.footer_hint()),
            Style::default().fg(palette.warning),
        ))
    } else if let Some(status) = app.status.as_ref() {
        Line::from(vec![
            Span::styled(status.clone(), Style::default().fg(palette.success)),
            Span::styled(
                format!("  {}", app.footer_hint()),
                Style::default().fg(palette.muted),
            ),
        ])
    } else {
        Line::from(Span::styled(
            app.footer_hint(),
            Style::default().fg(palette.muted),
        ))
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

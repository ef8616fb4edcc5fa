//! UI rendering for the TUI

use crate::app::{App, Focus};
use crate::views::{render_cases, render_timeline};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Case panel width in columns
const CASE_PANEL_WIDTH: u16 = 36;
/// Below this total width the case panel is hidden
const MIN_WIDTH_FOR_PANEL: u16 = 72;

/// Main drawing function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let main = chunks[0];
    let show_panel = app.case_panel_visible && main.width >= MIN_WIDTH_FOR_PANEL;
    if show_panel {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(CASE_PANEL_WIDTH), Constraint::Min(0)])
            .split(main);
        render_cases(frame, app, columns[0]);
        draw_timeline_panel(frame, app, columns[1]);
    } else {
        app.case_list_area = None;
        draw_timeline_panel(frame, app, main);
    }

    draw_status_bar(frame, app, chunks[1]);

    if app.show_help {
        draw_help_popover(frame, app);
    }
}

fn draw_timeline_panel(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.focus == Focus::Timeline;
    let border_style = if focused {
        Style::default().fg(app.theme.primary)
    } else {
        Style::default().fg(app.theme.border)
    };
    let case = app.current_case();
    let span_label = case
        .span()
        .map(|(first, last)| format!(" {first}-{last} "))
        .unwrap_or_default();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ", case.title))
        .title_bottom(Line::from(span_label).right_aligned());

    let inner = block.inner(area);
    frame.render_widget(block, area);
    app.timeline_area = Some((inner.x, inner.y, inner.width, inner.height));

    app.ensure_layout(inner.height, inner.width);
    render_timeline(frame, app, inner);
}

fn draw_status_bar(frame: &mut Frame, app: &mut App, area: Rect) {
    let timeline = app.controller.timeline();
    let year_text = format!("{}/{}", app.year_index() + 1, timeline.len().max(1));
    let case_text = format!("{}/{}", app.selected_case + 1, app.case_count());

    let mut left_spans = vec![
        Span::styled(" year ", Style::default().fg(app.theme.text_muted)),
        Span::styled(
            app.selected_year.to_string(),
            Style::default().fg(app.theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(year_text, Style::default().fg(app.theme.text_muted)),
        Span::styled("  case ", Style::default().fg(app.theme.text_muted)),
        Span::styled(case_text, Style::default().fg(app.theme.text)),
    ];
    if app.controller.pending_index().is_some() {
        left_spans.push(Span::styled(
            "  settling…",
            Style::default().fg(app.theme.warning),
        ));
    }

    let snapshot = app.controller.snapshot();
    let right = format!(
        "row {:.0}/{:.0}  ? help ",
        -app.controller.position(),
        snapshot.max_scroll,
    );

    let left_width: usize = left_spans.iter().map(|s| s.content.as_ref().width()).sum();
    let pad = (area.width as usize).saturating_sub(left_width + right.width());
    left_spans.push(Span::raw(" ".repeat(pad)));
    left_spans.push(Span::styled(
        right,
        Style::default().fg(app.theme.text_muted),
    ));

    frame.render_widget(Paragraph::new(Line::from(left_spans)), area);
}

fn draw_help_popover(frame: &mut Frame, app: &App) {
    let area = centered_rect(frame.area(), 44, 16);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.primary))
        .title(" Keys ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let entries: &[(&str, &str)] = &[
        ("j/k, ↓/↑", "next / previous year"),
        ("g/G", "first / last year"),
        ("[ / ]", "previous / next case"),
        ("enter, space", "expand / collapse year"),
        ("wheel", "scroll the timeline"),
        ("pgdn/pgup", "page forward / back"),
        ("tab", "switch focus"),
        ("f", "toggle case panel"),
        ("a", "toggle animation"),
        ("s", "toggle scrollbar"),
        ("r", "re-anchor"),
        ("q, esc", "quit"),
    ];
    let lines: Vec<Line> = entries
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(
                    format!(" {key:<14}"),
                    Style::default().fg(app.theme.primary),
                ),
                Span::styled(*action, Style::default().fg(app.theme.text)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

//! Case list panel

use crate::app::{App, Focus};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Truncate a title to fit a width, with an ellipsis.
pub(crate) fn truncate_title(title: &str, max_width: usize) -> String {
    if title.width() <= max_width {
        return title.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in title.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > max_width.saturating_sub(1) {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

pub fn render_cases(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.focus == Focus::Cases;
    let border_style = if focused {
        Style::default().fg(app.theme.primary)
    } else {
        Style::default().fg(app.theme.border)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Cases ");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    app.case_list_area = Some((inner.x, inner.y, inner.width, inner.height));

    let width = inner.width as usize;
    let items: Vec<ListItem> = app
        .dataset
        .cases
        .iter()
        .enumerate()
        .map(|(index, case)| {
            let selected = index == app.selected_case;
            let marker = if selected { "▶ " } else { "  " };
            let title_style = if selected {
                Style::default()
                    .fg(app.theme.primary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(app.theme.text)
            };
            let span_label = case
                .span()
                .map(|(first, last)| format!("{first}-{last}"))
                .unwrap_or_default();
            let impact = case.headline.impact_score;
            let impact_color = if impact >= 90 {
                app.theme.success
            } else if impact >= 80 {
                app.theme.warning
            } else {
                app.theme.error
            };
            let muted = Style::default().fg(app.theme.text_muted);
            let mut lines = vec![
                Line::from(vec![
                    Span::styled(marker, title_style),
                    Span::styled(
                        truncate_title(&case.title, width.saturating_sub(2)),
                        title_style,
                    ),
                ]),
                Line::from(vec![
                    Span::styled(format!("  {} · impact ", case.domain), muted),
                    Span::styled(impact.to_string(), Style::default().fg(impact_color)),
                    Span::styled(
                        format!(
                            " · code {:.0}% · {}",
                            case.headline.code_availability * 100.0,
                            span_label
                        ),
                        muted,
                    ),
                ]),
            ];
            if selected {
                for row in crate::app::wrap_to_width(&case.summary, width.saturating_sub(2)) {
                    lines.push(Line::from(Span::styled(
                        format!("  {row}"),
                        Style::default().fg(app.theme.text),
                    )));
                }
                if !case.keywords.is_empty() {
                    lines.push(Line::from(Span::styled(
                        format!("  {}", case.keywords.join(", ")),
                        Style::default().fg(app.theme.accent),
                    )));
                }
            }
            lines.push(Line::default());
            ListItem::new(lines)
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}

//! Timeline view - year groups under the animated scroll transform

use crate::app::App;
use ratatui::{
    layout::{Margin, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// First content row rendered at the top of the viewport for a position.
///
/// The animated position is a negative translation applied to the content;
/// the view consumes it by skipping that many rows.
pub(crate) fn first_visible_row(position: f32) -> usize {
    (-position).round().max(0.0) as usize
}

/// Render the year groups with the controller's position applied.
pub fn render_timeline(frame: &mut Frame, app: &mut App, area: Rect) {
    let start_row = first_visible_row(app.controller.position());
    let visible = area.height as usize;

    let mut lines: Vec<Line> = Vec::with_capacity(visible);
    let mut row = 0usize;
    'groups: for group in app.surface.groups() {
        for (line_idx, line) in group.lines.iter().enumerate() {
            if row >= start_row + visible {
                break 'groups;
            }
            if row >= start_row {
                let mut line = line.clone();
                if line_idx == 0 && group.year == app.selected_year {
                    line.style = line
                        .style
                        .patch(Style::default().add_modifier(Modifier::UNDERLINED));
                }
                lines.push(line);
            }
            row += 1;
        }
    }
    frame.render_widget(Paragraph::new(lines), area);

    if app.scrollbar_visible {
        let total_rows = app.surface.total_rows();
        if total_rows > visible {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));
            let mut scrollbar_state = ScrollbarState::new(total_rows).position(start_row);
            frame.render_stateful_widget(
                scrollbar,
                area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }
    }
}

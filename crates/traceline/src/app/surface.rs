//! The measurable timeline surface
//!
//! Caches the fully styled, wrapped lines of every year group for the
//! current case at the current panel width. The cache is what the timeline
//! view renders and what the controller measures, so reported heights always
//! match what is on screen. Invalidation (expand/collapse, width change,
//! late signal arrival, case switch) empties the cache; measurement fails
//! until the next draw rebuilds it, which is exactly the "element not yet
//! realized" case the controller is built to ride out.

use crate::data::CaseStudy;
use crate::theme::Theme;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use traceline_core::{GroupRect, Surface};
use unicode_width::UnicodeWidthStr;

/// Indent for event body lines under the date row
const BODY_INDENT: &str = "    ";

/// One year group's rendered lines
pub(crate) struct GroupLayout {
    pub(crate) year: i32,
    pub(crate) lines: Vec<Line<'static>>,
}

/// Line cache + geometry provider for the current case
pub struct TimelineSurface {
    groups: Vec<GroupLayout>,
    total_rows: usize,
    built_width: u16,
    valid: bool,
    /// Viewport height in rows, from the last draw
    viewport_rows: u16,
    /// Translation applied at the last draw
    position: f32,
}

impl TimelineSurface {
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            total_rows: 0,
            built_width: 0,
            valid: false,
            viewport_rows: 0,
            position: 0.0,
        }
    }

    /// Drop the cache; the next draw rebuilds it.
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Record the viewport geometry of this draw. A width change re-wraps
    /// every group, so it invalidates the cache.
    pub fn set_viewport(&mut self, rows: u16, width: u16) {
        self.viewport_rows = rows;
        if width != self.built_width {
            self.valid = false;
        }
    }

    /// Record the translation this draw applies, so measurement can read
    /// rendered-space geometry consistent with what is on screen.
    pub fn set_position(&mut self, position: f32) {
        self.position = position;
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub(crate) fn groups(&self) -> &[GroupLayout] {
        &self.groups
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Untranslated row of a group's first line.
    pub(crate) fn row_of_group(&self, index: usize) -> usize {
        self.groups[..index].iter().map(|g| g.lines.len()).sum()
    }

    pub fn rebuild(
        &mut self,
        case: &CaseStudy,
        expanded: &BTreeSet<i32>,
        details: &FxHashMap<(String, i32), Vec<String>>,
        theme: &Theme,
        width: u16,
    ) {
        let wrap_width = (width as usize).max(20);
        self.groups = case
            .years()
            .into_iter()
            .map(|year| GroupLayout {
                year,
                lines: build_group_lines(
                    case,
                    year,
                    expanded.contains(&year),
                    details.get(&(case.id.clone(), year)),
                    theme,
                    wrap_width,
                ),
            })
            .collect();
        self.total_rows = self.groups.iter().map(|g| g.lines.len()).sum();
        self.built_width = width;
        self.valid = true;
    }
}

impl Default for TimelineSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for TimelineSurface {
    fn group_count(&self) -> usize {
        self.groups.len()
    }

    fn measure_group(&self, index: usize) -> Option<GroupRect> {
        if !self.valid {
            return None;
        }
        let group = self.groups.get(index)?;
        Some(GroupRect {
            top: self.row_of_group(index) as f32 + self.position,
            height: group.lines.len() as f32,
        })
    }

    fn viewport_extent(&self) -> f32 {
        f32::from(self.viewport_rows)
    }

    fn content_extent(&self) -> f32 {
        self.total_rows as f32
    }
}

fn build_group_lines(
    case: &CaseStudy,
    year: i32,
    expanded: bool,
    details: Option<&Vec<String>>,
    theme: &Theme,
    wrap_width: usize,
) -> Vec<Line<'static>> {
    let events = case.events_for_year(year);
    let mut lines = Vec::new();

    // Year header: "▾ 2021 ── 2 events ─────"
    let marker = if expanded { "▾" } else { "▸" };
    let label = format!("{marker} {year} ");
    let count = format!("─ {} event{} ", events.len(), if events.len() == 1 { "" } else { "s" });
    let used = label.width() + count.width();
    let rule = "─".repeat(wrap_width.saturating_sub(used));
    lines.push(Line::from(vec![
        Span::styled(
            label,
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
        ),
        Span::styled(count, Style::default().fg(theme.text_muted)),
        Span::styled(rule, Style::default().fg(theme.border)),
    ]));

    for event in &events {
        // "• Jul 2021  [ADOPTION]  Open-source release..."
        lines.push(Line::from(vec![
            Span::styled("• ", Style::default().fg(theme.accent)),
            Span::styled(event.display_date(), Style::default().fg(theme.text_muted)),
            Span::raw("  "),
            Span::styled(
                format!("[{}]", event.phase.label()),
                Style::default().fg(theme.phase_color(event.phase)),
            ),
        ]));
        for row in wrap_to_width(&event.title, wrap_width.saturating_sub(BODY_INDENT.width())) {
            lines.push(Line::from(vec![
                Span::raw(BODY_INDENT),
                Span::styled(row, Style::default().fg(theme.text).add_modifier(Modifier::BOLD)),
            ]));
        }

        if expanded {
            for row in
                wrap_to_width(&event.description, wrap_width.saturating_sub(BODY_INDENT.width()))
            {
                lines.push(Line::from(vec![
                    Span::raw(BODY_INDENT),
                    Span::styled(row, Style::default().fg(theme.text)),
                ]));
            }
        }
    }

    if expanded {
        match details {
            Some(rows) => {
                for row in rows {
                    for wrapped in
                        wrap_to_width(row, wrap_width.saturating_sub(BODY_INDENT.width()))
                    {
                        lines.push(Line::from(vec![
                            Span::raw(BODY_INDENT),
                            Span::styled(wrapped, Style::default().fg(theme.text_muted)),
                        ]));
                    }
                }
            }
            None => {
                lines.push(Line::from(vec![
                    Span::raw(BODY_INDENT),
                    Span::styled("… loading signals", Style::default().fg(theme.text_muted)),
                ]));
            }
        }
    }

    // trailing separator row
    lines.push(Line::default());
    lines
}

/// Greedy word wrap by display width. Words longer than the width get a row
/// of their own rather than being split mid-cluster.
pub(crate) fn wrap_to_width(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in text.split_whitespace() {
        let word_width = word.width();
        if current_width == 0 {
            current.push_str(word);
            current_width = word_width;
            continue;
        }
        if current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else {
            rows.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        }
    }
    if !current.is_empty() {
        rows.push(current);
    }
    if rows.is_empty() {
        rows.push(String::new());
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;

    fn build(expanded: &[i32], width: u16) -> (TimelineSurface, CaseStudy) {
        let case = Dataset::bundled().cases[0].clone();
        let mut surface = TimelineSurface::new();
        surface.set_viewport(30, width);
        surface.rebuild(
            &case,
            &expanded.iter().copied().collect(),
            &FxHashMap::default(),
            &Theme::dark(),
            width,
        );
        (surface, case)
    }

    #[test]
    fn test_wrap_to_width() {
        let rows = wrap_to_width("one two three four five", 9);
        assert_eq!(rows, vec!["one two", "three", "four five"]);
    }

    #[test]
    fn test_wrap_long_word_gets_own_row() {
        let rows = wrap_to_width("a extraordinarily b", 6);
        assert_eq!(rows, vec!["a", "extraordinarily", "b"]);
    }

    #[test]
    fn test_wrap_empty_yields_one_row() {
        assert_eq!(wrap_to_width("", 10), vec![String::new()]);
    }

    #[test]
    fn test_groups_cover_all_years() {
        let (surface, case) = build(&[], 80);
        assert_eq!(surface.group_count(), case.years().len());
        assert!(surface.total_rows() > 0);
    }

    #[test]
    fn test_measure_reports_cumulative_tops() {
        let (mut surface, _) = build(&[], 80);
        surface.set_position(0.0);
        let mut expected_top = 0.0;
        for i in 0..surface.group_count() {
            let rect = surface.measure_group(i).expect("built surface measures");
            assert_eq!(rect.top, expected_top);
            expected_top += rect.height;
        }
        assert_eq!(expected_top, surface.total_rows() as f32);
    }

    #[test]
    fn test_measure_reports_translated_tops() {
        let (mut surface, _) = build(&[], 80);
        surface.set_position(-10.0);
        let rect = surface.measure_group(0).expect("built surface measures");
        assert_eq!(rect.top, -10.0);
    }

    #[test]
    fn test_invalidated_surface_fails_measurement() {
        let (mut surface, _) = build(&[], 80);
        surface.invalidate();
        assert!(surface.measure_group(0).is_none());
    }

    #[test]
    fn test_width_change_invalidates() {
        let (mut surface, _) = build(&[], 80);
        assert!(surface.is_valid());
        surface.set_viewport(30, 40);
        assert!(!surface.is_valid());
    }

    #[test]
    fn test_expansion_grows_group() {
        let (collapsed, case) = build(&[], 80);
        let year = case.years()[0];
        let (expanded, _) = build(&[year], 80);
        let h_collapsed = collapsed.measure_group(0).map(|r| r.height);
        let h_expanded = expanded.measure_group(0).map(|r| r.height);
        assert!(h_expanded > h_collapsed);
    }

    #[test]
    fn test_loaded_signals_change_height() {
        let case = Dataset::bundled().cases[0].clone();
        let year = case.years()[0];
        let expanded: BTreeSet<i32> = [year].into_iter().collect();

        let mut without = TimelineSurface::new();
        without.set_viewport(30, 80);
        without.rebuild(&case, &expanded, &FxHashMap::default(), &Theme::dark(), 80);

        let mut details = FxHashMap::default();
        details.insert(
            (case.id.clone(), year),
            vec!["3,200 citations · no public code".to_string(); 3],
        );
        let mut with = TimelineSurface::new();
        with.set_viewport(30, 80);
        with.rebuild(&case, &expanded, &details, &Theme::dark(), 80);

        // placeholder row is replaced by three signal rows
        let h_without = without.measure_group(0).map(|r| r.height).unwrap_or(0.0);
        let h_with = with.measure_group(0).map(|r| r.height).unwrap_or(0.0);
        assert_eq!(h_with, h_without + 2.0);
    }
}

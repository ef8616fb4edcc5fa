//! Year and case navigation wiring
//!
//! Keys and mouse wheel both end in the controller: discrete keys go through
//! `request_index`, wheel motion through `handle_wheel` so the accumulator
//! and fast path apply. The selected year mirrors whatever the controller
//! commits.

use super::{App, Focus};
use traceline_core::{WheelDelta, WheelOutcome};

impl App {
    /// Group index of the currently selected year.
    pub fn year_index(&self) -> usize {
        self.controller.timeline().index_for_year(self.selected_year)
    }

    /// Navigate to a year by group index (the external-slider path).
    pub fn select_year_index(&mut self, index: usize) {
        let timeline = self.controller.timeline();
        let index = timeline.clamp_index(index);
        let Some(year) = timeline.year_at(index) else {
            return;
        };
        self.selected_year = year;
        self.controller.request_index(index, self.animation_enabled);
    }

    pub fn next_year(&mut self) {
        self.select_year_index(self.year_index().saturating_add(1));
    }

    pub fn prev_year(&mut self) {
        self.select_year_index(self.year_index().saturating_sub(1));
    }

    pub fn first_year(&mut self) {
        self.select_year_index(0);
    }

    pub fn last_year(&mut self) {
        let last = self.controller.timeline().len().saturating_sub(1);
        self.select_year_index(last);
    }

    /// Expand or collapse the selected year group.
    pub fn toggle_expanded(&mut self) {
        let year = self.selected_year;
        let id = self.current_case().id.clone();
        let set = self.expanded.entry(id).or_default();
        let now_expanded = if set.contains(&year) {
            set.remove(&year);
            false
        } else {
            set.insert(year);
            true
        };
        if now_expanded {
            self.request_detail(year);
        }
        self.surface.invalidate();
        self.controller.notify_layout_changed();
    }

    pub fn select_case(&mut self, index: usize) {
        if self.dataset.cases.is_empty() {
            return;
        }
        let index = index.min(self.dataset.cases.len() - 1);
        if index == self.selected_case {
            return;
        }
        self.selected_case = index;
        let case = &self.dataset.cases[index];
        self.selected_year = case.span().map(|(first, _)| first).unwrap_or(0);
        self.controller.switch_case(case.timeline());
        self.surface.invalidate();
    }

    pub fn next_case(&mut self) {
        self.select_case(self.selected_case.saturating_add(1));
    }

    pub fn prev_case(&mut self) {
        self.select_case(self.selected_case.saturating_sub(1));
    }

    /// Route a mouse wheel notch by pointer position: the timeline viewport
    /// feeds the controller, the case list steps the case selection.
    pub fn handle_scroll(&mut self, down: bool, column: u16, row: u16) {
        if hit(self.timeline_area, column, row) {
            let notch = if down { 3.0 } else { -3.0 };
            self.feed_wheel(WheelDelta::lines(notch));
        } else if hit(self.case_list_area, column, row) {
            if down {
                self.next_case();
            } else {
                self.prev_case();
            }
        }
    }

    /// Whole-viewport jumps ride the same wheel path in page units.
    pub fn page_forward(&mut self) {
        self.feed_wheel(WheelDelta::pages(1.0));
    }

    pub fn page_back(&mut self) {
        self.feed_wheel(WheelDelta::pages(-1.0));
    }

    /// Re-anchor the current year (imperative re-navigation).
    pub fn renavigate(&mut self) {
        self.controller.renavigate();
    }

    pub fn toggle_focus(&mut self) {
        if !self.case_panel_visible {
            self.focus = Focus::Timeline;
            return;
        }
        self.focus = match self.focus {
            Focus::Cases => Focus::Timeline,
            Focus::Timeline => Focus::Cases,
        };
    }

    pub(crate) fn feed_wheel(&mut self, delta: WheelDelta) {
        match self.controller.handle_wheel(delta) {
            WheelOutcome::Consumed {
                requested: Some(index),
            } => {
                if let Some(year) = self.controller.timeline().year_at(index) {
                    self.selected_year = year;
                }
            }
            // consumed without a released step, or stale measurements:
            // nothing for the host to mirror
            WheelOutcome::Consumed { requested: None } | WheelOutcome::Ignored => {}
        }
    }
}

fn hit(area: Option<(u16, u16, u16, u16)>, column: u16, row: u16) -> bool {
    let Some((x, y, width, height)) = area else {
        return false;
    };
    column >= x && column < x + width && row >= y && row < y + height
}

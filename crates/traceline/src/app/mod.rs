//! Application state and logic

use crate::config::Config;
use crate::data::{CaseStudy, Dataset};
use crate::theme::Theme;
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use std::sync::mpsc::{Receiver, Sender};
use std::time::Instant;
use traceline_core::{CaseId, ScrollController, Timeline};

mod loader;
mod navigation;
mod surface;
#[cfg(test)]
mod tests;
mod types;

pub use surface::TimelineSurface;
pub(crate) use surface::wrap_to_width;
pub use types::Focus;
use types::{DetailRequest, DetailResponse};

/// The main application state
pub struct App {
    /// Loaded case studies, in dataset order
    pub dataset: Dataset,
    /// Currently selected case index
    pub selected_case: usize,
    /// Selected year within the current case
    pub selected_year: i32,
    /// Expanded years, per case id
    expanded: FxHashMap<String, BTreeSet<i32>>,
    /// Loaded per-year signal lines
    details: FxHashMap<(String, i32), Vec<String>>,
    /// The scroll reconciler; sole owner of the scroll position
    pub controller: ScrollController,
    /// Rendered layout of the current case's year groups
    pub surface: TimelineSurface,
    /// Input focus
    pub focus: Focus,
    /// Whether the case panel is visible
    pub case_panel_visible: bool,
    /// Whether navigation commits animate (false = every commit snaps)
    pub animation_enabled: bool,
    /// Show the timeline scrollbar
    pub scrollbar_visible: bool,
    /// Whether the help popover is open
    pub show_help: bool,
    /// Whether to quit
    pub should_quit: bool,
    /// Resolved theme
    pub theme: Theme,
    /// Timeline viewport area from the last draw (x, y, width, height)
    pub timeline_area: Option<(u16, u16, u16, u16)>,
    /// Case list area from the last draw (x, y, width, height)
    pub case_list_area: Option<(u16, u16, u16, u16)>,
    loader_tx: Option<Sender<DetailRequest>>,
    loader_rx: Option<Receiver<DetailResponse>>,
    /// Last frame timestamp for spring integration
    last_frame: Instant,
}

impl App {
    pub fn new(dataset: Dataset, config: &Config) -> Self {
        let timeline = dataset
            .cases
            .first()
            .map(CaseStudy::timeline)
            .unwrap_or_else(|| Timeline::empty(CaseId::from("none")));
        let selected_year = timeline.year_at(0).unwrap_or(0);
        let (loader_tx, loader_rx) = loader::spawn(dataset.clone());

        Self {
            dataset,
            selected_case: 0,
            selected_year,
            expanded: FxHashMap::default(),
            details: FxHashMap::default(),
            controller: ScrollController::new(timeline, config.tuning()),
            surface: TimelineSurface::new(),
            focus: Focus::Timeline,
            case_panel_visible: config.ui.case_panel,
            animation_enabled: config.playback.animation,
            scrollbar_visible: config.ui.scrollbar,
            show_help: false,
            should_quit: false,
            theme: Theme::resolve(config.is_light_mode()),
            timeline_area: None,
            case_list_area: None,
            loader_tx: Some(loader_tx),
            loader_rx: Some(loader_rx),
            last_frame: Instant::now(),
        }
    }

    pub fn current_case(&self) -> &CaseStudy {
        &self.dataset.cases[self.selected_case]
    }

    pub fn case_count(&self) -> usize {
        self.dataset.cases.len()
    }

    pub fn is_expanded(&self, year: i32) -> bool {
        self.expanded
            .get(&self.current_case().id)
            .is_some_and(|set| set.contains(&year))
    }

    /// Rebuild the line cache if it went stale and record this draw's
    /// geometry. Called from the draw path with the timeline inner area.
    pub fn ensure_layout(&mut self, rows: u16, width: u16) {
        self.surface.set_viewport(rows, width);
        if !self.surface.is_valid() {
            let case = &self.dataset.cases[self.selected_case];
            let expanded = self.expanded.get(&case.id).cloned().unwrap_or_default();
            self.surface
                .rebuild(case, &expanded, &self.details, &self.theme, width);
        }
        self.surface.set_position(self.controller.position());
    }

    /// Advance one frame after drawing.
    pub fn on_frame(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(dt);
    }

    /// Frame advancement with an explicit timestep.
    pub(crate) fn advance(&mut self, dt: f32) {
        self.drain_loader();
        if let Some(committed) = self.controller.on_frame(&self.surface, dt) {
            if let Some(year) = self.controller.timeline().year_at(committed) {
                self.selected_year = year;
            }
        }
    }

    fn drain_loader(&mut self) {
        let Some(rx) = &self.loader_rx else {
            return;
        };
        let mut changed_current = false;
        loop {
            let Ok(response) = rx.try_recv() else {
                break;
            };
            let for_current = response.case_id == self.dataset.cases[self.selected_case].id;
            let year = response.year;
            self.details
                .insert((response.case_id, year), response.lines);
            if for_current && self.is_expanded(year) {
                changed_current = true;
            }
        }
        if changed_current {
            self.surface.invalidate();
            self.controller.notify_layout_changed();
        }
    }

    pub(crate) fn request_detail(&mut self, year: i32) {
        let key = (self.current_case().id.clone(), year);
        if self.details.contains_key(&key) {
            return;
        }
        if let Some(tx) = &self.loader_tx {
            let _ = tx.send(DetailRequest {
                case_id: key.0,
                year,
            });
        }
    }

    #[cfg(test)]
    pub(crate) fn detail_loaded(&self, year: i32) -> bool {
        self.details
            .contains_key(&(self.current_case().id.clone(), year))
    }
}
